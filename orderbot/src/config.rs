//! Runtime configuration.
//!
//! Loads configuration from environment variables with sensible defaults.
//! A `.env` file in the working directory is loaded first when present.

use crate::error::{AppError, AppResult};
use orderbot_connectors::FUTURES_TESTNET_URL;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default file the log is mirrored to.
pub const DEFAULT_LOG_FILE: &str = "bot_execution.log";

/// Default JSON credentials file.
pub const DEFAULT_CREDENTIALS_FILE: &str = "credentials.json";

/// Largest recvWindow Binance accepts, in milliseconds.
const MAX_RECV_WINDOW_MS: u64 = 60_000;

// =============================================================================
// Configuration
// =============================================================================

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Exchange REST base URL
    pub base_url: String,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// recvWindow for signed requests (ms)
    pub recv_window_ms: u64,
    /// File the log is mirrored to (`None` disables it)
    pub log_file: Option<PathBuf>,
    /// Fallback credentials file
    pub credentials_file: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ORDERBOT_BASE_URL`: REST base URL (default: futures testnet)
    /// - `ORDERBOT_REQUEST_TIMEOUT_SECS`: request timeout (default: 10)
    /// - `ORDERBOT_RECV_WINDOW_MS`: signed request window (default: 5000)
    /// - `ORDERBOT_LOG_FILE`: log file (default: bot_execution.log, empty disables)
    /// - `ORDERBOT_CREDENTIALS_FILE`: credentials JSON (default: credentials.json)
    pub fn from_env() -> AppResult<Self> {
        // Load .env file if present (ignore errors)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let base_url = match lookup("ORDERBOT_BASE_URL").map(|v| v.trim().to_string()) {
            Some(url) if !url.is_empty() => {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(AppError::Config(format!("Invalid ORDERBOT_BASE_URL: {}", url)));
                }
                url
            },
            _ => defaults.base_url,
        };

        let timeout_secs = load_u64(&lookup, "ORDERBOT_REQUEST_TIMEOUT_SECS")?
            .unwrap_or(defaults.request_timeout.as_secs());
        if timeout_secs == 0 {
            return Err(AppError::Config(
                "ORDERBOT_REQUEST_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }

        let recv_window_ms =
            load_u64(&lookup, "ORDERBOT_RECV_WINDOW_MS")?.unwrap_or(defaults.recv_window_ms);
        if recv_window_ms == 0 || recv_window_ms > MAX_RECV_WINDOW_MS {
            return Err(AppError::Config(format!(
                "ORDERBOT_RECV_WINDOW_MS must be between 1 and {}, got {}",
                MAX_RECV_WINDOW_MS, recv_window_ms
            )));
        }

        let log_file = match lookup("ORDERBOT_LOG_FILE") {
            Some(path) if path.trim().is_empty() => None,
            Some(path) => Some(PathBuf::from(path.trim())),
            None => defaults.log_file,
        };

        let credentials_file = lookup("ORDERBOT_CREDENTIALS_FILE")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.credentials_file);

        Ok(Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            recv_window_ms,
            log_file,
            credentials_file,
        })
    }

    /// Create test configuration (local base URL, no log file).
    pub fn test() -> Self {
        Self {
            base_url: "http://127.0.0.1:0".to_string(),
            request_timeout: Duration::from_secs(1),
            log_file: None,
            ..Self::default()
        }
    }
}

fn load_u64<F>(lookup: &F, key: &str) -> AppResult<Option<u64>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) if !val.trim().is_empty() => val
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| AppError::Config(format!("Invalid {} value: {}", key, val))),
        _ => Ok(None),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: FUTURES_TESTNET_URL.to_string(),
            request_timeout: Duration::from_secs(10),
            recv_window_ms: 5000,
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            credentials_file: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
