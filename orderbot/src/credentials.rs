//! API credential loading.
//!
//! Each value comes from the environment first
//! (`BINANCE_TESTNET_API_KEY` / `BINANCE_TESTNET_API_SECRET`), then from a JSON
//! file of the form `{"api_key": "...", "api_secret": "..."}`. Values are
//! trimmed and empty values count as missing.
//!
//! Credentials must never be logged.

use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{AppError, AppResult};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "BINANCE_TESTNET_API_KEY";
/// Environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BINANCE_TESTNET_API_SECRET";

/// API key and secret.
pub struct Credentials {
    /// API key (public identifier)
    pub api_key: String,
    /// API secret, zeroed on drop
    pub api_secret: Zeroizing<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Default, Deserialize, Zeroize, ZeroizeOnDrop)]
struct CredentialsFile {
    api_key: Option<String>,
    api_secret: Option<String>,
}

impl Credentials {
    /// Load from the process environment, falling back to `file`.
    pub fn load(file: &Path) -> AppResult<Self> {
        Self::resolve(env::var(API_KEY_VAR).ok(), env::var(API_SECRET_VAR).ok(), file)
    }

    /// Combine explicit values with the fallback file.
    ///
    /// The file is only read when a value is missing.
    pub fn resolve(
        env_key: Option<String>,
        env_secret: Option<String>,
        file: &Path,
    ) -> AppResult<Self> {
        let env_key = non_empty(env_key);
        let env_secret = non_empty(env_secret).map(Zeroizing::new);

        let mut from_file = if env_key.is_some() && env_secret.is_some() {
            CredentialsFile::default()
        } else {
            read_file(file)?
        };

        let api_key = env_key
            .or_else(|| non_empty(from_file.api_key.take()))
            .ok_or_else(|| missing(API_KEY_VAR, "api_key", file))?;

        let api_secret = env_secret
            .or_else(|| non_empty(from_file.api_secret.take()).map(Zeroizing::new))
            .ok_or_else(|| missing(API_SECRET_VAR, "api_secret", file))?;

        Ok(Self { api_key, api_secret })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn missing(var: &str, field: &str, file: &Path) -> AppError {
    AppError::Config(format!(
        "API credentials not found: set {} or add \"{}\" to {}",
        var,
        field,
        file.display()
    ))
}

fn read_file(path: &Path) -> AppResult<CredentialsFile> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => Zeroizing::new(raw),
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(CredentialsFile::default()),
        Err(e) => {
            return Err(AppError::Config(format!(
                "Cannot read credentials file {}: {}",
                path.display(),
                e
            )))
        },
    };

    // Parse errors never echo file contents
    serde_json::from_str(&raw).map_err(|e| {
        AppError::Config(format!(
            "Credentials file {} is not valid JSON (line {}, column {})",
            path.display(),
            e.line(),
            e.column()
        ))
    })
}

// =============================================================================
// Tests
// =============================================================================
