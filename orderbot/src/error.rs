//! Application error types.

use orderbot_domain::DomainError;
use orderbot_exec::ExecError;
use thiserror::Error;

/// Exit code: order placed (or dry run passed).
pub const EXIT_OK: i32 = 0;
/// Exit code: exchange or network failure.
pub const EXIT_EXCHANGE: i32 = 1;
/// Exit code: configuration or argument error.
pub const EXIT_CONFIG: i32 = 2;
/// Exit code: order rejected by client-side validation.
pub const EXIT_VALIDATION: i32 = 3;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error (env, credentials, log file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid order arguments
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Lookup, validation or submission failure
    #[error("{0}")]
    Exec(#[from] ExecError),
}

impl AppError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Domain(_) => EXIT_CONFIG,
            AppError::Exec(e) if e.is_validation() => EXIT_VALIDATION,
            AppError::Exec(ExecError::Domain(_)) => EXIT_CONFIG,
            AppError::Exec(_) => EXIT_EXCHANGE,
        }
    }
}

/// Result type for application operations.
pub type AppResult<T> = Result<T, AppError>;
