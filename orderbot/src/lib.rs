//! orderbot Library
//!
//! Single-shot order submission to the Binance USDⓈ-M futures testnet.
//!
//! # Architecture
//!
//! ```text
//! CLI → Config + Credentials → OrderSubmitter → BinanceFuturesAdapter → Exchange
//!                                   ↓
//!                          validate (LOT_SIZE, MIN_NOTIONAL)
//! ```
//!
//! # Components
//!
//! - **CLI**: Argument parsing (clap)
//! - **Config**: Environment-based configuration
//! - **Credentials**: API key/secret from environment or JSON file
//! - **Logging**: Console + log file tracing subscriber
//! - **Output**: Result block rendering
//! - **App**: Ties everything together, maps errors to exit codes

#![warn(clippy::all)]

pub mod app;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod logging;
pub mod output;

// Re-exports for convenience
pub use app::{connect, execute, run};
pub use cli::Args;
pub use config::Config;
pub use credentials::Credentials;
pub use error::{AppError, AppResult, EXIT_CONFIG, EXIT_EXCHANGE, EXIT_OK, EXIT_VALIDATION};
