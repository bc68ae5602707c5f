//! orderbot Execution Layer
//!
//! Single-shot order submission over an exchange port.
//!
//! # Architecture
//!
//! ```text
//! OrderRequest → OrderSubmitter → ExchangePort (filters, price) → validate → ExchangePort (submit)
//! ```
//!
//! # Components
//!
//! - **Ports**: Trait defining the exchange interface
//! - **Submitter**: Orchestrates lookup, validation and submission
//! - **Stub**: Test implementation of the exchange port
//!
//! # Example
//!
//! ```rust,ignore
//! use orderbot_exec::{OrderSubmitter, StubExchange};
//! use std::sync::Arc;
//!
//! let exchange = Arc::new(StubExchange::new());
//! let submitter = OrderSubmitter::new(exchange);
//! let outcome = submitter.submit(&request).await?;
//! ```

#![warn(clippy::all)]

pub mod error;
pub mod ports;
pub mod stub;
pub mod submitter;

// Re-exports for convenience
pub use error::{ExecError, ExecResult};
pub use ports::{ExchangePort, OrderConfirmation};
pub use stub::StubExchange;
pub use submitter::{OrderSubmitter, PreparedOrder, SubmissionOutcome};
