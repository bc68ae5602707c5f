//! OrderSubmitter: turns one order request into at most one exchange order.
//!
//! # Flow
//!
//! ```text
//! health check → symbol filters → reference price → validate → submit
//! ```
//!
//! Validation happens client-side so a too-small or misaligned order never
//! reaches the order endpoint. Nothing is retried.

use std::sync::Arc;
use tracing::{debug, info, warn};

use orderbot_domain::{validate, OrderRequest, Price, SymbolFilters, ValidationResult};

use crate::error::{ExecError, ExecResult};
use crate::ports::{ExchangePort, OrderConfirmation};

// =============================================================================
// Results
// =============================================================================

/// An order that passed validation and is ready to send.
#[derive(Debug, Clone)]
pub struct PreparedOrder {
    /// Request to send (quantity already adjusted if needed)
    pub request: OrderRequest,
    /// Filters the quantity was checked against
    pub filters: SymbolFilters,
    /// Price the notional was computed with
    pub reference_price: Price,
    /// Validation outcome (`Accepted` or `Adjusted`)
    pub validation: ValidationResult,
}

/// A submitted order.
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    /// What was sent and why
    pub prepared: PreparedOrder,
    /// Exchange acknowledgement
    pub confirmation: OrderConfirmation,
}

// =============================================================================
// Order Submitter
// =============================================================================

/// Validates and submits single orders through an exchange port.
pub struct OrderSubmitter<E: ExchangePort> {
    exchange: Arc<E>,
}

impl<E: ExchangePort> OrderSubmitter<E> {
    /// Create a new submitter.
    pub fn new(exchange: Arc<E>) -> Self {
        Self { exchange }
    }

    /// Run every check without placing the order.
    ///
    /// Market orders are validated against the current ticker price, limit
    /// and stop-limit orders against their limit price.
    pub async fn prepare(&self, request: &OrderRequest) -> ExecResult<PreparedOrder> {
        self.exchange.health_check().await?;
        debug!("Exchange reachable");

        let filters = self.exchange.get_symbol_filters(&request.symbol).await?;
        debug!(symbol = %request.symbol, %filters, "Fetched symbol filters");

        let reference_price = match request.reference_price() {
            Some(price) => price,
            None => {
                let price = self.exchange.get_price(&request.symbol).await?;
                debug!(symbol = %request.symbol, %price, "Fetched market price");
                price
            },
        };

        let validation = validate(request.quantity, reference_price, &filters, request.auto_adjust);

        let request = match validation {
            ValidationResult::Accepted(_) => request.clone(),
            ValidationResult::Adjusted { original, adjusted } => {
                info!(
                    symbol = %request.symbol,
                    %original,
                    %adjusted,
                    min_notional = %filters.min_notional(),
                    "Auto-adjusting quantity to meet min notional"
                );
                request.with_quantity(adjusted)
            },
            ValidationResult::Rejected(rejection) => {
                warn!(symbol = %request.symbol, %rejection, "Order rejected by validation");
                return Err(ExecError::from_rejection(&request.symbol, rejection));
            },
        };

        Ok(PreparedOrder { request, filters, reference_price, validation })
    }

    /// Validate and place the order.
    pub async fn submit(&self, request: &OrderRequest) -> ExecResult<SubmissionOutcome> {
        let prepared = self.prepare(request).await?;

        info!(
            order = %prepared.request,
            client_order_id = %prepared.request.client_order_id,
            "Submitting order"
        );

        let confirmation = self.exchange.submit_order(&prepared.request).await?;

        info!(
            order_id = confirmation.order_id,
            status = %confirmation.status,
            "Order placed successfully"
        );

        Ok(SubmissionOutcome { prepared, confirmation })
    }
}

// =============================================================================
// Tests
// =============================================================================
