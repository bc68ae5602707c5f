//! Execution layer port definitions.
//!
//! Ports define the interface to the exchange. Adapters implement them for
//! specific venues (Binance futures, stub, etc.).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderbot_domain::{OrderRequest, OrderSide, Price, Symbol, SymbolFilters};

use crate::error::ExecError;

// =============================================================================
// Exchange Port
// =============================================================================

/// Port for the exchange operations one order submission needs.
///
/// Implementations:
/// - `StubExchange` - For testing (configurable filters, prices, failures)
/// - `BinanceFuturesAdapter` - Binance USDⓈ-M futures REST (orderbot-connectors)
#[async_trait]
pub trait ExchangePort: Send + Sync {
    /// Check the exchange is reachable.
    async fn health_check(&self) -> Result<(), ExecError>;

    /// Fetch LOT_SIZE and MIN_NOTIONAL filters for a symbol.
    ///
    /// # Errors
    ///
    /// `ExecError::UnknownSymbol` if the symbol is not listed.
    async fn get_symbol_filters(&self, symbol: &Symbol) -> Result<SymbolFilters, ExecError>;

    /// Get current price for a symbol.
    async fn get_price(&self, symbol: &Symbol) -> Result<Price, ExecError>;

    /// Submit an order exactly as given.
    ///
    /// The quantity is expected to be validated already.
    ///
    /// # Errors
    ///
    /// `ExecError::ExchangeRejected` on any exchange-side rejection.
    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ExecError>;
}

/// Exchange acknowledgement of a submitted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Exchange-assigned order ID
    pub order_id: u64,
    /// Client order ID echoed back
    pub client_order_id: String,
    /// Symbol
    pub symbol: String,
    /// Side
    pub side: OrderSide,
    /// Exchange order type (e.g. "MARKET", "LIMIT", "STOP")
    pub order_type: String,
    /// Exchange order status (e.g. "NEW", "FILLED")
    pub status: String,
    /// Quantity accepted by the exchange
    pub orig_qty: Decimal,
    /// Limit price (zero for market orders)
    pub price: Decimal,
    /// Trigger price, for stop orders
    pub stop_price: Option<Decimal>,
    /// When the exchange last updated the order
    pub update_time: DateTime<Utc>,
}

// =============================================================================
// Tests
// =============================================================================
