//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use orderbot_domain::{
    DomainError, OrderKind, OrderRequest, OrderSide, OrderType, Price, Quantity, Symbol,
    TimeInForce,
};

/// Submit one order to the Binance USDⓈ-M futures testnet.
#[derive(Debug, Clone, Parser)]
#[command(name = "orderbot", version, about)]
pub struct Args {
    /// Trading pair (e.g. BTCUSDT)
    #[arg(long)]
    pub symbol: String,

    /// Order side: BUY or SELL
    #[arg(long)]
    pub side: OrderSide,

    /// Order type: MARKET, LIMIT or STOP_LIMIT
    #[arg(long = "type", value_name = "TYPE")]
    pub order_type: OrderType,

    /// Order quantity (base asset)
    #[arg(long)]
    pub quantity: Quantity,

    /// Limit price (required for LIMIT and STOP_LIMIT)
    #[arg(long)]
    pub price: Option<Price>,

    /// Trigger price (required for STOP_LIMIT)
    #[arg(long)]
    pub stop_price: Option<Price>,

    /// Round the quantity up to the minimum notional instead of rejecting it
    #[arg(long, default_value_t = false)]
    pub auto_adjust: bool,

    /// Time in force for LIMIT and STOP_LIMIT: GTC, IOC or FOK
    #[arg(long, default_value = "GTC")]
    pub time_in_force: TimeInForce,

    /// JSON file with api_key / api_secret, used when the environment has none
    #[arg(long)]
    pub credentials_file: Option<PathBuf>,

    /// Validate against live filters but do not place the order
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

impl Args {
    /// Build the order request.
    ///
    /// # Errors
    /// `DomainError` for a malformed symbol or a missing price.
    pub fn to_request(&self) -> Result<OrderRequest, DomainError> {
        let symbol = Symbol::new(&self.symbol)?;
        let kind =
            OrderKind::from_parts(self.order_type, self.price, self.stop_price, self.time_in_force)?;

        Ok(OrderRequest::new(symbol, self.side, kind, self.quantity, self.auto_adjust))
    }
}

// =============================================================================
// Tests
// =============================================================================
