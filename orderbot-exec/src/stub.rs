//! Stub implementation for testing.
//!
//! Simulates the exchange without making real API calls: listed symbols
//! have fixed filters and prices, submitted orders are recorded.

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::RwLock;

use orderbot_domain::{OrderRequest, Price, Symbol, SymbolFilters};

use crate::error::ExecError;
use crate::ports::{ExchangePort, OrderConfirmation};

// =============================================================================
// Stub Exchange
// =============================================================================

#[derive(Default)]
struct StubState {
    filters: HashMap<String, SymbolFilters>,
    prices: HashMap<String, Decimal>,
    submitted: Vec<OrderRequest>,
    price_lookups: usize,
    order_counter: u64,
    unreachable: bool,
    reject_next: Option<(i64, String)>,
}

/// Stub exchange for testing.
///
/// Accepts every order for a listed symbol with status `NEW`, unless a
/// rejection has been queued with [`StubExchange::reject_next`].
#[derive(Default)]
pub struct StubExchange {
    state: RwLock<StubState>,
}

impl StubExchange {
    /// Create an empty stub exchange (no symbols listed).
    pub fn new() -> Self {
        Self::default()
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, StubState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, StubState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// List a symbol with its filters and current price.
    pub fn list_symbol(&self, symbol: &str, filters: SymbolFilters, price: Decimal) {
        let mut state = self.write();
        state.filters.insert(symbol.to_string(), filters);
        state.prices.insert(symbol.to_string(), price);
    }

    /// Set price for a listed symbol.
    pub fn set_price(&self, symbol: &str, price: Decimal) {
        self.write().prices.insert(symbol.to_string(), price);
    }

    /// Make every call fail as if the network were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.write().unreachable = unreachable;
    }

    /// Reject the next submitted order with the given exchange code/message.
    pub fn reject_next(&self, code: i64, message: &str) {
        self.write().reject_next = Some((code, message.to_string()));
    }

    /// Orders accepted so far, in submission order.
    pub fn submitted_orders(&self) -> Vec<OrderRequest> {
        self.read().submitted.clone()
    }

    /// Number of ticker price lookups served.
    pub fn price_lookups(&self) -> usize {
        self.read().price_lookups
    }

    fn check_reachable(&self) -> Result<(), ExecError> {
        if self.read().unreachable {
            return Err(ExecError::Exchange("Simulated connection failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ExchangePort for StubExchange {
    async fn health_check(&self) -> Result<(), ExecError> {
        self.check_reachable()
    }

    async fn get_symbol_filters(&self, symbol: &Symbol) -> Result<SymbolFilters, ExecError> {
        self.check_reachable()?;
        self.read()
            .filters
            .get(symbol.as_str())
            .copied()
            .ok_or_else(|| ExecError::UnknownSymbol(symbol.to_string()))
    }

    async fn get_price(&self, symbol: &Symbol) -> Result<Price, ExecError> {
        self.check_reachable()?;
        let mut state = self.write();
        state.price_lookups += 1;
        let price = state
            .prices
            .get(symbol.as_str())
            .copied()
            .ok_or_else(|| ExecError::UnknownSymbol(symbol.to_string()))?;
        Ok(Price::new(price)?)
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ExecError> {
        self.check_reachable()?;
        let mut state = self.write();

        if let Some((code, message)) = state.reject_next.take() {
            return Err(ExecError::ExchangeRejected { code, message });
        }

        if !state.filters.contains_key(request.symbol.as_str()) {
            return Err(ExecError::ExchangeRejected {
                code: -1121,
                message: "Invalid symbol.".to_string(),
            });
        }

        state.order_counter += 1;
        let order_id = state.order_counter;
        state.submitted.push(request.clone());

        Ok(OrderConfirmation {
            order_id,
            client_order_id: request.client_order_id.clone(),
            symbol: request.symbol.to_string(),
            side: request.side,
            order_type: request.order_type().to_string(),
            status: "NEW".to_string(),
            orig_qty: request.quantity.as_decimal(),
            price: request.kind.limit_price().map(|p| p.as_decimal()).unwrap_or_default(),
            stop_price: request.kind.stop_price().map(|p| p.as_decimal()),
            update_time: Utc::now(),
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use orderbot_domain::{OrderKind, OrderSide, Quantity};
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_stub_unknown_symbol() {
        let exchange = StubExchange::new();
        let err = exchange
            .get_symbol_filters(&Symbol::new("DOGEUSDT").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ExecError::UnknownSymbol(ref s) if s == "DOGEUSDT"));
    }

    #[tokio::test]
    async fn test_stub_reject_next_is_one_shot() {
        let exchange = StubExchange::new();
        exchange.list_symbol(
            "BTCUSDT",
            SymbolFilters::new(dec!(100), dec!(0.001), dec!(0.001)).unwrap(),
            dec!(50000),
        );
        exchange.reject_next(-2019, "Margin is insufficient.");

        let request = OrderRequest::new(
            Symbol::new("BTCUSDT").unwrap(),
            OrderSide::Buy,
            OrderKind::Market,
            Quantity::new(dec!(0.002)).unwrap(),
            false,
        );

        assert!(exchange.submit_order(&request).await.is_err());
        let confirmation = exchange.submit_order(&request).await.unwrap();
        assert_eq!(confirmation.order_id, 1);
        assert_eq!(confirmation.status, "NEW");
        assert_eq!(exchange.submitted_orders().len(), 1);
    }
}
