//! Exchange port adapter over the Binance futures REST client.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use orderbot_domain::{OrderRequest, OrderSide, Price, Symbol, SymbolFilters};
use orderbot_exec::{ExchangePort, ExecError, OrderConfirmation};

use crate::binance_futures::{
    BinanceFuturesClient, BinanceOrderResponse, BinanceRestError, INVALID_SYMBOL_CODE,
};

/// Implements [`ExchangePort`] against Binance USDⓈ-M futures.
pub struct BinanceFuturesAdapter {
    client: BinanceFuturesClient,
}

impl BinanceFuturesAdapter {
    /// Wrap a configured client.
    pub fn new(client: BinanceFuturesClient) -> Self {
        Self { client }
    }

    /// Underlying REST client.
    pub fn client(&self) -> &BinanceFuturesClient {
        &self.client
    }
}

#[async_trait]
impl ExchangePort for BinanceFuturesAdapter {
    async fn health_check(&self) -> Result<(), ExecError> {
        self.client.ping().await.map_err(|e| map_error(e, None))
    }

    async fn get_symbol_filters(&self, symbol: &Symbol) -> Result<SymbolFilters, ExecError> {
        self.client
            .get_symbol_filters(symbol.as_str())
            .await
            .map_err(|e| map_error(e, Some(symbol)))
    }

    async fn get_price(&self, symbol: &Symbol) -> Result<Price, ExecError> {
        self.client.get_price(symbol.as_str()).await.map_err(|e| map_error(e, Some(symbol)))
    }

    async fn submit_order(&self, request: &OrderRequest) -> Result<OrderConfirmation, ExecError> {
        let response = self
            .client
            .place_order(request)
            .await
            .map_err(|e| map_error(e, Some(&request.symbol)))?;

        debug!(order_id = response.order_id, status = %response.status, "Order acknowledged");
        to_confirmation(response)
    }
}

/// Map a REST error to the execution error taxonomy.
///
/// `-1121` (invalid symbol) becomes `UnknownSymbol` when the symbol is known.
fn map_error(err: BinanceRestError, symbol: Option<&Symbol>) -> ExecError {
    match err {
        BinanceRestError::SymbolNotFound(s) => ExecError::UnknownSymbol(s),
        BinanceRestError::ApiError { code, msg } => match symbol {
            Some(symbol) if code == INVALID_SYMBOL_CODE => {
                ExecError::UnknownSymbol(symbol.to_string())
            },
            _ => ExecError::ExchangeRejected { code, message: msg },
        },
        BinanceRestError::Timeout(elapsed) => {
            ExecError::Timeout(format!("no response from exchange within {:?}", elapsed))
        },
        other => ExecError::Exchange(other.to_string()),
    }
}

fn to_confirmation(response: BinanceOrderResponse) -> Result<OrderConfirmation, ExecError> {
    let side: OrderSide = response
        .side
        .parse()
        .map_err(|e| ExecError::Exchange(format!("Unexpected order side in response: {}", e)))?;

    let update_time =
        DateTime::<Utc>::from_timestamp_millis(response.update_time).unwrap_or_else(Utc::now);

    Ok(OrderConfirmation {
        order_id: response.order_id,
        client_order_id: response.client_order_id,
        symbol: response.symbol,
        side,
        order_type: response.order_type,
        status: response.status,
        orig_qty: response.orig_qty.normalize(),
        price: response.price.normalize(),
        // Binance reports "0" for orders without a trigger
        stop_price: response.stop_price.filter(|p| *p > Decimal::ZERO).map(|p| p.normalize()),
        update_time,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::time::Duration;

    fn response(order_type: &str, stop_price: Option<Decimal>) -> BinanceOrderResponse {
        BinanceOrderResponse {
            symbol: "BTCUSDT".to_string(),
            order_id: 42,
            client_order_id: "abc".to_string(),
            price: dec!(0.00),
            avg_price: Some(dec!(0.00)),
            orig_qty: dec!(0.0020),
            executed_qty: dec!(0),
            stop_price,
            status: "NEW".to_string(),
            time_in_force: Some("GTC".to_string()),
            side: "SELL".to_string(),
            order_type: order_type.to_string(),
            update_time: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_api_error_maps_to_exchange_rejected() {
        let err = map_error(
            BinanceRestError::ApiError { code: -2019, msg: "Margin is insufficient.".to_string() },
            None,
        );
        assert!(matches!(err, ExecError::ExchangeRejected { code: -2019, .. }));
    }

    #[test]
    fn test_invalid_symbol_code_maps_to_unknown_symbol() {
        let symbol = Symbol::new("FOOUSDT").unwrap();
        let err = map_error(
            BinanceRestError::ApiError { code: -1121, msg: "Invalid symbol.".to_string() },
            Some(&symbol),
        );
        assert!(matches!(err, ExecError::UnknownSymbol(ref s) if s == "FOOUSDT"));
    }

    #[test]
    fn test_transport_errors() {
        let err = map_error(BinanceRestError::Timeout(Duration::from_secs(10)), None);
        assert!(matches!(err, ExecError::Timeout(_)));

        let err = map_error(BinanceRestError::RequestFailed("connection refused".to_string()), None);
        assert!(matches!(err, ExecError::Exchange(ref m) if m.contains("connection refused")));

        let err = map_error(BinanceRestError::SymbolNotFound("FOOUSDT".to_string()), None);
        assert!(matches!(err, ExecError::UnknownSymbol(_)));
    }

    #[test]
    fn test_confirmation_from_market_response() {
        let confirmation = to_confirmation(response("MARKET", Some(dec!(0)))).unwrap();

        assert_eq!(confirmation.order_id, 42);
        assert_eq!(confirmation.side, OrderSide::Sell);
        assert_eq!(confirmation.orig_qty.to_string(), "0.002");
        assert_eq!(confirmation.stop_price, None);
        assert_eq!(confirmation.update_time.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_confirmation_keeps_stop_price() {
        let confirmation = to_confirmation(response("STOP", Some(dec!(29000.00)))).unwrap();
        assert_eq!(confirmation.stop_price, Some(dec!(29000)));
        assert_eq!(confirmation.order_type, "STOP");
    }
}
