//! Binance USDⓈ-M Futures REST API Client
//!
//! Provides REST API integration for:
//! - Connectivity check (`/fapi/v1/ping`)
//! - Symbol filters from exchange metadata (`/fapi/v1/exchangeInfo`)
//! - Ticker price (`/fapi/v1/ticker/price`)
//! - Order placement (`/fapi/v1/order`)
//!
//! # Authentication
//!
//! Binance uses API key + secret with HMAC SHA256 signatures.
//! All signed requests require:
//! - `X-MBX-APIKEY` header
//! - `signature` query parameter (HMAC SHA256 of query string)
//! - `timestamp` query parameter

use chrono::Utc;
use reqwest::{Client, RequestBuilder, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use orderbot_domain::{OrderKind, OrderRequest, Price, SymbolFilters};

// =============================================================================
// Constants
// =============================================================================

/// Binance USDⓈ-M Futures testnet base URL
pub const FUTURES_TESTNET_URL: &str = "https://testnet.binancefuture.com";

/// Binance USDⓈ-M Futures production base URL
pub const FUTURES_MAINNET_URL: &str = "https://fapi.binance.com";

/// Default request timeout in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default `recvWindow` for signed requests, in milliseconds
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5000;

// =============================================================================
// Errors
// =============================================================================

/// Errors that can occur in the Binance futures REST client.
#[derive(Debug, Clone, Error)]
pub enum BinanceRestError {
    /// Failed to build request signature
    #[error("Failed to build signature: {0}")]
    SignatureError(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    /// API returned error
    #[error("Binance API error: {code} - {msg}")]
    ApiError { code: i64, msg: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timed out
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Symbol not listed in exchange info
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),
}

/// Binance error code for an unknown symbol.
pub const INVALID_SYMBOL_CODE: i64 = -1121;

// =============================================================================
// Binance Futures REST Client
// =============================================================================

/// Binance USDⓈ-M futures REST client.
pub struct BinanceFuturesClient {
    /// HTTP client
    client: Client,
    /// API key
    api_key: String,
    /// API secret
    api_secret: Zeroizing<String>,
    /// Base URL (testnet unless overridden)
    base_url: String,
    /// Per-request timeout
    request_timeout: Duration,
    /// recvWindow for signed requests
    recv_window_ms: u64,
}

impl BinanceFuturesClient {
    /// Create a client for the futures testnet.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Binance API key
    /// * `api_secret` - Binance API secret
    pub fn testnet(api_key: String, api_secret: Zeroizing<String>) -> Self {
        Self::new(api_key, api_secret, FUTURES_TESTNET_URL)
    }

    /// Create a client against an explicit base URL.
    pub fn new(api_key: String, api_secret: Zeroizing<String>, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_secret,
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Set the recvWindow sent with signed requests.
    pub fn with_recv_window(mut self, recv_window_ms: u64) -> Self {
        self.recv_window_ms = recv_window_ms;
        self
    }

    /// Base URL requests go to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build query string with signature for signed requests.
    ///
    /// Binance requires:
    /// 1. All parameters in query string
    /// 2. HMAC SHA256 signature of query string
    /// 3. signature and timestamp as query parameters
    fn build_signed_query(&self, mut params: Vec<(&str, String)>) -> Result<String, BinanceRestError> {
        params.push(("recvWindow", self.recv_window_ms.to_string()));
        params.push(("timestamp", Utc::now().timestamp_millis().to_string()));

        // Sorted for a stable signature payload
        params.sort_by(|a, b| a.0.cmp(b.0));

        let query_string = encode_query(&params);

        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(self.api_secret.as_bytes())
            .map_err(|e| BinanceRestError::SignatureError(format!("HMAC error: {}", e)))?;

        mac.update(query_string.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{}&signature={}", query_string, signature))
    }

    /// Send a request and return the body, mapping Binance error payloads.
    async fn execute(&self, endpoint: &str, request: RequestBuilder) -> Result<String, BinanceRestError> {
        let response = timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| BinanceRestError::Timeout(self.request_timeout))?
            .map_err(|e| BinanceRestError::RequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| BinanceRestError::ParseError(e.to_string()))?;
        debug!(endpoint, %status, "Binance response");

        map_response(status, body)
    }

    /// Send a GET request to a public endpoint.
    async fn get_public(&self, endpoint: &str, params: Vec<(&str, String)>) -> Result<String, BinanceRestError> {
        let url = if params.is_empty() {
            format!("{}{}", self.base_url, endpoint)
        } else {
            format!("{}{}?{}", self.base_url, endpoint, encode_query(&params))
        };

        debug!(endpoint, "GET (public)");
        self.execute(endpoint, self.client.get(&url)).await
    }

    /// Send a POST request to a signed endpoint.
    async fn post_signed(&self, endpoint: &str, params: Vec<(&str, String)>) -> Result<String, BinanceRestError> {
        // Logged before signing: never log the signature or the key
        debug!(endpoint, params = %encode_query(&params), "POST (signed)");

        let query = self.build_signed_query(params)?;
        let url = format!("{}{}?{}", self.base_url, endpoint, query);

        self.execute(endpoint, self.client.post(&url).header("X-MBX-APIKEY", &self.api_key))
            .await
    }

    // =========================================================================
    // Market Data API
    // =========================================================================

    /// Ping Binance API to check connectivity.
    ///
    /// Uses public endpoint, no authentication required.
    pub async fn ping(&self) -> Result<(), BinanceRestError> {
        let body = self.get_public("/fapi/v1/ping", vec![]).await?;

        // Ping returns empty JSON object {}
        if body.trim() == "{}" {
            Ok(())
        } else {
            Err(BinanceRestError::ParseError(format!("Unexpected ping response: {}", body)))
        }
    }

    /// Get LOT_SIZE and minimum-notional filters for a symbol.
    ///
    /// # Endpoint
    ///
    /// `GET /fapi/v1/exchangeInfo`
    pub async fn get_symbol_filters(&self, symbol: &str) -> Result<SymbolFilters, BinanceRestError> {
        let body = self.get_public("/fapi/v1/exchangeInfo", vec![]).await?;
        parse_symbol_filters(&body, symbol)
    }

    /// Get current price for a symbol.
    ///
    /// # Endpoint
    ///
    /// `GET /fapi/v1/ticker/price`
    pub async fn get_price(&self, symbol: &str) -> Result<Price, BinanceRestError> {
        let params = vec![("symbol", symbol.to_string())];

        let body = self.get_public("/fapi/v1/ticker/price", params).await?;

        let response: PriceResponse = serde_json::from_str(&body)
            .map_err(|e| BinanceRestError::ParseError(e.to_string()))?;

        let price = parse_decimal("price", &response.price)?;
        Price::new(price).map_err(|e| {
            BinanceRestError::ParseError(format!("Invalid price for {}: {}", response.symbol, e))
        })
    }

    // =========================================================================
    // Order API
    // =========================================================================

    /// Place an order.
    ///
    /// # Endpoint
    ///
    /// `POST /fapi/v1/order`
    ///
    /// # Example
    ///
    /// ```ignore
    /// let order = client.place_order(&request).await?;
    /// println!("Order ID: {}", order.order_id);
    /// ```
    pub async fn place_order(&self, request: &OrderRequest) -> Result<BinanceOrderResponse, BinanceRestError> {
        let body = self.post_signed("/fapi/v1/order", order_params(request)).await?;

        serde_json::from_str(&body).map_err(|e| BinanceRestError::ParseError(e.to_string()))
    }
}

// =============================================================================
// Request / Response Mapping
// =============================================================================

/// Turn an HTTP status and body into the response body or a typed error.
///
/// Non-2xx bodies carrying Binance's `{"code", "msg"}` shape become `ApiError`;
/// anything else (proxy pages, empty bodies) becomes `RequestFailed`.
fn map_response(status: StatusCode, body: String) -> Result<String, BinanceRestError> {
    if status.is_success() {
        return Ok(body);
    }

    match serde_json::from_str::<BinanceErrorResponse>(&body) {
        Ok(err) => Err(BinanceRestError::ApiError { code: err.code, msg: err.msg }),
        Err(_) => Err(BinanceRestError::RequestFailed(format!("HTTP {}: {}", status, body))),
    }
}

fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, BinanceRestError> {
    Decimal::from_str(raw.trim())
        .map_err(|e| BinanceRestError::ParseError(format!("Invalid {} '{}': {}", field, raw, e)))
}

/// Order parameters for `POST /fapi/v1/order` (unsigned).
///
/// STOP_LIMIT is sent as Binance futures type `STOP` (stop price + limit
/// price).
pub fn order_params(request: &OrderRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("symbol", request.symbol.to_string()),
        ("side", request.side.as_str().to_string()),
        ("quantity", request.quantity.to_string()),
        ("newClientOrderId", request.client_order_id.clone()),
    ];

    match request.kind {
        OrderKind::Market => {
            params.push(("type", "MARKET".to_string()));
        },
        OrderKind::Limit { price, time_in_force } => {
            params.push(("type", "LIMIT".to_string()));
            params.push(("timeInForce", time_in_force.as_str().to_string()));
            params.push(("price", price.to_string()));
        },
        OrderKind::StopLimit { price, stop_price, time_in_force } => {
            params.push(("type", "STOP".to_string()));
            params.push(("timeInForce", time_in_force.as_str().to_string()));
            params.push(("price", price.to_string()));
            params.push(("stopPrice", stop_price.to_string()));
        },
    }

    params
}

/// Extract filters for `symbol` from an `exchangeInfo` payload.
///
/// Minimum notional is read from the first of `MIN_NOTIONAL.notional`
/// (futures), `MIN_NOTIONAL.minNotional` or `NOTIONAL.minNotional` (spot).
/// A symbol without any of them gets a minimum notional of zero.
pub fn parse_symbol_filters(body: &str, symbol: &str) -> Result<SymbolFilters, BinanceRestError> {
    let info: ExchangeInfo =
        serde_json::from_str(body).map_err(|e| BinanceRestError::ParseError(e.to_string()))?;

    let wanted = symbol.to_ascii_uppercase();
    let entry = info
        .symbols
        .into_iter()
        .find(|s| s.symbol == wanted)
        .ok_or_else(|| BinanceRestError::SymbolNotFound(wanted.clone()))?;

    if let Some(status) = entry.status.as_deref() {
        if status != "TRADING" {
            warn!(symbol = %wanted, status, "Symbol is not currently trading");
        }
    }

    let mut lot: Option<(Decimal, Decimal)> = None;
    let mut min_notional_futures: Option<Decimal> = None;
    let mut min_notional_legacy: Option<Decimal> = None;
    let mut min_notional_spot: Option<Decimal> = None;

    for filter in entry.filters {
        match filter {
            RawFilter::LotSize { min_qty, step_size } => {
                lot = Some((parse_decimal("minQty", &min_qty)?, parse_decimal("stepSize", &step_size)?));
            },
            RawFilter::MinNotional { notional, min_notional } => {
                if let Some(raw) = notional {
                    min_notional_futures = Some(parse_decimal("notional", &raw)?);
                }
                if let Some(raw) = min_notional {
                    min_notional_legacy = Some(parse_decimal("minNotional", &raw)?);
                }
            },
            RawFilter::Notional { min_notional } => {
                if let Some(raw) = min_notional {
                    min_notional_spot = Some(parse_decimal("minNotional", &raw)?);
                }
            },
            RawFilter::Other => {},
        }
    }

    let (min_qty, step_size) = lot.ok_or_else(|| {
        BinanceRestError::ParseError(format!("No LOT_SIZE filter for {}", wanted))
    })?;

    let min_notional = match min_notional_futures.or(min_notional_legacy).or(min_notional_spot) {
        Some(value) => value,
        None => {
            warn!(symbol = %wanted, "No minimum notional filter, assuming 0");
            Decimal::ZERO
        },
    };

    SymbolFilters::new(min_notional, step_size, min_qty)
        .map_err(|e| BinanceRestError::ParseError(format!("{} for {}", e, wanted)))
}

// =============================================================================
// Binance Types (from API responses)
// =============================================================================

/// Binance error response.
#[derive(Debug, Deserialize)]
struct BinanceErrorResponse {
    code: i64,
    msg: String,
}

#[derive(Debug, Deserialize)]
struct ExchangeInfo {
    symbols: Vec<SymbolInfo>,
}

#[derive(Debug, Deserialize)]
struct SymbolInfo {
    symbol: String,
    status: Option<String>,
    #[serde(default)]
    filters: Vec<RawFilter>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "filterType")]
enum RawFilter {
    #[serde(rename = "LOT_SIZE")]
    LotSize {
        #[serde(rename = "minQty")]
        min_qty: String,
        #[serde(rename = "stepSize")]
        step_size: String,
    },
    #[serde(rename = "MIN_NOTIONAL")]
    MinNotional {
        notional: Option<String>,
        #[serde(rename = "minNotional")]
        min_notional: Option<String>,
    },
    #[serde(rename = "NOTIONAL")]
    Notional {
        #[serde(rename = "minNotional")]
        min_notional: Option<String>,
    },
    #[serde(other)]
    Other,
}

/// Binance futures order response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinanceOrderResponse {
    /// Symbol
    pub symbol: String,
    /// Order ID
    pub order_id: u64,
    /// Client order ID
    pub client_order_id: String,
    /// Price
    pub price: Decimal,
    /// Average fill price
    #[serde(default)]
    pub avg_price: Option<Decimal>,
    /// Original quantity
    pub orig_qty: Decimal,
    /// Executed quantity
    pub executed_qty: Decimal,
    /// Stop price
    #[serde(default)]
    pub stop_price: Option<Decimal>,
    /// Status
    pub status: String,
    /// Time in force
    #[serde(default)]
    pub time_in_force: Option<String>,
    /// Side
    pub side: String,
    /// Type
    #[serde(rename = "type")]
    pub order_type: String,
    /// Last update time (ms since epoch)
    pub update_time: i64,
}

/// Price ticker response.
#[derive(Debug, Deserialize)]
struct PriceResponse {
    symbol: String,
    price: String,
}

// =============================================================================
// Tests
// =============================================================================
