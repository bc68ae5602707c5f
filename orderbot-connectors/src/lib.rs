//! orderbot Exchange Connectors
//!
//! Adapters for exchange APIs (REST).
//! Normalizes exchange-specific types to domain types.

#![warn(clippy::all)]

// Public modules
pub mod adapter;
pub mod binance_futures;

// Re-exports
pub use adapter::BinanceFuturesAdapter;
pub use binance_futures::{
    BinanceFuturesClient, BinanceOrderResponse, BinanceRestError, FUTURES_MAINNET_URL,
    FUTURES_TESTNET_URL,
};
