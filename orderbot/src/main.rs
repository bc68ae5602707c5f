//! orderbot
//!
//! Submits one MARKET, LIMIT or STOP_LIMIT order to the Binance USDⓈ-M
//! futures testnet, checking the quantity against the symbol's LOT_SIZE and
//! minimum notional filters first.
//!
//! # Usage
//!
//! ```bash
//! orderbot --symbol BTCUSDT --side BUY --type MARKET --quantity 0.001 --auto-adjust
//! orderbot --symbol BTCUSDT --side SELL --type LIMIT --quantity 0.002 --price 70000
//! orderbot --symbol BTCUSDT --side BUY --type STOP_LIMIT --quantity 0.002 \
//!     --price 69500 --stop-price 69000
//! ```
//!
//! # Environment Variables
//!
//! - `BINANCE_TESTNET_API_KEY` / `BINANCE_TESTNET_API_SECRET`: API credentials
//! - `ORDERBOT_BASE_URL`: REST base URL (default: https://testnet.binancefuture.com)
//! - `ORDERBOT_REQUEST_TIMEOUT_SECS`: Request timeout (default: 10)
//! - `ORDERBOT_RECV_WINDOW_MS`: Signed request window (default: 5000)
//! - `ORDERBOT_LOG_FILE`: Log file (default: bot_execution.log, empty disables)
//! - `ORDERBOT_CREDENTIALS_FILE`: Credentials JSON (default: credentials.json)
//!
//! # Exit Codes
//!
//! - `0`: order placed (or dry run passed)
//! - `1`: exchange or network failure
//! - `2`: configuration or argument error
//! - `3`: rejected by quantity validation or unknown symbol

use clap::Parser;
use orderbot::Args;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let code = orderbot::run(args).await;
    std::process::exit(code);
}
