//! End-to-end invocation tests: command line → stub exchange → result block.

use std::sync::Arc;

use clap::Parser;
use orderbot::{execute, AppError, Args, EXIT_CONFIG, EXIT_EXCHANGE, EXIT_VALIDATION};
use orderbot_domain::SymbolFilters;
use orderbot_exec::StubExchange;
use rust_decimal_macros::dec;

fn exchange() -> Arc<StubExchange> {
    let exchange = Arc::new(StubExchange::new());
    exchange.list_symbol(
        "BTCUSDT",
        SymbolFilters::new(dec!(100), dec!(0.001), dec!(0.001)).unwrap(),
        dec!(50000),
    );
    exchange
}

fn args(argv: &[&str]) -> Args {
    let mut full = vec!["orderbot"];
    full.extend_from_slice(argv);
    Args::try_parse_from(full).unwrap()
}

async fn invoke(exchange: Arc<StubExchange>, argv: &[&str]) -> Result<String, AppError> {
    let args = args(argv);
    let request = args.to_request()?;
    execute(exchange, &request, args.dry_run).await
}

#[tokio::test]
async fn test_market_order_with_auto_adjust() -> anyhow::Result<()> {
    let exchange = exchange();

    let block = invoke(
        exchange.clone(),
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "MARKET", "--quantity", "0.001", "--auto-adjust"],
    )
    .await?;

    assert!(block.contains("SUCCESS: MARKET order placed"));
    assert!(block.contains("Quantity: 0.002"));
    assert!(block.contains("Adjusted: 0.001 -> 0.002"));
    assert_eq!(exchange.submitted_orders().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_too_small_without_auto_adjust_exits_with_validation_code() {
    let exchange = exchange();

    let err = invoke(
        exchange.clone(),
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "MARKET", "--quantity", "0.001"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_VALIDATION);
    assert!(err.to_string().contains("Minimum quantity for BTCUSDT is 0.002"));
    assert!(exchange.submitted_orders().is_empty());
}

#[tokio::test]
async fn test_misaligned_quantity_exits_with_validation_code() {
    let err = invoke(
        exchange(),
        &["--symbol", "BTCUSDT", "--side", "SELL", "--type", "MARKET", "--quantity", "0.0015", "--auto-adjust"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_VALIDATION);
    assert!(err.to_string().contains("increments of 0.001"));
}

#[tokio::test]
async fn test_limit_without_price_exits_with_config_code() {
    let err = invoke(
        exchange(),
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "LIMIT", "--quantity", "0.002"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_CONFIG);
}

#[tokio::test]
async fn test_limit_order_uses_limit_price() -> anyhow::Result<()> {
    let exchange = exchange();

    let err = invoke(
        exchange.clone(),
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "LIMIT", "--quantity", "0.001", "--price", "30000"],
    )
    .await
    .unwrap_err();
    assert!(err.to_string().contains("requested notional 30)"));

    let block = invoke(
        exchange.clone(),
        &[
            "--symbol", "BTCUSDT", "--side", "BUY", "--type", "LIMIT", "--quantity", "0.001", "--price",
            "30000", "--auto-adjust",
        ],
    )
    .await?;
    assert!(block.contains("Quantity: 0.004"));
    assert!(block.contains("Price: 30000"));
    Ok(())
}

#[tokio::test]
async fn test_stop_limit_order() -> anyhow::Result<()> {
    let block = invoke(
        exchange(),
        &[
            "--symbol", "btcusdt", "--side", "sell", "--type", "stop_limit", "--quantity", "0.004",
            "--price", "29500", "--stop-price", "29000",
        ],
    )
    .await?;

    assert!(block.contains("Type: STOP_LIMIT"));
    assert!(block.contains("Stop Price: 29000"));
    Ok(())
}

#[tokio::test]
async fn test_dry_run_submits_nothing() -> anyhow::Result<()> {
    let exchange = exchange();

    let block = invoke(
        exchange.clone(),
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "MARKET", "--quantity", "0.001", "--auto-adjust", "--dry-run"],
    )
    .await?;

    assert!(block.contains("DRY RUN"));
    assert!(block.contains("Adjusted: 0.001 -> 0.002"));
    assert!(exchange.submitted_orders().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_exchange_rejection_exits_with_exchange_code() {
    let exchange = exchange();
    exchange.reject_next(-2019, "Margin is insufficient.");

    let err = invoke(
        exchange,
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "MARKET", "--quantity", "0.002"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_EXCHANGE);
    assert!(err.to_string().contains("-2019"));
}

#[tokio::test]
async fn test_unreachable_exchange_exits_with_exchange_code() {
    let exchange = exchange();
    exchange.set_unreachable(true);

    let err = invoke(
        exchange,
        &["--symbol", "BTCUSDT", "--side", "BUY", "--type", "MARKET", "--quantity", "0.002"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_EXCHANGE);
}

#[tokio::test]
async fn test_quantity_beyond_decimal_range_is_an_argument_error() {
    let exchange = exchange();
    exchange.list_symbol(
        "WHOLEUSDT",
        SymbolFilters::new(dec!(100), dec!(1), dec!(1)).unwrap(),
        dec!(50000),
    );

    let err = invoke(
        exchange.clone(),
        &[
            "--symbol", "WHOLEUSDT", "--side", "BUY", "--type", "MARKET", "--quantity",
            "79228162514264337593543950335",
        ],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_CONFIG);
    assert!(err.to_string().contains("outside the supported numeric range"));
    assert!(exchange.submitted_orders().is_empty());
}

#[tokio::test]
async fn test_limit_price_too_small_to_size_is_an_argument_error() {
    let exchange = exchange();

    let err = invoke(
        exchange.clone(),
        &[
            "--symbol", "BTCUSDT", "--side", "BUY", "--type", "LIMIT", "--quantity", "0.001",
            "--price", "0.0000000000000000000000000001", "--auto-adjust",
        ],
    )
    .await
    .unwrap_err();

    assert_eq!(err.exit_code(), EXIT_CONFIG);
    assert!(exchange.submitted_orders().is_empty());
}
