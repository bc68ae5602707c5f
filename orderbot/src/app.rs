//! One invocation: arguments in, exit code out.
//!
//! ```text
//! Args → Config → logging → OrderRequest → Credentials → adapter → submit → result block
//! ```

use std::sync::Arc;
use tracing::{error, info};

use orderbot_connectors::{BinanceFuturesAdapter, BinanceFuturesClient};
use orderbot_domain::OrderRequest;
use orderbot_exec::{ExchangePort, OrderSubmitter};

use crate::cli::Args;
use crate::config::Config;
use crate::credentials::Credentials;
use crate::error::{AppResult, EXIT_CONFIG, EXIT_OK};
use crate::logging;
use crate::output::{render_dry_run, render_failure, render_success};

/// Build the Binance futures adapter from configuration and credentials.
pub fn connect(config: &Config, credentials: Credentials) -> BinanceFuturesAdapter {
    let Credentials { api_key, api_secret } = credentials;

    let client = BinanceFuturesClient::new(api_key, api_secret, &config.base_url)
        .with_timeout(config.request_timeout)
        .with_recv_window(config.recv_window_ms);

    BinanceFuturesAdapter::new(client)
}

/// Validate `request` and, unless `dry_run`, place it.
///
/// Returns the result block to print.
pub async fn execute<E: ExchangePort>(
    exchange: Arc<E>,
    request: &OrderRequest,
    dry_run: bool,
) -> AppResult<String> {
    let submitter = OrderSubmitter::new(exchange);

    if dry_run {
        let prepared = submitter.prepare(request).await?;
        info!(order = %prepared.request, "Dry run: order passed validation, not submitted");
        return Ok(render_dry_run(&prepared));
    }

    let outcome = submitter.submit(request).await?;
    info!(
        order_id = outcome.confirmation.order_id,
        status = %outcome.confirmation.status,
        "Final order outcome: order placed"
    );
    Ok(render_success(&outcome))
}

async fn run_with_config(args: &Args, config: &Config) -> AppResult<String> {
    let request = args.to_request()?;

    let credentials_file =
        args.credentials_file.as_deref().unwrap_or(config.credentials_file.as_path());
    let credentials = Credentials::load(credentials_file)?;

    info!(
        base_url = %config.base_url,
        order = %request,
        auto_adjust = request.auto_adjust,
        "Order requested"
    );

    let exchange = Arc::new(connect(config, credentials));
    execute(exchange, &request, args.dry_run).await
}

/// Run the whole invocation and return the process exit code.
pub async fn run(args: Args) -> i32 {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", render_failure(&e));
            return EXIT_CONFIG;
        },
    };

    if let Err(e) = logging::init(config.log_file.as_deref()) {
        eprintln!("{}", render_failure(&e));
        return EXIT_CONFIG;
    }

    info!(version = env!("CARGO_PKG_VERSION"), "Starting orderbot");

    let code = match run_with_config(&args, &config).await {
        Ok(block) => {
            println!("{}", block);
            EXIT_OK
        },
        Err(e) => {
            error!(error = %e, "Order failed");
            eprintln!("{}", render_failure(&e));
            e.exit_code()
        },
    };

    info!(exit_code = code, "Session ended");
    code
}
