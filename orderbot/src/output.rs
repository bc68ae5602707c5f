//! Result block printed on stdout.

use std::fmt::Write;

use orderbot_domain::ValidationResult;
use orderbot_exec::{PreparedOrder, SubmissionOutcome};
use rust_decimal::Decimal;

use crate::error::AppError;

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn header(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", rule());
}

fn adjustment_line(out: &mut String, prepared: &PreparedOrder) {
    if let ValidationResult::Adjusted { original, adjusted } = prepared.validation {
        let _ = writeln!(
            out,
            "   Adjusted: {} -> {} (min notional {} at {})",
            original,
            adjusted,
            prepared.filters.min_notional(),
            prepared.reference_price
        );
    }
}

/// Render a placed order.
pub fn render_success(outcome: &SubmissionOutcome) -> String {
    let confirmation = &outcome.confirmation;
    let mut out = String::new();

    header(&mut out, "ORDER EXECUTION RESULT");
    let _ = writeln!(out, "SUCCESS: {} order placed", outcome.prepared.request.order_type());
    let _ = writeln!(out, "   Order ID: {}", confirmation.order_id);
    let _ = writeln!(out, "   Client Order ID: {}", confirmation.client_order_id);
    let _ = writeln!(out, "   Symbol: {}", confirmation.symbol);
    let _ = writeln!(out, "   Side: {}", confirmation.side);
    let _ = writeln!(out, "   Type: {}", confirmation.order_type);
    let _ = writeln!(out, "   Quantity: {}", confirmation.orig_qty.normalize());
    if confirmation.price > Decimal::ZERO {
        let _ = writeln!(out, "   Price: {}", confirmation.price.normalize());
    }
    if let Some(stop_price) = confirmation.stop_price {
        let _ = writeln!(out, "   Stop Price: {}", stop_price.normalize());
    }
    let _ = writeln!(out, "   Status: {}", confirmation.status);
    adjustment_line(&mut out, &outcome.prepared);
    let _ = writeln!(out, "{}", rule());

    out
}

/// Render an order that passed validation but was not submitted.
pub fn render_dry_run(prepared: &PreparedOrder) -> String {
    let mut out = String::new();

    header(&mut out, "DRY RUN (order not submitted)");
    let _ = writeln!(out, "VALID: {}", prepared.request);
    let _ = writeln!(out, "   Reference Price: {}", prepared.reference_price);
    if let Some(notional) = prepared.request.quantity.notional(prepared.reference_price) {
        let _ = writeln!(out, "   Notional: {}", notional.normalize());
    }
    let _ = writeln!(out, "   Filters: {}", prepared.filters);
    adjustment_line(&mut out, prepared);
    let _ = writeln!(out, "{}", rule());

    out
}

/// Render a failure for stderr.
pub fn render_failure(err: &AppError) -> String {
    format!("FAILED: {}", err)
}

// =============================================================================
// Tests
// =============================================================================
