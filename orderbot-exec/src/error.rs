//! Execution layer error types.

use rust_decimal::Decimal;
use thiserror::Error;

use orderbot_domain::{DomainError, Quantity, Rejection, Symbol};

/// Errors that can occur while looking up, validating or submitting an order.
///
/// None of these are retried: resubmitting an order that may have reached the
/// exchange risks a duplicate fill.
#[derive(Debug, Error)]
pub enum ExecError {
    /// Symbol is not listed on the exchange
    #[error("Unknown symbol: {0} is not listed on the exchange")]
    UnknownSymbol(String),

    /// Quantity is below minQty or off the LOT_SIZE grid
    #[error(
        "LOT_SIZE violation for {symbol}: quantity {quantity} must be at least {min_qty} and step in increments of {step_size}"
    )]
    LotSize {
        /// Symbol
        symbol: Symbol,
        /// Requested quantity
        quantity: Quantity,
        /// LOT_SIZE minQty
        min_qty: Decimal,
        /// LOT_SIZE stepSize
        step_size: Decimal,
    },

    /// Notional below minimum and auto-adjust disabled
    #[error(
        "Quantity too small. Minimum quantity for {symbol} is {min_quantity} (min notional {min_notional}, requested notional {notional}). Use auto-adjust to round up automatically"
    )]
    NotionalTooSmall {
        /// Symbol
        symbol: Symbol,
        /// Requested quantity
        quantity: Quantity,
        /// quantity × reference price
        notional: Decimal,
        /// Exchange minimum notional
        min_notional: Decimal,
        /// Smallest accepted quantity
        min_quantity: Quantity,
    },

    /// Order (or lookup) was rejected by the exchange API
    #[error("Exchange rejected request: {code} - {message}")]
    ExchangeRejected {
        /// Exchange error code
        code: i64,
        /// Exchange error message
        message: String,
    },

    /// Exchange communication error (transport, unexpected payload)
    #[error("Exchange error: {0}")]
    Exchange(String),

    /// Timeout waiting for the exchange
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Domain error
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ExecError {
    /// Build the error matching a validation rejection.
    pub fn from_rejection(symbol: &Symbol, rejection: Rejection) -> Self {
        match rejection {
            Rejection::LotSize { quantity, min_qty, step_size } => ExecError::LotSize {
                symbol: symbol.clone(),
                quantity,
                min_qty,
                step_size,
            },
            Rejection::NotionalTooSmall { quantity, notional, min_notional, min_quantity } => {
                ExecError::NotionalTooSmall {
                    symbol: symbol.clone(),
                    quantity,
                    notional: notional.normalize(),
                    min_notional,
                    min_quantity,
                }
            },
            out_of_range @ Rejection::OutOfRange { .. } => ExecError::Domain(
                DomainError::InvalidOrder(format!("{}: {}", symbol, out_of_range)),
            ),
        }
    }

    /// Whether this is a validation-class failure (exit code 3): an unknown
    /// symbol or a quantity the symbol's filters do not allow.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ExecError::UnknownSymbol(_) | ExecError::LotSize { .. } | ExecError::NotionalTooSmall { .. }
        )
    }
}

/// Result type for execution operations.
pub type ExecResult<T> = Result<T, ExecError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_notional_message_names_minimum_quantity() {
        let symbol = Symbol::new("BTCUSDT").unwrap();
        let err = ExecError::from_rejection(
            &symbol,
            Rejection::NotionalTooSmall {
                quantity: Quantity::new(dec!(0.001)).unwrap(),
                notional: dec!(50.000),
                min_notional: dec!(100),
                min_quantity: Quantity::new(dec!(0.002)).unwrap(),
            },
        );

        let msg = err.to_string();
        assert!(msg.contains("Minimum quantity for BTCUSDT is 0.002"), "{}", msg);
        assert!(msg.contains("requested notional 50)"), "{}", msg);
        assert!(err.is_validation());
    }

    #[test]
    fn test_lot_size_message_names_step() {
        let symbol = Symbol::new("BTCUSDT").unwrap();
        let err = ExecError::from_rejection(
            &symbol,
            Rejection::LotSize {
                quantity: Quantity::new(dec!(0.0015)).unwrap(),
                min_qty: dec!(0.001),
                step_size: dec!(0.001),
            },
        );

        assert!(matches!(err, ExecError::LotSize { .. }));
        assert!(err.to_string().contains("increments of 0.001"));
    }

    #[test]
    fn test_exchange_errors_are_not_validation() {
        let err = ExecError::ExchangeRejected { code: -2019, message: "Margin is insufficient.".to_string() };
        assert!(!err.is_validation());
        assert_eq!(err.to_string(), "Exchange rejected request: -2019 - Margin is insufficient.");
    }

    #[test]
    fn test_out_of_range_is_a_domain_error() {
        let symbol = Symbol::new("BTCUSDT").unwrap();
        let err = ExecError::from_rejection(
            &symbol,
            Rejection::OutOfRange {
                quantity: "79228162514264337593543950335".parse().unwrap(),
                reference_price: orderbot_domain::Price::new(dec!(50000)).unwrap(),
            },
        );

        assert!(matches!(err, ExecError::Domain(DomainError::InvalidOrder(_))));
        assert!(!err.is_validation());
        assert!(err.to_string().contains("outside the supported numeric range"));
    }
}
