//! Quantity validation against symbol filters.
//!
//! Pure decision function: given the requested quantity, the reference price
//! and the symbol's filters, decide whether the order can go out as-is, must
//! be resized, or must be rejected.
//!
//! # Decision order
//!
//! ```text
//! lot size violated?         → Rejected(LotSize)         (never adjusted)
//! notional >= min notional?  → Accepted(quantity)
//! auto-adjust off?           → Rejected(NotionalTooSmall) with minimum quantity
//! otherwise                  → Adjusted { original, adjusted }
//! ```
//!
//! Arithmetic is checked: a notional or minimum quantity that does not fit in
//! a `Decimal` yields `Rejected(OutOfRange)` instead of a panic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::filters::SymbolFilters;
use crate::value_objects::{Price, Quantity};

/// Why a quantity cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    /// Quantity is below `min_qty` or off the lot grid
    LotSize {
        /// Requested quantity
        quantity: Quantity,
        /// LOT_SIZE minQty
        min_qty: Decimal,
        /// LOT_SIZE stepSize
        step_size: Decimal,
    },
    /// Quantity × price is below the minimum notional and auto-adjust is off
    NotionalTooSmall {
        /// Requested quantity
        quantity: Quantity,
        /// quantity × reference price
        notional: Decimal,
        /// Exchange minimum notional
        min_notional: Decimal,
        /// Smallest quantity that would be accepted
        min_quantity: Quantity,
    },
    /// Quantity × price (or the minimum quantity at this price) overflows
    OutOfRange {
        /// Requested quantity
        quantity: Quantity,
        /// Reference price
        reference_price: Price,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::LotSize { quantity, min_qty, step_size } => write!(
                f,
                "quantity {} violates LOT_SIZE: must be at least {} and a multiple of step {} from {}",
                quantity, min_qty, step_size, min_qty
            ),
            Rejection::NotionalTooSmall { quantity, notional, min_notional, min_quantity } => write!(
                f,
                "quantity {} is too small: notional {} is below the minimum notional {}. Minimum quantity is {} (or pass --auto-adjust)",
                quantity,
                notional.normalize(),
                min_notional,
                min_quantity
            ),
            Rejection::OutOfRange { quantity, reference_price } => write!(
                f,
                "quantity {} at price {} is outside the supported numeric range",
                quantity, reference_price
            ),
        }
    }
}

/// Outcome of validating a requested quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationResult {
    /// Quantity satisfies all filters unchanged
    Accepted(Quantity),
    /// Quantity was raised to the smallest conforming value
    Adjusted {
        /// Requested quantity
        original: Quantity,
        /// Quantity to submit instead
        adjusted: Quantity,
    },
    /// Quantity cannot be submitted
    Rejected(Rejection),
}

impl ValidationResult {
    /// Quantity to submit, if the order may go out
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            ValidationResult::Accepted(q) => Some(*q),
            ValidationResult::Adjusted { adjusted, .. } => Some(*adjusted),
            ValidationResult::Rejected(_) => None,
        }
    }

    /// Whether the order was rejected
    pub fn is_rejected(&self) -> bool {
        matches!(self, ValidationResult::Rejected(_))
    }
}

/// Validate `quantity` at `reference_price` against `filters`.
///
/// `reference_price` is the current market price for market orders and the
/// limit price otherwise.
///
/// # Examples
/// ```
/// # use orderbot_domain::{validate, Price, Quantity, SymbolFilters, ValidationResult};
/// # use rust_decimal_macros::dec;
/// let filters = SymbolFilters::new(dec!(100), dec!(0.001), dec!(0.001)).unwrap();
/// let price = Price::new(dec!(50000)).unwrap();
/// let qty = Quantity::new(dec!(0.001)).unwrap();
///
/// match validate(qty, price, &filters, true) {
///     ValidationResult::Adjusted { adjusted, .. } => assert_eq!(adjusted.as_decimal(), dec!(0.002)),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn validate(
    quantity: Quantity,
    reference_price: Price,
    filters: &SymbolFilters,
    auto_adjust: bool,
) -> ValidationResult {
    if !filters.is_lot_aligned(quantity) {
        return ValidationResult::Rejected(Rejection::LotSize {
            quantity,
            min_qty: filters.min_qty(),
            step_size: filters.step_size(),
        });
    }

    let out_of_range =
        ValidationResult::Rejected(Rejection::OutOfRange { quantity, reference_price });

    let Some(notional) = quantity.notional(reference_price) else {
        return out_of_range;
    };
    if notional >= filters.min_notional() {
        return ValidationResult::Accepted(quantity);
    }

    let Some(min_quantity) = filters.min_quantity_for(reference_price) else {
        return out_of_range;
    };

    if !auto_adjust {
        return ValidationResult::Rejected(Rejection::NotionalTooSmall {
            quantity,
            notional,
            min_notional: filters.min_notional(),
            min_quantity,
        });
    }

    ValidationResult::Adjusted { original: quantity, adjusted: min_quantity }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn btc_filters() -> SymbolFilters {
        SymbolFilters::new(dec!(100), dec!(0.001), dec!(0.001)).unwrap()
    }

    fn qty(v: Decimal) -> Quantity {
        Quantity::new(v).unwrap()
    }

    fn price(v: Decimal) -> Price {
        Price::new(v).unwrap()
    }

    #[test]
    fn test_market_auto_adjust_to_min_notional() {
        let result = validate(qty(dec!(0.001)), price(dec!(50000)), &btc_filters(), true);

        assert_eq!(
            result,
            ValidationResult::Adjusted { original: qty(dec!(0.001)), adjusted: qty(dec!(0.002)) }
        );
        assert_eq!(result.quantity(), Some(qty(dec!(0.002))));
    }

    #[test]
    fn test_notional_too_small_without_auto_adjust() {
        let result = validate(qty(dec!(0.001)), price(dec!(50000)), &btc_filters(), false);

        match result {
            ValidationResult::Rejected(Rejection::NotionalTooSmall {
                notional,
                min_notional,
                min_quantity,
                ..
            }) => {
                assert_eq!(notional, dec!(50));
                assert_eq!(min_notional, dec!(100));
                assert_eq!(min_quantity.as_decimal(), dec!(0.002));
            },
            other => panic!("expected NotionalTooSmall, got {:?}", other),
        }
        assert!(result.is_rejected());
        assert_eq!(result.quantity(), None);
    }

    #[test]
    fn test_misaligned_quantity_rejected_regardless_of_auto_adjust() {
        for auto_adjust in [false, true] {
            let result = validate(qty(dec!(0.0015)), price(dec!(50000)), &btc_filters(), auto_adjust);
            assert!(
                matches!(
                    result,
                    ValidationResult::Rejected(Rejection::LotSize { step_size, .. }) if step_size == dec!(0.001)
                ),
                "auto_adjust={} gave {:?}",
                auto_adjust,
                result
            );
        }
    }

    #[test]
    fn test_below_min_qty_rejected_regardless_of_auto_adjust() {
        let filters = SymbolFilters::new(dec!(5), dec!(0.001), dec!(0.01)).unwrap();
        for auto_adjust in [false, true] {
            let result = validate(qty(dec!(0.005)), price(dec!(50000)), &filters, auto_adjust);
            assert!(matches!(result, ValidationResult::Rejected(Rejection::LotSize { .. })));
        }
    }

    #[test]
    fn test_lot_size_checked_before_notional() {
        // Misaligned AND above min notional: still a lot-size rejection
        let result = validate(qty(dec!(1.0005)), price(dec!(50000)), &btc_filters(), false);
        assert!(matches!(result, ValidationResult::Rejected(Rejection::LotSize { .. })));
    }

    #[test]
    fn test_sufficient_notional_accepted_unchanged() {
        for auto_adjust in [false, true] {
            let result = validate(qty(dec!(0.003)), price(dec!(50000)), &btc_filters(), auto_adjust);
            assert_eq!(result, ValidationResult::Accepted(qty(dec!(0.003))));
        }
    }

    #[test]
    fn test_notional_exactly_at_minimum_accepted() {
        let result = validate(qty(dec!(0.002)), price(dec!(50000)), &btc_filters(), false);
        assert_eq!(result, ValidationResult::Accepted(qty(dec!(0.002))));
    }

    #[test]
    fn test_limit_price_used_as_reference() {
        // LIMIT at 30000: notional 30 < 100
        let rejected = validate(qty(dec!(0.001)), price(dec!(30000)), &btc_filters(), false);
        assert!(matches!(
            rejected,
            ValidationResult::Rejected(Rejection::NotionalTooSmall { min_quantity, .. })
                if min_quantity.as_decimal() == dec!(0.004)
        ));

        let adjusted = validate(qty(dec!(0.001)), price(dec!(30000)), &btc_filters(), true);
        assert_eq!(adjusted.quantity(), Some(qty(dec!(0.004))));
    }

    #[test]
    fn test_adjusted_quantity_revalidates_as_accepted() {
        let filters = SymbolFilters::new(dec!(5), dec!(0.01), dec!(0.01)).unwrap();
        for p in [dec!(3.33), dec!(1234.5678), dec!(0.07), dec!(45000)] {
            let p = price(p);
            let result = validate(qty(dec!(0.01)), p, &filters, true);
            let adjusted = result.quantity().unwrap();

            assert!(adjusted >= qty(dec!(0.01)));
            assert!(filters.is_lot_aligned(adjusted));
            assert_eq!(validate(adjusted, p, &filters, true), ValidationResult::Accepted(adjusted));
        }
    }

    #[test]
    fn test_zero_min_notional_accepts_any_aligned_quantity() {
        let filters = SymbolFilters::new(dec!(0), dec!(0.001), dec!(0.001)).unwrap();
        let result = validate(qty(dec!(0.001)), price(dec!(0.0001)), &filters, false);
        assert_eq!(result, ValidationResult::Accepted(qty(dec!(0.001))));
    }

    #[test]
    fn test_rejection_messages_are_actionable() {
        let lot = validate(qty(dec!(0.0015)), price(dec!(50000)), &btc_filters(), false);
        let notional = validate(qty(dec!(0.001)), price(dec!(50000)), &btc_filters(), false);

        match (lot, notional) {
            (ValidationResult::Rejected(lot), ValidationResult::Rejected(notional)) => {
                assert!(lot.to_string().contains("step 0.001"));
                assert!(notional.to_string().contains("Minimum quantity is 0.002"));
            },
            other => panic!("expected two rejections, got {:?}", other),
        }
    }

    #[test]
    fn test_huge_quantity_rejected_instead_of_overflowing() {
        let filters = SymbolFilters::new(dec!(100), dec!(1), dec!(1)).unwrap();
        let huge: Quantity = "79228162514264337593543950335".parse().unwrap();

        let result = validate(huge, price(dec!(50000)), &filters, false);

        assert_eq!(
            result,
            ValidationResult::Rejected(Rejection::OutOfRange {
                quantity: huge,
                reference_price: price(dec!(50000)),
            })
        );
    }

    #[test]
    fn test_tiny_limit_price_rejected_instead_of_overflowing() {
        let tiny = price(Decimal::new(1, 28));

        for auto_adjust in [false, true] {
            let result = validate(qty(dec!(0.001)), tiny, &btc_filters(), auto_adjust);
            match result {
                ValidationResult::Rejected(rejection @ Rejection::OutOfRange { .. }) => {
                    assert!(rejection.to_string().contains("outside the supported numeric range"));
                },
                other => panic!("expected OutOfRange, got {:?}", other),
            }
        }
    }
}
