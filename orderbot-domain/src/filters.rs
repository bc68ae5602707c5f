//! Exchange symbol filters relevant to order size.
//!
//! Only two exchange filters matter here:
//! - `LOT_SIZE`: quantities must be `min_qty + k * step_size` for some k >= 0
//! - `MIN_NOTIONAL`: `quantity * price` must be at least `min_notional`

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value_objects::{DomainError, Price, Quantity};

/// Size filters for one symbol, fetched once per run.
///
/// # Invariants
/// - `step_size` > 0
/// - `min_qty` >= 0
/// - `min_notional` >= 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolFilters {
    min_notional: Decimal,
    step_size: Decimal,
    min_qty: Decimal,
}

impl SymbolFilters {
    /// Create filters with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidFilters` if any invariant is violated
    pub fn new(min_notional: Decimal, step_size: Decimal, min_qty: Decimal) -> Result<Self, DomainError> {
        if step_size <= Decimal::ZERO {
            return Err(DomainError::InvalidFilters(format!(
                "LOT_SIZE stepSize must be positive, got {}",
                step_size
            )));
        }
        if min_qty < Decimal::ZERO {
            return Err(DomainError::InvalidFilters(format!(
                "LOT_SIZE minQty must not be negative, got {}",
                min_qty
            )));
        }
        if min_notional < Decimal::ZERO {
            return Err(DomainError::InvalidFilters(format!(
                "MIN_NOTIONAL must not be negative, got {}",
                min_notional
            )));
        }

        Ok(Self {
            min_notional: min_notional.normalize(),
            step_size: step_size.normalize(),
            min_qty: min_qty.normalize(),
        })
    }

    /// Minimum order value in quote currency
    pub fn min_notional(&self) -> Decimal {
        self.min_notional
    }

    /// Lot step
    pub fn step_size(&self) -> Decimal {
        self.step_size
    }

    /// Smallest accepted quantity
    pub fn min_qty(&self) -> Decimal {
        self.min_qty
    }

    /// Whether `quantity` lies on the lot grid (`min_qty + k * step_size`).
    pub fn is_lot_aligned(&self, quantity: Quantity) -> bool {
        let qty = quantity.as_decimal();
        qty >= self.min_qty
            && qty
                .checked_sub(self.min_qty)
                .and_then(|offset| offset.checked_rem(self.step_size))
                .is_some_and(|r| r.is_zero())
    }

    /// Smallest lot-aligned quantity whose notional at `price` reaches
    /// `min_notional`.
    ///
    /// ```text
    /// q = ceil((min_notional / price - min_qty) / step_size) * step_size + min_qty
    /// ```
    ///
    /// clamped to `min_qty` (and to one step when `min_qty` is zero).
    ///
    /// Returns `None` when the answer is outside the `Decimal` range (e.g. a
    /// price so small that `min_notional / price` overflows).
    ///
    /// # Examples
    /// ```
    /// # use orderbot_domain::{Price, SymbolFilters};
    /// # use rust_decimal_macros::dec;
    /// let filters = SymbolFilters::new(dec!(100), dec!(0.001), dec!(0.001)).unwrap();
    /// let price = Price::new(dec!(50000)).unwrap();
    /// assert_eq!(filters.min_quantity_for(price).unwrap().as_decimal(), dec!(0.002));
    /// ```
    pub fn min_quantity_for(&self, price: Price) -> Option<Quantity> {
        let price = price.as_decimal();
        let step = self.step_size;
        let floor = if self.min_qty.is_zero() { step } else { self.min_qty };

        let raw = self.min_notional.checked_div(price)?;
        let steps = raw.checked_sub(self.min_qty)?.checked_div(step)?.ceil().max(Decimal::ZERO);
        let mut candidate = self.min_qty.checked_add(steps.checked_mul(step)?)?.max(floor);

        // The division above can round in either direction; settle on the
        // exact answer using multiplication only.
        if candidate.checked_mul(price)? < self.min_notional {
            candidate = candidate.checked_add(step)?;
        } else {
            let lower = candidate - step;
            if lower >= floor && lower.checked_mul(price)? >= self.min_notional {
                candidate = lower;
            }
        }

        Some(Quantity::new_unchecked(candidate.normalize()))
    }
}

impl fmt::Display for SymbolFilters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "minNotional={} stepSize={} minQty={}",
            self.min_notional, self.step_size, self.min_qty
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
