//! Value Objects for the orderbot domain
//!
//! Immutable, validated domain primitives.
//! All value objects enforce invariants at construction time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Price must be positive
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Quantity must be positive
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Symbol must be a valid exchange symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Side must be BUY or SELL
    #[error("Invalid side: {0}")]
    InvalidSide(String),

    /// Order type must be MARKET, LIMIT or STOP_LIMIT
    #[error("Invalid order type: {0}")]
    InvalidOrderType(String),

    /// Time in force must be GTC, IOC or FOK
    #[error("Invalid time in force: {0}")]
    InvalidTimeInForce(String),

    /// Missing or inconsistent order fields (e.g. LIMIT without price)
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// Exchange symbol filters are unusable
    #[error("Invalid symbol filters: {0}")]
    InvalidFilters(String),
}

// =============================================================================
// Price
// =============================================================================

/// Price represents a positive decimal price
///
/// # Invariants
/// - Must be > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    /// Create a new Price with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidPrice` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidPrice(format!("{} (price must be positive)", value)));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::InvalidPrice(format!("'{}': {}", s, e)))?;
        Self::new(value)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Quantity
// =============================================================================

/// Quantity represents a positive decimal quantity of the base asset
///
/// # Invariants
/// - Must be > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(Decimal);

impl Quantity {
    /// Create a new Quantity with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidQuantity` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidQuantity(format!(
                "{} (quantity must be positive)",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Notional value of this quantity at `price` (quantity × price).
    ///
    /// `None` if the product does not fit in a `Decimal`.
    pub fn notional(&self, price: Price) -> Option<Decimal> {
        self.0.checked_mul(price.as_decimal())
    }

    // Callers guarantee value > 0.
    pub(crate) fn new_unchecked(value: Decimal) -> Self {
        Self(value)
    }
}

impl FromStr for Quantity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim())
            .map_err(|e| DomainError::InvalidQuantity(format!("'{}': {}", s, e)))?;
        Self::new(value)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

// =============================================================================
// Symbol
// =============================================================================

/// Symbol represents an exchange contract symbol (e.g., BTCUSDT)
///
/// Input is trimmed and upper-cased, so `btcusdt` and `BTCUSDT` are the same
/// symbol.
///
/// # Invariants
/// - Non-empty, at most 32 characters
/// - ASCII alphanumerics and `_` only (delivery contracts look like
///   `BTCUSDT_250328`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Maximum accepted symbol length
    pub const MAX_LEN: usize = 32;

    /// Create a Symbol with validation and normalization
    ///
    /// # Examples
    /// ```
    /// # use orderbot_domain::value_objects::Symbol;
    /// let symbol = Symbol::new("btcusdt").unwrap();
    /// assert_eq!(symbol.as_str(), "BTCUSDT");
    /// ```
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSymbol` if format is invalid
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let symbol = raw.trim().to_ascii_uppercase();

        if symbol.is_empty() {
            return Err(DomainError::InvalidSymbol("Symbol cannot be empty".to_string()));
        }

        if symbol.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidSymbol(format!("'{}' is too long", symbol)));
        }

        if !symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(DomainError::InvalidSymbol(format!(
                "'{}' contains invalid characters",
                symbol
            )));
        }

        Ok(Self(symbol))
    }

    /// Get the symbol as exchange string (e.g., "BTCUSDT")
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Symbol {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// OrderSide
// =============================================================================

/// OrderSide represents the order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl OrderSide {
    /// Exchange wire name ("BUY" / "SELL")
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl FromStr for OrderSide {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUY" => Ok(OrderSide::Buy),
            "SELL" => Ok(OrderSide::Sell),
            other => Err(DomainError::InvalidSide(format!(
                "'{}'. Expected: BUY, SELL",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // Price tests
    #[test]
    fn test_price_validation() {
        assert!(Price::new(dec!(100.0)).is_ok());
        assert!(Price::new(dec!(0.01)).is_ok());
        assert!(Price::new(dec!(-1.0)).is_err());
        assert!(Price::new(dec!(0.0)).is_err());
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = "30000.50".parse().unwrap();
        assert_eq!(price.as_decimal(), dec!(30000.50));
        assert!("abc".parse::<Price>().is_err());
        assert!("0".parse::<Price>().is_err());
    }

    #[test]
    fn test_price_display_is_normalized() {
        let price = Price::new(dec!(50000.000)).unwrap();
        assert_eq!(price.to_string(), "50000");
    }

    // Quantity tests
    #[test]
    fn test_quantity_validation() {
        assert!(Quantity::new(dec!(0.001)).is_ok());
        assert!(Quantity::new(dec!(100.0)).is_ok());
        assert!(Quantity::new(dec!(-0.1)).is_err());
        assert!(Quantity::new(dec!(0.0)).is_err());
    }

    #[test]
    fn test_quantity_from_str_keeps_exact_decimal() {
        // 0.1 + 0.2 style drift must not appear
        let qty: Quantity = "0.0015".parse().unwrap();
        assert_eq!(qty.as_decimal(), dec!(0.0015));
    }

    #[test]
    fn test_quantity_notional() {
        let qty = Quantity::new(dec!(0.001)).unwrap();
        let price = Price::new(dec!(50000)).unwrap();
        assert_eq!(qty.notional(price), Some(dec!(50)));
    }

    #[test]
    fn test_quantity_notional_overflow() {
        let qty: Quantity = "79228162514264337593543950335".parse().unwrap();
        let price = Price::new(dec!(50000)).unwrap();
        assert_eq!(qty.notional(price), None);
    }

    // Symbol tests
    #[test]
    fn test_symbol_normalizes_case() {
        let symbol = Symbol::new(" btcusdt ").unwrap();
        assert_eq!(symbol.as_str(), "BTCUSDT");
        assert_eq!(symbol.to_string(), "BTCUSDT");
    }

    #[test]
    fn test_symbol_accepts_delivery_contract() {
        assert!(Symbol::new("BTCUSDT_250328").is_ok());
    }

    #[test]
    fn test_symbol_invalid() {
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("BTC-USDT").is_err());
        assert!(Symbol::new(&"X".repeat(33)).is_err());
    }

    // Side tests
    #[test]
    fn test_order_side_parse() {
        assert_eq!("BUY".parse::<OrderSide>().unwrap(), OrderSide::Buy);
        assert_eq!("sell".parse::<OrderSide>().unwrap(), OrderSide::Sell);
        assert!(matches!("HOLD".parse::<OrderSide>(), Err(DomainError::InvalidSide(_))));
    }

    #[test]
    fn test_order_side_serializes_as_wire_name() {
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"SELL\"");
    }

    #[test]
    fn test_order_side_display() {
        assert_eq!(OrderSide::Buy.to_string(), "BUY");
        assert_eq!(OrderSide::Sell.to_string(), "SELL");
    }
}
