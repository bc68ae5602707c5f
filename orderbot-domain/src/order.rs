//! Order request entity.
//!
//! An `OrderRequest` is built once from user input and handed to the
//! submitter. Prices live inside the order kind, so a LIMIT order without a
//! limit price, or a STOP_LIMIT without a trigger price, is unrepresentable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::value_objects::{DomainError, OrderSide, Price, Quantity, Symbol};

// =============================================================================
// Order Type / Kind
// =============================================================================

/// Order type tag, as chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Market order (immediate execution at current price)
    Market,
    /// Limit order (price guaranteed)
    Limit,
    /// Stop-limit order (limit order placed once stop price trades)
    StopLimit,
}

impl OrderType {
    /// User-facing name
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopLimit => "STOP_LIMIT",
        }
    }
}

impl FromStr for OrderType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_LIMIT" => Ok(OrderType::StopLimit),
            other => Err(DomainError::InvalidOrderType(format!(
                "'{}'. Expected: MARKET, LIMIT, STOP_LIMIT",
                other
            ))),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How long a resting order stays on the book.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// Good till cancelled
    #[default]
    Gtc,
    /// Immediate or cancel
    Ioc,
    /// Fill or kill
    Fok,
}

impl TimeInForce {
    /// Exchange wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
        }
    }
}

impl FromStr for TimeInForce {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "GTC" => Ok(TimeInForce::Gtc),
            "IOC" => Ok(TimeInForce::Ioc),
            "FOK" => Ok(TimeInForce::Fok),
            other => Err(DomainError::InvalidTimeInForce(format!(
                "'{}'. Expected: GTC, IOC, FOK",
                other
            ))),
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order type together with the prices that type requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKind {
    /// Market order
    Market,
    /// Limit order at `price`
    Limit {
        /// Limit price
        price: Price,
        /// Time in force
        time_in_force: TimeInForce,
    },
    /// Stop-limit: once `stop_price` trades, a limit order at `price` is placed
    StopLimit {
        /// Limit price
        price: Price,
        /// Trigger price
        stop_price: Price,
        /// Time in force
        time_in_force: TimeInForce,
    },
}

impl OrderKind {
    /// Build an order kind from a type tag and optional prices.
    ///
    /// Extra prices that the type does not use are ignored.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidOrder` when a required price is missing.
    pub fn from_parts(
        order_type: OrderType,
        price: Option<Price>,
        stop_price: Option<Price>,
        time_in_force: TimeInForce,
    ) -> Result<Self, DomainError> {
        match order_type {
            OrderType::Market => Ok(OrderKind::Market),
            OrderType::Limit => {
                let price = price.ok_or_else(|| {
                    DomainError::InvalidOrder("--price is required for order type LIMIT".to_string())
                })?;
                Ok(OrderKind::Limit { price, time_in_force })
            },
            OrderType::StopLimit => {
                let price = price.ok_or_else(|| {
                    DomainError::InvalidOrder(
                        "--price is required for order type STOP_LIMIT".to_string(),
                    )
                })?;
                let stop_price = stop_price.ok_or_else(|| {
                    DomainError::InvalidOrder(
                        "--stop-price is required for order type STOP_LIMIT".to_string(),
                    )
                })?;
                Ok(OrderKind::StopLimit { price, stop_price, time_in_force })
            },
        }
    }

    /// Type tag for this kind
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopLimit { .. } => OrderType::StopLimit,
        }
    }

    /// Limit price, if the kind has one
    pub fn limit_price(&self) -> Option<Price> {
        match self {
            OrderKind::Market => None,
            OrderKind::Limit { price, .. } | OrderKind::StopLimit { price, .. } => Some(*price),
        }
    }

    /// Stop (trigger) price, if the kind has one
    pub fn stop_price(&self) -> Option<Price> {
        match self {
            OrderKind::StopLimit { stop_price, .. } => Some(*stop_price),
            _ => None,
        }
    }

    /// Time in force, if the kind rests on the book
    pub fn time_in_force(&self) -> Option<TimeInForce> {
        match self {
            OrderKind::Market => None,
            OrderKind::Limit { time_in_force, .. } | OrderKind::StopLimit { time_in_force, .. } => {
                Some(*time_in_force)
            },
        }
    }
}

// =============================================================================
// Order Request
// =============================================================================

/// A single order as requested by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Client order ID (UUID v7), sent as `newClientOrderId`
    pub client_order_id: String,
    /// Contract symbol
    pub symbol: Symbol,
    /// Buy or sell
    pub side: OrderSide,
    /// Type and its prices
    pub kind: OrderKind,
    /// Requested quantity (base asset)
    pub quantity: Quantity,
    /// Round a too-small quantity up instead of rejecting it
    pub auto_adjust: bool,
}

impl OrderRequest {
    /// Create a new order request with a fresh client order ID.
    pub fn new(
        symbol: Symbol,
        side: OrderSide,
        kind: OrderKind,
        quantity: Quantity,
        auto_adjust: bool,
    ) -> Self {
        Self {
            client_order_id: Uuid::now_v7().simple().to_string(),
            symbol,
            side,
            kind,
            quantity,
            auto_adjust,
        }
    }

    /// Type tag of this order
    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    /// Price the quantity is validated against, when the order carries one.
    ///
    /// `None` for market orders: the caller must look up the current price.
    pub fn reference_price(&self) -> Option<Price> {
        self.kind.limit_price()
    }

    /// Copy of this request with a different quantity (same client order ID).
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self { quantity, ..self.clone() }
    }
}

impl fmt::Display for OrderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.order_type(), self.side, self.quantity, self.symbol)?;
        match self.kind {
            OrderKind::Market => Ok(()),
            OrderKind::Limit { price, .. } => write!(f, " @ {}", price),
            OrderKind::StopLimit { price, stop_price, .. } => {
                write!(f, " stop@{} limit@{}", stop_price, price)
            },
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
