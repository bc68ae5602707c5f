//! orderbot Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains the order request, value objects, symbol filters and the
//! quantity validation rules.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod filters;
pub mod order;
pub mod validation;
pub mod value_objects;

// Re-export commonly used types
pub use filters::SymbolFilters;
pub use order::{OrderKind, OrderRequest, OrderType, TimeInForce};
pub use validation::{validate, Rejection, ValidationResult};
pub use value_objects::{DomainError, OrderSide, Price, Quantity, Symbol};
