//! Trading Simulator Core Domain
//!
//! Pure domain types for the single-instrument trading simulator.
//! This crate contains no async, no I/O, and is 100% unit testable.

pub mod entities;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{Execution, ExecutionId, PricePoint, Side};
pub use values::{Cash, Price, Quantity, QuantityError, Shares, Symbol, Timestamp};
