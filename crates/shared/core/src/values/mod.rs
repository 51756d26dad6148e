use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

mod quantity;

pub use quantity::{Quantity, QuantityError};

/// Price value - uses Decimal so 2-decimal rounding is exact
pub type Price = Decimal;

/// Cash amount (balance, cost, proceeds)
pub type Cash = Decimal;

/// Held share count, never negative
pub type Shares = u64;

/// Timestamp in UTC
pub type Timestamp = DateTime<Utc>;

/// Symbol identifier for the tradeable instrument
pub type Symbol = String;
