use serde::{Deserialize, Serialize};

use crate::values::{Price, Timestamp};

/// One entry of the price history
///
/// `seq` is the tick index: 0 for the initial price, then one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub seq: u64,
    pub price: Price,
    pub timestamp: Timestamp,
}

impl PricePoint {
    pub fn new(seq: u64, price: Price, timestamp: Timestamp) -> Self {
        Self {
            seq,
            price,
            timestamp,
        }
    }
}
