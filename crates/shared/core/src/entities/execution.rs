use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::Side;
use crate::values::{Cash, Price, Quantity, Shares, Symbol, Timestamp};

/// Unique identifier for an execution
pub type ExecutionId = Uuid;

/// A buy or sell that the ledger has applied
///
/// Carries the post-trade balance and share count so the caller can refresh
/// its display without querying the ledger again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub id: ExecutionId,
    pub symbol: Symbol,
    pub side: Side,
    pub quantity: Quantity,
    /// Price read from the market at execution time
    pub price: Price,
    /// Cost of a buy or proceeds of a sell (price × quantity)
    pub amount: Cash,
    pub balance_after: Cash,
    pub shares_after: Shares,
    pub timestamp: Timestamp,
}

impl Execution {
    /// Create a new execution with explicit timestamp
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<Symbol>,
        side: Side,
        quantity: Quantity,
        price: Price,
        amount: Cash,
        balance_after: Cash,
        shares_after: Shares,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into(),
            side,
            quantity,
            price,
            amount,
            balance_after,
            shares_after,
            timestamp,
        }
    }
}

/// User-facing confirmation, e.g. "Bought 10 shares of MEOW for $1500.00."
impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} shares of {} for ${:.2}.",
            self.side.past_tense(),
            self.quantity,
            self.symbol,
            self.amount
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn execution(side: Side, qty: u64, amount: Decimal) -> Execution {
        Execution::new(
            "MEOW",
            side,
            Quantity::new(qty).unwrap(),
            dec!(150),
            amount,
            dec!(8500),
            qty,
            Utc::now(),
        )
    }

    #[test]
    fn test_confirmation_text() {
        let buy = execution(Side::Buy, 10, dec!(1500));
        assert_eq!(buy.to_string(), "Bought 10 shares of MEOW for $1500.00.");

        let sell = execution(Side::Sell, 5, dec!(750.5));
        assert_eq!(sell.to_string(), "Sold 5 shares of MEOW for $750.50.");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = execution(Side::Buy, 1, dec!(150));
        let b = execution(Side::Buy, 1, dec!(150));
        assert_ne!(a.id, b.id);
    }
}
