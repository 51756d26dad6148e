//! Holding tracking and realized PnL
//!
//! The ledger only ever holds a long position, so a holding is a share count
//! with a weighted average cost. Selling realizes PnL against that cost.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tradesim_core::{Price, Shares};

/// Shares of the instrument and what they cost
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Current share count
    pub shares: Shares,
    /// Weighted average cost per share (zero when flat)
    pub avg_cost: Price,
    /// Total realized PnL from sells
    pub realized_pnl: Decimal,
    /// Number of executions applied
    pub fill_count: u64,
    /// Total shares traded, both sides
    pub volume: u64,
}

impl Holding {
    /// Start from an existing position
    pub fn with_shares(shares: Shares, avg_cost: Price) -> Self {
        Self {
            shares,
            avg_cost: if shares == 0 { Decimal::ZERO } else { avg_cost },
            ..Default::default()
        }
    }

    /// Add shares bought at `price`, re-weighting the average cost
    pub fn apply_buy(&mut self, quantity: u64, price: Price) {
        let new_shares = self.shares + quantity;
        let total_cost = Decimal::from(self.shares) * self.avg_cost + Decimal::from(quantity) * price;
        self.avg_cost = total_cost / Decimal::from(new_shares);
        self.shares = new_shares;
        self.fill_count += 1;
        self.volume += quantity;
    }

    /// Remove shares sold at `price`, returning the PnL realized by this sell
    ///
    /// Callers must have checked `quantity <= shares`.
    pub fn apply_sell(&mut self, quantity: u64, price: Price) -> Decimal {
        let realized = Decimal::from(quantity) * (price - self.avg_cost);
        self.shares -= quantity;
        if self.shares == 0 {
            // Flat, reset avg cost
            self.avg_cost = Decimal::ZERO;
        }
        self.realized_pnl += realized;
        self.fill_count += 1;
        self.volume += quantity;
        realized
    }

    /// Value of the holding at a mark price, saturating at the `Decimal` bounds
    pub fn market_value(&self, mark_price: Price) -> Decimal {
        Decimal::from(self.shares).saturating_mul(mark_price)
    }

    /// Unrealized PnL at a mark price, saturating at the `Decimal` bounds
    pub fn unrealized_pnl(&self, mark_price: Price) -> Decimal {
        Decimal::from(self.shares).saturating_mul(mark_price.saturating_sub(self.avg_cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_average_cost_weighting() {
        let mut holding = Holding::default();
        holding.apply_buy(10, dec!(100));
        holding.apply_buy(10, dec!(120));

        assert_eq!(holding.shares, 20);
        assert_eq!(holding.avg_cost, dec!(110));
        assert_eq!(holding.fill_count, 2);
        assert_eq!(holding.volume, 20);
    }

    #[test]
    fn test_sell_realizes_pnl() {
        let mut holding = Holding::default();
        holding.apply_buy(10, dec!(100));

        let pnl = holding.apply_sell(4, dec!(125));
        assert_eq!(pnl, dec!(100));
        assert_eq!(holding.shares, 6);
        assert_eq!(holding.avg_cost, dec!(100));
        assert_eq!(holding.realized_pnl, dec!(100));

        let pnl = holding.apply_sell(6, dec!(90));
        assert_eq!(pnl, dec!(-60));
        assert_eq!(holding.shares, 0);
        assert_eq!(holding.avg_cost, Decimal::ZERO);
        assert_eq!(holding.realized_pnl, dec!(40));
    }

    #[test]
    fn test_mark_to_market() {
        let holding = Holding::with_shares(5, dec!(150));
        assert_eq!(holding.market_value(dec!(160)), dec!(800));
        assert_eq!(holding.unrealized_pnl(dec!(160)), dec!(50));

        let flat = Holding::with_shares(0, dec!(150));
        assert_eq!(flat.avg_cost, Decimal::ZERO);
        assert_eq!(flat.market_value(dec!(160)), Decimal::ZERO);
    }

    #[test]
    fn test_mark_to_market_saturates() {
        let holding = Holding::with_shares(u64::MAX, Decimal::ONE);
        assert_eq!(holding.market_value(Decimal::MAX), Decimal::MAX);
        assert_eq!(holding.unrealized_pnl(Decimal::MAX), Decimal::MAX);
    }
}
