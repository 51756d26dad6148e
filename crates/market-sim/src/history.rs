//! Append-only price history
//!
//! The first point is the initial price (seq 0); each tick appends exactly one
//! point. Nothing is ever removed or reordered, so `seq` equals the index.

use serde::Serialize;
use tradesim_core::{Price, PricePoint, Timestamp};

#[derive(Debug, Clone, Serialize)]
pub struct PriceHistory {
    points: Vec<PricePoint>,
}

impl PriceHistory {
    /// Start a history at the initial price
    pub fn new(initial_price: Price, timestamp: Timestamp) -> Self {
        Self {
            points: vec![PricePoint::new(0, initial_price, timestamp)],
        }
    }

    /// Append a price, returning the recorded point
    pub fn record(&mut self, price: Price, timestamp: Timestamp) -> PricePoint {
        let point = PricePoint::new(self.points.len() as u64, price, timestamp);
        self.points.push(point);
        point
    }

    /// Number of recorded prices (initial price included)
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a history holds at least the initial price
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn initial(&self) -> &PricePoint {
        &self.points[0]
    }

    pub fn latest(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }

    /// All points, oldest first
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// The most recent `n` points, oldest first
    pub fn last_n(&self, n: usize) -> &[PricePoint] {
        let start = self.points.len().saturating_sub(n);
        &self.points[start..]
    }

    pub fn prices(&self) -> impl Iterator<Item = Price> + '_ {
        self.points.iter().map(|p| p.price)
    }

    /// Lowest and highest price ever recorded
    pub fn range(&self) -> (Price, Price) {
        let first = self.initial().price;
        self.prices()
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)))
    }
}
