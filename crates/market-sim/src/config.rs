//! Market configuration
//!
//! Every field has a default matching the classic simulator: symbol `MEOW`
//! starting at 150, a 5% chance of a ±30% move per tick, otherwise ±5%.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tradesim_core::{Price, Symbol};

use crate::error::{MarketError, Result};

/// Closed interval a multiplier is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveRange {
    pub low: f64,
    pub high: f64,
}

impl MoveRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn validate(&self, name: &str) -> Result<()> {
        if !(self.low.is_finite() && self.high.is_finite()) {
            return Err(MarketError::InvalidConfig(format!(
                "{name} bounds must be finite"
            )));
        }
        if self.low <= 0.0 {
            return Err(MarketError::InvalidConfig(format!(
                "{name} lower bound must be positive, got {}",
                self.low
            )));
        }
        if self.low > self.high {
            return Err(MarketError::InvalidConfig(format!(
                "{name} lower bound {} exceeds upper bound {}",
                self.low, self.high
            )));
        }
        Ok(())
    }
}

/// Configuration for the market simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default = "default_symbol")]
    pub symbol: Symbol,

    #[serde(default = "default_initial_price")]
    pub initial_price: Price,

    /// Probability (0.0 to 1.0) that a tick draws from `large_move`
    #[serde(default = "default_large_move_probability")]
    pub large_move_probability: f64,

    #[serde(default = "default_large_move")]
    pub large_move: MoveRange,

    #[serde(default = "default_small_move")]
    pub small_move: MoveRange,

    /// Decimal places prices are rounded to after each tick
    #[serde(default = "default_price_scale")]
    pub price_scale: u32,

    /// Lowest price a tick may produce; `null` disables the floor
    #[serde(default = "default_price_floor")]
    pub price_floor: Option<Price>,

    /// Seed for reproducible runs; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_symbol() -> Symbol {
    "MEOW".to_string()
}

fn default_initial_price() -> Price {
    dec!(150)
}

fn default_large_move_probability() -> f64 {
    0.05
}

fn default_large_move() -> MoveRange {
    MoveRange::new(0.7, 1.3)
}

fn default_small_move() -> MoveRange {
    MoveRange::new(0.95, 1.05)
}

fn default_price_scale() -> u32 {
    2
}

fn default_price_floor() -> Option<Price> {
    Some(dec!(0.01))
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            symbol: default_symbol(),
            initial_price: default_initial_price(),
            large_move_probability: default_large_move_probability(),
            large_move: default_large_move(),
            small_move: default_small_move(),
            price_scale: default_price_scale(),
            price_floor: default_price_floor(),
            seed: None,
        }
    }
}

impl MarketConfig {
    /// Check the config describes a market that can tick forever
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(MarketError::InvalidConfig("symbol is empty".to_string()));
        }
        if self.initial_price <= Decimal::ZERO {
            return Err(MarketError::InvalidConfig(format!(
                "initial price must be positive, got {}",
                self.initial_price
            )));
        }
        if !(0.0..=1.0).contains(&self.large_move_probability) {
            return Err(MarketError::InvalidConfig(format!(
                "large move probability must be within [0, 1], got {}",
                self.large_move_probability
            )));
        }
        self.large_move.validate("large move")?;
        self.small_move.validate("small move")?;
        if self.price_scale > 28 {
            return Err(MarketError::InvalidConfig(format!(
                "price scale must be at most 28, got {}",
                self.price_scale
            )));
        }
        if let Some(floor) = self.price_floor {
            if floor <= Decimal::ZERO {
                return Err(MarketError::InvalidConfig(format!(
                    "price floor must be positive, got {floor}"
                )));
            }
            if floor.round_dp(self.price_scale) != floor {
                return Err(MarketError::InvalidConfig(format!(
                    "price floor {floor} has more than {} decimal places",
                    self.price_scale
                )));
            }
        }
        Ok(())
    }
}
