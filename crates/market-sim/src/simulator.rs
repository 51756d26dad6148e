//! Randomized price ticks
//!
//! Uses a seedable `StdRng` so simulations can be replayed exactly.

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tradesim_clock::SystemClock;
use tradesim_core::{Price, PricePoint};
use tradesim_ports::{Clock, PriceSource};

use crate::config::{MarketConfig, MoveRange};
use crate::error::Result;
use crate::history::PriceHistory;

const TICK_CHANNEL_CAPACITY: usize = 1000;

/// Which branch a tick's multiplier was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MoveKind {
    Small,
    Large,
}

/// Outcome of one tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tick {
    /// The newly recorded history point
    pub point: PricePoint,
    pub previous: Price,
    pub multiplier: f64,
    pub kind: MoveKind,
    /// True when the price floor replaced the computed price
    pub floored: bool,
}

impl Tick {
    pub fn price(&self) -> Price {
        self.point.price
    }
}

/// Apply a multiplier to a price
///
/// Rounds to `scale` decimal places (banker's rounding) and lifts the result
/// to `floor` when one is set. Returns the new price and whether the floor
/// applied. A product that overflows `Decimal` leaves the price unchanged.
pub fn next_price(
    previous: Price,
    multiplier: f64,
    scale: u32,
    floor: Option<Price>,
) -> (Price, bool) {
    let factor = Decimal::from_f64(multiplier).unwrap_or(Decimal::ONE);
    let raw = match previous.checked_mul(factor) {
        Some(product) => product.round_dp(scale),
        None => {
            warn!("Price overflow applying multiplier {multiplier} to {previous}; holding price");
            previous
        }
    };

    match floor {
        Some(floor) if raw < floor => (floor, true),
        _ => (raw, false),
    }
}

/// Simulated market for one instrument
pub struct MarketSimulator {
    config: MarketConfig,
    price: Price,
    history: PriceHistory,
    rng: StdRng,
    clock: Arc<dyn Clock>,
    tick_tx: broadcast::Sender<Tick>,
}

impl MarketSimulator {
    /// Create a simulator, seeded from `config.seed` or from entropy
    pub fn new(config: MarketConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::build(config, rng, Arc::new(SystemClock::new()))
    }

    /// Create with a specific seed for reproducible simulations
    pub fn with_seed(config: MarketConfig, seed: u64) -> Result<Self> {
        Self::build(config, StdRng::seed_from_u64(seed), Arc::new(SystemClock::new()))
    }

    /// Replace the clock used to stamp history points.
    ///
    /// Before the first tick the initial point is re-stamped with the new
    /// clock, so history timestamps never run backwards.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        if self.history.len() == 1 {
            self.history = PriceHistory::new(self.price, clock.now());
        }
        self.clock = clock;
        self
    }

    fn build(config: MarketConfig, rng: StdRng, clock: Arc<dyn Clock>) -> Result<Self> {
        config.validate()?;
        let (tick_tx, _) = broadcast::channel(TICK_CHANNEL_CAPACITY);
        let price = config.initial_price;
        let history = PriceHistory::new(price, clock.now());

        Ok(Self {
            config,
            price,
            history,
            rng,
            clock,
            tick_tx,
        })
    }

    /// Subscribe to ticks (the chart feed)
    pub fn subscribe(&self) -> broadcast::Receiver<Tick> {
        self.tick_tx.subscribe()
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn history(&self) -> &PriceHistory {
        &self.history
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Advance the market by one tick
    pub fn tick(&mut self) -> Tick {
        let (kind, multiplier) = self.draw_multiplier();
        let previous = self.price;
        let (price, floored) = next_price(
            previous,
            multiplier,
            self.config.price_scale,
            self.config.price_floor,
        );

        self.price = price;
        let point = self.history.record(price, self.clock.now());

        debug!(
            "{} tick #{}: {} x {:.4} -> {} ({:?})",
            self.config.symbol, point.seq, previous, multiplier, price, kind
        );
        if kind == MoveKind::Large {
            info!(
                "{} large move: {} -> {} (x{:.4})",
                self.config.symbol, previous, price, multiplier
            );
        }
        if floored {
            warn!(
                "{} price floored at {} (tick #{})",
                self.config.symbol, price, point.seq
            );
        }

        let tick = Tick {
            point,
            previous,
            multiplier,
            kind,
            floored,
        };
        // Ignore send error (no subscribers is ok)
        let _ = self.tick_tx.send(tick.clone());
        tick
    }

    fn draw_multiplier(&mut self) -> (MoveKind, f64) {
        let roll: f64 = self.rng.r#gen();
        if roll < self.config.large_move_probability {
            (MoveKind::Large, self.draw_from(self.config.large_move))
        } else {
            (MoveKind::Small, self.draw_from(self.config.small_move))
        }
    }

    fn draw_from(&mut self, range: MoveRange) -> f64 {
        self.rng.gen_range(range.low..=range.high)
    }
}

impl PriceSource for MarketSimulator {
    fn symbol(&self) -> &str {
        &self.config.symbol
    }

    fn current_price(&self) -> Price {
        self.price
    }
}
