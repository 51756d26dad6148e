//! Market Simulator
//!
//! Owns the price of a single synthetic instrument and its append-only
//! history. Each call to [`MarketSimulator::tick`] draws a random multiplier,
//! applies it to the current price and records the result.
//!
//! ```text
//!   roll < large_move_probability ?
//!        │ yes                     │ no
//!        ▼                         ▼
//!   U[0.70, 1.30]             U[0.95, 1.05]
//!        └──────────┬──────────────┘
//!                   ▼
//!     price = round(price × multiplier, 2)
//!                   │
//!                   ├──► history.push(price)
//!                   └──► broadcast Tick (chart feed)
//! ```

pub mod config;
pub mod error;
pub mod history;
pub mod simulator;

// Re-export main types for convenience
pub use config::{MarketConfig, MoveRange};
pub use error::{MarketError, Result};
pub use history::PriceHistory;
pub use simulator::{MarketSimulator, MoveKind, Tick, next_price};
