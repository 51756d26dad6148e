//! Trading Simulator Ports
//!
//! Port definitions (traits) for the trading simulator.
//! These define the boundaries between the market, the ledger and time.

mod clock;
mod price;

pub use clock::Clock;
pub use price::PriceSource;
