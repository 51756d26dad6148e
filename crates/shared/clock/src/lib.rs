//! Trading Simulator Clock Infrastructure
//!
//! Provides time sources for stamping ticks and executions:
//!
//! - [`SystemClock`]: wall-clock time, used by the interactive simulator
//! - [`ManualClock`]: frozen time that only moves when told to, for tests
//!
//! ## Usage
//!
//! ```ignore
//! use tradesim_clock::{Clock, ManualClock};
//! use chrono::Duration;
//!
//! let clock = ManualClock::new(start);
//! clock.advance(Duration::seconds(2)); // one tick interval later
//! assert_eq!(clock.now(), start + Duration::seconds(2));
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use tradesim_ports::Clock;
