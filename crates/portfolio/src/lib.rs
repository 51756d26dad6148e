//! Portfolio Ledger
//!
//! Tracks the cash balance and the share holding for the simulated
//! instrument, and applies user buy/sell requests against the market's live
//! price:
//!
//! ```text
//! raw quantity ──► Quantity::parse ──► Ledger::buy / Ledger::sell
//!                      │                   │  reads PriceSource::current_price
//!                      ▼                   ▼
//!               Error::Validation    Execution  |  InsufficientFunds / InsufficientHoldings
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tradesim_portfolio::Ledger;
//!
//! let mut ledger = Ledger::new("MEOW", dec!(10000))?;
//! let execution = ledger.submit(Side::Buy, "10", &market)?;
//! println!("{execution}"); // Bought 10 shares of MEOW for $1500.00.
//! ```

pub mod error;
pub mod ledger;
pub mod position;

// Re-export main types
pub use error::{Error, Result};
pub use ledger::{Ledger, LedgerSnapshot};
pub use position::Holding;
