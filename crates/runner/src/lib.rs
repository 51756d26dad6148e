//! Trading Simulator Runner
//!
//! Orchestrates one trading session:
//!
//! - **Config**: JSON configuration with defaults for every field
//! - **Session**: explicit state owning the market and the ledger
//! - **Driver**: the event loop interleaving price ticks and trade commands
//! - **Chart**: price history as a plottable series
//! - **Console**: line commands for the terminal front-end
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────┐   every 2s    ┌──────────────────────────────┐
//!   │  tick timer  ├──────────────►│        SessionDriver         │
//!   └──────────────┘               │  ┌────────────────────────┐  │
//!                                  │  │     TradingSession     │  │
//!   ┌──────────────┐   commands    │  │  MarketSimulator       │  │
//!   │ SessionHandle├──────────────►│  │  Ledger ◄── price      │  │
//!   └──────▲───────┘               │  └────────────────────────┘  │
//!          │                       └──────────────┬───────────────┘
//!          │      SessionEvent (Tick / Executed / Rejected)
//!          └──────────────────────────────────────┘
//! ```

pub mod chart;
pub mod config;
pub mod console;
pub mod driver;
pub mod session;

// Re-export main types
pub use chart::{ChartPoint, ChartSeries};
pub use config::{AccountConfig, ConfigError, SimulatorConfig};
pub use console::ConsoleCommand;
pub use driver::{SessionDriver, SessionEvent, SessionHandle};
pub use session::{Notification, SessionError, TradingSession};
