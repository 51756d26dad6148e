//! Trading session - the explicit simulation state
//!
//! A `TradingSession` owns the market simulator and the ledger. The price
//! timer and the trade actions both go through it, one call at a time, so
//! there is no shared global state and no locking.

use log::info;
use market_sim::{MarketError, MarketSimulator, Tick};
use serde::Serialize;
use thiserror::Error;
use tradesim_core::{Execution, Price, Side};
use tradesim_portfolio::{Ledger, LedgerSnapshot};

use crate::chart::ChartSeries;
use crate::config::{ConfigError, SimulatorConfig};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error(transparent)]
    Ledger(#[from] tradesim_portfolio::Error),

    #[error("Session driver has stopped")]
    Closed,
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// Outcome of a user action, ready to show in a dialog or status line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn title(&self) -> &'static str {
        match self {
            Notification::Success(_) => "Success",
            Notification::Error(_) => "Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notification::Success(message) | Notification::Error(message) => message,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notification::Success(_))
    }
}

impl From<&tradesim_portfolio::Result<Execution>> for Notification {
    fn from(result: &tradesim_portfolio::Result<Execution>) -> Self {
        match result {
            Ok(execution) => Notification::Success(execution.to_string()),
            Err(e) => Notification::Error(e.user_message()),
        }
    }
}

pub struct TradingSession {
    market: MarketSimulator,
    ledger: Ledger,
    chart_window: usize,
}

impl TradingSession {
    /// Build market and ledger from config
    pub fn new(config: &SimulatorConfig) -> Result<Self> {
        config.validate()?;

        let market = MarketSimulator::new(config.market.clone())?;
        let ledger = Ledger::new(market.config().symbol.clone(), config.account.initial_balance)?
            .with_shares(config.account.initial_shares, market.price());

        info!(
            "{}: {} @ {}, balance {}, shares {}",
            config.name,
            market.config().symbol,
            market.price(),
            ledger.balance(),
            ledger.shares()
        );

        Ok(Self::from_parts(market, ledger).with_chart_window(config.chart_window))
    }

    /// Assemble a session from an existing market and ledger
    pub fn from_parts(market: MarketSimulator, ledger: Ledger) -> Self {
        Self {
            market,
            ledger,
            chart_window: 60,
        }
    }

    pub fn with_chart_window(mut self, chart_window: usize) -> Self {
        self.chart_window = chart_window;
        self
    }

    pub fn market(&self) -> &MarketSimulator {
        &self.market
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn symbol(&self) -> &str {
        &self.market.config().symbol
    }

    pub fn price(&self) -> Price {
        self.market.price()
    }

    /// Timer handler: advance the market one tick
    pub fn tick(&mut self) -> Tick {
        self.market.tick()
    }

    /// Buy handler: `quantity` is the raw text of the quantity field
    pub fn buy(&mut self, quantity: &str) -> tradesim_portfolio::Result<Execution> {
        self.trade(Side::Buy, quantity)
    }

    /// Sell handler: `quantity` is the raw text of the quantity field
    pub fn sell(&mut self, quantity: &str) -> tradesim_portfolio::Result<Execution> {
        self.trade(Side::Sell, quantity)
    }

    pub fn trade(&mut self, side: Side, quantity: &str) -> tradesim_portfolio::Result<Execution> {
        self.ledger.submit(side, quantity, &self.market)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot(&self.market)
    }

    /// Chart feed limited to the configured window
    pub fn chart(&self) -> ChartSeries {
        ChartSeries::from_history(self.market.history(), self.symbol(), Some(self.chart_window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use tradesim_portfolio::Error as LedgerError;

    fn session() -> TradingSession {
        let mut config = SimulatorConfig::default();
        config.market.seed = Some(42);
        TradingSession::new(&config).unwrap()
    }

    #[test]
    fn test_initial_state() {
        let session = session();
        let snapshot = session.snapshot();

        assert_eq!(session.symbol(), "MEOW");
        assert_eq!(session.price(), dec!(150));
        assert_eq!(snapshot.balance, dec!(10000));
        assert_eq!(snapshot.shares, 0);
        assert_eq!(snapshot.equity, dec!(10000));
        assert_eq!(session.market().history().len(), 1);
    }

    #[test]
    fn test_buy_sell_scenario() {
        let mut session = session();

        let buy = session.buy("10").unwrap();
        assert_eq!(buy.amount, dec!(1500));
        let sell = session.sell("5").unwrap();
        assert_eq!(sell.amount, dec!(750));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.balance, dec!(9250));
        assert_eq!(snapshot.shares, 5);
    }

    #[test]
    fn test_trades_follow_ticks() {
        let mut session = session();
        let tick = session.tick();

        let buy = session.buy("2").unwrap();
        assert_eq!(buy.price, tick.price());
        assert_eq!(buy.amount, tick.price() * dec!(2));
    }

    #[test]
    fn test_notifications() {
        let mut session = session();

        let ok = Notification::from(&session.buy("10"));
        assert_eq!(ok, Notification::Success("Bought 10 shares of MEOW for $1500.00.".to_string()));
        assert_eq!(ok.title(), "Success");

        let bad_input = Notification::from(&session.buy("abc"));
        assert_eq!(bad_input.message(), "Quantity must be a positive integer.");
        assert!(!bad_input.is_success());

        let too_big = Notification::from(&session.buy("1000"));
        assert_eq!(too_big.message(), "Insufficient balance.");

        let oversold = Notification::from(&session.sell("11"));
        assert_eq!(oversold.message(), "You do not own enough shares.");
        assert_eq!(oversold.title(), "Error");
    }

    #[test]
    fn test_rejections_surface_ledger_errors() {
        let mut session = session();
        assert!(matches!(session.sell("1"), Err(LedgerError::InsufficientHoldings { .. })));
        assert!(matches!(session.buy("-2"), Err(LedgerError::Validation(_))));
    }

    #[test]
    fn test_initial_shares_from_config() {
        let mut config = SimulatorConfig::default();
        config.account.initial_shares = 4;
        let session = TradingSession::new(&config).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.shares, 4);
        assert_eq!(snapshot.avg_cost, dec!(150));
        assert_eq!(snapshot.equity, dec!(10600));
    }

    #[test]
    fn test_snapshot_at_max_balance() {
        let mut config = SimulatorConfig::default();
        config.account.initial_balance = rust_decimal::Decimal::MAX;
        config.account.initial_shares = 1;
        let session = TradingSession::new(&config).unwrap();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.equity, rust_decimal::Decimal::MAX);
        assert!(crate::console::render_snapshot(&snapshot).contains("MEOW Shares: 1"));
    }

    #[test]
    fn test_chart_window() {
        let mut config = SimulatorConfig::default();
        config.chart_window = 3;
        let mut session = TradingSession::new(&config).unwrap();
        for _ in 0..10 {
            session.tick();
        }

        let chart = session.chart();
        assert_eq!(chart.len(), 3);
        assert_eq!(chart.points[2].y, session.price());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = SimulatorConfig::default();
        config.chart_window = 0;
        assert!(matches!(
            TradingSession::new(&config),
            Err(SessionError::Config(_))
        ));
    }
}
