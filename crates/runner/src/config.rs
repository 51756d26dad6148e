//! Configuration loading for the trading simulator
//!
//! Supports JSON configuration files for:
//! - The simulated market (symbol, starting price, move distribution, seed)
//! - The trader's starting account
//! - Timer and chart settings
//!
//! Every field is optional; an empty object yields the classic defaults.

use market_sim::{MarketConfig, MarketError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tradesim_core::{Cash, Shares};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Market(#[from] MarketError),

    #[error("Invalid account config: {0}")]
    InvalidAccount(String),

    #[error("Invalid session config: {0}")]
    InvalidSession(String),
}

/// Root configuration for the simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default)]
    pub market: MarketConfig,

    #[serde(default)]
    pub account: AccountConfig,

    /// Milliseconds between price ticks
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Number of most recent points shown by the chart
    #[serde(default = "default_chart_window")]
    pub chart_window: usize,
}

fn default_name() -> String {
    "Stock Trading Simulator".to_string()
}

fn default_tick_interval_ms() -> u64 {
    2000
}

fn default_chart_window() -> usize {
    60
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            market: MarketConfig::default(),
            account: AccountConfig::default(),
            tick_interval_ms: default_tick_interval_ms(),
            chart_window: default_chart_window(),
        }
    }
}

impl SimulatorConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.market.validate()?;
        self.account.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidSession(
                "tick interval must be at least 1ms".to_string(),
            ));
        }
        if self.chart_window == 0 {
            return Err(ConfigError::InvalidSession(
                "chart window must hold at least one point".to_string(),
            ));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Trader account at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountConfig {
    #[serde(default = "default_initial_balance")]
    pub initial_balance: Cash,

    /// Shares already held; their cost basis is the market's initial price
    #[serde(default)]
    pub initial_shares: Shares,
}

fn default_initial_balance() -> Cash {
    dec!(10000)
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            initial_balance: default_initial_balance(),
            initial_shares: 0,
        }
    }
}

impl AccountConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_balance < Decimal::ZERO {
            return Err(ConfigError::InvalidAccount(format!(
                "initial balance must not be negative, got {}",
                self.initial_balance
            )));
        }
        Ok(())
    }
}
