//! Portfolio ledger
//!
//! Holds the cash balance and the share holding for one instrument. A buy or
//! sell is validated completely before anything is written, so balance and
//! shares always move together or not at all.

use log::{info, warn};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use tradesim_clock::SystemClock;
use tradesim_core::{Cash, Execution, Price, Quantity, Shares, Side, Symbol};
use tradesim_ports::{Clock, PriceSource};

use crate::error::{Error, Result};
use crate::position::Holding;

/// Point-in-time view of the ledger, marked at a price
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSnapshot {
    pub symbol: Symbol,
    pub balance: Cash,
    pub shares: Shares,
    pub avg_cost: Price,
    pub realized_pnl: Decimal,
    /// shares x (mark price - average cost)
    pub unrealized_pnl: Decimal,
    pub mark_price: Price,
    pub market_value: Cash,
    /// balance + market value, saturating at `Decimal::MAX`
    pub equity: Cash,
}

pub struct Ledger {
    symbol: Symbol,
    balance: Cash,
    holding: Holding,
    executions: Vec<Execution>,
    clock: Arc<dyn Clock>,
}

impl Ledger {
    /// Create a flat ledger with a starting balance
    pub fn new(symbol: impl Into<Symbol>, initial_balance: Cash) -> Result<Self> {
        if initial_balance < Decimal::ZERO {
            return Err(Error::InvalidAccount(format!(
                "initial balance must not be negative, got {initial_balance}"
            )));
        }

        Ok(Self {
            symbol: symbol.into(),
            balance: initial_balance,
            holding: Holding::default(),
            executions: Vec::new(),
            clock: Arc::new(SystemClock::new()),
        })
    }

    /// Seed the ledger with shares already held at `avg_cost`
    pub fn with_shares(mut self, shares: Shares, avg_cost: Price) -> Self {
        self.holding = Holding::with_shares(shares, avg_cost);
        self
    }

    /// Replace the clock used to stamp executions
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn balance(&self) -> Cash {
        self.balance
    }

    pub fn shares(&self) -> Shares {
        self.holding.shares
    }

    pub fn holding(&self) -> &Holding {
        &self.holding
    }

    /// Executions applied so far, oldest first
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    /// Parse a raw quantity and execute it on `side`
    ///
    /// Malformed, zero, negative and fractional input is rejected with
    /// [`Error::Validation`] before the market is consulted.
    pub fn submit(
        &mut self,
        side: Side,
        raw_quantity: &str,
        market: &impl PriceSource,
    ) -> Result<Execution> {
        let quantity = Quantity::parse(raw_quantity).inspect_err(|e| {
            warn!("{} {} rejected: {}", side, self.symbol, e);
        })?;

        match side {
            Side::Buy => self.buy(quantity, market),
            Side::Sell => self.sell(quantity, market),
        }
    }

    /// Buy `quantity` shares at the market's current price
    ///
    /// Returns the execution; its `amount` is the cost debited.
    pub fn buy(&mut self, quantity: Quantity, market: &impl PriceSource) -> Result<Execution> {
        self.check_symbol(market)?;
        let price = market.current_price();
        let cost = price
            .checked_mul(quantity.as_decimal())
            .ok_or(Error::Overflow)?;

        if cost > self.balance {
            warn!(
                "BUY {} {} rejected: cost {} exceeds balance {}",
                quantity, self.symbol, cost, self.balance
            );
            return Err(Error::InsufficientFunds {
                required: cost,
                available: self.balance,
            });
        }
        if self.holding.shares.checked_add(quantity.get()).is_none() {
            return Err(Error::Overflow);
        }

        self.balance -= cost;
        self.holding.apply_buy(quantity.get(), price);

        info!(
            "BUY {} {} @ {} = {} (balance {}, shares {})",
            quantity, self.symbol, price, cost, self.balance, self.holding.shares
        );
        Ok(self.record(Side::Buy, quantity, price, cost))
    }

    /// Sell `quantity` shares at the market's current price
    ///
    /// Returns the execution; its `amount` is the proceeds credited.
    pub fn sell(&mut self, quantity: Quantity, market: &impl PriceSource) -> Result<Execution> {
        self.check_symbol(market)?;

        if quantity.get() > self.holding.shares {
            warn!(
                "SELL {} {} rejected: only {} held",
                quantity, self.symbol, self.holding.shares
            );
            return Err(Error::InsufficientHoldings {
                requested: quantity.get(),
                held: self.holding.shares,
            });
        }

        let price = market.current_price();
        let proceeds = price
            .checked_mul(quantity.as_decimal())
            .ok_or(Error::Overflow)?;
        let new_balance = self.balance.checked_add(proceeds).ok_or(Error::Overflow)?;

        self.balance = new_balance;
        let realized = self.holding.apply_sell(quantity.get(), price);

        info!(
            "SELL {} {} @ {} = {} (realized {}, balance {}, shares {})",
            quantity, self.symbol, price, proceeds, realized, self.balance, self.holding.shares
        );
        Ok(self.record(Side::Sell, quantity, price, proceeds))
    }

    /// Mark the ledger at the market's current price
    pub fn snapshot(&self, market: &impl PriceSource) -> LedgerSnapshot {
        let mark_price = market.current_price();
        let market_value = self.holding.market_value(mark_price);

        LedgerSnapshot {
            symbol: self.symbol.clone(),
            balance: self.balance,
            shares: self.holding.shares,
            avg_cost: self.holding.avg_cost,
            realized_pnl: self.holding.realized_pnl,
            unrealized_pnl: self.holding.unrealized_pnl(mark_price),
            mark_price,
            market_value,
            equity: self.balance.saturating_add(market_value),
        }
    }

    fn check_symbol(&self, market: &impl PriceSource) -> Result<()> {
        if market.symbol() != self.symbol {
            return Err(Error::SymbolMismatch {
                expected: self.symbol.clone(),
                actual: market.symbol().to_string(),
            });
        }
        Ok(())
    }

    fn record(&mut self, side: Side, quantity: Quantity, price: Price, amount: Cash) -> Execution {
        let execution = Execution::new(
            self.symbol.clone(),
            side,
            quantity,
            price,
            amount,
            self.balance,
            self.holding.shares,
            self.clock.now(),
        );
        self.executions.push(execution.clone());
        execution
    }
}
