//! Session driver - the event loop around a `TradingSession`
//!
//! One task owns the session. It waits on two sources:
//! - the price timer (fires immediately, then every `tick_interval`)
//! - the command channel fed by [`SessionHandle`]
//!
//! Each tick or command runs to completion before the next is taken, so price
//! updates and trades never interleave.

use log::{debug, info};
use market_sim::Tick;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tradesim_core::{Execution, Side};
use tradesim_portfolio::LedgerSnapshot;

use crate::chart::ChartSeries;
use crate::session::{Notification, Result, SessionError, TradingSession};

const COMMAND_CHANNEL_CAPACITY: usize = 64;
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Everything that happened in the session, in order
#[derive(Debug, Clone, Serialize)]
pub enum SessionEvent {
    Tick(Tick),
    Executed(Execution),
    Rejected { side: Side, message: String },
}

enum Command {
    Trade {
        side: Side,
        quantity: String,
        reply: oneshot::Sender<tradesim_portfolio::Result<Execution>>,
    },
    Snapshot(oneshot::Sender<LedgerSnapshot>),
    Chart(oneshot::Sender<ChartSeries>),
    Shutdown,
}

/// Cloneable front-end handle to a running driver
#[derive(Clone)]
pub struct SessionHandle {
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    /// Subscribe to session events (ticks, executions, rejections)
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.event_tx.subscribe()
    }

    pub async fn buy(&self, quantity: impl Into<String>) -> Result<Execution> {
        self.trade(Side::Buy, quantity).await
    }

    pub async fn sell(&self, quantity: impl Into<String>) -> Result<Execution> {
        self.trade(Side::Sell, quantity).await
    }

    pub async fn trade(&self, side: Side, quantity: impl Into<String>) -> Result<Execution> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Trade {
            side,
            quantity: quantity.into(),
            reply,
        })
        .await?;
        Ok(rx.await.map_err(|_| SessionError::Closed)??)
    }

    /// Trade and return the user-facing notification instead of a Result
    pub async fn trade_notification(&self, side: Side, quantity: impl Into<String>) -> Notification {
        match self.trade(side, quantity).await {
            Ok(execution) => Notification::Success(execution.to_string()),
            Err(SessionError::Ledger(e)) => Notification::Error(e.user_message()),
            Err(e) => Notification::Error(e.to_string()),
        }
    }

    pub async fn snapshot(&self) -> Result<LedgerSnapshot> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Snapshot(reply)).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn chart(&self) -> Result<ChartSeries> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Chart(reply)).await?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Ask the driver to stop; the driver task then yields the session
    pub async fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown).await
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| SessionError::Closed)
    }
}

pub struct SessionDriver {
    session: TradingSession,
    tick_interval: Duration,
    command_rx: mpsc::Receiver<Command>,
    event_tx: broadcast::Sender<SessionEvent>,
}

impl SessionDriver {
    /// Create a driver and its handle without starting it
    pub fn new(session: TradingSession, tick_interval: Duration) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let handle = SessionHandle {
            command_tx,
            event_tx: event_tx.clone(),
        };
        let driver = Self {
            session,
            tick_interval,
            command_rx,
            event_tx,
        };
        (driver, handle)
    }

    /// Spawn the driver on the current runtime
    ///
    /// The join handle resolves to the session once the driver stops.
    pub fn spawn(
        session: TradingSession,
        tick_interval: Duration,
    ) -> (SessionHandle, JoinHandle<TradingSession>) {
        let (driver, handle) = Self::new(session, tick_interval);
        (handle, tokio::spawn(driver.run()))
    }

    /// Run until shutdown or until every handle is dropped
    pub async fn run(mut self) -> TradingSession {
        info!(
            "Session driver started ({}ms tick interval)",
            self.tick_interval.as_millis()
        );

        let mut ticker = tokio::time::interval(self.tick_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let tick = self.session.tick();
                    self.publish(SessionEvent::Tick(tick));
                }
                command = self.command_rx.recv() => {
                    match command {
                        Some(Command::Shutdown) | None => break,
                        Some(command) => self.handle(command),
                    }
                }
            }
        }

        info!(
            "Session driver stopped after {} ticks",
            self.session.market().history().len() - 1
        );
        self.session
    }

    fn handle(&mut self, command: Command) {
        match command {
            Command::Trade {
                side,
                quantity,
                reply,
            } => {
                let result = self.session.trade(side, &quantity);
                let event = match &result {
                    Ok(execution) => SessionEvent::Executed(execution.clone()),
                    Err(e) => SessionEvent::Rejected {
                        side,
                        message: e.user_message(),
                    },
                };
                self.publish(event);
                // Caller may have given up waiting
                let _ = reply.send(result);
            }
            Command::Snapshot(reply) => {
                let _ = reply.send(self.session.snapshot());
            }
            Command::Chart(reply) => {
                let _ = reply.send(self.session.chart());
            }
            Command::Shutdown => {}
        }
    }

    fn publish(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            debug!("No session event subscribers");
        }
    }
}
