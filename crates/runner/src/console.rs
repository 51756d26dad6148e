//! Terminal front-end helpers
//!
//! Line commands typed by the user and the text shown back. Kept out of
//! `main.rs` so the parsing can be unit tested.

use tradesim_core::Side;
use tradesim_portfolio::LedgerSnapshot;

pub const HELP: &str = "\
Commands:
    buy <qty>     Buy shares at the current price
    sell <qty>    Sell shares at the current price
    status        Show balance, shares and equity
    chart         Show the price history chart
    help          Show this help
    quit          Exit the simulator";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Quantity stays raw text; the ledger validates it
    Trade { side: Side, quantity: String },
    Status,
    Chart,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => ConsoleCommand::Empty,
            "buy" | "b" => ConsoleCommand::Trade {
                side: Side::Buy,
                quantity: rest.to_string(),
            },
            "sell" | "s" => ConsoleCommand::Trade {
                side: Side::Sell,
                quantity: rest.to_string(),
            },
            "status" | "st" => ConsoleCommand::Status,
            "chart" | "c" => ConsoleCommand::Chart,
            "help" | "h" | "?" => ConsoleCommand::Help,
            "quit" | "q" | "exit" => ConsoleCommand::Quit,
            _ => ConsoleCommand::Unknown(line.to_string()),
        }
    }
}

/// Balance / price / shares block, mirroring the on-screen labels
pub fn render_snapshot(snapshot: &LedgerSnapshot) -> String {
    format!(
        "Balance: ${:.2}\n{} Price: ${:.2}\n{} Shares: {}\nEquity: ${:.2} (realized P&L ${:.2}, unrealized P&L ${:.2})",
        snapshot.balance,
        snapshot.symbol,
        snapshot.mark_price,
        snapshot.symbol,
        snapshot.shares,
        snapshot.equity,
        snapshot.realized_pnl,
        snapshot.unrealized_pnl
    )
}
