//! Ledger errors
//!
//! Every variant is recoverable: the ledger rejects the request and leaves
//! balance and holdings exactly as they were.

use thiserror::Error;
use tradesim_core::{Cash, QuantityError, Shares};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid quantity: {0}")]
    Validation(#[from] QuantityError),

    #[error("Insufficient funds: required={required}, available={available}")]
    InsufficientFunds { required: Cash, available: Cash },

    #[error("Insufficient holdings: requested={requested}, held={held}")]
    InsufficientHoldings { requested: u64, held: Shares },

    #[error("Price source quotes {actual}, ledger holds {expected}")]
    SymbolMismatch { expected: String, actual: String },

    #[error("Invalid account: {0}")]
    InvalidAccount(String),

    #[error("Arithmetic overflow computing trade")]
    Overflow,
}

impl Error {
    /// Short message suitable for an error dialog or status line
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(_) => "Quantity must be a positive integer.".to_string(),
            Error::InsufficientFunds { .. } => "Insufficient balance.".to_string(),
            Error::InsufficientHoldings { .. } => "You do not own enough shares.".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            Error::Validation(QuantityError::Empty).user_message(),
            "Quantity must be a positive integer."
        );
        assert_eq!(
            Error::InsufficientFunds {
                required: dec!(150000),
                available: dec!(10000)
            }
            .user_message(),
            "Insufficient balance."
        );
        assert_eq!(
            Error::InsufficientHoldings {
                requested: 5,
                held: 0
            }
            .user_message(),
            "You do not own enough shares."
        );
        assert_eq!(Error::Overflow.user_message(), "Arithmetic overflow computing trade");
    }
}
