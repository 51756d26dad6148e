//! Order quantity value object
//!
//! A `Quantity` is a whole, strictly positive number of shares. The only way to
//! obtain one is through the parse-and-validate constructors below, so a ledger
//! operation that receives a `Quantity` never has to re-check it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons a raw quantity is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("quantity is empty")]
    Empty,

    #[error("quantity is not a whole number: {0:?}")]
    Malformed(String),

    #[error("quantity must be positive, got {0}")]
    NotPositive(String),

    #[error("quantity must be an integer, got {0}")]
    NotInteger(String),

    #[error("quantity is too large: {0}")]
    TooLarge(String),
}

/// Strictly positive whole number of shares
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct Quantity(u64);

impl Quantity {
    /// Create from a share count, rejecting zero
    pub fn new(shares: u64) -> Result<Self, QuantityError> {
        if shares == 0 {
            return Err(QuantityError::NotPositive("0".to_string()));
        }
        Ok(Self(shares))
    }

    /// Parse user input (e.g. the text of a quantity field)
    ///
    /// Surrounding whitespace is ignored. Only plain digit strings are
    /// accepted; signs, decimal points and exponents are rejected with the
    /// most specific error that applies.
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }

        if s.bytes().all(|b| b.is_ascii_digit()) {
            let shares: u64 = s
                .parse()
                .map_err(|_| QuantityError::TooLarge(s.to_string()))?;
            return Self::new(shares);
        }

        // Not a digit string: classify numeric-looking input for a better message
        match Decimal::from_str(s) {
            Ok(value) if value <= Decimal::ZERO => {
                Err(QuantityError::NotPositive(s.to_string()))
            }
            Ok(value) if !value.fract().is_zero() => {
                Err(QuantityError::NotInteger(s.to_string()))
            }
            _ => Err(QuantityError::Malformed(s.to_string())),
        }
    }

    /// Number of shares
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Quantity as a Decimal, for notional calculations
    #[inline]
    pub fn as_decimal(self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<u64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<Decimal> for Quantity {
    type Error = QuantityError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        if value <= Decimal::ZERO {
            return Err(QuantityError::NotPositive(value.to_string()));
        }
        if !value.fract().is_zero() {
            return Err(QuantityError::NotInteger(value.to_string()));
        }
        let shares = u64::try_from(value).map_err(|_| QuantityError::TooLarge(value.to_string()))?;
        Self::new(shares)
    }
}

impl From<Quantity> for u64 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_digits() {
        assert_eq!(Quantity::parse("10").unwrap().get(), 10);
        assert_eq!(Quantity::parse(" 7 ").unwrap().get(), 7);
        assert_eq!(Quantity::parse("007").unwrap().get(), 7);
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert!(matches!(Quantity::parse("0"), Err(QuantityError::NotPositive(_))));
        assert!(matches!(Quantity::parse("-3"), Err(QuantityError::NotPositive(_))));
        assert!(matches!(Quantity::parse("-0.5"), Err(QuantityError::NotPositive(_))));
    }

    #[test]
    fn test_parse_rejects_fractions() {
        assert!(matches!(Quantity::parse("2.5"), Err(QuantityError::NotInteger(_))));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Quantity::parse(""), Err(QuantityError::Empty));
        assert_eq!(Quantity::parse("   "), Err(QuantityError::Empty));
        assert!(matches!(Quantity::parse("ten"), Err(QuantityError::Malformed(_))));
        assert!(matches!(Quantity::parse("+5"), Err(QuantityError::Malformed(_))));
        assert!(matches!(Quantity::parse("5.0"), Err(QuantityError::Malformed(_))));
        assert!(matches!(Quantity::parse("1 2"), Err(QuantityError::Malformed(_))));
    }

    #[test]
    fn test_parse_overflow() {
        assert!(matches!(
            Quantity::parse("99999999999999999999999"),
            Err(QuantityError::TooLarge(_))
        ));
    }

    #[test]
    fn test_try_from_numbers() {
        assert_eq!(Quantity::try_from(5u64).unwrap().get(), 5);
        assert!(Quantity::try_from(0u64).is_err());
        assert_eq!(Quantity::try_from(dec!(12)).unwrap().get(), 12);
        assert!(matches!(
            Quantity::try_from(dec!(1.5)),
            Err(QuantityError::NotInteger(_))
        ));
    }

    #[test]
    fn test_serde_rejects_zero() {
        let q: Quantity = serde_json::from_str("3").unwrap();
        assert_eq!(q.get(), 3);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
    }
}
