use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    #[error("Invalid market config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, MarketError>;
