// In crates/backtester/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No price data for symbol {0}")]
    UnknownSymbol(String),

    #[error("Failed to read price file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse price file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Series(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
