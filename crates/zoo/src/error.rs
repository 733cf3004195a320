// In crates/zoo/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] store::Error),

    #[error("Zoo id space exhausted: cannot add {count} ids after EA-{last}")]
    IdSpaceExhausted { last: u64, count: u64 },

    #[error(transparent)]
    Series(#[from] core_types::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
