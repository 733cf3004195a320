// In crates/store/src/error.rs

use core_types::StrategyId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Strategy {0} is not in the store")]
    NotFound(StrategyId),

    #[error("Strategy {0} already exists; use `put` to replace it")]
    DuplicateId(StrategyId),
}

pub type Result<T> = std::result::Result<T, Error>;
