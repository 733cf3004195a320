// In crates/core-types/src/error.rs

use thiserror::Error;

/// Input-validation failures shared by every crate that handles series data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A series handed to a combiner did not have the required number of periods.
    #[error("Series {index} has {found} periods, expected {expected}")]
    LengthMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A series contained an undefined value (NaN, infinity, or a zero price
    /// used as a divisor).
    #[error("Malformed series: undefined value at index {index}")]
    MalformedSeries { index: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
