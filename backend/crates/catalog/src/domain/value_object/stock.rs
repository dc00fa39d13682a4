//! Stock Count

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("must be at least 0")]
    Negative,

    #[error("must be at most 2147483647")]
    TooLarge,
}

/// Units on hand, never negative
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Stock(i32);

impl Stock {
    pub fn new(count: i64) -> Result<Self, StockError> {
        if count < 0 {
            return Err(StockError::Negative);
        }
        i32::try_from(count)
            .map(Self)
            .map_err(|_| StockError::TooLarge)
    }

    pub(crate) fn from_db(count: i32) -> Self {
        Self(count)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
