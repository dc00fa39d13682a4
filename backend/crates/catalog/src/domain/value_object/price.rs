//! Product Price
//!
//! Exact decimal amount stored as `NUMERIC(12,2)`. Binary floats are never
//! involved: input is parsed from its decimal text and rendered back as text.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Digits after the decimal point
pub const PRICE_SCALE: u32 = 2;

/// Exclusive upper bound, ten integer digits fit `NUMERIC(12,2)`
const PRICE_LIMIT: i64 = 10_000_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PriceError {
    #[error("price is required")]
    Required,

    #[error("must be a valid decimal amount")]
    Malformed,

    #[error("must not be negative")]
    Negative,

    #[error("must have at most 2 decimal places")]
    TooPrecise,

    #[error("is too large")]
    TooLarge,
}

/// Non-negative amount with exactly two decimal places
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Validate an amount
    ///
    /// Trailing zeros beyond the scale are accepted (`1.500` is `1.50`),
    /// significant digits beyond it are not.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_zero() {
            // Drops the sign of "-0"
            return Ok(Self(Decimal::new(0, PRICE_SCALE)));
        }
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        if amount.normalize().scale() > PRICE_SCALE {
            return Err(PriceError::TooPrecise);
        }
        if amount >= Decimal::from(PRICE_LIMIT) {
            return Err(PriceError::TooLarge);
        }

        let mut amount = amount;
        amount.rescale(PRICE_SCALE);
        Ok(Self(amount))
    }

    /// Parse the decimal text sent by a client
    pub fn parse(text: &str) -> Result<Self, PriceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PriceError::Required);
        }

        let amount = Decimal::from_str(text).map_err(|_| PriceError::Malformed)?;
        Self::new(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}
