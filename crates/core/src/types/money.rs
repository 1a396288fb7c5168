//! Integer money representation.
//!
//! Shops price everything in whole pesos, so amounts are non-negative `i64`
//! values with no fractional unit. Arithmetic is checked; overflow and
//! negative inputs surface as [`MoneyError`] rather than wrapping.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error produced by money construction or arithmetic.
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum MoneyError {
    /// A negative amount was supplied where money is required.
    #[error("invalid amount: {0}")]
    InvalidAmount(i64),
    /// Checked arithmetic overflowed `i64`.
    #[error("amount overflow")]
    Overflow,
}

/// A non-negative monetary amount in whole currency units.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "i64", into = "i64")]
pub struct Money(i64);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(0);

    /// Create a money value from a raw amount.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::InvalidAmount` for negative input.
    pub const fn new(amount: i64) -> Result<Self, MoneyError> {
        if amount < 0 {
            return Err(MoneyError::InvalidAmount(amount));
        }
        Ok(Self(amount))
    }

    /// The raw amount.
    #[must_use]
    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the sum exceeds `i64::MAX`.
    pub const fn checked_add(self, other: Self) -> Result<Self, MoneyError> {
        match self.0.checked_add(other.0) {
            Some(sum) => Ok(Self(sum)),
            None => Err(MoneyError::Overflow),
        }
    }

    /// Checked multiplication by a quantity.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the product exceeds `i64::MAX`.
    pub const fn checked_mul(self, quantity: u32) -> Result<Self, MoneyError> {
        match self.0.checked_mul(quantity as i64) {
            Some(product) => Ok(Self(product)),
            None => Err(MoneyError::Overflow),
        }
    }

    /// Sum an iterator of amounts. An empty iterator sums to zero.
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Overflow` if the running sum exceeds `i64::MAX`.
    pub fn checked_sum(amounts: impl IntoIterator<Item = Self>) -> Result<Self, MoneyError> {
        amounts
            .into_iter()
            .try_fold(Self::ZERO, Self::checked_add)
    }
}

impl TryFrom<i64> for Money {
    type Error = MoneyError;

    fn try_from(amount: i64) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
