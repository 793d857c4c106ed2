//! Money type for representing prices.
//!
//! Amounts are stored as an integer count of hundredths so that cart totals
//! never accumulate floating-point error. On the wire a price is a plain JSON
//! number (`10`, `499.5`), which is what the catalog resource and the stored
//! cart record use.

use crate::CommerceError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Minor units per major unit.
const MINOR_PER_UNIT: i64 = 100;

/// A non-negative monetary value in hundredths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in hundredths (e.g., paise).
    pub amount_minor: i64,
}

impl Money {
    /// Create a new Money value from minor units.
    pub const fn new(amount_minor: i64) -> Self {
        Self { amount_minor }
    }

    /// Create a Money value from whole units.
    pub const fn from_units(units: i64) -> Self {
        Self::new(units * MINOR_PER_UNIT)
    }

    /// Create a Money value from a decimal amount.
    ///
    /// Rejects negative and non-finite amounts.
    ///
    /// ```
    /// use shopfront_commerce::Money;
    /// let price = Money::from_decimal(49.99).unwrap();
    /// assert_eq!(price.amount_minor, 4999);
    /// assert!(Money::from_decimal(-1.0).is_err());
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, CommerceError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CommerceError::InvalidPrice(amount));
        }
        let minor = (amount * MINOR_PER_UNIT as f64).round();
        if minor > i64::MAX as f64 {
            return Err(CommerceError::Overflow);
        }
        Ok(Self::new(minor as i64))
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / MINOR_PER_UNIT as f64
    }

    /// Format the amount without a currency label.
    ///
    /// Whole amounts print without decimals (`"20"`); fractional amounts keep
    /// only significant hundredths (`"12.5"`, `"12.25"`).
    pub fn display_amount(&self) -> String {
        let units = self.amount_minor / MINOR_PER_UNIT;
        let minor = self.amount_minor % MINOR_PER_UNIT;
        if minor == 0 {
            units.to_string()
        } else if minor % 10 == 0 {
            format!("{}.{}", units, minor / 10)
        } else {
            format!("{}.{:02}", units, minor)
        }
    }

    /// Format with a currency label prefix (e.g., `"Rs.20"`).
    pub fn display_with(&self, label: &str) -> String {
        format!("{}{}", label, self.display_amount())
    }

    /// Add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_minor.checked_add(other.amount_minor).map(Money::new)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: u32) -> Option<Money> {
        self.amount_minor
            .checked_mul(i64::from(factor))
            .map(Money::new)
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum<'a>(mut iter: impl Iterator<Item = &'a Money>) -> Option<Money> {
        iter.try_fold(Money::zero(), |acc, m| acc.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.amount_minor % MINOR_PER_UNIT == 0 {
            serializer.serialize_i64(self.amount_minor / MINOR_PER_UNIT)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}
