//! Type-safe price representation using decimal arithmetic.
//!
//! The Sweet Shop gateway transmits prices as JSON numbers in the store's
//! single display currency. Amounts are held as [`Decimal`] so that cart
//! totals stay exact (`0.1 + 0.2` style float drift never reaches a total).

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from a string.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input is not a valid decimal number.
    #[error("invalid price: {0}")]
    Invalid(String),
    /// The input is a valid number but negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A monetary amount in the store's display currency.
///
/// Serializes as a JSON number to match the gateway's wire format.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of currency units.
    #[must_use]
    pub fn from_units(units: i64) -> Self {
        Self(Decimal::from(units))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a line quantity.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl std::str::FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount: Decimal = s
            .trim()
            .parse()
            .map_err(|_| PriceError::Invalid(s.to_owned()))?;
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_and_sum() {
        let lines = [Price::from_units(25).times(2), Price::from_units(45).times(1)];
        let total: Price = lines.into_iter().sum();
        assert_eq!(total, Price::from_units(95));
    }

    #[test]
    fn test_sum_of_nothing_is_zero() {
        let total: Price = core::iter::empty().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::from_units(25).to_string(), "25.00");
        assert_eq!("45.5".parse::<Price>().unwrap().to_string(), "45.50");
    }

    #[test]
    fn test_parse_rejects_garbage_and_negatives() {
        assert!(matches!(
            "sweets".parse::<Price>(),
            Err(PriceError::Invalid(_))
        ));
        assert!(matches!("-1".parse::<Price>(), Err(PriceError::Negative)));
    }

    #[test]
    fn test_serde_json_number() {
        let price: Price = "45.5".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "45.5");

        let parsed: Price = serde_json::from_str("25").unwrap();
        assert_eq!(parsed, Price::from_units(25));
    }

    #[test]
    fn test_exact_decimal_addition() {
        let a: Price = "0.1".parse().unwrap();
        let b: Price = "0.2".parse().unwrap();
        assert_eq!((a + b).to_string(), "0.30");
    }
}
