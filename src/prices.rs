//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Errors raised while building a [`Price`] from a decimal amount.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),

    /// The amount does not fit in minor units.
    #[error("price out of range: {0}")]
    OutOfRange(Decimal),
}

/// Represents a price in pence/cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price {
    value: u64,
}

impl Price {
    /// A price of nothing.
    pub const ZERO: Price = Price { value: 0 };

    /// Largest representable price; every value up to it converts to
    /// [`Money`] without clamping.
    pub const MAX: Price = Price {
        value: i64::MAX.unsigned_abs(),
    };

    /// Creates a new Price from minor units
    pub const fn new(value: u64) -> Self {
        Price { value }
    }

    /// Creates a price from an amount in major units (e.g. pounds), rounded to
    /// the nearest minor unit.
    ///
    /// # Errors
    ///
    /// - [`PriceError::Negative`]: the amount is below zero.
    /// - [`PriceError::OutOfRange`]: the amount overflows minor units.
    pub fn from_major(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }

        let minor_units = amount
            .checked_mul(Decimal::new(100, 0))
            .and_then(|value| value.round_dp(0).to_u64())
            .ok_or(PriceError::OutOfRange(amount))?;

        Ok(Price::new(minor_units))
    }

    /// Returns the amount in major units.
    pub fn to_major(self) -> Decimal {
        Decimal::from(self.value) / Decimal::new(100, 0)
    }

    /// Returns this price multiplied by a quantity, saturating at
    /// [`Price::MAX`]. Use [`Price::checked_times`] when reaching the ceiling
    /// must be detected.
    pub fn times(self, quantity: u64) -> Price {
        self.checked_times(quantity).unwrap_or(Price::MAX)
    }

    /// Returns this price multiplied by a quantity, or `None` above [`Price::MAX`].
    pub fn checked_times(self, quantity: u64) -> Option<Price> {
        self.value
            .checked_mul(quantity)
            .filter(|value| *value <= Price::MAX.value)
            .map(Price::new)
    }

    /// Returns the sum of two prices, or `None` above [`Price::MAX`].
    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.value
            .checked_add(other.value)
            .filter(|value| *value <= Price::MAX.value)
            .map(Price::new)
    }

    /// Converts the price into money in the given currency.
    pub fn to_money(self, currency: &'static Currency) -> Money<'static, Currency> {
        Money::from_minor(i64::try_from(self.value).unwrap_or(i64::MAX), currency)
    }
}

impl Deref for Price {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.value / 100, self.value % 100)
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn new_price() {
        let price = Price::new(1000);

        assert_eq!(price.value, 1000);
    }

    #[test]
    fn price_derefs_to_u64() {
        let price = Price { value: 100 };

        assert_eq!(*price, 100);
    }

    #[test]
    fn from_major_converts_whole_pounds() -> TestResult {
        let price = Price::from_major(Decimal::new(278, 0))?;

        assert_eq!(*price, 27_800);

        Ok(())
    }

    #[test]
    fn from_major_rounds_to_nearest_penny() -> TestResult {
        let price = Price::from_major(Decimal::new(12_345, 3))?;

        assert_eq!(*price, 1_234);

        Ok(())
    }

    #[test]
    fn from_major_rejects_negative_amounts() {
        let result = Price::from_major(Decimal::new(-1, 0));

        assert_eq!(result, Err(PriceError::Negative(Decimal::new(-1, 0))));
    }

    #[test]
    fn times_multiplies_by_quantity() {
        assert_eq!(Price::new(27_800).times(5), Price::new(139_000));
    }

    #[test]
    fn times_saturates_at_max() {
        assert_eq!(Price::new(27_800).checked_times(u64::MAX), None);
        assert_eq!(Price::new(27_800).times(u64::MAX), Price::MAX);
        assert_eq!(Price::new(2).checked_times(*Price::MAX / 2), Some(Price::new(*Price::MAX - 1)));
    }

    #[test]
    fn checked_add_stops_at_max() {
        assert_eq!(Price::MAX.checked_add(Price::new(1)), None);
        assert_eq!(Price::new(1).checked_add(Price::new(2)), Some(Price::new(3)));
    }

    #[test]
    fn max_converts_to_money_unclamped() {
        assert_eq!(Price::MAX.to_money(iso::GBP), Money::from_minor(i64::MAX, iso::GBP));
    }

    #[test]
    fn to_money_keeps_minor_units() {
        let money = Price::new(27_800).to_money(iso::GBP);

        assert_eq!(money, Money::from_minor(27_800, iso::GBP));
    }

    #[test]
    fn to_major_round_trips_display_amount() {
        assert_eq!(Price::new(55_600).to_major(), Decimal::new(556, 0));
        assert_eq!(Price::new(1_234).to_string(), "12.34");
    }
}
