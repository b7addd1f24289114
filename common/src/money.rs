//! [`Money`]-related definitions.

use std::{fmt, iter::Sum, ops, str::FromStr};

use derive_more::{From, Into};
use rust_decimal::{Decimal, RoundingStrategy};

/// Amount of money in the platform currency.
///
/// The backend transfers amounts either as decimal strings (`"150.00"`) or
/// as plain JSON numbers, both are accepted.
#[derive(
    Clone, Copy, Debug, Default, Eq, From, Hash, Into, Ord, PartialEq, PartialOrd,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount of [`Money`].
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Money`] amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Indicates whether this [`Money`] amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns the absolute difference between two [`Money`] amounts.
    #[must_use]
    pub fn abs_diff(self, other: Self) -> Self {
        Self((self.0 - other.0).abs())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}${rounded:.2}")
    }
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('$').unwrap_or(s);
        if s.is_empty() {
            return Err("empty amount");
        }
        Decimal::from_str(s).map(Self).map_err(|_| "invalid amount")
    }
}

impl ops::Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, ops::Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Money;

    fn money(s: &str) -> Money {
        Money::new(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn from_str() {
        assert_eq!(Money::from_str("123.45").unwrap(), money("123.45"));
        assert_eq!(Money::from_str("$123.45").unwrap(), money("123.45"));
        assert_eq!(Money::from_str(" 40 ").unwrap(), money("40"));
        assert_eq!(Money::from_str("-5").unwrap(), money("-5"));

        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("$").is_err());
        assert!(Money::from_str("12,5").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn to_string() {
        assert_eq!(money("123.45").to_string(), "$123.45");
        assert_eq!(money("123").to_string(), "$123.00");
        assert_eq!(money("0.005").to_string(), "$0.01");
        assert_eq!(money("-20.5").to_string(), "-$20.50");
        assert_eq!(money("0").to_string(), "$0.00");
    }

    #[test]
    fn sums_amounts() {
        let total: Money = [money("100"), money("40"), money("0.5")]
            .into_iter()
            .sum();
        assert_eq!(total, money("140.5"));
        assert_eq!(money("140") - money("15"), money("125"));
        assert_eq!(money("10").abs_diff(money("12.5")), money("2.5"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_strings_and_numbers() {
        let from_str: Money = serde_json::from_str("\"150.00\"").unwrap();
        let from_num: Money = serde_json::from_str("150").unwrap();
        let from_float: Money = serde_json::from_str("150.5").unwrap();

        assert_eq!(from_str, money("150"));
        assert_eq!(from_num, money("150"));
        assert_eq!(from_float, money("150.5"));
    }
}
