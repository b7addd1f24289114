//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::Display;
use rust_decimal::Decimal;

/// Floating-point percentage in the `0..=100` range.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
#[display("{_0}%")]
pub struct Percent(Decimal);

impl Percent {
    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        (Decimal::ZERO..=Decimal::ONE_HUNDRED)
            .contains(&val)
            .then_some(Self(val))
    }

    /// Returns the decimal value of this [`Percent`].
    #[must_use]
    pub const fn value(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_suffix('%').unwrap_or(s);
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let val = <Decimal as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(val).ok_or_else(|| {
            D::Error::custom(format!("percent `{val}` is out of range"))
        })
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    #[test]
    fn checks_range() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
        assert!(Percent::new(Decimal::NEGATIVE_ONE).is_none());
        assert!(Percent::new(Decimal::new(1001, 1)).is_none());
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Percent::from_str("15").unwrap().value(),
            Decimal::new(15, 0),
        );
        assert_eq!(
            Percent::from_str("12.5%").unwrap().value(),
            Decimal::new(125, 1),
        );
        assert!(Percent::from_str("150").is_err());
        assert!(Percent::from_str("ten").is_err());
    }
}
