//! [`PackageQuote`] definitions.

use common::Money;
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::package;

/// Priced snapshot of a [`Package`] computed by the backend for a specific
/// [`Quote`].
///
/// [`Package`]: crate::domain::Package
/// [`Quote`]: super::Quote
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageQuote {
    /// ID of this [`PackageQuote`].
    pub id: Id,

    /// ID of the quoted [`Package`].
    ///
    /// [`Package`]: crate::domain::Package
    pub package_id: package::Id,

    /// Name of the quoted [`Package`].
    ///
    /// [`Package`]: crate::domain::Package
    pub package_name: String,

    /// Base price of the quoted [`Package`].
    ///
    /// [`Package`]: crate::domain::Package
    pub base_price: Money,

    /// Price for the property size.
    pub sqft_price: Money,

    /// Sum of the adjustments caused by the question responses.
    pub question_adjustments: Money,

    /// Total price computed by the backend.
    pub total_price: Money,

    /// Price manually set by an admin, superseding the [`total_price`].
    ///
    /// [`total_price`]: PackageQuote::total_price
    pub admin_override_price: Option<Money>,

    /// Effective total price reported by the backend, if any.
    pub effective_total_price: Option<Money>,

    /// [`Feature`]s included into the quoted [`Package`].
    ///
    /// [`Package`]: crate::domain::Package
    pub included_features: Vec<Feature>,

    /// [`Feature`]s not included into the quoted [`Package`].
    ///
    /// [`Package`]: crate::domain::Package
    pub excluded_features: Vec<Feature>,

    /// Indicator whether this [`PackageQuote`] is selected by the customer.
    pub is_selected: bool,
}

impl PackageQuote {
    /// Returns the price this [`PackageQuote`] is charged by.
    ///
    /// The admin override always takes precedence. Otherwise, the effective
    /// total reported by the backend is used, falling back to the
    /// [`total_price`].
    ///
    /// [`total_price`]: PackageQuote::total_price
    #[must_use]
    pub fn effective_total(&self) -> Money {
        self.admin_override_price
            .or(self.effective_total_price)
            .unwrap_or(self.total_price)
    }

    /// Indicates whether the price of this [`PackageQuote`] is overridden by
    /// an admin.
    #[must_use]
    pub fn is_overridden(&self) -> bool {
        self.admin_override_price.is_some()
    }
}

/// ID of a [`PackageQuote`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

/// Feature of a [`PackageQuote`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Feature {
    /// ID of this [`Feature`].
    pub id: package::FeatureId,

    /// Name of this [`Feature`].
    pub name: String,
}

/// Valid admin override of a [`PackageQuote`] price.
#[derive(Clone, Copy, Debug, Display, Eq, Into, PartialEq)]
pub struct PriceOverride(Money);

impl PriceOverride {
    /// Parses a [`PriceOverride`] out of the raw user input.
    ///
    /// # Errors
    ///
    /// If the input is not a number, or the number is negative.
    pub fn parse(input: &str) -> Result<Self, InvalidPriceOverride> {
        let price = input
            .parse::<Money>()
            .map_err(|_| InvalidPriceOverride::NotANumber)?;
        if price.is_negative() {
            return Err(InvalidPriceOverride::Negative);
        }
        Ok(Self(price))
    }

    /// Returns the overriding [`Money`] amount.
    #[must_use]
    pub fn price(self) -> Money {
        self.0
    }
}

impl FromStr for PriceOverride {
    type Err = InvalidPriceOverride;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Change of a [`PackageQuote`] admin override price.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PriceChange {
    /// ID of the [`PackageQuote`] to change.
    pub id: Id,

    /// New [`PriceOverride`], or [`None`] to remove the current one.
    pub price: Option<PriceOverride>,
}

/// Error of parsing a [`PriceOverride`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum InvalidPriceOverride {
    /// Input is not a number.
    #[display("Price must be a number")]
    NotANumber,

    /// Input is a negative number.
    #[display("Price must not be negative")]
    Negative,
}

#[cfg(test)]
mod spec {
    use common::Money;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::{InvalidPriceOverride, PackageQuote, PriceOverride};

    fn dollars(n: i64) -> Money {
        Money::new(Decimal::from(n))
    }

    fn package_quote(total: i64) -> PackageQuote {
        PackageQuote {
            id: Uuid::new_v4().into(),
            package_id: Uuid::new_v4().into(),
            package_name: "Basic".to_owned(),
            base_price: dollars(total),
            sqft_price: Money::ZERO,
            question_adjustments: Money::ZERO,
            total_price: dollars(total),
            admin_override_price: None,
            effective_total_price: None,
            included_features: vec![],
            excluded_features: vec![],
            is_selected: false,
        }
    }

    #[test]
    fn override_takes_precedence() {
        let mut pq = package_quote(50);
        assert_eq!(pq.effective_total(), dollars(50));
        assert!(!pq.is_overridden());

        pq.effective_total_price = Some(dollars(55));
        assert_eq!(pq.effective_total(), dollars(55));

        pq.admin_override_price = Some(dollars(40));
        assert_eq!(pq.effective_total(), dollars(40));
        assert!(pq.is_overridden());
    }

    #[test]
    fn parses_override() {
        assert_eq!(
            PriceOverride::parse("120.50").unwrap().price().to_string(),
            "$120.50",
        );
        assert_eq!(PriceOverride::parse("0").unwrap().price(), Money::ZERO);
        assert_eq!(
            PriceOverride::parse("-1"),
            Err(InvalidPriceOverride::Negative),
        );
        assert_eq!(
            PriceOverride::parse("ten"),
            Err(InvalidPriceOverride::NotANumber),
        );
        assert_eq!(
            PriceOverride::parse(""),
            Err(InvalidPriceOverride::NotANumber),
        );
    }
}
