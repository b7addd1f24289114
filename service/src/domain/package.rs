//! [`Package`] definitions.

use common::Money;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Priced bundle of features of an [`Offering`].
///
/// [`Offering`]: crate::domain::Offering
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Package {
    /// ID of this [`Package`].
    pub id: Id,

    /// Name of this [`Package`].
    pub name: String,

    /// Base price of this [`Package`] before any adjustments.
    pub base_price: Money,

    /// Display order of this [`Package`] within its [`Offering`].
    ///
    /// [`Offering`]: crate::domain::Offering
    pub order: u32,

    /// IDs of the features included into this [`Package`].
    pub features: Vec<FeatureId>,
}

/// ID of a [`Package`].
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

/// ID of a feature included into a [`Package`].
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
pub struct FeatureId(Uuid);

/// Sorts the provided [`Package`]s by their display order.
///
/// Sorting is stable, so [`Package`]s of the same order keep their relative
/// positions.
pub fn sort_by_order(packages: &mut [Package]) {
    packages.sort_by_key(|p| p.order);
}

#[cfg(test)]
mod spec {
    use common::Money;
    use uuid::Uuid;

    use super::{sort_by_order, Package};

    fn package(name: &str, order: u32) -> Package {
        Package {
            id: Uuid::new_v4().into(),
            name: name.to_owned(),
            base_price: Money::ZERO,
            order,
            features: vec![],
        }
    }

    #[test]
    fn sorts_by_order_stably() {
        let mut packages = vec![
            package("Premium", 2),
            package("Basic", 0),
            package("Standard", 1),
            package("Standard+", 1),
        ];

        sort_by_order(&mut packages);

        assert_eq!(
            packages.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            ["Basic", "Standard", "Standard+", "Premium"],
        );
    }
}
