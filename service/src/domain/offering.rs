//! [`Offering`] definitions.

use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{package, Package, Question};

/// Bookable service offered to customers.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Offering {
    /// ID of this [`Offering`].
    pub id: Id,

    /// Name of this [`Offering`].
    pub name: String,

    /// Indicator whether this [`Offering`] is available for booking.
    pub is_active: bool,

    /// Display order of this [`Offering`] in the list.
    pub order: u32,

    /// [`Question`]s asked while booking this [`Offering`].
    pub questions: Vec<Question>,

    /// [`Package`]s of this [`Offering`].
    pub packages: Vec<Package>,
}

impl Offering {
    /// Returns the [`Package`] of this [`Offering`] with the provided ID.
    #[must_use]
    pub fn package(&self, id: package::Id) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }
}

/// ID of an [`Offering`].
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

/// Summary of an [`Offering`] as displayed in the list, without its
/// [`Question`]s and [`Package`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Summary {
    /// ID of the [`Offering`].
    pub id: Id,

    /// Name of the [`Offering`].
    pub name: String,

    /// Indicator whether the [`Offering`] is available for booking.
    pub is_active: bool,

    /// Display order of the [`Offering`].
    pub order: u32,
}

impl From<&Offering> for Summary {
    fn from(o: &Offering) -> Self {
        Self {
            id: o.id,
            name: o.name.clone(),
            is_active: o.is_active,
            order: o.order,
        }
    }
}

/// New display order of all the [`Offering`]s.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reorder(pub Vec<Id>);

/// Change of the [`Offering::is_active`] flag.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Activation {
    /// ID of the [`Offering`] to change.
    pub id: Id,

    /// New value of the flag.
    pub is_active: bool,
}
