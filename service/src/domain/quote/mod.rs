//! [`Quote`] definitions.

pub mod answer;
pub mod package_quote;
pub mod selection;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, unit, DateTimeOf, Money};
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{offering, package, size_range, SizeRange};

pub use self::{
    answer::{Answer, Response},
    package_quote::{PackageQuote, PriceChange, PriceOverride},
    selection::Selection,
};

/// Customer booking record (also known as submission) flowing through the
/// [`Status`]es.
#[derive(Clone, Debug, PartialEq)]
pub struct Quote {
    /// ID of this [`Quote`].
    pub id: Id,

    /// [`Status`] of this [`Quote`].
    pub status: Status,

    /// [`Customer`] who requested this [`Quote`].
    pub customer: Customer,

    /// [`SizeRange`] of the property this [`Quote`] is requested for.
    pub size_range: Option<SizeRange>,

    /// [`ServiceSelection`]s of this [`Quote`].
    pub services: Vec<ServiceSelection>,

    /// [`Location`] of the property, if known.
    pub location: Option<Location>,

    /// [`Addon`]s ordered along with the services.
    pub addons: Vec<Addon>,

    /// Total price of all the [`Addon`]s, as computed by the backend.
    pub total_addons_price: Money,

    /// Coupon applied to this [`Quote`], if any.
    pub coupon_code: Option<String>,

    /// Amount discounted by the applied coupon.
    pub discounted_amount: Money,

    /// Final total of this [`Quote`], as computed by the backend.
    pub final_total: Money,

    /// Bid [`Notes`] of this [`Quote`].
    pub notes: Notes,

    /// [`DateTime`] when this [`Quote`] was created.
    pub created_at: CreationDateTime,
}

impl Quote {
    /// Returns the [`ServiceSelection`] of this [`Quote`] with the provided
    /// ID.
    #[must_use]
    pub fn service(&self, id: SelectionId) -> Option<&ServiceSelection> {
        self.services.iter().find(|s| s.id == id)
    }

    /// Returns the trip surcharge of this [`Quote`] [`Location`].
    #[must_use]
    pub fn trip_surcharge(&self) -> Money {
        self.location.as_ref().map_or(Money::ZERO, |l| l.trip_surcharge)
    }
}

/// ID of a [`Quote`].
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

define_kind! {
    #[doc = "Status of a [`Quote`]."]
    enum Status {
        #[doc = "[`Quote`] is being filled by the customer."]
        Draft,

        #[doc = "All the questions of the [`Quote`] are answered."]
        ResponsesCompleted,

        #[doc = "[`Quote`] is submitted for a review."]
        Submitted,

        #[doc = "[`Quote`] is approved."]
        Approved,

        #[doc = "[`Quote`] is declined."]
        Declined,

        #[doc = "[`Quote`] is expired."]
        Expired,
    }
}

impl Status {
    /// Indicates whether the [`Quote`] has been submitted already, so its
    /// responses may only be edited rather than filled.
    #[must_use]
    pub fn is_submitted(self) -> bool {
        match self {
            Self::Draft | Self::ResponsesCompleted => false,
            Self::Submitted | Self::Approved | Self::Declined | Self::Expired => {
                true
            }
        }
    }

    /// Indicates whether the selected packages of the [`Quote`] may be
    /// changed.
    #[must_use]
    pub fn allows_package_change(self) -> bool {
        match self {
            Self::Draft
            | Self::ResponsesCompleted
            | Self::Submitted
            | Self::Approved => true,
            Self::Declined | Self::Expired => false,
        }
    }

    /// Indicates whether the package prices of the [`Quote`] may be
    /// overridden.
    #[must_use]
    pub fn allows_price_override(self) -> bool {
        matches!(self, Self::Submitted | Self::Approved)
    }

    /// Indicates whether the [`SizeRange`] of the [`Quote`] may be changed.
    #[must_use]
    pub fn allows_size_range_change(self) -> bool {
        !matches!(self, Self::Approved)
    }
}

/// Customer contact details of a [`Quote`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Customer {
    /// First name of the customer.
    pub first_name: String,

    /// Last name of the customer.
    pub last_name: String,

    /// Email of the customer.
    pub email: String,

    /// Phone number of the customer, if provided.
    pub phone: Option<String>,
}

impl Customer {
    /// Returns the full name of this [`Customer`].
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Service of an [`Offering`] selected in a [`Quote`].
///
/// [`Offering`]: crate::domain::Offering
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceSelection {
    /// ID of this [`ServiceSelection`].
    pub id: SelectionId,

    /// ID of the selected [`Offering`].
    ///
    /// [`Offering`]: crate::domain::Offering
    pub offering_id: offering::Id,

    /// Name of the selected [`Offering`].
    ///
    /// [`Offering`]: crate::domain::Offering
    pub offering_name: String,

    /// [`PackageQuote`]s computed for this [`ServiceSelection`].
    pub package_quotes: Vec<PackageQuote>,

    /// [`Response`]s to the questions of the [`Offering`].
    ///
    /// [`Offering`]: crate::domain::Offering
    pub responses: Vec<Response>,
}

impl ServiceSelection {
    /// Returns the [`PackageQuote`] of this [`ServiceSelection`] with the
    /// provided ID.
    #[must_use]
    pub fn package_quote(
        &self,
        id: package_quote::Id,
    ) -> Option<&PackageQuote> {
        self.package_quotes.iter().find(|pq| pq.id == id)
    }
}

/// ID of a [`ServiceSelection`].
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
pub struct SelectionId(Uuid);

/// Location a [`Quote`] is requested for.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Location {
    /// Name of this [`Location`].
    pub name: String,

    /// Surcharge for the trip to this [`Location`].
    pub trip_surcharge: Money,
}

/// Add-on ordered along with the services of a [`Quote`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Addon {
    /// Name of this [`Addon`].
    pub name: String,

    /// Price of this [`Addon`].
    pub price: Money,
}

/// Bid notes of a [`Quote`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Notes {
    /// Notes visible to admins only.
    pub private: Option<String>,

    /// Notes visible to the customer.
    pub public: Option<String>,
}

impl Notes {
    /// Indicates whether these [`Notes`] contain nothing to update.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.private.is_none() && self.public.is_none()
    }
}

/// Change of the [`SizeRange`] a [`Quote`] is requested for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeRangeChange {
    /// ID of the [`Quote`] to change.
    pub quote_id: Id,

    /// ID of the new [`SizeRange`].
    pub size_range_id: size_range::Id,
}

/// Change of the bid [`Notes`] of a [`Quote`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NotesChange {
    /// ID of the [`Quote`] to change.
    pub quote_id: Id,

    /// [`Notes`] to set, the [`None`] ones are left untouched.
    pub notes: Notes,
}

/// Change of the [`Package`] selected for a [`ServiceSelection`].
///
/// [`Package`]: crate::domain::Package
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PackageChange {
    /// ID of the [`Quote`] to change.
    pub quote_id: Id,

    /// ID of the [`Offering`] the [`ServiceSelection`] is made for.
    ///
    /// [`Offering`]: crate::domain::Offering
    pub offering_id: offering::Id,

    /// ID of the newly selected [`Package`].
    ///
    /// [`Package`]: crate::domain::Package
    pub package_id: package::Id,

    /// Indicator whether the [`Quote`] is [submitted] already, so its
    /// responses are edited rather than filled.
    ///
    /// [submitted]: Status::is_submitted
    pub submitted: bool,
}

/// [`DateTime`] when a [`Quote`] was created.
pub type CreationDateTime = DateTimeOf<(Quote, unit::Creation)>;
