//! [`Query`] collection related to [`PriceRule`]s.

use common::operations::By;

use crate::domain::{offering, PriceRule};
#[cfg(doc)]
use crate::{domain::Offering, Query};

use super::BackendQuery;

/// Queries the stored [`PriceRule`]s of an [`Offering`].
pub type ByOffering = BackendQuery<By<Vec<PriceRule>, offering::Id>>;
