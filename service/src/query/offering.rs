//! [`Query`] collection related to [`Offering`]s.

use common::operations::By;

use crate::domain::{offering, Offering};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries an [`Offering`] with its questions and packages by its
/// [`offering::Id`].
pub type ById = BackendQuery<By<Option<Offering>, offering::Id>>;

/// Queries all the [`Offering`]s in their display order.
pub type List = BackendQuery<By<Vec<offering::Summary>, ()>>;
