//! [`Query`] collection related to [`SizeRange`]s.

use common::operations::By;

use crate::domain::{size_range, SizeRange};
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries the [`SizeRange`]s of a [`size_range::PropertyType`] ordered by
/// their lower bound.
pub type ByPropertyType =
    BackendQuery<By<Vec<SizeRange>, size_range::PropertyType>>;
