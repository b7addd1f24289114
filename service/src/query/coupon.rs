//! [`Query`] collection related to [`Coupon`]s.

use common::operations::By;

use crate::domain::Coupon;
#[cfg(doc)]
use crate::Query;

use super::BackendQuery;

/// Queries all the [`Coupon`]s.
pub type List = BackendQuery<By<Vec<Coupon>, ()>>;
