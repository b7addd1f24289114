//! [`SizeRange`]-related [`Backend`] implementations.

use common::operations::{By, Insert, Select};
use reqwest::Method;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{size_range, SizeRange},
    infra::{
        backend::{
            self,
            rest::{dto, Request},
        },
        Backend, Rest,
    },
};

/// Path of the global [`SizeRange`]s collection.
const PATH: &str = "service/global-sizes/";

impl Backend<Select<By<Vec<SizeRange>, size_range::PropertyType>>> for Rest {
    type Ok = Vec<SizeRange>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<SizeRange>, size_range::PropertyType>>,
    ) -> Result<Self::Ok, Self::Err> {
        let property_type = by.into_inner();
        let query = [("property_type", property_type.as_ref())];

        let ranges: Vec<dto::SizeRangeOut> = self
            .fetch(Request::get(PATH).query(&query))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        let mut ranges =
            ranges.into_iter().map(SizeRange::from).collect::<Vec<_>>();
        ranges.sort_by_key(|r| r.min_sqft);
        Ok(ranges)
    }
}

impl Backend<Insert<size_range::Batch>> for Rest {
    type Ok = Vec<SizeRange>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(batch): Insert<size_range::Batch>,
    ) -> Result<Self::Ok, Self::Err> {
        let query = [("property_type", batch.property_type.as_ref())];
        let body =
            batch.ranges.iter().map(dto::SizeRangeIn::from).collect::<Vec<_>>();

        let created: Vec<dto::SizeRangeOut> = self
            .fetch(Request::with_body(Method::POST, PATH, &body).query(&query))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        log::debug!(count = created.len(), "size ranges created");
        Ok(created.into_iter().map(SizeRange::from).collect())
    }
}
