//! [`Coupon`]-related [`Backend`] implementations.

use common::operations::{By, Insert, Select};
use reqwest::Method;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{coupon, Coupon},
    infra::{
        backend::{
            self,
            rest::{self, dto, Request},
        },
        Backend, Rest,
    },
};

/// Path of the [`Coupon`]s collection.
const PATH: &str = "coupons/";

impl Backend<Select<By<Vec<Coupon>, ()>>> for Rest {
    type Ok = Vec<Coupon>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Coupon>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list: Vec<dto::CouponOut> = self
            .fetch(Request::get(PATH))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        Ok(list
            .into_iter()
            .filter_map(|c| {
                let id = c.id();
                let coupon = c.into_coupon();
                if coupon.is_none() {
                    log::warn!(%id, "coupon with malformed code skipped");
                }
                coupon
            })
            .collect())
    }
}

impl Backend<Insert<coupon::New>> for Rest {
    type Ok = Coupon;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Insert(new): Insert<coupon::New>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = dto::CouponIn::from(&new);

        let created: dto::CouponOut = self
            .fetch(Request::with_body(Method::POST, PATH, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        created.into_coupon().ok_or_else(|| {
            tracerr::new!(backend::Error::from(rest::Error::MalformedEntity(
                "coupon code",
            )))
        })
    }
}
