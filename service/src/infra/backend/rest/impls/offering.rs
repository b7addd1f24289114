//! [`Offering`]-related [`Backend`] implementations.

use common::operations::{By, Select, Update};
use reqwest::Method;
use tracerr::Traced;

use crate::{
    domain::{offering, Offering},
    infra::{
        backend::{
            self,
            rest::{dto, Request},
        },
        Backend, Rest,
    },
};

/// Path of the [`Offering`]s collection.
const PATH: &str = "service/services/";

impl Backend<Select<By<Vec<offering::Summary>, ()>>> for Rest {
    type Ok = Vec<offering::Summary>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<offering::Summary>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list: Vec<dto::OfferingSummaryOut> = self
            .fetch(Request::get(PATH))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        let mut list =
            list.into_iter().map(offering::Summary::from).collect::<Vec<_>>();
        list.sort_by_key(|o| o.order);
        Ok(list)
    }
}

impl Backend<Select<By<Option<Offering>, offering::Id>>> for Rest {
    type Ok = Option<Offering>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Offering>, offering::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("{PATH}{}/", by.into_inner());

        Ok(self
            .fetch_optional::<dto::OfferingOut, ()>(Request::get(&path))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .map(Offering::from))
    }
}

impl Backend<Update<offering::Reorder>> for Rest {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(offering::Reorder(order)): Update<offering::Reorder>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("{PATH}reorder/");
        let body = dto::ReorderIn { order: &order };

        self.perform(Request::with_body(Method::POST, &path, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}

impl Backend<Update<offering::Activation>> for Rest {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(activation): Update<offering::Activation>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("{PATH}{}/", activation.id);
        let body = dto::ActivationIn {
            is_active: activation.is_active,
        };

        self.perform(Request::with_body(Method::PATCH, &path, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}
