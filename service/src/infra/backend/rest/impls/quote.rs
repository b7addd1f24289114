//! [`Quote`]-related [`Backend`] implementations.

use common::operations::{By, Select, Update};
use reqwest::Method;
use tracerr::Traced;

use crate::{
    domain::{quote, Quote},
    infra::{
        backend::{
            self,
            rest::{dto, Request},
        },
        Backend, Rest,
    },
};

impl Backend<Select<By<Option<Quote>, quote::Id>>> for Rest {
    type Ok = Option<Quote>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Quote>, quote::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("quote/{}/", by.into_inner());

        Ok(self
            .fetch_optional::<dto::QuoteOut, ()>(Request::get(&path))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?
            .map(Quote::from))
    }
}

impl Backend<Update<quote::PriceChange>> for Rest {
    type Ok = quote::PackageQuote;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(change): Update<quote::PriceChange>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("quote/package-quotes/{}/price/", change.id);
        let body = dto::PriceOverrideIn {
            admin_override_price: change.price.map(quote::PriceOverride::price),
        };

        let updated: dto::PackageQuoteOut = self
            .fetch(Request::with_body(Method::PATCH, &path, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;
        Ok(updated.into())
    }
}

impl Backend<Update<quote::SizeRangeChange>> for Rest {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(change): Update<quote::SizeRangeChange>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("quote/{}/size-range/", change.quote_id);
        let body = dto::SizeRangeChangeIn {
            size_range: change.size_range_id,
        };

        self.perform(Request::with_body(Method::PATCH, &path, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}

impl Backend<Update<quote::NotesChange>> for Rest {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(change): Update<quote::NotesChange>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("quote/{}/notes/", change.quote_id);
        let body = dto::NotesIn {
            bid_notes_private: change.notes.private.as_deref(),
            bid_notes_public: change.notes.public.as_deref(),
        };

        self.perform(Request::with_body(Method::PATCH, &path, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}

impl Backend<Update<quote::PackageChange>> for Rest {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(change): Update<quote::PackageChange>,
    ) -> Result<Self::Ok, Self::Err> {
        // Submitted quotes have their responses edited, while the ones still
        // being filled get new responses.
        let (method, path) = if change.submitted {
            (
                Method::PUT,
                format!(
                    "quote/{}/services/{}/responses/edit/",
                    change.quote_id, change.offering_id,
                ),
            )
        } else {
            (
                Method::POST,
                format!(
                    "quote/{}/services/{}/responses/",
                    change.quote_id, change.offering_id,
                ),
            )
        };
        let body = dto::PackageChangeIn {
            new_package_id: change.package_id,
        };

        self.perform(Request::with_body(method, &path, &body))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}
