//! [`PriceRule`]-related [`Backend`] implementations.

use common::operations::{By, Select, Update};
use reqwest::Method;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{offering, PriceRule},
    infra::{
        backend::{
            self,
            rest::{dto, Request},
        },
        Backend, Rest,
    },
};

impl Backend<Select<By<Vec<PriceRule>, offering::Id>>> for Rest {
    type Ok = Vec<PriceRule>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<PriceRule>, offering::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("service/services/{}/pricing/", by.into_inner());

        let rules: Vec<dto::PriceRuleDto> = self
            .fetch(Request::get(&path))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> backend::Error))?;

        let total = rules.len();
        let rules = rules
            .into_iter()
            .filter_map(dto::PriceRuleDto::into_rule)
            .collect::<Vec<_>>();
        if rules.len() < total {
            log::warn!(
                skipped = total - rules.len(),
                "price rules without answer or option skipped",
            );
        }
        Ok(rules)
    }
}

impl Backend<Update<Vec<PriceRule>>> for Rest {
    type Ok = ();
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        Update(rules): Update<Vec<PriceRule>>,
    ) -> Result<Self::Ok, Self::Err> {
        let body = dto::BulkPricingIn {
            rules: rules.iter().map(dto::PriceRuleDto::from).collect(),
        };

        self.perform(Request::with_body(
            Method::POST,
            "service/questions/bulk-pricing/",
            &body,
        ))
        .await
        .map_err(tracerr::map_from_and_wrap!(=> backend::Error))
    }
}
