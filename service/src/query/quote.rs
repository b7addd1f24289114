//! [`Query`] collection related to a single [`Quote`].

use common::operations::{By, Select};
use tracerr::Traced;

use crate::{
    domain::{quote, Quote},
    infra::{backend, Backend},
    read, Service,
};

use super::{BackendQuery, Query};

/// Queries a [`Quote`] by its [`quote::Id`].
pub type ById = BackendQuery<By<Option<Quote>, quote::Id>>;

/// Queries a [`read::quote::Review`] of a [`Quote`] by its [`quote::Id`],
/// with the packages selected as the backend reports them.
#[derive(Clone, Copy, Debug)]
pub struct ReviewById(pub quote::Id);

impl<B> Query<ReviewById> for Service<B>
where
    B: Backend<
        Select<By<Option<Quote>, quote::Id>>,
        Ok = Option<Quote>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Option<(Quote, read::quote::Review)>;
    type Err = Traced<backend::Error>;

    async fn execute(
        &self,
        ReviewById(id): ReviewById,
    ) -> Result<Self::Ok, Self::Err> {
        let Some(quote) = self
            .backend()
            .execute(Select(By::<Option<Quote>, _>::new(id)))
            .await
            .map_err(tracerr::wrap!())?
        else {
            return Ok(None);
        };

        let selection = quote::Selection::from_quote(&quote);
        let review = read::quote::Review::new(
            &quote,
            &selection,
            self.config().divergence_tolerance,
        );
        Ok(Some((quote, review)))
    }
}
