//! [`Command`] for saving [`PriceRule`]s of an [`Offering`].

use common::operations::{By, Select, Update};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{offering, package, price_rule, question, Offering, PriceRule},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for saving [`PriceRule`]s of an [`Offering`].
///
/// The provided [`PriceRule`]s are completed against the current
/// [`Question`]s and [`Package`]s of the [`Offering`] before being saved, so
/// the whole matrix is always sent.
///
/// [`Package`]: crate::domain::Package
/// [`Question`]: crate::domain::Question
#[derive(Clone, Debug)]
pub struct SavePriceRules {
    /// ID of the [`Offering`] to save the [`PriceRule`]s of.
    pub offering_id: offering::Id,

    /// Edited [`PriceRule`]s.
    pub rules: Vec<PriceRule>,
}

impl<B> Command<SavePriceRules> for Service<B>
where
    B: Backend<
            Select<By<Option<Offering>, offering::Id>>,
            Ok = Option<Offering>,
            Err = Traced<backend::Error>,
        > + Backend<
            Update<Vec<PriceRule>>,
            Ok = (),
            Err = Traced<backend::Error>,
        >,
{
    type Ok = Vec<PriceRule>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SavePriceRules,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SavePriceRules { offering_id, rules } = cmd;

        let offering = self
            .backend()
            .execute(Select(By::<Option<Offering>, _>::new(offering_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OfferingNotExists(offering_id))
            .map_err(tracerr::wrap!())?;

        let mut matrix = price_rule::Matrix::new(rules);
        matrix.rebuild(&offering.questions, &offering.packages);

        if let Some(rule) = matrix.rules().iter().find(|r| r.value.is_negative())
        {
            return Err(tracerr::new!(E::NegativeValue {
                question_id: rule.key.question_id,
                package_id: rule.key.package_id,
            }));
        }

        let rules = matrix.rules().to_vec();
        self.backend()
            .execute(Update(rules.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(rules)
    }
}

/// Error of [`SavePriceRules`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Offering`] doesn't exist.
    #[display("`Offering(id: {_0})` does not exist")]
    #[from(ignore)]
    OfferingNotExists(#[error(not(source))] offering::Id),

    /// [`PriceRule`] has a negative value.
    #[display(
        "Price value of `Question(id: {question_id})` for \
         `Package(id: {package_id})` must not be negative"
    )]
    #[from(ignore)]
    NegativeValue {
        /// ID of the [`Question`] of the [`PriceRule`].
        ///
        /// [`Question`]: crate::domain::Question
        question_id: question::Id,

        /// ID of the [`Package`] of the [`PriceRule`].
        ///
        /// [`Package`]: crate::domain::Package
        package_id: package::Id,
    },
}
