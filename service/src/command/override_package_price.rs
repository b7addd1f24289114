//! [`Command`] for overriding a [`PackageQuote`] price.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::quote::{self, package_quote, PackageQuote, PriceOverride},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for setting or removing the admin override price of a
/// [`PackageQuote`].
///
/// The downstream totals aren't recomputed locally, the backend reflects the
/// override in the returned [`PackageQuote`] and the next fetch of the
/// [`Quote`].
///
/// [`Quote`]: crate::domain::Quote
#[derive(Clone, Copy, Debug)]
pub struct OverridePackagePrice {
    /// Current [`quote::Status`] of the [`Quote`] the [`PackageQuote`]
    /// belongs to.
    ///
    /// [`Quote`]: crate::domain::Quote
    pub status: quote::Status,

    /// ID of the [`PackageQuote`] to override the price of.
    pub package_quote_id: package_quote::Id,

    /// New [`PriceOverride`], or [`None`] to remove the current one.
    pub price: Option<PriceOverride>,
}

impl<B> Command<OverridePackagePrice> for Service<B>
where
    B: Backend<
        Update<quote::PriceChange>,
        Ok = PackageQuote,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = PackageQuote;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: OverridePackagePrice,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let OverridePackagePrice {
            status,
            package_quote_id,
            price,
        } = cmd;

        if !status.allows_price_override() {
            return Err(tracerr::new!(E::WrongStatus(status)));
        }

        self.backend()
            .execute(Update(quote::PriceChange {
                id: package_quote_id,
                price,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`OverridePackagePrice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Quote`] status doesn't allow overriding prices.
    ///
    /// [`Quote`]: crate::domain::Quote
    #[display("Prices cannot be overridden for a `{_0}` quote")]
    #[from(ignore)]
    WrongStatus(#[error(not(source))] quote::Status),
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{
        domain::quote::{PriceChange, PriceOverride, Status},
        fake::{Call, Fake},
        Command as _,
    };

    use super::{ExecutionError, OverridePackagePrice};

    #[tokio::test]
    async fn overrides_price_of_submitted_quote() {
        let svc = Fake::default().into_service();
        let id = Uuid::new_v4().into();
        let price = PriceOverride::parse("120.50").unwrap();

        let pq = svc
            .execute(OverridePackagePrice {
                status: Status::Submitted,
                package_quote_id: id,
                price: Some(price),
            })
            .await
            .unwrap();

        assert_eq!(pq.effective_total(), price.price());
        assert_eq!(
            svc.backend().calls(),
            [Call::Price(PriceChange {
                id,
                price: Some(price),
            })],
        );
    }

    #[tokio::test]
    async fn rejects_declined_quote() {
        let svc = Fake::default().into_service();

        let err = svc
            .execute(OverridePackagePrice {
                status: Status::Declined,
                package_quote_id: Uuid::new_v4().into(),
                price: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::WrongStatus(Status::Declined),
        ));
        assert!(svc.backend().calls().is_empty());
    }
}
