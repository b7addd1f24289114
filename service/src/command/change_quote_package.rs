//! [`Command`] for changing the [`Package`] selected in a [`Quote`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Offering, Package, Quote};
use crate::{
    domain::{offering, package, quote},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for changing the [`Package`] selected for an [`Offering`] in
/// a [`Quote`].
#[derive(Clone, Copy, Debug)]
pub struct ChangeQuotePackage {
    /// ID of the [`Quote`] to change.
    pub quote_id: quote::Id,

    /// Current [`quote::Status`] of the [`Quote`].
    pub status: quote::Status,

    /// ID of the [`Offering`] to change the [`Package`] of.
    pub offering_id: offering::Id,

    /// ID of the [`Package`] to select.
    pub package_id: package::Id,
}

impl<B> Command<ChangeQuotePackage> for Service<B>
where
    B: Backend<
        Update<quote::PackageChange>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ChangeQuotePackage,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ChangeQuotePackage {
            quote_id,
            status,
            offering_id,
            package_id,
        } = cmd;

        if !status.allows_package_change() {
            return Err(tracerr::new!(E::WrongStatus(status)));
        }

        self.backend()
            .execute(Update(quote::PackageChange {
                quote_id,
                offering_id,
                package_id,
                submitted: status.is_submitted(),
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`ChangeQuotePackage`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Quote`] status doesn't allow changing its [`Package`]s.
    #[display("Packages cannot be changed for a `{_0}` quote")]
    #[from(ignore)]
    WrongStatus(#[error(not(source))] quote::Status),
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{
        domain::quote::Status,
        fake::{Call, Fake},
        Command as _,
    };

    use super::{ChangeQuotePackage, ExecutionError};

    async fn change(status: Status) -> Option<bool> {
        let svc = Fake::default().into_service();
        svc.execute(ChangeQuotePackage {
            quote_id: Uuid::new_v4().into(),
            status,
            offering_id: Uuid::new_v4().into(),
            package_id: Uuid::new_v4().into(),
        })
        .await
        .ok()?;
        match &svc.backend().calls()[..] {
            [Call::Package(change)] => Some(change.submitted),
            _ => None,
        }
    }

    #[tokio::test]
    async fn edits_responses_of_submitted_quote() {
        assert_eq!(change(Status::Draft).await, Some(false));
        assert_eq!(change(Status::ResponsesCompleted).await, Some(false));
        assert_eq!(change(Status::Submitted).await, Some(true));
        assert_eq!(change(Status::Approved).await, Some(true));
    }

    #[tokio::test]
    async fn rejects_expired_quote() {
        let svc = Fake::default().into_service();

        let err = svc
            .execute(ChangeQuotePackage {
                quote_id: Uuid::new_v4().into(),
                status: Status::Expired,
                offering_id: Uuid::new_v4().into(),
                package_id: Uuid::new_v4().into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::WrongStatus(Status::Expired),
        ));
        assert!(svc.backend().calls().is_empty());
    }
}
