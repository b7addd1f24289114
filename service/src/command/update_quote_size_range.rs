//! [`Command`] for updating the [`SizeRange`] of a [`Quote`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{Quote, SizeRange};
use crate::{
    domain::{quote, size_range},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for updating the [`SizeRange`] of a [`Quote`].
#[derive(Clone, Copy, Debug)]
pub struct UpdateQuoteSizeRange {
    /// ID of the [`Quote`] to update.
    pub quote_id: quote::Id,

    /// Current [`quote::Status`] of the [`Quote`].
    pub status: quote::Status,

    /// ID of the new [`SizeRange`].
    pub size_range_id: size_range::Id,
}

impl<B> Command<UpdateQuoteSizeRange> for Service<B>
where
    B: Backend<
        Update<quote::SizeRangeChange>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateQuoteSizeRange,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateQuoteSizeRange {
            quote_id,
            status,
            size_range_id,
        } = cmd;

        if !status.allows_size_range_change() {
            return Err(tracerr::new!(E::WrongStatus(status)));
        }

        self.backend()
            .execute(Update(quote::SizeRangeChange {
                quote_id,
                size_range_id,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateQuoteSizeRange`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`Quote`] status doesn't allow changing its [`SizeRange`].
    #[display("Size range cannot be changed for a `{_0}` quote")]
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

    use super::{ExecutionError, UpdateQuoteSizeRange};

    #[tokio::test]
    async fn approved_quote_is_rejected_without_network_call() {
        let svc = Fake::default().into_service();

        let err = svc
            .execute(UpdateQuoteSizeRange {
                quote_id: Uuid::new_v4().into(),
                status: Status::Approved,
                size_range_id: Uuid::new_v4().into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::WrongStatus(Status::Approved),
        ));
        assert!(svc.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn updates_submitted_quote() {
        let svc = Fake::default().into_service();

        svc.execute(UpdateQuoteSizeRange {
            quote_id: Uuid::new_v4().into(),
            status: Status::Submitted,
            size_range_id: Uuid::new_v4().into(),
        })
        .await
        .unwrap();

        assert!(matches!(&svc.backend().calls()[..], [Call::SizeRange(_)]));
    }
}
