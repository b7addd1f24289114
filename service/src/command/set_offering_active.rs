//! [`Command`] for enabling or disabling an [`Offering`].

use common::{
    operations::Update,
    optimistic::{self, Committed, Replace, RolledBack},
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Offering;
use crate::{
    domain::offering,
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for toggling [`Offering::is_active`] flag.
///
/// The flag is switched at once, and restored if the [`Backend`] rejects the
/// change.
#[derive(Debug)]
pub struct SetOfferingActive<'a> {
    /// Displayed [`Offering`].
    pub offering: &'a mut offering::Summary,

    /// New value of the flag.
    pub is_active: bool,
}

impl<'a, B> Command<SetOfferingActive<'a>> for Service<B>
where
    B: Backend<
        Update<offering::Activation>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SetOfferingActive<'a>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SetOfferingActive {
            offering,
            is_active,
        } = cmd;
        if offering.is_active == is_active {
            return Ok(());
        }

        let activation = offering::Activation {
            id: offering.id,
            is_active,
        };
        let Committed(()) = optimistic::attempt(
            &mut offering.is_active,
            Replace(is_active),
            self.backend().execute(Update(activation)),
        )
        .await
        .map_err(|RolledBack(e)| {
            log::warn!(id = %activation.id, "activation rolled back: {e}");
            e
        })
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`SetOfferingActive`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),
}

#[cfg(test)]
mod spec {
    use common::FieldErrors;
    use uuid::Uuid;

    use crate::{
        domain::offering::{Activation, Summary},
        fake::{Call, Fake},
        Command as _,
    };

    use super::SetOfferingActive;

    fn summary() -> Summary {
        Summary {
            id: Uuid::new_v4().into(),
            name: "Gutter cleaning".to_owned(),
            is_active: true,
            order: 0,
        }
    }

    #[tokio::test]
    async fn deactivates_offering() {
        let svc = Fake::default().into_service();
        let mut offering = summary();

        svc.execute(SetOfferingActive {
            offering: &mut offering,
            is_active: false,
        })
        .await
        .unwrap();

        assert!(!offering.is_active);
        assert_eq!(
            svc.backend().calls(),
            [Call::Activation(Activation {
                id: offering.id,
                is_active: false,
            })],
        );
    }

    #[tokio::test]
    async fn restores_flag_on_failure() {
        let svc = Fake {
            reject: Some(FieldErrors::new()),
            ..Fake::default()
        }
        .into_service();
        let mut offering = summary();

        let res = svc
            .execute(SetOfferingActive {
                offering: &mut offering,
                is_active: false,
            })
            .await;

        assert!(res.is_err());
        assert!(offering.is_active);
    }
}
