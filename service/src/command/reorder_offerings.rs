//! [`Command`] for reordering [`Offering`]s.

use common::{
    operations::Update,
    optimistic::{self, Committed, Move, Mutation as _, RolledBack},
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

/// [`Command`] for moving an [`Offering`] to another position in the list.
///
/// The `list` is reordered at once, and restored if the [`Backend`] rejects
/// the new order.
#[derive(Debug)]
pub struct ReorderOfferings<'a> {
    /// Displayed list of [`Offering`]s.
    pub list: &'a mut Vec<offering::Summary>,

    /// Position to take the [`Offering`] from.
    pub from: usize,

    /// Position to put the [`Offering`] at.
    pub to: usize,
}

impl<'a, B> Command<ReorderOfferings<'a>> for Service<B>
where
    B: Backend<
        Update<offering::Reorder>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ReorderOfferings<'a>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ReorderOfferings { list, from, to } = cmd;

        let len = list.len();
        if from >= len || to >= len {
            return Err(tracerr::new!(E::OutOfBounds { from, to, len }));
        }
        if from == to {
            return Ok(());
        }

        let mutation = Move { from, to };
        let mut order = list.iter().map(|o| o.id).collect::<Vec<_>>();
        _ = mutation.apply(&mut order);

        let Committed(()) = optimistic::attempt(
            list,
            mutation,
            self.backend().execute(Update(offering::Reorder(order))),
        )
        .await
        .map_err(|RolledBack(e)| {
            log::warn!("reordering rolled back: {e}");
            e
        })
        .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(())
    }
}

/// Error of [`ReorderOfferings`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// Position is out of the list bounds.
    #[display("Cannot move from {from} to {to} in a list of {len}")]
    #[from(ignore)]
    OutOfBounds {
        /// Position to take the [`Offering`] from.
        from: usize,

        /// Position to put the [`Offering`] at.
        to: usize,

        /// Length of the list.
        len: usize,
    },
}

#[cfg(test)]
mod spec {
    use common::FieldErrors;
    use uuid::Uuid;

    use crate::{
        domain::offering::{Reorder, Summary},
        fake::{Call, Fake},
        Command as _,
    };

    use super::ReorderOfferings;

    fn list() -> Vec<Summary> {
        (0..3)
            .map(|order| Summary {
                id: Uuid::new_v4().into(),
                name: format!("Service {order}"),
                is_active: true,
                order,
            })
            .collect()
    }

    #[tokio::test]
    async fn sends_new_order() {
        let svc = Fake::default().into_service();
        let mut list = list();
        let ids = list.iter().map(|o| o.id).collect::<Vec<_>>();

        svc.execute(ReorderOfferings {
            list: &mut list,
            from: 2,
            to: 0,
        })
        .await
        .unwrap();

        let expected = vec![ids[2], ids[0], ids[1]];
        assert_eq!(list.iter().map(|o| o.id).collect::<Vec<_>>(), expected);
        assert_eq!(svc.backend().calls(), [Call::Reorder(Reorder(expected))]);
    }

    #[tokio::test]
    async fn rolls_back_on_failure() {
        let svc = Fake {
            reject: Some(FieldErrors::new()),
            ..Fake::default()
        }
        .into_service();
        let mut list = list();
        let before = list.clone();

        let res = svc
            .execute(ReorderOfferings {
                list: &mut list,
                from: 0,
                to: 2,
            })
            .await;

        assert!(res.is_err());
        assert_eq!(list, before);
    }
}
