//! [`Command`] for updating bid [`Notes`] of a [`Quote`].

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::Quote;
use crate::{
    domain::quote::{self, Notes},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for adding or replacing bid [`Notes`] of a [`Quote`].
///
/// Only the provided [`Notes`] are changed, the [`None`] ones are kept. Blank
/// [`Notes`] clear the stored ones.
#[derive(Clone, Debug)]
pub struct UpdateBidNotes {
    /// ID of the [`Quote`] to update.
    pub quote_id: quote::Id,

    /// [`Notes`] to set.
    pub notes: Notes,
}

impl<B> Command<UpdateBidNotes> for Service<B>
where
    B: Backend<
        Update<quote::NotesChange>,
        Ok = (),
        Err = Traced<backend::Error>,
    >,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: UpdateBidNotes,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UpdateBidNotes { quote_id, notes } = cmd;

        if notes.is_empty() {
            return Err(tracerr::new!(E::NoNotes));
        }
        let notes = Notes {
            private: notes.private.map(|n| n.trim().to_owned()),
            public: notes.public.map(|n| n.trim().to_owned()),
        };

        self.backend()
            .execute(Update(quote::NotesChange { quote_id, notes }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UpdateBidNotes`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// Neither private nor public [`Notes`] are provided.
    #[display("Please enter private or public notes")]
    #[from(ignore)]
    NoNotes,
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use crate::{
        domain::quote::{Notes, NotesChange},
        fake::{Call, Fake},
        Command as _,
    };

    use super::{ExecutionError, UpdateBidNotes};

    #[tokio::test]
    async fn sends_only_provided_notes() {
        let svc = Fake::default().into_service();
        let quote_id = Uuid::new_v4().into();

        svc.execute(UpdateBidNotes {
            quote_id,
            notes: Notes {
                private: Some(" Gate code 1234 ".to_owned()),
                public: None,
            },
        })
        .await
        .unwrap();

        assert_eq!(
            svc.backend().calls(),
            [Call::Notes(NotesChange {
                quote_id,
                notes: Notes {
                    private: Some("Gate code 1234".to_owned()),
                    public: None,
                },
            })],
        );
    }

    #[tokio::test]
    async fn clears_blank_notes() {
        let svc = Fake::default().into_service();
        let quote_id = Uuid::new_v4().into();

        svc.execute(UpdateBidNotes {
            quote_id,
            notes: Notes {
                private: Some("  ".to_owned()),
                public: None,
            },
        })
        .await
        .unwrap();

        assert_eq!(
            svc.backend().calls(),
            [Call::Notes(NotesChange {
                quote_id,
                notes: Notes {
                    private: Some(String::new()),
                    public: None,
                },
            })],
        );
    }

    #[tokio::test]
    async fn rejects_empty_notes() {
        let svc = Fake::default().into_service();

        let err = svc
            .execute(UpdateBidNotes {
                quote_id: Uuid::new_v4().into(),
                notes: Notes::default(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoNotes));
        assert!(svc.backend().calls().is_empty());
    }
}
