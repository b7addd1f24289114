//! [`Command`] for saving [`SizeRange`]s of a [`PropertyType`].

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::size_range::PropertyType;
use crate::{
    domain::{size_range, SizeRange},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for saving [`SizeRange`]s of a [`PropertyType`] from the rows
/// edited by a user.
#[derive(Clone, Debug)]
pub struct SaveSizeRanges {
    /// [`PropertyType`] to save the [`SizeRange`]s for.
    pub property_type: size_range::PropertyType,

    /// Rows edited by a user.
    pub draft: size_range::Draft,
}

impl<B> Command<SaveSizeRanges> for Service<B>
where
    B: Backend<
        Insert<size_range::Batch>,
        Ok = Vec<SizeRange>,
        Err = Traced<backend::Error>,
    >,
{
    type Ok = Vec<SizeRange>;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SaveSizeRanges,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SaveSizeRanges {
            property_type,
            draft,
        } = cmd;

        let ranges = draft
            .to_ranges()
            .map_err(|_| tracerr::new!(E::NoValidRanges))?;

        self.backend()
            .execute(Insert(size_range::Batch {
                property_type,
                ranges,
            }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`SaveSizeRanges`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// None of the rows forms a valid [`SizeRange`].
    #[display("Please enter at least one valid size range")]
    #[from(ignore)]
    NoValidRanges,
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::size_range::{Draft, PropertyType, Row},
        fake::{Call, Fake},
        Command as _,
    };

    use super::{ExecutionError, SaveSizeRanges};

    #[tokio::test]
    async fn saves_contiguous_ranges() {
        let svc = Fake::default().into_service();

        let saved = svc
            .execute(SaveSizeRanges {
                property_type: PropertyType::House,
                draft: Draft::new([
                    Row::bounded("500"),
                    Row::bounded("1500"),
                    Row::and_up(),
                ]),
            })
            .await
            .unwrap();

        let bounds = saved
            .iter()
            .map(|r| (r.min_sqft, r.max_sqft))
            .collect::<Vec<_>>();
        assert_eq!(bounds, [(0, Some(500)), (501, Some(1500)), (1501, None)]);
        assert!(matches!(
            &svc.backend().calls()[..],
            [Call::SizeRanges(b)] if b.property_type == PropertyType::House,
        ));
    }

    #[tokio::test]
    async fn rejects_without_network_call_when_nothing_is_valid() {
        let svc = Fake::default().into_service();

        let err = svc
            .execute(SaveSizeRanges {
                property_type: PropertyType::House,
                draft: Draft::new([Row::bounded("abc")]),
            })
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), ExecutionError::NoValidRanges));
        assert!(svc.backend().calls().is_empty());
    }
}
