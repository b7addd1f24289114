//! [`Command`] for creating a new [`Coupon`].

use common::{operations::Insert, FieldErrors};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{coupon, Coupon},
    infra::{backend, Backend},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Coupon`] out of a raw [`coupon::Draft`].
#[derive(Clone, Debug, From)]
pub struct CreateCoupon {
    /// Raw input of the new [`Coupon`].
    pub draft: coupon::Draft,
}

impl<B> Command<CreateCoupon> for Service<B>
where
    B: Backend<Insert<coupon::New>, Ok = Coupon, Err = Traced<backend::Error>>,
{
    type Ok = Coupon;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCoupon) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let new = cmd
            .draft
            .validate()
            .map_err(|errors| tracerr::new!(E::Invalid(errors)))?;

        self.backend()
            .execute(Insert(new))
            .await
            .map_err(|e| match e.as_ref().field_errors() {
                Some(errors) => tracerr::new!(E::Rejected(errors.clone())),
                None => tracerr::map_from_and_wrap!(=> E)(e),
            })
    }
}

/// Error of [`CreateCoupon`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Backend`] error.
    #[display("`Backend` operation failed: {_0}")]
    Backend(backend::Error),

    /// [`coupon::Draft`] is invalid.
    #[display("Invalid coupon: {_0}")]
    #[from(ignore)]
    Invalid(#[error(not(source))] FieldErrors),

    /// [`Backend`] rejected the [`Coupon`].
    #[display("Coupon rejected: {_0}")]
    #[from(ignore)]
    Rejected(#[error(not(source))] FieldErrors),
}

impl ExecutionError {
    /// Returns the [`FieldErrors`] to be rendered next to the fields, if any.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Invalid(errors) | Self::Rejected(errors) => Some(errors),
            Self::Backend(_) => None,
        }
    }
}

#[cfg(test)]
mod spec {
    use common::FieldErrors;

    use crate::{
        domain::coupon::Draft,
        fake::{Call, Fake},
        Command as _,
    };

    use super::{CreateCoupon, ExecutionError};

    fn draft() -> Draft {
        Draft {
            code: "SPRING10".to_owned(),
            percentage_discount: "10".to_owned(),
            expiration_date: "2030-04-01".to_owned(),
            is_active: true,
            ..Draft::default()
        }
    }

    #[tokio::test]
    async fn creates_valid_coupon() {
        let svc = Fake::default().into_service();

        let coupon = svc.execute(CreateCoupon { draft: draft() }).await.unwrap();

        assert_eq!(coupon.code.to_string(), "SPRING10");
        assert!(matches!(&svc.backend().calls()[..], [Call::Coupon(_)]));
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_backend() {
        let svc = Fake::default().into_service();

        let err = svc
            .execute(CreateCoupon {
                draft: Draft {
                    percentage_discount: String::new(),
                    ..draft()
                },
            })
            .await
            .unwrap_err();

        let errors = err.as_ref().field_errors().unwrap();
        assert!(errors.has("percentage_discount"));
        assert!(errors.has("fixed_discount"));
        assert!(svc.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn passes_backend_field_errors_through() {
        let mut rejection = FieldErrors::new();
        rejection.add("code", "coupon with this code already exists.");
        let svc = Fake {
            reject: Some(rejection.clone()),
            ..Fake::default()
        }
        .into_service();

        let err = svc.execute(CreateCoupon { draft: draft() }).await.unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::Rejected(e) if *e == rejection,
        ));
    }
}
