//! Console commands of discount coupons.

use std::fmt::Write as _;

use clap::{Args, Subcommand};
use common::Date;
use service::{
    command,
    domain::{coupon, Coupon},
    query, Command as _,
};

use crate::{AsError as _, Context, Error};

use super::SPAN_NAME;

/// Console command of discount coupons.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validates a new coupon without creating it.
    Check(Draft),

    /// Creates a new coupon.
    Create(Draft),

    /// Lists all the coupons along with their statuses.
    List,
}

/// Raw input of a new coupon.
#[derive(Args, Clone, Debug, Default)]
pub struct Draft {
    /// Code of the coupon.
    #[arg(long, default_value = "")]
    code: String,

    /// Discounted percentage, from 0 to 100.
    #[arg(long = "percent", default_value = "")]
    percentage_discount: String,

    /// Discounted fixed amount.
    #[arg(long = "fixed", default_value = "")]
    fixed_discount: String,

    /// Expiration date in `YYYY-MM-DD` format.
    #[arg(long = "expires", default_value = "")]
    expiration_date: String,

    /// Creates the coupon disabled.
    #[arg(long)]
    inactive: bool,
}

impl From<Draft> for coupon::Draft {
    fn from(value: Draft) -> Self {
        let Draft {
            code,
            percentage_discount,
            fixed_discount,
            expiration_date,
            inactive,
        } = value;
        Self {
            code,
            percentage_discount,
            fixed_discount,
            expiration_date,
            is_active: !inactive,
        }
    }
}

impl Command {
    /// Runs this [`Command`] if it doesn't need the backend.
    ///
    /// # Errors
    ///
    /// If the checked coupon is invalid. The [`Command`] is returned back if
    /// it needs the backend.
    pub fn run_offline(self) -> Result<Result<String, Error>, Self> {
        match self {
            Self::Check(draft) => Ok(check(draft.into())),
            Self::Create(_) | Self::List => Err(self),
        }
    }

    /// Runs this [`Command`] against the backend.
    ///
    /// # Errors
    ///
    /// If the coupon is invalid or the backend request fails.
    pub async fn run(self, ctx: &Context) -> Result<String, Error> {
        match self {
            Self::Check(draft) => check(draft.into()),
            Self::Create(draft) => create(ctx, draft.into()).await,
            Self::List => list(ctx).await,
        }
    }
}

/// Validates the [`coupon::Draft`] locally.
fn check(draft: coupon::Draft) -> Result<String, Error> {
    let new = draft
        .validate()
        .map_err(|fields| Error::validation(&"Invalid coupon", fields))?;
    Ok(format!(
        "Coupon `{}` is valid, expires at {}\n",
        new.code, new.expiration_date,
    ))
}

/// Creates a new [`Coupon`].
#[tracing::instrument(
    skip_all,
    fields(cli.name = "coupon create", otel.name = SPAN_NAME),
)]
async fn create(ctx: &Context, draft: coupon::Draft) -> Result<String, Error> {
    let coupon = ctx
        .service()
        .execute(command::CreateCoupon { draft })
        .await
        .map_err(|e| e.into_error())?;
    Ok(render(&[coupon], Date::today()))
}

/// Lists all the [`Coupon`]s.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "coupon list", otel.name = SPAN_NAME),
)]
async fn list(ctx: &Context) -> Result<String, Error> {
    let coupons = ctx
        .service()
        .execute(query::coupon::List::by(()))
        .await
        .map_err(|e| e.into_error())?;
    Ok(render(&coupons, Date::today()))
}

/// Renders the [`Coupon`]s one per line as of the provided `today`.
fn render(coupons: &[Coupon], today: Date) -> String {
    coupons.iter().fold(String::new(), |mut out, c| {
        _ = writeln!(
            out,
            "{:<20} {:<12} expires {} [{}]",
            c.code.to_string(),
            c.discount_label(),
            c.expiration_date,
            c.status(today),
        );
        out
    })
}

#[cfg(test)]
mod spec {
    use common::Date;
    use service::domain::{coupon::Code, Coupon};
    use uuid::Uuid;

    use super::{check, render, Draft};

    #[test]
    fn renders_expired_before_inactive() {
        let coupon = Coupon {
            id: Uuid::nil().into(),
            code: Code::new("SPRING").unwrap(),
            percentage_discount: Some("10".parse().unwrap()),
            fixed_discount: None,
            expiration_date: Date::from_iso("2024-03-01").unwrap(),
            is_active: false,
        };

        let out = render(&[coupon], Date::from_iso("2024-04-01").unwrap());

        assert_eq!(
            out,
            "SPRING               10%          expires 2024-03-01 [expired]\n",
        );
    }

    #[test]
    fn reports_all_invalid_fields() {
        let err = check(Draft::default().into()).unwrap_err();

        let fields = err.fields.unwrap();
        assert!(fields.has("code"));
        assert!(fields.has("expiration_date"));
        assert!(fields.has("percentage_discount"));
        assert!(fields.has("fixed_discount"));
    }

    #[test]
    fn accepts_valid_draft() {
        let draft = Draft {
            code: "SUMMER_24".to_owned(),
            fixed_discount: "25".to_owned(),
            expiration_date: "2030-06-01".to_owned(),
            ..Draft::default()
        };

        let out = check(draft.into()).unwrap();

        assert_eq!(out, "Coupon `SUMMER_24` is valid, expires at 2030-06-01\n");
    }
}
