//! Console commands of the offered services list.

use std::fmt::Write as _;

use clap::Subcommand;
use service::{command, domain::offering, query, Command as _};

use crate::{define_error, AsError as _, Context, Error};

use super::SPAN_NAME;

/// Console command of the offered services list.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Lists all the services in their display order.
    List,

    /// Moves a service to another position of the list.
    Move {
        /// Current position of the service, starting from 1.
        from: usize,

        /// New position of the service, starting from 1.
        to: usize,
    },

    /// Switches a service between being bookable and hidden.
    Toggle {
        /// ID of the service.
        id: offering::Id,
    },
}

impl Command {
    /// Runs this [`Command`] against the backend.
    ///
    /// # Errors
    ///
    /// If the backend request fails or the service doesn't exist.
    pub async fn run(self, ctx: &Context) -> Result<String, Error> {
        match self {
            Self::List => list(ctx).await,
            Self::Move { from, to } => move_to(ctx, from, to).await,
            Self::Toggle { id } => toggle(ctx, id).await,
        }
    }
}

/// Lists all the [`offering::Summary`]s.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "services list", otel.name = SPAN_NAME),
)]
async fn list(ctx: &Context) -> Result<String, Error> {
    Ok(render(&fetch(ctx).await?))
}

/// Moves an [`offering::Summary`] between the provided 1-based positions.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "services move", otel.name = SPAN_NAME, %from, %to),
)]
async fn move_to(ctx: &Context, from: usize, to: usize) -> Result<String, Error> {
    let mut list = fetch(ctx).await?;
    let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
        return Err(ServicesError::ZeroPosition.into());
    };

    ctx.service()
        .execute(command::ReorderOfferings {
            list: &mut list,
            from,
            to,
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(render(&list))
}

/// Switches the [`offering::Summary::is_active`] flag.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "services toggle", otel.name = SPAN_NAME, %id),
)]
async fn toggle(ctx: &Context, id: offering::Id) -> Result<String, Error> {
    let mut list = fetch(ctx).await?;
    let offering = list
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or(ServicesError::NotFound)?;
    let is_active = !offering.is_active;

    ctx.service()
        .execute(command::SetOfferingActive {
            offering,
            is_active,
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(render(&list))
}

/// Fetches all the [`offering::Summary`]s in their display order.
async fn fetch(ctx: &Context) -> Result<Vec<offering::Summary>, Error> {
    ctx.service()
        .execute(query::offering::List::by(()))
        .await
        .map_err(|e| e.into_error())
}

/// Renders the [`offering::Summary`]s one per line with their positions.
fn render(list: &[offering::Summary]) -> String {
    list.iter().enumerate().fold(String::new(), |mut out, (i, o)| {
        let state = if o.is_active { "active" } else { "inactive" };
        _ = writeln!(out, "{:>3}. {} ({}) [{state}]", i + 1, o.name, o.id);
        out
    })
}

define_error! {
    enum ServicesError {
        #[code = "SERVICE_NOT_FOUND"]
        #[message = "Service with the provided ID does not exist"]
        NotFound,

        #[code = "ZERO_POSITION"]
        #[message = "Positions start from 1"]
        ZeroPosition,
    }
}

#[cfg(test)]
mod spec {
    use service::domain::offering::Summary;
    use uuid::Uuid;

    use super::render;

    #[test]
    fn renders_positions_and_states() {
        let list = [
            Summary {
                id: Uuid::from_u128(1).into(),
                name: "Inspection".to_owned(),
                is_active: true,
                order: 0,
            },
            Summary {
                id: Uuid::from_u128(2).into(),
                name: "Radon".to_owned(),
                is_active: false,
                order: 1,
            },
        ];

        let out = render(&list);

        assert_eq!(
            out,
            format!(
                "  1. Inspection ({}) [active]\n  2. Radon ({}) [inactive]\n",
                Uuid::from_u128(1),
                Uuid::from_u128(2),
            ),
        );
    }
}
