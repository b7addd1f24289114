//! Console commands definitions.

pub mod coupon;
pub mod pricing;
pub mod quote;
pub mod services;
pub mod sizes;

use clap::Subcommand;

use crate::{Context, Error};

/// Name of the [`tracing::Span`] for the console commands.
const SPAN_NAME: &str = "console command";

/// Console command.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage global property size ranges.
    #[command(subcommand)]
    Sizes(sizes::Command),

    /// Manage question pricing of services.
    #[command(subcommand)]
    Pricing(pricing::Command),

    /// Review and adjust customer quotes.
    #[command(subcommand)]
    Quote(quote::Command),

    /// Manage discount coupons.
    #[command(subcommand)]
    Coupon(coupon::Command),

    /// Manage bookable services.
    #[command(subcommand)]
    Services(services::Command),
}

impl Command {
    /// Runs this [`Command`] if it doesn't need the backend, returning it
    /// back otherwise.
    ///
    /// # Errors
    ///
    /// If the command fails.
    pub fn run_offline(self) -> Result<Result<String, Error>, Self> {
        match self {
            Self::Sizes(cmd) => cmd.run_offline().map_err(Self::Sizes),
            Self::Coupon(cmd) => cmd.run_offline().map_err(Self::Coupon),
            Self::Pricing(_) | Self::Quote(_) | Self::Services(_) => Err(self),
        }
    }

    /// Runs this [`Command`] against the backend, returning the output to be
    /// printed.
    ///
    /// # Errors
    ///
    /// If the command fails.
    pub async fn run(self, ctx: &Context) -> Result<String, Error> {
        match self {
            Self::Sizes(cmd) => cmd.run(ctx).await,
            Self::Pricing(cmd) => cmd.run(ctx).await,
            Self::Quote(cmd) => cmd.run(ctx).await,
            Self::Coupon(cmd) => cmd.run(ctx).await,
            Self::Services(cmd) => cmd.run(ctx).await,
        }
    }
}
