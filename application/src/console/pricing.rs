//! Console commands of service price rules.

use std::fmt::Write as _;

use clap::Subcommand;
use common::Money;
use service::{
    command,
    domain::{
        offering, package,
        price_rule::{self, Field, Key, Matrix, PriceType, Section},
        question::{self, Branch},
        Offering, Package,
    },
    query, Query as _,
};

use crate::{define_error, AsError as _, Context, Error};

use super::SPAN_NAME;

/// Console command of service price rules.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the complete price rules matrix of a service.
    Show {
        /// ID of the service.
        offering_id: offering::Id,
    },

    /// Sets a single price rule of a service and saves the whole matrix.
    Set {
        /// ID of the service.
        offering_id: offering::Id,

        /// ID of the question the rule is defined for.
        #[arg(long)]
        question: question::Id,

        /// ID of the package the rule is defined for.
        #[arg(long)]
        package: package::Id,

        /// Answer of a yes/no question the rule is defined for.
        #[arg(
            long,
            required_unless_present = "option",
            conflicts_with = "option"
        )]
        answer: Option<question::Answer>,

        /// ID of a question option the rule is defined for.
        #[arg(long)]
        option: Option<question::OptionId>,

        /// New type of the rule.
        #[arg(long = "type")]
        price_type: Option<PriceType>,

        /// New value of the rule.
        #[arg(long)]
        value: Option<Money>,
    },
}

impl Command {
    /// Runs this [`Command`] against the backend.
    ///
    /// # Errors
    ///
    /// If the backend request fails or the rule doesn't exist.
    pub async fn run(self, ctx: &Context) -> Result<String, Error> {
        match self {
            Self::Show { offering_id } => show(ctx, offering_id).await,
            Self::Set {
                offering_id,
                question,
                package,
                answer,
                option,
                price_type,
                value,
            } => {
                let branch = match (answer, option) {
                    (Some(a), _) => Branch::Answer(a),
                    (None, Some(o)) => Branch::Option(o),
                    (None, None) => return Err(PricingError::NoBranch.into()),
                };
                let fields = price_type
                    .map(Field::PriceType)
                    .into_iter()
                    .chain(value.map(Field::Value))
                    .collect::<Vec<_>>();
                let key = Key {
                    question_id: question,
                    package_id: package,
                    branch,
                };
                set(ctx, offering_id, key, fields).await
            }
        }
    }
}

/// Shows the price rules matrix of the [`Offering`].
#[tracing::instrument(
    skip_all,
    fields(cli.name = "pricing show", otel.name = SPAN_NAME, %offering_id),
)]
async fn show(ctx: &Context, offering_id: offering::Id) -> Result<String, Error> {
    let (offering, matrix) = load(ctx, offering_id).await?;
    Ok(render(&offering, &matrix))
}

/// Sets the `fields` of a single price rule and saves the whole matrix.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "pricing set", otel.name = SPAN_NAME, %offering_id),
)]
async fn set(
    ctx: &Context,
    offering_id: offering::Id,
    key: Key,
    fields: Vec<Field>,
) -> Result<String, Error> {
    if fields.is_empty() {
        return Err(PricingError::NothingToSet.into());
    }

    let (offering, mut matrix) = load(ctx, offering_id).await?;
    for field in fields {
        if !matrix.update(&key, field) {
            return Err(PricingError::UnknownRule.into());
        }
    }

    let rules = ctx
        .service()
        .execute(command::SavePriceRules {
            offering_id,
            rules: matrix.rules().to_vec(),
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(render(&offering, &Matrix::new(rules)))
}

/// Loads the [`Offering`] along with its complete price rules [`Matrix`].
async fn load(
    ctx: &Context,
    offering_id: offering::Id,
) -> Result<(Offering, Matrix), Error> {
    let offering = ctx
        .service()
        .execute(query::offering::ById::by(offering_id))
        .await
        .map_err(|e| e.into_error())?
        .ok_or(PricingError::OfferingNotFound)?;
    let rules = ctx
        .service()
        .execute(query::price_rule::ByOffering::by(offering_id))
        .await
        .map_err(|e| e.into_error())?;

    let mut matrix = Matrix::new(rules);
    matrix.rebuild(&offering.questions, &offering.packages);
    Ok((offering, matrix))
}

/// Renders the price rules [`Matrix`] of the [`Offering`] grouped per
/// question.
fn render(offering: &Offering, matrix: &Matrix) -> String {
    let mut out = format!("{} ({})\n", offering.name, offering.id);
    for section in matrix.grid(&offering.questions, &offering.packages) {
        render_section(&mut out, &section, &offering.packages);
    }
    out
}

/// Renders a single [`Section`] of a price rules grid.
fn render_section(out: &mut String, section: &Section<'_>, packages: &[Package]) {
    let question = section.question;
    _ = writeln!(out, "\n{} ({})", question.text, question.id);
    for row in &section.rows {
        _ = writeln!(out, "  {}", row.text);
        for (pkg, cell) in packages.iter().zip(&row.cells) {
            _ = writeln!(out, "    {:<16} {}", pkg.name, render_rule(*cell));
        }
    }
}

/// Renders a single cell of a price rules grid.
fn render_rule(rule: Option<&price_rule::Rule>) -> String {
    let Some(r) = rule else {
        return "-".to_owned();
    };
    match r.adjustment() {
        None => r.price_type.to_string(),
        Some(a) if a == Money::ZERO => r.price_type.to_string(),
        Some(a) if a.is_negative() => a.to_string(),
        Some(a) => format!("+{a}"),
    }
}

define_error! {
    enum PricingError {
        #[code = "OFFERING_NOT_FOUND"]
        #[message = "Service with the provided ID does not exist"]
        OfferingNotFound,

        #[code = "UNKNOWN_PRICE_RULE"]
        #[message = "Service has no such question branch or package"]
        UnknownRule,

        #[code = "NO_BRANCH"]
        #[message = "Either `--answer` or `--option` must be provided"]
        NoBranch,

        #[code = "NOTHING_TO_SET"]
        #[message = "Either `--type` or `--value` must be provided"]
        NothingToSet,
    }
}
