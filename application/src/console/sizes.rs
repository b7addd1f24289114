//! Console commands of global property size ranges.

use std::fmt::Write as _;

use clap::Subcommand;
use service::{
    command,
    domain::{
        size_range::{self, Draft, Row},
        SizeRange,
    },
    query, Command as _,
};
use tracing as log;

use crate::{AsError as _, Context, Error};

use super::SPAN_NAME;

/// Marker of an And Up row.
const AND_UP: &str = "+";

/// Console command of global property size ranges.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Previews the ranges derived from the provided upper bounds.
    Derive {
        /// Upper bounds of the ranges in their order, `+` for an And Up row.
        rows: Vec<String>,
    },

    /// Saves the ranges derived from the provided upper bounds.
    Save {
        /// Property type to save the ranges for.
        #[arg(short, long, default_value = "house")]
        property_type: size_range::PropertyType,

        /// Upper bounds of the ranges in their order, `+` for an And Up row.
        rows: Vec<String>,
    },

    /// Lists the saved ranges.
    List {
        /// Property type to list the ranges of.
        #[arg(short, long, default_value = "house")]
        property_type: size_range::PropertyType,
    },
}

impl Command {
    /// Runs this [`Command`] if it doesn't need the backend.
    ///
    /// # Errors
    ///
    /// Never, the [`Command`] is returned back if it needs the backend.
    pub fn run_offline(self) -> Result<Result<String, Error>, Self> {
        match self {
            Self::Derive { rows } => Ok(Ok(render_draft(&draft(&rows)))),
            Self::Save { .. } | Self::List { .. } => Err(self),
        }
    }

    /// Runs this [`Command`] against the backend.
    ///
    /// # Errors
    ///
    /// If the backend request fails or the rows are invalid.
    pub async fn run(self, ctx: &Context) -> Result<String, Error> {
        match self {
            Self::Derive { rows } => Ok(render_draft(&draft(&rows))),
            Self::Save {
                property_type,
                rows,
            } => save(ctx, property_type, draft(&rows)).await,
            Self::List { property_type } => list(ctx, property_type).await,
        }
    }
}

/// Saves the [`SizeRange`]s derived from the [`Draft`].
#[tracing::instrument(
    skip_all,
    fields(
        cli.name = "sizes save",
        otel.name = SPAN_NAME,
        %property_type,
    ),
)]
async fn save(
    ctx: &Context,
    property_type: size_range::PropertyType,
    draft: Draft,
) -> Result<String, Error> {
    let mut out = render_draft(&draft);
    let saved = ctx
        .service()
        .execute(command::SaveSizeRanges {
            property_type,
            draft,
        })
        .await
        .map_err(|e| e.into_error())?;

    out.push_str("\nSaved:\n");
    out.push_str(&render_ranges(&saved));
    Ok(out)
}

/// Lists the saved [`SizeRange`]s.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "sizes list", otel.name = SPAN_NAME, %property_type),
)]
async fn list(
    ctx: &Context,
    property_type: size_range::PropertyType,
) -> Result<String, Error> {
    let ranges = ctx
        .service()
        .execute(query::size_range::ByPropertyType::by(property_type))
        .await
        .map_err(|e| e.into_error())?;
    if let Err(e) = size_range::check_partition(&ranges) {
        log::warn!("saved `{property_type}` size ranges are inconsistent: {e}");
    }
    Ok(render_ranges(&ranges))
}

/// Builds a [`Draft`] out of the raw `rows`.
fn draft(rows: &[String]) -> Draft {
    Draft::new(rows.iter().map(|r| {
        if r.trim() == AND_UP {
            Row::and_up()
        } else {
            Row::bounded(r.trim())
        }
    }))
}

/// Renders the derived rows of the [`Draft`] along with their errors.
fn render_draft(draft: &Draft) -> String {
    let mut out = String::new();
    for (i, row) in draft.derive().iter().enumerate() {
        let min = row.min.map_or_else(|| "?".to_owned(), |m| m.to_string());
        let max = if row.and_up { "+" } else { row.max.as_str() };
        _ = write!(out, "{:>3}. {min} - {max}", i + 1);
        if let Some(e) = row.error() {
            _ = write!(out, "  ({e})");
        }
        out.push('\n');
    }
    out
}

/// Renders the [`SizeRange`]s one per line.
fn render_ranges(ranges: &[SizeRange]) -> String {
    ranges.iter().fold(String::new(), |mut out, r| {
        out.push_str(&r.label());
        out.push('\n');
        out
    })
}

#[cfg(test)]
mod spec {
    use super::{draft, render_draft};

    fn rows(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|&r| r.to_owned()).collect()
    }

    #[test]
    fn renders_contiguous_preview() {
        let out = render_draft(&draft(&rows(&["500", "1500", "+"])));

        assert_eq!(out, "  1. 0 - 500\n  2. 501 - 1500\n  3. 1501 - +\n");
    }

    #[test]
    fn renders_row_errors() {
        let out = render_draft(&draft(&rows(&["500", "400", "abc"])));

        assert_eq!(
            out,
            "  1. 0 - 500\n  \
             2. 501 - 400  (Must be ≥ 501)\n  \
             3. 401 - abc  (Invalid number)\n",
        );
    }

    #[test]
    fn drops_rows_after_and_up() {
        let out = render_draft(&draft(&rows(&["500", "+", "900"])));

        assert_eq!(out.lines().count(), 2);
    }
}
