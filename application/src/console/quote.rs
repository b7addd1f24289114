//! Console commands of customer quotes.

use std::fmt::Write as _;

use clap::Subcommand;
use service::{
    command,
    domain::{
        offering, package,
        quote::{self, package_quote, PackageQuote, PriceOverride, Selection},
        size_range, Quote,
    },
    query, read, Command as _,
};

use crate::{define_error, AsError as _, Context, Error};

use super::SPAN_NAME;

/// Console command of customer quotes.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows a quote prepared for a review.
    Show {
        /// ID of the quote.
        id: quote::Id,
    },

    /// Previews the totals of a quote with other packages selected.
    ///
    /// Nothing is sent to the backend.
    SelectTotal {
        /// ID of the quote.
        id: quote::Id,

        /// Package to select in a service, as `<service-id>=<package-id>`.
        #[arg(long = "select", value_parser = parse_selection)]
        selections: Vec<(quote::SelectionId, package_quote::Id)>,
    },

    /// Overrides the price of a quoted package, or removes the override.
    OverridePrice {
        /// ID of the quote.
        quote_id: quote::Id,

        /// ID of the quoted package.
        package_quote_id: package_quote::Id,

        /// New price, the current override is removed if omitted.
        #[arg(long)]
        price: Option<PriceOverride>,
    },

    /// Changes the property size range of a quote.
    SizeRange {
        /// ID of the quote.
        quote_id: quote::Id,

        /// ID of the new size range.
        size_range_id: size_range::Id,
    },

    /// Saves the admin notes of a quote bid.
    Notes {
        /// ID of the quote.
        quote_id: quote::Id,

        /// Notes visible to admins only, an empty value clears them.
        #[arg(long)]
        private: Option<String>,

        /// Notes visible to the customer, an empty value clears them.
        #[arg(long)]
        public: Option<String>,
    },

    /// Changes the selected package of a quote service.
    ChangePackage {
        /// ID of the quote.
        quote_id: quote::Id,

        /// ID of the service the package belongs to.
        offering_id: offering::Id,

        /// ID of the package to select.
        package_id: package::Id,
    },
}

impl Command {
    /// Runs this [`Command`] against the backend.
    ///
    /// # Errors
    ///
    /// If the backend request fails, the quote doesn't exist or its status
    /// forbids the action.
    pub async fn run(self, ctx: &Context) -> Result<String, Error> {
        match self {
            Self::Show { id } => show(ctx, id).await,
            Self::SelectTotal { id, selections } => {
                select_total(ctx, id, selections).await
            }
            Self::OverridePrice {
                quote_id,
                package_quote_id,
                price,
            } => override_price(ctx, quote_id, package_quote_id, price).await,
            Self::SizeRange {
                quote_id,
                size_range_id,
            } => change_size_range(ctx, quote_id, size_range_id).await,
            Self::Notes {
                quote_id,
                private,
                public,
            } => {
                let notes = quote::Notes { private, public };
                update_notes(ctx, quote_id, notes).await
            }
            Self::ChangePackage {
                quote_id,
                offering_id,
                package_id,
            } => change_package(ctx, quote_id, offering_id, package_id).await,
        }
    }
}

/// Shows the [`read::quote::Review`] of a [`Quote`].
#[tracing::instrument(
    skip_all,
    fields(cli.name = "quote show", otel.name = SPAN_NAME, %id),
)]
async fn show(ctx: &Context, id: quote::Id) -> Result<String, Error> {
    let (quote, review) = ctx
        .service()
        .execute(query::quote::ReviewById(id))
        .await
        .map_err(|e| e.into_error())?
        .ok_or(QuoteError::NotFound)?;

    let mut out = render_header(&quote);
    out.push_str(&render_review(&review));
    Ok(out)
}

/// Previews the [`read::quote::Totals`] of a [`Quote`] with the provided
/// packages selected.
#[tracing::instrument(
    skip_all,
    fields(cli.name = "quote select-total", otel.name = SPAN_NAME, %id),
)]
async fn select_total(
    ctx: &Context,
    id: quote::Id,
    selections: Vec<(quote::SelectionId, package_quote::Id)>,
) -> Result<String, Error> {
    let quote = fetch(ctx, id).await?;

    let mut selection = Selection::from_quote(&quote);
    for (service_id, package_quote_id) in selections {
        selection
            .select_package(&quote, service_id, package_quote_id)
            .map_err(|e| Error {
                code: "UNKNOWN_SELECTION",
                message: e.to_string(),
                fields: None,
                backtrace: None,
            })?;
    }

    let review = read::quote::Review::new(
        &quote,
        &selection,
        ctx.service().config().divergence_tolerance,
    );
    Ok(render_review(&review))
}

/// Overrides the price of a [`PackageQuote`].
#[tracing::instrument(
    skip_all,
    fields(
        cli.name = "quote override-price",
        otel.name = SPAN_NAME,
        %quote_id,
        %package_quote_id,
    ),
)]
async fn override_price(
    ctx: &Context,
    quote_id: quote::Id,
    package_quote_id: package_quote::Id,
    price: Option<PriceOverride>,
) -> Result<String, Error> {
    let quote = fetch(ctx, quote_id).await?;

    let pq = ctx
        .service()
        .execute(command::OverridePackagePrice {
            status: quote.status,
            package_quote_id,
            price,
        })
        .await
        .map_err(|e| e.into_error())?;

    Ok(render_package_quote(&pq))
}

/// Changes the [`size_range`] of a [`Quote`].
#[tracing::instrument(
    skip_all,
    fields(
        cli.name = "quote size-range",
        otel.name = SPAN_NAME,
        %quote_id,
        %size_range_id,
    ),
)]
async fn change_size_range(
    ctx: &Context,
    quote_id: quote::Id,
    size_range_id: size_range::Id,
) -> Result<String, Error> {
    let quote = fetch(ctx, quote_id).await?;

    ctx.service()
        .execute(command::UpdateQuoteSizeRange {
            quote_id,
            status: quote.status,
            size_range_id,
        })
        .await
        .map_err(|e| e.into_error())?;

    // Package prices depend on the size range, so the refreshed quote is
    // shown.
    show(ctx, quote_id).await
}

/// Saves the admin [`quote::Notes`] of a [`Quote`].
#[tracing::instrument(
    skip_all,
    fields(cli.name = "quote notes", otel.name = SPAN_NAME, %quote_id),
)]
async fn update_notes(
    ctx: &Context,
    quote_id: quote::Id,
    notes: quote::Notes,
) -> Result<String, Error> {
    ctx.service()
        .execute(command::UpdateBidNotes { quote_id, notes })
        .await
        .map_err(|e| e.into_error())?;
    Ok("Notes saved\n".to_owned())
}

/// Changes the selected package of a [`Quote`] service.
#[tracing::instrument(
    skip_all,
    fields(
        cli.name = "quote change-package",
        otel.name = SPAN_NAME,
        %quote_id,
        %offering_id,
        %package_id,
    ),
)]
async fn change_package(
    ctx: &Context,
    quote_id: quote::Id,
    offering_id: offering::Id,
    package_id: package::Id,
) -> Result<String, Error> {
    let quote = fetch(ctx, quote_id).await?;

    ctx.service()
        .execute(command::ChangeQuotePackage {
            quote_id,
            status: quote.status,
            offering_id,
            package_id,
        })
        .await
        .map_err(|e| e.into_error())?;

    show(ctx, quote_id).await
}

/// Fetches the [`Quote`] with the provided ID.
async fn fetch(ctx: &Context, id: quote::Id) -> Result<Quote, Error> {
    ctx.service()
        .execute(query::quote::ById::by(id))
        .await
        .map_err(|e| e.into_error())?
        .ok_or_else(|| QuoteError::NotFound.into())
}

/// Parses a `<service-id>=<package-id>` selection.
fn parse_selection(
    raw: &str,
) -> Result<(quote::SelectionId, package_quote::Id), String> {
    let (service, package) = raw
        .split_once('=')
        .ok_or_else(|| "expected `<service-id>=<package-id>`".to_owned())?;
    Ok((
        service.trim().parse().map_err(|e| format!("service ID: {e}"))?,
        package.trim().parse().map_err(|e| format!("package ID: {e}"))?,
    ))
}

/// Renders the header of a [`Quote`].
fn render_header(quote: &Quote) -> String {
    let mut out = String::new();
    _ = writeln!(out, "Quote {} [{}]", quote.id, quote.status);
    _ = writeln!(
        out,
        "Customer: {} <{}>{}",
        quote.customer.full_name(),
        quote.customer.email,
        quote
            .customer
            .phone
            .as_deref()
            .map_or_else(String::new, |p| format!(", {p}")),
    );
    _ = writeln!(out, "Created: {}", quote.created_at.date());
    if let Some(range) = &quote.size_range {
        _ = writeln!(out, "Size: {}", range.label());
    }
    if let Some(location) = &quote.location {
        _ = writeln!(out, "Location: {}", location.name);
    }
    if let Some(code) = &quote.coupon_code {
        _ = writeln!(out, "Coupon: {code}");
    }
    for (label, note) in [
        ("Private notes", &quote.notes.private),
        ("Public notes", &quote.notes.public),
    ] {
        if let Some(note) = note {
            _ = writeln!(out, "{label}: {note}");
        }
    }
    out
}

/// Renders a [`read::quote::Review`].
fn render_review(review: &read::quote::Review) -> String {
    let mut out = String::new();
    for service in &review.services {
        _ = writeln!(out, "\n{} ({})", service.name, service.id);
        for pkg in &service.packages {
            let marker = if pkg.is_selected { "*" } else { " " };
            _ = write!(
                out,
                "  {marker} {} ({}): {}",
                pkg.name, pkg.id, pkg.effective_total,
            );
            if pkg.is_overridden {
                _ = write!(out, " (overridden, was {})", pkg.original_total);
            }
            out.push('\n');
            if !pkg.included.is_empty() {
                _ = writeln!(out, "      + {}", pkg.included.join(", "));
            }
            if !pkg.excluded.is_empty() {
                _ = writeln!(out, "      - {}", pkg.excluded.join(", "));
            }
        }
        for r in &service.responses {
            _ = writeln!(out, "  {}: {}", r.question, r.answer);
        }
    }
    out.push_str(&render_totals(&review.totals));
    out
}

/// Renders [`read::quote::Totals`].
fn render_totals(totals: &read::quote::Totals) -> String {
    let mut out = String::from("\n");
    for (label, amount) in [
        ("Packages", totals.packages),
        ("Trip surcharge", totals.trip_surcharge),
        ("Add-ons", totals.addons),
        ("Discount", totals.discount),
        ("Preview total", totals.preview),
        ("Total", totals.server),
    ] {
        _ = writeln!(out, "{label:<16}{:>12}", amount.to_string());
    }
    if let Some(diff) = totals.divergence {
        _ = writeln!(out, "Warning: preview differs from the total by {diff}");
    }
    out
}

/// Renders a single [`PackageQuote`].
fn render_package_quote(pq: &PackageQuote) -> String {
    let mut out = format!(
        "{} ({}): {}",
        pq.package_name,
        pq.id,
        pq.effective_total(),
    );
    if pq.is_overridden() {
        _ = write!(out, " (overridden, was {})", pq.total_price);
    }
    out.push('\n');
    out
}

define_error! {
    enum QuoteError {
        #[code = "QUOTE_NOT_FOUND"]
        #[message = "Quote with the provided ID does not exist"]
        NotFound,
    }
}

#[cfg(test)]
mod spec {
    use common::Money;
    use service::read::quote::{
        PackageLine, ResponseLine, Review, ServiceLine, Totals,
    };
    use uuid::Uuid;

    use super::{parse_selection, render_review};

    fn dollars(n: &str) -> Money {
        n.parse().unwrap()
    }

    fn review(divergence: Option<Money>) -> Review {
        Review {
            services: vec![ServiceLine {
                id: Uuid::from_u128(1).into(),
                name: "Inspection".to_owned(),
                packages: vec![PackageLine {
                    id: Uuid::from_u128(2).into(),
                    name: "Basic".to_owned(),
                    original_total: dollars("100"),
                    is_overridden: true,
                    effective_total: dollars("90"),
                    included: vec!["Roof".to_owned()],
                    excluded: vec![],
                    is_selected: true,
                }],
                responses: vec![ResponseLine {
                    question: "Pool?".to_owned(),
                    answer: "Yes".to_owned(),
                }],
            }],
            totals: Totals {
                packages: dollars("90"),
                trip_surcharge: dollars("10"),
                addons: Money::ZERO,
                discount: Money::ZERO,
                preview: dollars("100"),
                server: dollars("105"),
                divergence,
            },
        }
    }

    #[test]
    fn renders_overridden_selected_package() {
        let out = render_review(&review(None));

        assert!(out.contains(&format!(
            "  * Basic ({}): $90.00 (overridden, was $100.00)\n      + Roof\n",
            Uuid::from_u128(2),
        )));
        assert!(out.contains("  Pool?: Yes\n"));
        assert!(!out.contains("Warning"));
    }

    #[test]
    fn warns_about_divergence() {
        let out = render_review(&review(Some(dollars("5"))));

        assert!(out.ends_with(
            "Warning: preview differs from the total by $5.00\n",
        ));
    }

    #[test]
    fn parses_selection_pairs() {
        let raw = format!("{}={}", Uuid::from_u128(1), Uuid::from_u128(2));

        let (service, package) = parse_selection(&raw).unwrap();

        assert_eq!(service, Uuid::from_u128(1).into());
        assert_eq!(package, Uuid::from_u128(2).into());
        assert!(parse_selection("no-separator").is_err());
    }
}
