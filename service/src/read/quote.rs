//! [`Review`] of a [`Quote`].

use common::Money;
use tracing as log;

use crate::domain::{
    quote::{self, Selection},
    Quote,
};

/// [`Quote`] prepared to be reviewed by an admin.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Review {
    /// Reviewed [`ServiceLine`]s in the [`Quote`] order.
    pub services: Vec<ServiceLine>,

    /// [`Totals`] of the [`Quote`].
    pub totals: Totals,
}

impl Review {
    /// Prepares a [`Review`] of the provided [`Quote`] with the packages
    /// chosen in the [`Selection`].
    ///
    /// A preview total diverging from the backend one by more than the
    /// provided `tolerance` is reported in [`Totals::divergence`].
    #[must_use]
    pub fn new(quote: &Quote, selection: &Selection, tolerance: Money) -> Self {
        let services = quote
            .services
            .iter()
            .map(|s| {
                let selected = selection.selected(s.id);
                ServiceLine {
                    id: s.id,
                    name: s.offering_name.clone(),
                    packages: s
                        .package_quotes
                        .iter()
                        .map(|pq| PackageLine {
                            id: pq.id,
                            name: pq.package_name.clone(),
                            original_total: pq.total_price,
                            is_overridden: pq.is_overridden(),
                            effective_total: pq.effective_total(),
                            included: pq
                                .included_features
                                .iter()
                                .map(|f| f.name.clone())
                                .collect(),
                            excluded: pq
                                .excluded_features
                                .iter()
                                .map(|f| f.name.clone())
                                .collect(),
                            is_selected: selected == Some(pq.id),
                        })
                        .collect(),
                    responses: s
                        .responses
                        .iter()
                        .map(|r| ResponseLine {
                            question: r.question_text.clone(),
                            answer: r.answer.render(),
                        })
                        .collect(),
                }
            })
            .collect();

        Self {
            services,
            totals: Totals::new(quote, selection, tolerance),
        }
    }
}

/// Reviewed [`quote::ServiceSelection`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ServiceLine {
    /// ID of the [`quote::ServiceSelection`].
    pub id: quote::SelectionId,

    /// Name of the selected service.
    pub name: String,

    /// Priced packages of the service.
    pub packages: Vec<PackageLine>,

    /// Rendered question responses.
    pub responses: Vec<ResponseLine>,
}

/// Reviewed [`quote::PackageQuote`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PackageLine {
    /// ID of the [`quote::PackageQuote`].
    pub id: quote::package_quote::Id,

    /// Name of the package.
    pub name: String,

    /// Total price computed by the backend.
    pub original_total: Money,

    /// Indicator whether the price is overridden by an admin.
    pub is_overridden: bool,

    /// Price the package is charged by.
    pub effective_total: Money,

    /// Names of the included features.
    pub included: Vec<String>,

    /// Names of the excluded features.
    pub excluded: Vec<String>,

    /// Indicator whether the package is selected.
    pub is_selected: bool,
}

/// Rendered [`quote::Response`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResponseLine {
    /// Text of the question.
    pub question: String,

    /// Rendered answer.
    pub answer: String,
}

/// Totals of a [`Quote`].
///
/// The backend `server` total is the authoritative one, while the `preview`
/// is only a client-side estimation shown next to it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Totals {
    /// Sum of the selected packages effective prices.
    pub packages: Money,

    /// Trip surcharge of the [`Quote`] location.
    pub trip_surcharge: Money,

    /// Total price of the add-ons.
    pub addons: Money,

    /// Amount discounted by the applied coupon.
    pub discount: Money,

    /// Client-side preview of the final total.
    pub preview: Money,

    /// Final total computed by the backend.
    pub server: Money,

    /// Difference between the `preview` and the `server` totals, if it
    /// exceeds the tolerance.
    pub divergence: Option<Money>,
}

impl Totals {
    /// Computes [`Totals`] of the provided [`Quote`] with the packages chosen
    /// in the [`Selection`].
    #[must_use]
    pub fn new(quote: &Quote, selection: &Selection, tolerance: Money) -> Self {
        let packages = selection.selected_total(quote);
        let trip_surcharge = quote.trip_surcharge();
        let addons = quote.total_addons_price;
        let discount = quote.discounted_amount;
        let preview = packages + trip_surcharge + addons - discount;
        let server = quote.final_total;

        let diff = preview.abs_diff(server);
        let divergence = (diff > tolerance).then_some(diff);
        if divergence.is_some() {
            log::warn!(
                quote_id = %quote.id,
                %preview,
                %server,
                "preview total diverges from the backend one",
            );
        }

        Self {
            packages,
            trip_surcharge,
            addons,
            discount,
            preview,
            server,
            divergence,
        }
    }
}
