//! [`Selection`] of [`PackageQuote`]s.

use std::collections::HashMap;

use common::Money;
use derive_more::{Display, Error};

use super::{package_quote, PackageQuote, Quote, SelectionId};

/// Local selection of a [`PackageQuote`] per [`ServiceSelection`] of a
/// [`Quote`].
///
/// Changing a [`Selection`] never touches the backend on its own.
///
/// [`ServiceSelection`]: super::ServiceSelection
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Selection(HashMap<SelectionId, package_quote::Id>);

impl Selection {
    /// Creates a new [`Selection`] seeded from the [`PackageQuote`]s already
    /// selected in the provided [`Quote`].
    ///
    /// Only the first selected [`PackageQuote`] of every
    /// [`ServiceSelection`] is taken into account.
    ///
    /// [`ServiceSelection`]: super::ServiceSelection
    #[must_use]
    pub fn from_quote(quote: &Quote) -> Self {
        Self(
            quote
                .services
                .iter()
                .filter_map(|s| {
                    s.package_quotes
                        .iter()
                        .find(|pq| pq.is_selected)
                        .map(|pq| (s.id, pq.id))
                })
                .collect(),
        )
    }

    /// Selects the [`PackageQuote`] for the [`ServiceSelection`] of the
    /// provided [`Quote`].
    ///
    /// # Errors
    ///
    /// If the [`Quote`] has no such [`ServiceSelection`], or the
    /// [`PackageQuote`] doesn't belong to it.
    ///
    /// [`ServiceSelection`]: super::ServiceSelection
    pub fn select_package(
        &mut self,
        quote: &Quote,
        service_id: SelectionId,
        package_quote_id: package_quote::Id,
    ) -> Result<(), SelectError> {
        let service = quote
            .service(service_id)
            .ok_or(SelectError::UnknownService(service_id))?;
        if service.package_quote(package_quote_id).is_none() {
            return Err(SelectError::ForeignPackage {
                service_id,
                package_quote_id,
            });
        }
        _ = self.0.insert(service_id, package_quote_id);
        Ok(())
    }

    /// Returns the ID of the [`PackageQuote`] selected for the provided
    /// [`ServiceSelection`], if any.
    ///
    /// [`ServiceSelection`]: super::ServiceSelection
    #[must_use]
    pub fn selected(&self, service_id: SelectionId) -> Option<package_quote::Id> {
        self.0.get(&service_id).copied()
    }

    /// Iterates over the selected [`PackageQuote`]s of the provided
    /// [`Quote`].
    pub fn selected_packages<'q>(
        &'q self,
        quote: &'q Quote,
    ) -> impl Iterator<Item = &'q PackageQuote> + 'q {
        quote.services.iter().filter_map(|s| {
            self.selected(s.id).and_then(|id| s.package_quote(id))
        })
    }

    /// Sums the [effective totals] of the selected [`PackageQuote`]s.
    ///
    /// Trip surcharge, add-ons and coupon discounts are not applied here.
    ///
    /// [effective totals]: PackageQuote::effective_total
    #[must_use]
    pub fn selected_total(&self, quote: &Quote) -> Money {
        self.selected_packages(quote)
            .map(PackageQuote::effective_total)
            .sum()
    }
}

/// Error of [selecting a package](Selection::select_package).
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum SelectError {
    /// [`Quote`] has no such [`ServiceSelection`].
    ///
    /// [`ServiceSelection`]: super::ServiceSelection
    #[display("`ServiceSelection(id: {_0})` is not a part of the `Quote`")]
    UnknownService(#[error(not(source))] SelectionId),

    /// [`PackageQuote`] belongs to another [`ServiceSelection`].
    ///
    /// [`ServiceSelection`]: super::ServiceSelection
    #[display(
        "`PackageQuote(id: {package_quote_id})` doesn't belong to \
         `ServiceSelection(id: {service_id})`"
    )]
    ForeignPackage {
        /// ID of the [`ServiceSelection`].
        ///
        /// [`ServiceSelection`]: super::ServiceSelection
        service_id: SelectionId,

        /// ID of the [`PackageQuote`].
        package_quote_id: package_quote::Id,
    },
}
