//! [`Command`] definition.

pub mod change_quote_package;
pub mod create_coupon;
pub mod override_package_price;
pub mod reorder_offerings;
pub mod save_price_rules;
pub mod save_size_ranges;
pub mod set_offering_active;
pub mod update_bid_notes;
pub mod update_quote_size_range;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    change_quote_package::ChangeQuotePackage, create_coupon::CreateCoupon,
    override_package_price::OverridePackagePrice,
    reorder_offerings::ReorderOfferings, save_price_rules::SavePriceRules,
    save_size_ranges::SaveSizeRanges, set_offering_active::SetOfferingActive,
    update_bid_notes::UpdateBidNotes,
    update_quote_size_range::UpdateQuoteSizeRange,
};
