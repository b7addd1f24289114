//! Domain definitions.

pub mod coupon;
pub mod offering;
pub mod package;
pub mod price_rule;
pub mod question;
pub mod quote;
pub mod size_range;

pub use self::{
    coupon::Coupon, offering::Offering, package::Package,
    price_rule::Rule as PriceRule, question::Question, quote::Quote,
    size_range::SizeRange,
};
