//! [`Backend`] implementations.
//!
//! [`Backend`]: crate::infra::Backend

mod coupon;
mod offering;
mod price_rule;
mod quote;
mod size_range;
