//! Read entities definitions.

pub mod quote;
