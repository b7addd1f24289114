//! Macros for defining kind enums.

/// Macro for defining a kind enum.
///
/// Kinds are transferred over the wire as `snake_case` strings, so the
/// calling crate must enable the `serde` feature of this crate and depend on
/// the `serde` and `strum` crates itself.
///
/// # Example
///
/// ```rust,ignore
/// # use common::define_kind;
///
/// define_kind! {
///     #[doc = "Kind of a question."]
///     enum Kind {
///         #[doc = "Question answered with yes or no."]
///         YesNo,
///
///         #[doc = "Question answered with one of the options."]
///         Options,
///     }
/// }
/// ```
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_kind {
    (
        #[doc = $doc:literal]
        enum $name:ident {
            $(
                #[doc = $variant_doc:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        #[derive(
            Clone,
            Copy,
            Debug,
            $crate::private::strum::AsRefStr,
            $crate::private::strum::Display,
            $crate::private::strum::EnumString,
            Eq,
            Hash,
            PartialEq,
            $crate::private::serde::Deserialize,
            $crate::private::serde::Serialize,
        )]
        #[doc = $doc]
        #[serde(rename_all = "snake_case")]
        #[strum(serialize_all = "snake_case")]
        pub enum $name {
            $(
                 #[doc = $variant_doc]
                 $variant,
            )*
        }
    };
}
