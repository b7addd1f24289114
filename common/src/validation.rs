//! Field-level validation errors.

use std::{collections::BTreeMap, fmt};

use derive_more::Error;

/// Field-level validation errors keyed by a field name.
///
/// The same shape is produced by client-side validation and returned by the
/// backend in the body of a `400 Bad Request` response, so both are rendered
/// the same way next to the offending field.
#[derive(Clone, Debug, Default, Eq, Error, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(transparent)
)]
pub struct FieldErrors(#[error(not(source))] BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Creates new empty [`FieldErrors`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds the provided `message` to the errors of the `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Indicates whether there are no errors at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Indicates whether the provided `field` has any errors.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.0.get(field).is_some_and(|m| !m.is_empty())
    }

    /// Returns the error messages of the provided `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    /// Iterates over the fields and their error messages in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(f, m)| (f.as_str(), m.as_slice()))
    }

    /// Returns [`Ok`] if there are no errors, or these [`FieldErrors`]
    /// otherwise.
    ///
    /// # Errors
    ///
    /// If at least one field has an error.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, messages)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use super::FieldErrors;

    #[test]
    fn collects_messages_per_field() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(errors.clone().into_result().is_ok());

        errors.add("fixed_discount", "Either discount is required");
        errors.add("code", "This field is required.");
        errors.add("code", "Must not contain spaces.");

        assert!(errors.has("code"));
        assert!(!errors.has("expiration_date"));
        assert_eq!(errors.get("code").len(), 2);
        assert!(errors.get("missing").is_empty());
        assert_eq!(
            errors.to_string(),
            "code: This field is required., Must not contain spaces.; \
             fixed_discount: Either discount is required",
        );
        assert!(errors.into_result().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_backend_body() {
        let errors: FieldErrors = serde_json::from_str(
            r#"{"code": ["coupon with this code already exists."]}"#,
        )
        .unwrap();

        assert_eq!(
            errors.get("code"),
            ["coupon with this code already exists.".to_owned()],
        );
    }
}
