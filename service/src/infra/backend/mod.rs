//! [`Backend`]-related implementations.

#[cfg(feature = "rest")]
pub mod rest;

use common::FieldErrors;
use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "rest")]
pub use self::rest::Rest;

/// Backend operation.
pub use common::Handler as Backend;

/// [`Backend`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "rest")]
    /// [`Rest`] backend error.
    Rest(rest::Error),
}

impl Error {
    /// Returns the field-level validation errors reported by the backend, if
    /// it rejected the request because of them.
    #[must_use]
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match *self {
            #[cfg(feature = "rest")]
            Self::Rest(ref e) => e.field_errors(),
        }
    }

    /// Indicates whether the backend has no requested entity.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match *self {
            #[cfg(feature = "rest")]
            Self::Rest(ref e) => e.status() == Some(404),
        }
    }

    /// Indicates whether the backend rejected the provided credentials or
    /// tokens.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match *self {
            #[cfg(feature = "rest")]
            Self::Rest(ref e) => matches!(e.status(), Some(401 | 403)),
        }
    }
}
