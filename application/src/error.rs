//! [`Error`]-related definitions.

use std::fmt;

use common::FieldErrors;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{command, infra::backend};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            fields: None,
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Console [`Error`] reported to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,

    /// Field-level errors to be rendered next to the offending fields.
    #[error(not(source))]
    pub fields: Option<FieldErrors>,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            fields: None,
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] carrying [`FieldErrors`].
    #[must_use]
    pub fn validation(msg: &impl ToString, fields: FieldErrors) -> Self {
        Self {
            code: "VALIDATION_FAILED",
            message: msg.to_string(),
            fields: Some(fields),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
            fields,
        } = self;

        write!(f, "[{code}]: {message}")?;
        for (field, messages) in fields.iter().flat_map(FieldErrors::iter) {
            write!(f, "\n  {field}: {}", messages.iter().join("; "))?;
        }
        write!(
            f,
            "{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for backend::Error {
    fn try_as_error(&self) -> Option<Error> {
        if let Some(fields) = self.field_errors() {
            return Some(Error::validation(
                &"Backend rejected the request",
                fields.clone(),
            ));
        }
        if self.is_not_found() {
            return Some(BackendError::NotFound.into());
        }
        None
    }
}

impl AsError for command::save_size_ranges::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NoValidRanges => Some(Error {
                code: "NO_VALID_RANGES",
                message: self.to_string(),
                fields: None,
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::save_price_rules::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::OfferingNotExists(_) => Some(BackendError::NotFound.into()),
            Self::NegativeValue { .. } => Some(Error {
                code: "NEGATIVE_PRICE_VALUE",
                message: self.to_string(),
                fields: None,
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::override_package_price::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::WrongStatus(_) => Some(wrong_status(self)),
        }
    }
}

impl AsError for command::update_quote_size_range::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::WrongStatus(_) => Some(wrong_status(self)),
        }
    }
}

impl AsError for command::change_quote_package::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::WrongStatus(_) => Some(wrong_status(self)),
        }
    }
}

impl AsError for command::update_bid_notes::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::NoNotes => Some(Error {
                code: "NO_NOTES",
                message: self.to_string(),
                fields: None,
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::create_coupon::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::Invalid(fields) | Self::Rejected(fields) => {
                Some(Error::validation(&"Invalid coupon", fields.clone()))
            }
        }
    }
}

impl AsError for command::reorder_offerings::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
            Self::OutOfBounds { .. } => Some(Error {
                code: "OUT_OF_BOUNDS",
                message: self.to_string(),
                fields: None,
                backtrace: None,
            }),
        }
    }
}

impl AsError for command::set_offering_active::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Backend(e) => e.try_as_error(),
        }
    }
}

/// Creates an [`Error`] of a quote status forbidding the action.
fn wrong_status(err: &impl ToString) -> Error {
    Error {
        code: "WRONG_QUOTE_STATUS",
        message: err.to_string(),
        fields: None,
        backtrace: None,
    }
}

define_error! {
    enum BackendError {
        #[code = "NOT_FOUND"]
        #[message = "Requested entity does not exist"]
        NotFound,
    }
}

#[cfg(test)]
mod spec {
    use common::FieldErrors;

    use super::Error;

    #[test]
    fn renders_field_errors() {
        let mut fields = FieldErrors::new();
        fields.add("code", "This field is required.");
        fields.add("fixed_discount", "Must be a non-negative number.");

        let err = Error::validation(&"Invalid coupon", fields);

        assert_eq!(
            err.to_string(),
            "[VALIDATION_FAILED]: Invalid coupon\n  \
             code: This field is required.\n  \
             fixed_discount: Must be a non-negative number.",
        );
    }
}
