//! Date and time utilities.

use std::{fmt, marker::PhantomData};

use derive_more::{Debug, Display, Error};
use time::{
    format_description::well_known::Rfc3339, macros::format_description,
    UtcOffset,
};

/// Untyped date and time.
pub type DateTime = DateTimeOf;

/// UTC date and time.
#[derive(Debug)]
pub struct DateTimeOf<Of: ?Sized = ()> {
    /// Inner representation of the date and time.
    inner: time::OffsetDateTime,

    /// Type parameter describing the kind of date and time.
    #[debug(skip)]
    _of: PhantomData<Of>,
}

impl<Of: ?Sized> DateTimeOf<Of> {
    /// A [`DateTime`] representing the Unix epoch.
    pub const UNIX_EPOCH: Self = Self {
        inner: time::OffsetDateTime::UNIX_EPOCH,
        _of: PhantomData,
    };

    /// Creates a new [`DateTime`] representing the current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            inner: time::OffsetDateTime::now_utc(),
            _of: PhantomData,
        }
    }

    /// Creates a new [`DateTime`] from the provided [RFC 3339] string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid [RFC 3339] date and time.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    pub fn from_rfc3339(input: &str) -> Result<Self, ParseError> {
        time::OffsetDateTime::parse(input, &Rfc3339)
            .map(Into::into)
            .map_err(ParseError)
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.inner.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the UTC calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.inner.date())
    }

    /// Coerces one kind of [`DateTime`] into another.
    #[must_use]
    pub fn coerce<NewOf: ?Sized>(self) -> DateTimeOf<NewOf> {
        DateTimeOf {
            inner: self.inner,
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> From<time::OffsetDateTime> for DateTimeOf<Of> {
    fn from(dt: time::OffsetDateTime) -> Self {
        Self {
            inner: dt.to_offset(UtcOffset::UTC),
            _of: PhantomData,
        }
    }
}

impl<Of: ?Sized> fmt::Display for DateTimeOf<Of> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl<Of: ?Sized> Copy for DateTimeOf<Of> {}
impl<Of: ?Sized> Clone for DateTimeOf<Of> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Of: ?Sized> Eq for DateTimeOf<Of> {}
impl<Of: ?Sized> PartialEq for DateTimeOf<Of> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

/// Calendar date in `YYYY-MM-DD` format.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        DateTime::now().date()
    }

    /// Parses a [`Date`] from the provided `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid `YYYY-MM-DD` date.
    pub fn from_iso(input: &str) -> Result<Self, ParseError> {
        time::Date::parse(input.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(ParseError)
    }

    /// Returns this [`Date`] formatted as `YYYY-MM-DD`.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_iso(&self) -> String {
        self.0
            .format(format_description!("[year]-[month]-[day]"))
            .unwrap_or_else(|e| panic!("cannot format `Date`: {e}"))
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl From<time::Date> for Date {
    fn from(date: time::Date) -> Self {
        Self(date)
    }
}

/// Error of parsing a [`DateTime`] or a [`Date`] from a string.
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("invalid date: {_0}")]
pub struct ParseError(time::error::Parse);

#[cfg(feature = "serde")]
mod serde_impls {
    //! Module providing integration with [`serde`] crate.

    use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};

    use super::{Date, DateTimeOf};

    impl<Of: ?Sized> Serialize for DateTimeOf<Of> {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_rfc3339())
        }
    }

    impl<'de, Of: ?Sized> Deserialize<'de> for DateTimeOf<Of> {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            Self::from_rfc3339(&raw).map_err(D::Error::custom)
        }
    }

    impl Serialize for Date {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(&self.to_iso())
        }
    }

    impl<'de> Deserialize<'de> for Date {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            let raw = String::deserialize(d)?;
            // Backend may send a full timestamp for date-only fields.
            let date_part = raw.get(..10).unwrap_or(&raw);
            Self::from_iso(date_part).map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod spec {
    use super::{Date, DateTime};

    #[test]
    fn parses_dates() {
        let date = Date::from_iso("2020-01-01").unwrap();
        assert_eq!(date.to_iso(), "2020-01-01");
        assert_eq!(date.to_string(), "2020-01-01");

        assert!(Date::from_iso("2020-13-01").is_err());
        assert!(Date::from_iso("01/01/2020").is_err());
        assert!(Date::from_iso("").is_err());
    }

    #[test]
    fn orders_dates() {
        let past = Date::from_iso("2020-01-01").unwrap();
        let future = Date::from_iso("2999-12-31").unwrap();
        assert!(past < Date::today());
        assert!(Date::today() < future);
    }

    #[test]
    fn rfc3339_roundtrip_normalizes_to_utc() {
        let dt = DateTime::from_rfc3339("2024-05-01T12:30:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:30:00Z");
        assert_eq!(dt.date().to_iso(), "2024-05-01");
    }
}
