//! [`Coupon`] definitions.

use std::sync::LazyLock;

use common::{define_kind, Date, FieldErrors, Money, Percent};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discount coupon applicable to a quote.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Coupon {
    /// ID of this [`Coupon`].
    pub id: Id,

    /// [`Code`] of this [`Coupon`].
    pub code: Code,

    /// [`Percent`] discounted by this [`Coupon`], if any.
    pub percentage_discount: Option<Percent>,

    /// Fixed amount discounted by this [`Coupon`], if any.
    pub fixed_discount: Option<Money>,

    /// [`Date`] this [`Coupon`] expires at.
    pub expiration_date: Date,

    /// Indicator whether this [`Coupon`] is enabled.
    pub is_active: bool,
}

impl Coupon {
    /// Returns the [`Status`] of this [`Coupon`] as of the provided `today`.
    ///
    /// Expiration is only rendered, the backend is the one enforcing it.
    #[must_use]
    pub fn status(&self, today: Date) -> Status {
        if self.expiration_date < today {
            Status::Expired
        } else if self.is_active {
            Status::Active
        } else {
            Status::Inactive
        }
    }

    /// Returns a human-readable description of this [`Coupon`] discount.
    #[must_use]
    pub fn discount_label(&self) -> String {
        match (self.percentage_discount, self.fixed_discount) {
            (Some(p), Some(f)) => format!("{p} + {f}"),
            (Some(p), None) => p.to_string(),
            (None, Some(f)) => f.to_string(),
            (None, None) => "-".to_owned(),
        }
    }
}

/// ID of a [`Coupon`].
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

/// Code of a [`Coupon`] entered by customers.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Code(String);

impl Code {
    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Code`] format.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new("^[A-Za-z0-9_-]{1,50}$").expect("valid regex")
        });

        REGEX.is_match(code.as_ref())
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

define_kind! {
    #[doc = "Displayed status of a [`Coupon`]."]
    enum Status {
        #[doc = "[`Coupon`] may be applied."]
        Active,

        #[doc = "[`Coupon`] is disabled by an admin."]
        Inactive,

        #[doc = "[`Coupon`] is past its expiration [`Date`]."]
        Expired,
    }
}

/// Raw input of a new [`Coupon`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Draft {
    /// Raw [`Code`].
    pub code: String,

    /// Raw [`Percent`] discount, empty if none.
    pub percentage_discount: String,

    /// Raw fixed discount, empty if none.
    pub fixed_discount: String,

    /// Raw expiration [`Date`] in `YYYY-MM-DD` format.
    pub expiration_date: String,

    /// Indicator whether the new [`Coupon`] is enabled.
    pub is_active: bool,
}

impl Draft {
    /// Validates this [`Draft`], collecting the errors of all the fields.
    ///
    /// # Errors
    ///
    /// With [`FieldErrors`] keyed by the backend field names, so they're
    /// rendered the same way as the ones returned by the backend.
    pub fn validate(&self) -> Result<New, FieldErrors> {
        let mut errors = FieldErrors::new();

        let code = self.code.trim();
        let code = if code.is_empty() {
            errors.add("code", "This field is required.");
            None
        } else {
            let code = Code::new(code);
            if code.is_none() {
                errors.add(
                    "code",
                    "Only letters, digits, `-` and `_` are allowed.",
                );
            }
            code
        };

        let percentage_discount = optional(&self.percentage_discount)
            .map(|raw| {
                raw.parse::<Percent>().map_err(|_| {
                    errors.add(
                        "percentage_discount",
                        "Must be a number between 0 and 100.",
                    );
                })
            })
            .transpose()
            .ok()
            .flatten();
        let fixed_discount = optional(&self.fixed_discount)
            .map(|raw| match raw.parse::<Money>() {
                Ok(m) if !m.is_negative() => Ok(m),
                Ok(_) | Err(_) => {
                    errors.add(
                        "fixed_discount",
                        "Must be a non-negative number.",
                    );
                    Err(())
                }
            })
            .transpose()
            .ok()
            .flatten();
        if optional(&self.percentage_discount).is_none()
            && optional(&self.fixed_discount).is_none()
        {
            let msg = "Either a percentage or a fixed discount is required.";
            errors.add("percentage_discount", msg);
            errors.add("fixed_discount", msg);
        }

        let expiration_date = match optional(&self.expiration_date) {
            None => {
                errors.add("expiration_date", "This field is required.");
                None
            }
            Some(raw) => Date::from_iso(raw)
                .map_err(|_| {
                    errors.add(
                        "expiration_date",
                        "Must be a date in YYYY-MM-DD format.",
                    );
                })
                .ok(),
        };

        errors.into_result()?;
        match (code, expiration_date) {
            (Some(code), Some(expiration_date)) => Ok(New {
                code,
                percentage_discount,
                fixed_discount,
                expiration_date,
                is_active: self.is_active,
            }),
            (None, _) | (_, None) => Err(FieldErrors::new()),
        }
    }
}

/// Returns the trimmed `raw` input, if it's not empty.
fn optional(raw: &str) -> Option<&str> {
    Some(raw.trim()).filter(|s| !s.is_empty())
}

/// Validated new [`Coupon`] to be created.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct New {
    /// [`Code`] of the new [`Coupon`].
    pub code: Code,

    /// [`Percent`] discounted by the new [`Coupon`], if any.
    pub percentage_discount: Option<Percent>,

    /// Fixed amount discounted by the new [`Coupon`], if any.
    pub fixed_discount: Option<Money>,

    /// [`Date`] the new [`Coupon`] expires at.
    pub expiration_date: Date,

    /// Indicator whether the new [`Coupon`] is enabled.
    pub is_active: bool,
}

#[cfg(test)]
mod spec {
    use common::{Date, Money};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use super::{Code, Coupon, Draft, Status};

    #[test]
    fn flags_both_discounts_when_none_is_set() {
        let draft = Draft {
            code: "SPRING".to_owned(),
            expiration_date: "2999-01-01".to_owned(),
            is_active: true,
            ..Draft::default()
        };

        let errors = draft.validate().unwrap_err();

        assert!(errors.has("percentage_discount"));
        assert!(errors.has("fixed_discount"));
        assert!(!errors.has("code"));
        assert!(!errors.has("expiration_date"));
    }

    #[test]
    fn accepts_past_expiration_but_renders_expired() {
        let draft = Draft {
            code: "OLD10".to_owned(),
            fixed_discount: "10".to_owned(),
            expiration_date: "2020-01-01".to_owned(),
            is_active: true,
            ..Draft::default()
        };

        let new = draft.validate().unwrap();
        let coupon = Coupon {
            id: Uuid::new_v4().into(),
            code: new.code,
            percentage_discount: new.percentage_discount,
            fixed_discount: new.fixed_discount,
            expiration_date: new.expiration_date,
            is_active: new.is_active,
        };

        assert_eq!(coupon.fixed_discount, Some(Money::new(Decimal::TEN)));
        assert_eq!(coupon.status(Date::today()), Status::Expired);
        assert_eq!(coupon.discount_label(), "$10.00");
    }

    #[test]
    fn collects_all_field_errors() {
        let draft = Draft {
            code: "has space".to_owned(),
            percentage_discount: "150".to_owned(),
            fixed_discount: "-5".to_owned(),
            expiration_date: "01/01/2030".to_owned(),
            is_active: false,
        };

        let errors = draft.validate().unwrap_err();

        assert_eq!(
            errors.iter().map(|(f, _)| f).collect::<Vec<_>>(),
            [
                "code",
                "expiration_date",
                "fixed_discount",
                "percentage_discount",
            ],
        );
        assert_eq!(errors.get("percentage_discount").len(), 1);
    }

    #[test]
    fn requires_code_and_expiration() {
        let draft = Draft {
            percentage_discount: "15".to_owned(),
            ..Draft::default()
        };

        let errors = draft.validate().unwrap_err();

        assert!(errors.has("code"));
        assert!(errors.has("expiration_date"));
        assert!(!errors.has("percentage_discount"));
    }

    #[test]
    fn renders_status() {
        let today = Date::from_iso("2024-06-01").unwrap();
        let mut coupon = Coupon {
            id: Uuid::new_v4().into(),
            code: Code::new("SUMMER").unwrap(),
            percentage_discount: "15".parse().ok(),
            fixed_discount: None,
            expiration_date: today,
            is_active: true,
        };
        assert_eq!(coupon.status(today), Status::Active);
        assert_eq!(coupon.discount_label(), "15%");

        coupon.is_active = false;
        assert_eq!(coupon.status(today), Status::Inactive);

        coupon.expiration_date = Date::from_iso("2024-05-31").unwrap();
        assert_eq!(coupon.status(today), Status::Expired);
    }
}
