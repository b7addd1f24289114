//! Wire representations of the REST API entities.

use common::{DateTime, FieldErrors, Money, Percent};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{
    coupon, offering, package, price_rule,
    question::{self, Branch},
    quote::{self, answer, package_quote},
    size_range, Coupon, Offering, Package, PriceRule, Question, Quote,
    SizeRange,
};

use super::preview;

/// Converts the body of an unsuccessful response into [`FieldErrors`].
///
/// The backend reports validation errors as an object with either a list of
/// messages or a single message per field. Any other body is reported as a
/// `detail` message.
pub(super) fn field_errors(body: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if body.trim().is_empty() {
        return errors;
    }
    let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(body) else {
        errors.add("detail", preview(body));
        return errors;
    };
    for (field, value) in fields {
        match value {
            Value::Array(messages) => {
                for msg in messages {
                    errors.add(field.clone(), message(msg));
                }
            }
            Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Object(_) => errors.add(field, message(value)),
        }
    }
    errors
}

/// Renders a single error message [`Value`].
fn message(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null
        | Value::Bool(_)
        | Value::Number(_)
        | Value::Array(_)
        | Value::Object(_) => value.to_string(),
    }
}

/// [`SizeRange`] as returned by the backend.
#[derive(Debug, Deserialize)]
pub(super) struct SizeRangeOut {
    /// ID of the [`SizeRange`].
    id: size_range::Id,

    /// Inclusive lower bound.
    minimum_sqft: size_range::Sqft,

    /// Inclusive upper bound, if any.
    maximum_sqft: Option<size_range::Sqft>,
}

impl From<SizeRangeOut> for SizeRange {
    fn from(r: SizeRangeOut) -> Self {
        Self {
            id: Some(r.id),
            min_sqft: r.minimum_sqft,
            max_sqft: r.maximum_sqft,
        }
    }
}

/// [`SizeRange`] to be created.
#[derive(Debug, Serialize)]
pub(super) struct SizeRangeIn {
    /// Inclusive lower bound.
    minimum_sqft: size_range::Sqft,

    /// Inclusive upper bound, if any.
    maximum_sqft: Option<size_range::Sqft>,
}

impl From<&SizeRange> for SizeRangeIn {
    fn from(r: &SizeRange) -> Self {
        Self {
            minimum_sqft: r.min_sqft,
            maximum_sqft: r.max_sqft,
        }
    }
}

/// [`offering::Summary`] as returned by the backend.
#[derive(Debug, Deserialize)]
pub(super) struct OfferingSummaryOut {
    /// ID of the [`Offering`].
    id: offering::Id,

    /// Name of the [`Offering`].
    name: String,

    /// Indicator whether the [`Offering`] is bookable.
    #[serde(default)]
    is_active: bool,

    /// Display order of the [`Offering`].
    #[serde(default)]
    order: u32,
}

impl From<OfferingSummaryOut> for offering::Summary {
    fn from(o: OfferingSummaryOut) -> Self {
        Self {
            id: o.id,
            name: o.name,
            is_active: o.is_active,
            order: o.order,
        }
    }
}

/// [`Offering`] with its [`Question`]s and [`Package`]s as returned by the
/// backend.
#[derive(Debug, Deserialize)]
pub(super) struct OfferingOut {
    /// Summary of the [`Offering`].
    #[serde(flatten)]
    summary: OfferingSummaryOut,

    /// [`Question`]s of the [`Offering`].
    #[serde(default)]
    questions: Vec<QuestionOut>,

    /// [`Package`]s of the [`Offering`].
    #[serde(default)]
    packages: Vec<PackageOut>,
}

impl From<OfferingOut> for Offering {
    fn from(o: OfferingOut) -> Self {
        let summary = offering::Summary::from(o.summary);
        let mut packages =
            o.packages.into_iter().map(Package::from).collect::<Vec<_>>();
        package::sort_by_order(&mut packages);
        Self {
            id: summary.id,
            name: summary.name,
            is_active: summary.is_active,
            order: summary.order,
            questions: o.questions.into_iter().map(Question::from).collect(),
            packages,
        }
    }
}

/// [`Question`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct QuestionOut {
    /// ID of the [`Question`].
    id: question::Id,

    /// Text of the [`Question`].
    text: String,

    /// Type of the [`Question`].
    question_type: String,

    /// Options of the [`Question`].
    #[serde(default)]
    options: Vec<QuestionOptionOut>,
}

/// [`question::QuestionOption`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct QuestionOptionOut {
    /// ID of the option.
    id: question::OptionId,

    /// Text of the option.
    #[serde(alias = "text")]
    option_text: String,
}

impl From<QuestionOut> for Question {
    fn from(q: QuestionOut) -> Self {
        // Only yes/no questions have no options to price.
        let kind = if q.question_type == "yes_no" {
            question::Kind::YesNo
        } else {
            question::Kind::Options(
                q.options
                    .into_iter()
                    .map(|o| question::QuestionOption {
                        id: o.id,
                        text: o.option_text,
                    })
                    .collect(),
            )
        };
        Self {
            id: q.id,
            text: q.text,
            kind,
        }
    }
}

/// [`Package`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct PackageOut {
    /// ID of the [`Package`].
    id: package::Id,

    /// Name of the [`Package`].
    name: String,

    /// Base price of the [`Package`].
    base_price: Money,

    /// Display order of the [`Package`].
    #[serde(default)]
    order: u32,

    /// IDs of the included features.
    #[serde(default)]
    features: Vec<package::FeatureId>,
}

impl From<PackageOut> for Package {
    fn from(p: PackageOut) -> Self {
        Self {
            id: p.id,
            name: p.name,
            base_price: p.base_price,
            order: p.order,
            features: p.features,
        }
    }
}

/// [`PriceRule`] as transferred over the wire in both directions.
#[derive(Debug, Deserialize, Serialize)]
pub(super) struct PriceRuleDto {
    /// ID of the [`Question`].
    question_id: question::Id,

    /// ID of the [`Package`].
    package_id: package::Id,

    /// ID of the option of an options [`Question`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    option_id: Option<question::OptionId>,

    /// Answer to a yes/no [`Question`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    answer: Option<question::Answer>,

    /// Type of the price adjustment.
    price_type: price_rule::PriceType,

    /// Value of the price adjustment.
    value: Money,
}

impl From<&PriceRule> for PriceRuleDto {
    fn from(r: &PriceRule) -> Self {
        let (option_id, answer) = match r.key.branch {
            Branch::Answer(a) => (None, Some(a)),
            Branch::Option(id) => (Some(id), None),
        };
        Self {
            question_id: r.key.question_id,
            package_id: r.key.package_id,
            option_id,
            answer,
            price_type: r.price_type,
            value: r.value,
        }
    }
}

impl PriceRuleDto {
    /// Converts this [`PriceRuleDto`] into a [`PriceRule`].
    ///
    /// [`None`] if neither an answer nor an option is set.
    pub(super) fn into_rule(self) -> Option<PriceRule> {
        let branch = match (self.answer, self.option_id) {
            (Some(a), _) => Branch::Answer(a),
            (None, Some(id)) => Branch::Option(id),
            (None, None) => return None,
        };
        Some(PriceRule {
            key: price_rule::Key {
                question_id: self.question_id,
                package_id: self.package_id,
                branch,
            },
            price_type: self.price_type,
            value: self.value,
        })
    }
}

/// Body of a bulk pricing request.
#[derive(Debug, Serialize)]
pub(super) struct BulkPricingIn {
    /// [`PriceRule`]s to set.
    pub(super) rules: Vec<PriceRuleDto>,
}

/// [`Quote`] as returned by the backend.
#[derive(Debug, Deserialize)]
pub(super) struct QuoteOut {
    /// ID of the [`Quote`].
    id: quote::Id,

    /// Status of the [`Quote`].
    status: quote::Status,

    /// First name of the customer.
    #[serde(default)]
    first_name: String,

    /// Last name of the customer.
    #[serde(default)]
    last_name: String,

    /// Email of the customer.
    #[serde(default, alias = "email")]
    customer_email: String,

    /// Phone of the customer.
    #[serde(default, alias = "phone")]
    customer_phone: Option<String>,

    /// [`SizeRange`] of the property.
    #[serde(default, alias = "size_range_details")]
    size_range: Option<SizeRangeOut>,

    /// Selected services.
    #[serde(default)]
    service_selections: Vec<ServiceSelectionOut>,

    /// Location of the property.
    #[serde(default)]
    location_details: Option<LocationOut>,

    /// Ordered add-ons.
    #[serde(default)]
    addons: Vec<AddonOut>,

    /// Total price of the add-ons.
    #[serde(default)]
    total_addons_price: Money,

    /// Applied coupon code.
    #[serde(default)]
    coupon_code: Option<String>,

    /// Amount discounted by the applied coupon.
    #[serde(default)]
    discounted_amount: Money,

    /// Final total computed by the backend.
    #[serde(default)]
    final_total: Money,

    /// Private bid notes.
    #[serde(default)]
    bid_notes_private: Option<String>,

    /// Public bid notes.
    #[serde(default)]
    bid_notes_public: Option<String>,

    /// Creation time of the [`Quote`].
    created_at: DateTime,
}

impl From<QuoteOut> for Quote {
    fn from(q: QuoteOut) -> Self {
        Self {
            id: q.id,
            status: q.status,
            customer: quote::Customer {
                first_name: q.first_name,
                last_name: q.last_name,
                email: q.customer_email,
                phone: q.customer_phone.filter(|p| !p.is_empty()),
            },
            size_range: q.size_range.map(SizeRange::from),
            services: q
                .service_selections
                .into_iter()
                .map(quote::ServiceSelection::from)
                .collect(),
            location: q.location_details.map(|l| quote::Location {
                name: l.name,
                trip_surcharge: l.trip_surcharge,
            }),
            addons: q
                .addons
                .into_iter()
                .map(|a| quote::Addon {
                    name: a.name,
                    price: a.price,
                })
                .collect(),
            total_addons_price: q.total_addons_price,
            coupon_code: q.coupon_code.filter(|c| !c.is_empty()),
            discounted_amount: q.discounted_amount,
            final_total: q.final_total,
            notes: quote::Notes {
                private: q.bid_notes_private,
                public: q.bid_notes_public,
            },
            created_at: q.created_at.coerce(),
        }
    }
}

/// [`quote::ServiceSelection`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct ServiceSelectionOut {
    /// ID of the selection.
    id: quote::SelectionId,

    /// ID of the selected [`Offering`].
    #[serde(alias = "service_id")]
    service: offering::Id,

    /// Name of the selected [`Offering`].
    #[serde(default, alias = "service_details_name")]
    service_name: String,

    /// Priced packages.
    #[serde(default)]
    package_quotes: Vec<PackageQuoteOut>,

    /// Responses to the questions.
    #[serde(default)]
    question_responses: Vec<ResponseOut>,
}

impl From<ServiceSelectionOut> for quote::ServiceSelection {
    fn from(s: ServiceSelectionOut) -> Self {
        Self {
            id: s.id,
            offering_id: s.service,
            offering_name: s.service_name,
            package_quotes: s
                .package_quotes
                .into_iter()
                .map(quote::PackageQuote::from)
                .collect(),
            responses: s
                .question_responses
                .into_iter()
                .map(quote::Response::from)
                .collect(),
        }
    }
}

/// [`quote::PackageQuote`] as returned by the backend.
#[derive(Debug, Deserialize)]
pub(super) struct PackageQuoteOut {
    /// ID of the package quote.
    id: package_quote::Id,

    /// ID of the quoted [`Package`].
    package: package::Id,

    /// Name of the quoted [`Package`].
    #[serde(default)]
    package_name: String,

    /// Base price.
    #[serde(default)]
    base_price: Money,

    /// Price for the property size.
    #[serde(default)]
    sqft_price: Money,

    /// Adjustments by the question responses.
    #[serde(default)]
    question_adjustments: Money,

    /// Total price.
    total_price: Money,

    /// Admin override price.
    #[serde(default)]
    admin_override_price: Option<Money>,

    /// Effective total price.
    #[serde(default)]
    effective_total_price: Option<Money>,

    /// Included features.
    #[serde(default)]
    included_features_details: Vec<FeatureOut>,

    /// Excluded features.
    #[serde(default)]
    excluded_features_details: Vec<FeatureOut>,

    /// Indicator whether the package is selected.
    #[serde(default)]
    is_selected: bool,
}

impl From<PackageQuoteOut> for quote::PackageQuote {
    fn from(p: PackageQuoteOut) -> Self {
        let features = |list: Vec<FeatureOut>| {
            list.into_iter()
                .map(|f| package_quote::Feature {
                    id: f.id,
                    name: f.name,
                })
                .collect()
        };
        Self {
            id: p.id,
            package_id: p.package,
            package_name: p.package_name,
            base_price: p.base_price,
            sqft_price: p.sqft_price,
            question_adjustments: p.question_adjustments,
            total_price: p.total_price,
            admin_override_price: p.admin_override_price,
            effective_total_price: p.effective_total_price,
            included_features: features(p.included_features_details),
            excluded_features: features(p.excluded_features_details),
            is_selected: p.is_selected,
        }
    }
}

/// [`package_quote::Feature`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct FeatureOut {
    /// ID of the feature.
    id: package::FeatureId,

    /// Name of the feature.
    name: String,
}

/// [`quote::Response`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct ResponseOut {
    /// ID of the answered [`Question`].
    question: question::Id,

    /// Text of the answered [`Question`].
    #[serde(default)]
    question_text: String,

    /// Type of the answered [`Question`].
    question_type: String,

    /// Answer to a yes/no or conditional [`Question`].
    #[serde(default)]
    yes_no_answer: Option<bool>,

    /// Answers to the sub-questions.
    #[serde(default)]
    sub_question_responses: Vec<SubQuestionResponseOut>,

    /// Picked options.
    #[serde(default)]
    option_responses: Vec<OptionResponseOut>,
}

/// Response to a sub-question as returned by the backend.
#[derive(Debug, Deserialize)]
struct SubQuestionResponseOut {
    /// Text of the sub-question.
    sub_question_text: String,

    /// Answer to the sub-question.
    #[serde(default)]
    answer: bool,
}

/// Picked option as returned by the backend.
#[derive(Debug, Deserialize)]
struct OptionResponseOut {
    /// Text of the option.
    option_text: String,

    /// Picked quantity.
    #[serde(default)]
    quantity: u32,
}

impl From<ResponseOut> for quote::Response {
    fn from(r: ResponseOut) -> Self {
        let yes = r.yes_no_answer.unwrap_or_default();
        let answer = match r.question_type.as_str() {
            "yes_no" => quote::Answer::YesNo(yes),
            "conditional" => quote::Answer::Conditional(yes),
            "multiple_yes_no" => quote::Answer::MultipleYesNo(
                r.sub_question_responses
                    .into_iter()
                    .map(|s| answer::SubAnswer {
                        text: s.sub_question_text,
                        answer: s.answer,
                    })
                    .collect(),
            ),
            "quantity" => quote::Answer::Quantity(
                r.option_responses
                    .into_iter()
                    .map(|o| answer::OptionQuantity {
                        option_text: o.option_text,
                        quantity: o.quantity,
                    })
                    .collect(),
            ),
            "describe" => quote::Answer::Describe(
                r.option_responses
                    .into_iter()
                    .map(|o| o.option_text)
                    .collect(),
            ),
            _ => quote::Answer::Unsupported(r.question_type),
        };
        Self {
            question_id: r.question,
            question_text: r.question_text,
            answer,
        }
    }
}

/// Location of a [`Quote`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct LocationOut {
    /// Name of the location.
    #[serde(default)]
    name: String,

    /// Trip surcharge of the location.
    #[serde(default)]
    trip_surcharge: Money,
}

/// Add-on of a [`Quote`] as returned by the backend.
#[derive(Debug, Deserialize)]
struct AddonOut {
    /// Name of the add-on.
    name: String,

    /// Price of the add-on.
    #[serde(default)]
    price: Money,
}

/// Body of a package price override request.
#[derive(Debug, Serialize)]
pub(super) struct PriceOverrideIn {
    /// New override price, or `null` to remove the override.
    pub(super) admin_override_price: Option<Money>,
}

/// Body of a quote size range change request.
#[derive(Debug, Serialize)]
pub(super) struct SizeRangeChangeIn {
    /// ID of the new [`SizeRange`].
    pub(super) size_range: size_range::Id,
}

/// Body of a bid notes change request.
#[derive(Debug, Serialize)]
pub(super) struct NotesIn<'a> {
    /// New private notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) bid_notes_private: Option<&'a str>,

    /// New public notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) bid_notes_public: Option<&'a str>,
}

/// Body of a package change request.
#[derive(Debug, Serialize)]
pub(super) struct PackageChangeIn {
    /// ID of the newly selected [`Package`].
    pub(super) new_package_id: package::Id,
}

/// Body of an offerings reorder request.
#[derive(Debug, Serialize)]
pub(super) struct ReorderIn<'a> {
    /// IDs of the [`Offering`]s in their new order.
    pub(super) order: &'a [offering::Id],
}

/// Body of an offering activation request.
#[derive(Debug, Serialize)]
pub(super) struct ActivationIn {
    /// New value of the flag.
    pub(super) is_active: bool,
}

/// [`Coupon`] as transferred over the wire.
#[derive(Debug, Deserialize)]
pub(super) struct CouponOut {
    /// ID of the [`Coupon`].
    id: coupon::Id,

    /// Code of the [`Coupon`].
    code: String,

    /// Percentage discount.
    #[serde(default)]
    percentage_discount: Option<Percent>,

    /// Fixed discount.
    #[serde(default)]
    fixed_discount: Option<Money>,

    /// Expiration date.
    expiration_date: common::Date,

    /// Indicator whether the [`Coupon`] is enabled.
    #[serde(default)]
    is_active: bool,
}

impl CouponOut {
    /// Returns the ID of the [`Coupon`].
    pub(super) fn id(&self) -> coupon::Id {
        self.id
    }

    /// Converts this [`CouponOut`] into a [`Coupon`].
    ///
    /// [`None`] if the backend holds a code this console considers invalid.
    pub(super) fn into_coupon(self) -> Option<Coupon> {
        Some(Coupon {
            id: self.id,
            code: coupon::Code::new(self.code)?,
            percentage_discount: self.percentage_discount,
            fixed_discount: self.fixed_discount,
            expiration_date: self.expiration_date,
            is_active: self.is_active,
        })
    }
}

/// [`Coupon`] to be created.
#[derive(Debug, Serialize)]
pub(super) struct CouponIn<'a> {
    /// Code of the [`Coupon`].
    code: &'a str,

    /// Percentage discount.
    percentage_discount: Option<Percent>,

    /// Fixed discount.
    fixed_discount: Option<Money>,

    /// Expiration date.
    expiration_date: common::Date,

    /// Indicator whether the [`Coupon`] is enabled.
    is_active: bool,
}

impl<'a> From<&'a coupon::New> for CouponIn<'a> {
    fn from(c: &'a coupon::New) -> Self {
        Self {
            code: c.code.as_ref(),
            percentage_discount: c.percentage_discount,
            fixed_discount: c.fixed_discount,
            expiration_date: c.expiration_date,
            is_active: c.is_active,
        }
    }
}
