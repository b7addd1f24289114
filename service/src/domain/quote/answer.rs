//! [`Answer`] definitions.

use itertools::Itertools as _;

use crate::domain::question;

/// Customer's response to a [`Question`].
///
/// [`Question`]: crate::domain::Question
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Response {
    /// ID of the answered [`Question`].
    ///
    /// [`Question`]: crate::domain::Question
    pub question_id: question::Id,

    /// Text of the answered [`Question`].
    ///
    /// [`Question`]: crate::domain::Question
    pub question_text: String,

    /// [`Answer`] given by the customer.
    pub answer: Answer,
}

/// Answer to a [`Question`] of any type.
///
/// [`Question`]: crate::domain::Question
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Answer {
    /// Answer to a yes/no [`Question`].
    ///
    /// [`Question`]: crate::domain::Question
    YesNo(bool),

    /// Answer to a conditional [`Question`], unlocking follow-up questions.
    ///
    /// [`Question`]: crate::domain::Question
    Conditional(bool),

    /// Answers to a list of yes/no sub-questions.
    MultipleYesNo(Vec<SubAnswer>),

    /// Quantities picked per option.
    Quantity(Vec<OptionQuantity>),

    /// Texts of the picked options.
    Describe(Vec<String>),

    /// Answer to a question type this console doesn't know about.
    Unsupported(String),
}

impl Answer {
    /// Renders this [`Answer`] as a human-readable text.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::YesNo(yes) | Self::Conditional(yes) => {
                if *yes { "Yes" } else { "No" }.to_owned()
            }
            Self::MultipleYesNo(subs) => {
                let picked = subs
                    .iter()
                    .filter(|s| s.answer)
                    .map(|s| s.text.as_str())
                    .join(", ");
                if picked.is_empty() {
                    "None selected".to_owned()
                } else {
                    picked
                }
            }
            Self::Quantity(quantities) => quantities
                .iter()
                .map(|q| format!("{}: {}", q.option_text, q.quantity))
                .join(", "),
            Self::Describe(options) => options.join(", "),
            Self::Unsupported(_) => "N/A".to_owned(),
        }
    }
}

/// Answer to a single sub-question of an [`Answer::MultipleYesNo`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubAnswer {
    /// Text of the sub-question.
    pub text: String,

    /// Indicator whether the sub-question is answered positively.
    pub answer: bool,
}

/// Quantity picked for an option of an [`Answer::Quantity`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OptionQuantity {
    /// Text of the option.
    pub option_text: String,

    /// Picked quantity.
    pub quantity: u32,
}

#[cfg(test)]
mod spec {
    use super::{Answer, OptionQuantity, SubAnswer};

    fn sub(text: &str, answer: bool) -> SubAnswer {
        SubAnswer {
            text: text.to_owned(),
            answer,
        }
    }

    #[test]
    fn renders_booleans() {
        assert_eq!(Answer::YesNo(true).render(), "Yes");
        assert_eq!(Answer::YesNo(false).render(), "No");
        assert_eq!(Answer::Conditional(true).render(), "Yes");
    }

    #[test]
    fn renders_multiple_yes_no() {
        let answer = Answer::MultipleYesNo(vec![
            sub("Basement", true),
            sub("Attic", false),
            sub("Garage", true),
        ]);
        assert_eq!(answer.render(), "Basement, Garage");

        let answer = Answer::MultipleYesNo(vec![sub("Attic", false)]);
        assert_eq!(answer.render(), "None selected");
    }

    #[test]
    fn renders_quantities_and_descriptions() {
        let answer = Answer::Quantity(vec![
            OptionQuantity {
                option_text: "Windows".to_owned(),
                quantity: 12,
            },
            OptionQuantity {
                option_text: "Doors".to_owned(),
                quantity: 3,
            },
        ]);
        assert_eq!(answer.render(), "Windows: 12, Doors: 3");

        let answer =
            Answer::Describe(vec!["Brick".to_owned(), "Stucco".to_owned()]);
        assert_eq!(answer.render(), "Brick, Stucco");
    }

    #[test]
    fn renders_unknown_as_not_available() {
        assert_eq!(Answer::Unsupported("rating".to_owned()).render(), "N/A");
    }
}
