//! [`Question`] definitions.

use common::define_kind;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Question asked to a customer while booking an [`Offering`].
///
/// [`Offering`]: crate::domain::Offering
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Question {
    /// ID of this [`Question`].
    pub id: Id,

    /// Text of this [`Question`].
    pub text: String,

    /// [`Kind`] of this [`Question`] along with its options.
    pub kind: Kind,
}

impl Question {
    /// Returns the [`Branch`]es of this [`Question`] a price rule may be
    /// defined for.
    pub fn branches(&self) -> impl Iterator<Item = Branch> + '_ {
        self.rows().map(|row| row.branch)
    }

    /// Returns the display [`Row`]s of this [`Question`].
    ///
    /// A yes/no [`Question`] is displayed as two synthetic `Yes`/`No` rows,
    /// while an options [`Question`] has one row per option in their stored
    /// order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        let yes_no = match &self.kind {
            Kind::YesNo => &[Answer::Yes, Answer::No][..],
            Kind::Options(_) => &[][..],
        };
        let options = match &self.kind {
            Kind::YesNo => &[][..],
            Kind::Options(opts) => opts.as_slice(),
        };
        yes_no
            .iter()
            .map(|&a| Row {
                branch: Branch::Answer(a),
                text: a.label(),
            })
            .chain(options.iter().map(|o| Row {
                branch: Branch::Option(o.id),
                text: &o.text,
            }))
    }
}

/// ID of a [`Question`].
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

/// Kind of a [`Question`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Kind {
    /// [`Question`] answered with either yes or no.
    YesNo,

    /// [`Question`] answered by picking one of the [`QuestionOption`]s.
    Options(Vec<QuestionOption>),
}

/// Option of a [`Kind::Options`] [`Question`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QuestionOption {
    /// ID of this [`QuestionOption`].
    pub id: OptionId,

    /// Text of this [`QuestionOption`].
    pub text: String,
}

/// ID of a [`QuestionOption`].
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
pub struct OptionId(Uuid);

define_kind! {
    #[doc = "Answer to a yes/no [`Question`]."]
    enum Answer {
        #[doc = "Positive answer."]
        Yes,

        #[doc = "Negative answer."]
        No,
    }
}

impl Answer {
    /// Returns a human-readable label of this [`Answer`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Yes => "Yes",
            Self::No => "No",
        }
    }
}

/// Branch of a [`Question`]: a single way it may be answered.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Branch {
    /// Yes/no [`Question`] answered with the [`Answer`].
    Answer(Answer),

    /// Options [`Question`] answered with the [`QuestionOption`].
    Option(OptionId),
}

/// Display row of a [`Question`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Row<'q> {
    /// [`Branch`] this [`Row`] represents.
    pub branch: Branch,

    /// Text of this [`Row`].
    pub text: &'q str,
}

#[cfg(test)]
mod spec {
    use uuid::Uuid;

    use super::{Answer, Branch, Kind, OptionId, Question, QuestionOption};

    fn option(text: &str) -> QuestionOption {
        QuestionOption {
            id: OptionId::from(Uuid::new_v4()),
            text: text.to_owned(),
        }
    }

    #[test]
    fn yes_no_question_has_synthetic_rows() {
        let q = Question {
            id: Uuid::new_v4().into(),
            text: "Is there a pool?".to_owned(),
            kind: Kind::YesNo,
        };

        let rows = q.rows().map(|r| (r.branch, r.text)).collect::<Vec<_>>();

        assert_eq!(
            rows,
            [
                (Branch::Answer(Answer::Yes), "Yes"),
                (Branch::Answer(Answer::No), "No"),
            ],
        );
    }

    #[test]
    fn options_question_keeps_stored_order() {
        let opts = vec![option("Small"), option("Large"), option("Medium")];
        let q = Question {
            id: Uuid::new_v4().into(),
            text: "Yard size".to_owned(),
            kind: Kind::Options(opts.clone()),
        };

        let branches = q.branches().collect::<Vec<_>>();
        let texts = q.rows().map(|r| r.text).collect::<Vec<_>>();

        assert_eq!(
            branches,
            opts.iter().map(|o| Branch::Option(o.id)).collect::<Vec<_>>(),
        );
        assert_eq!(texts, ["Small", "Large", "Medium"]);
    }

    #[test]
    fn answers_are_snake_case_on_the_wire() {
        assert_eq!(Answer::Yes.as_ref(), "yes");
        assert_eq!("no".parse::<Answer>().unwrap(), Answer::No);
    }
}
