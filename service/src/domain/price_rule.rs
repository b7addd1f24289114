//! [`Rule`] definitions and the pricing [`Matrix`] editor.
//!
//! Every [`Branch`] of every [`Question`] of an [`Offering`] gets exactly one
//! [`Rule`] per [`Package`]. The [`Matrix`] keeps this cross-product complete
//! while the [`Question`]s and [`Package`]s are being edited, preserving the
//! values already entered.
//!
//! [`Offering`]: crate::domain::Offering

use std::collections::{hash_map::Entry, HashMap};

use common::{define_kind, Money};

use crate::domain::{
    package,
    question::{self, Branch},
    Package, Question,
};

/// Pricing rule of a [`Package`] applied when a [`Question`] is answered with
/// a specific [`Branch`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Rule {
    /// Composite [`Key`] identifying this [`Rule`].
    pub key: Key,

    /// [`PriceType`] of this [`Rule`].
    pub price_type: PriceType,

    /// Value this [`Rule`] adjusts the [`Package`] price by.
    pub value: Money,
}

impl Rule {
    /// Creates a new default [`Rule`] for the provided [`Key`], ignored when
    /// pricing.
    #[must_use]
    pub fn ignored(key: Key) -> Self {
        Self {
            key,
            price_type: PriceType::Ignore,
            value: Money::ZERO,
        }
    }

    /// Returns the signed adjustment of a [`Package`] base price by this
    /// [`Rule`], as the backend applies it.
    ///
    /// [`None`] means the [`Package`] must be quoted in person.
    ///
    /// Only used for previews: prices are always computed by the backend.
    #[must_use]
    pub fn adjustment(&self) -> Option<Money> {
        match self.price_type {
            PriceType::Upcharge => Some(self.value),
            PriceType::Discount => Some(Money::ZERO - self.value),
            PriceType::Ignore => Some(Money::ZERO),
            PriceType::BidInPerson => None,
        }
    }
}

/// Composite identity of a [`Rule`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Key {
    /// ID of the [`Question`] the [`Rule`] is defined for.
    pub question_id: question::Id,

    /// ID of the [`Package`] the [`Rule`] is defined for.
    pub package_id: package::Id,

    /// [`Branch`] of the [`Question`] the [`Rule`] is defined for.
    pub branch: Branch,
}

define_kind! {
    #[doc = "Type of a [`Rule`] price adjustment."]
    enum PriceType {
        #[doc = "Adds the value to the [`Package`] base price."]
        Upcharge,

        #[doc = "Subtracts the value from the [`Package`] base price."]
        Discount,

        #[doc = "Doesn't affect the [`Package`] price."]
        Ignore,

        #[doc = "Requires the [`Package`] to be quoted in person."]
        BidInPerson,
    }
}

/// Field of a [`Rule`] to be updated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    /// New [`PriceType`] of the [`Rule`].
    PriceType(PriceType),

    /// New value of the [`Rule`].
    Value(Money),
}

/// Editable matrix of [`Rule`]s.
#[derive(Clone, Debug, Default)]
pub struct Matrix {
    /// [`Rule`]s in their generation order.
    rules: Vec<Rule>,

    /// Positions of the [`rules`] by their [`Key`]s.
    ///
    /// [`rules`]: Matrix::rules
    index: HashMap<Key, usize>,
}

impl Matrix {
    /// Creates a new [`Matrix`] out of the previously held [`Rule`]s.
    ///
    /// Only the first [`Rule`] is kept for duplicated [`Key`]s.
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = Rule>) -> Self {
        let mut this = Self::default();
        for rule in rules {
            if let Entry::Vacant(e) = this.index.entry(rule.key) {
                _ = e.insert(this.rules.len());
                this.rules.push(rule);
            }
        }
        this
    }

    /// Regenerates the [`Rule`]s as the cross-product of the provided
    /// [`Question`] branches and [`Package`]s.
    ///
    /// Existing [`Rule`]s are preserved by their [`Key`], missing ones are
    /// created [ignored](Rule::ignored), and the ones not matching any
    /// [`Question`] or [`Package`] anymore are dropped. Idempotent.
    pub fn rebuild(&mut self, questions: &[Question], packages: &[Package]) {
        let rules = questions
            .iter()
            .flat_map(|q| q.branches().map(move |b| (q.id, b)))
            .flat_map(|(question_id, branch)| {
                packages.iter().map(move |p| Key {
                    question_id,
                    package_id: p.id,
                    branch,
                })
            })
            .map(|key| self.get(&key).copied().unwrap_or(Rule::ignored(key)))
            .collect::<Vec<_>>();
        *self = Self::new(rules);
    }

    /// Updates the `field` of the [`Rule`] identified by the provided [`Key`].
    ///
    /// Returns `false` if there is no such [`Rule`], leaving this [`Matrix`]
    /// untouched.
    pub fn update(&mut self, key: &Key, field: Field) -> bool {
        let Some(rule) = self.index.get(key).map(|&i| &mut self.rules[i])
        else {
            return false;
        };
        match field {
            Field::PriceType(ty) => rule.price_type = ty,
            Field::Value(value) => rule.value = value,
        }
        true
    }

    /// Returns the [`Rule`] identified by the provided [`Key`], if any.
    #[must_use]
    pub fn get(&self, key: &Key) -> Option<&Rule> {
        self.index.get(key).map(|&i| &self.rules[i])
    }

    /// Returns all the [`Rule`]s of this [`Matrix`].
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Groups the [`Rule`]s for display: per [`Question`], per its display
    /// [`question::Row`], one cell per [`Package`] in the provided order.
    #[must_use]
    pub fn grid<'m>(
        &'m self,
        questions: &'m [Question],
        packages: &[Package],
    ) -> Vec<Section<'m>> {
        questions
            .iter()
            .map(|question| Section {
                question,
                rows: question
                    .rows()
                    .map(|row| GridRow {
                        text: row.text,
                        cells: packages
                            .iter()
                            .map(|p| {
                                self.get(&Key {
                                    question_id: question.id,
                                    package_id: p.id,
                                    branch: row.branch,
                                })
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect()
    }
}

/// [`Question`] section of a [`Matrix::grid()`].
#[derive(Clone, Debug)]
pub struct Section<'m> {
    /// [`Question`] of this [`Section`].
    pub question: &'m Question,

    /// Display rows of the [`Question`].
    pub rows: Vec<GridRow<'m>>,
}

/// Row of a [`Section`].
#[derive(Clone, Debug)]
pub struct GridRow<'m> {
    /// Text of the [`Branch`] this [`GridRow`] represents.
    pub text: &'m str,

    /// [`Rule`]s of every [`Package`] in their order.
    ///
    /// [`None`] if the [`Matrix`] hasn't been rebuilt for the [`Package`].
    pub cells: Vec<Option<&'m Rule>>,
}

#[cfg(test)]
pub(crate) mod spec {
    use std::collections::HashSet;

    use common::Money;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    use crate::domain::{
        question::{self, Answer, Branch, QuestionOption},
        Package, Question,
    };

    use super::{Field, Key, Matrix, PriceType, Rule};

    pub(crate) fn yes_no(text: &str) -> Question {
        Question {
            id: Uuid::new_v4().into(),
            text: text.to_owned(),
            kind: question::Kind::YesNo,
        }
    }

    pub(crate) fn options(text: &str, opts: &[&str]) -> Question {
        Question {
            id: Uuid::new_v4().into(),
            text: text.to_owned(),
            kind: question::Kind::Options(
                opts.iter()
                    .map(|t| QuestionOption {
                        id: Uuid::new_v4().into(),
                        text: (*t).to_owned(),
                    })
                    .collect(),
            ),
        }
    }

    pub(crate) fn package(name: &str) -> Package {
        Package {
            id: Uuid::new_v4().into(),
            name: name.to_owned(),
            base_price: Money::new(Decimal::ONE_HUNDRED),
            order: 0,
            features: vec![],
        }
    }

    fn dollars(n: i64) -> Money {
        Money::new(Decimal::from(n))
    }

    #[test]
    fn rebuild_is_complete_and_unique() {
        let questions = [
            yes_no("Pool?"),
            options("Yard", &["Small", "Medium", "Large"]),
            options("Pets", &[]),
        ];
        let packages = [package("Basic"), package("Premium")];
        let mut matrix = Matrix::default();

        matrix.rebuild(&questions, &packages);

        assert_eq!(matrix.rules().len(), (2 + 3) * 2);
        let keys = matrix.rules().iter().map(|r| r.key).collect::<HashSet<_>>();
        assert_eq!(keys.len(), matrix.rules().len());
        assert!(matrix
            .rules()
            .iter()
            .all(|r| r.price_type == PriceType::Ignore && r.value == Money::ZERO));
    }

    #[test]
    fn rebuild_is_idempotent() {
        let questions = [yes_no("Pool?")];
        let packages = [package("Basic")];
        let mut matrix = Matrix::default();

        matrix.rebuild(&questions, &packages);
        let first = matrix.rules().to_vec();
        matrix.rebuild(&questions, &packages);

        assert_eq!(matrix.rules(), first);
    }

    #[test]
    fn rebuild_preserves_existing_and_drops_stale_rules() {
        let pool = yes_no("Pool?");
        let yard = options("Yard", &["Small", "Large"]);
        let basic = package("Basic");
        let premium = package("Premium");
        let kept = Key {
            question_id: pool.id,
            package_id: basic.id,
            branch: Branch::Answer(Answer::Yes),
        };
        let stale = Key {
            question_id: pool.id,
            package_id: premium.id,
            branch: Branch::Answer(Answer::No),
        };
        let mut matrix = Matrix::new([
            Rule {
                key: kept,
                price_type: PriceType::Upcharge,
                value: dollars(25),
            },
            Rule {
                key: stale,
                price_type: PriceType::Discount,
                value: dollars(5),
            },
        ]);

        matrix.rebuild(&[pool, yard], &[basic]);

        assert_eq!(matrix.rules().len(), 4);
        let rule = matrix.get(&kept).unwrap();
        assert_eq!(rule.price_type, PriceType::Upcharge);
        assert_eq!(rule.value, dollars(25));
        assert!(matrix.get(&stale).is_none());
    }

    #[test]
    fn updates_only_the_named_field() {
        let pool = yes_no("Pool?");
        let basic = package("Basic");
        let key = Key {
            question_id: pool.id,
            package_id: basic.id,
            branch: Branch::Answer(Answer::No),
        };
        let mut matrix = Matrix::default();
        matrix.rebuild(&[pool], &[basic]);

        assert!(matrix.update(&key, Field::Value(dollars(10))));
        assert!(matrix.update(&key, Field::PriceType(PriceType::Discount)));

        let rule = matrix.get(&key).unwrap();
        assert_eq!(rule.value, dollars(10));
        assert_eq!(rule.price_type, PriceType::Discount);
    }

    #[test]
    fn update_of_missing_rule_is_noop() {
        let mut matrix = Matrix::default();
        matrix.rebuild(&[yes_no("Pool?")], &[package("Basic")]);
        let before = matrix.rules().to_vec();

        let updated = matrix.update(
            &Key {
                question_id: Uuid::new_v4().into(),
                package_id: Uuid::new_v4().into(),
                branch: Branch::Answer(Answer::Yes),
            },
            Field::Value(dollars(1)),
        );

        assert!(!updated);
        assert_eq!(matrix.rules(), before);
    }

    #[test]
    fn groups_grid_for_display() {
        let questions = [yes_no("Pool?"), options("Yard", &["Small", "Large"])];
        let packages = [package("Basic"), package("Premium")];
        let mut matrix = Matrix::default();
        matrix.rebuild(&questions, &packages);

        let grid = matrix.grid(&questions, &packages);

        assert_eq!(grid.len(), 2);
        assert_eq!(
            grid[0].rows.iter().map(|r| r.text).collect::<Vec<_>>(),
            ["Yes", "No"],
        );
        assert_eq!(
            grid[1].rows.iter().map(|r| r.text).collect::<Vec<_>>(),
            ["Small", "Large"],
        );
        for row in grid.iter().flat_map(|s| &s.rows) {
            assert_eq!(row.cells.len(), 2);
            assert_eq!(row.cells[1].unwrap().key.package_id, packages[1].id);
        }
    }

    #[test]
    fn adjusts_by_price_type() {
        let key = Key {
            question_id: Uuid::new_v4().into(),
            package_id: Uuid::new_v4().into(),
            branch: Branch::Answer(Answer::Yes),
        };
        let rule = |price_type| Rule {
            key,
            price_type,
            value: dollars(15),
        };

        assert_eq!(rule(PriceType::Upcharge).adjustment(), Some(dollars(15)));
        assert_eq!(rule(PriceType::Discount).adjustment(), Some(dollars(-15)));
        assert_eq!(rule(PriceType::Ignore).adjustment(), Some(Money::ZERO));
        assert_eq!(rule(PriceType::BidInPerson).adjustment(), None);
        assert_eq!(PriceType::BidInPerson.as_ref(), "bid_in_person");
    }
}
