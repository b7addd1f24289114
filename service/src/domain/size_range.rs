//! [`SizeRange`] definitions.
//!
//! House size ranges are edited as a list of upper bounds only: the lower
//! bound of every row is derived from the row above it, so the ranges always
//! form a contiguous partition starting at `0`. At most one row may be open
//! ended ("And Up"), and it is always the last one.

use std::fmt;

use common::define_kind;
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Size range of a property, in square feet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SizeRange {
    /// ID of this [`SizeRange`], if it has been persisted already.
    pub id: Option<Id>,

    /// Inclusive lower bound of this [`SizeRange`].
    pub min_sqft: Sqft,

    /// Inclusive upper bound of this [`SizeRange`], if any.
    ///
    /// [`None`] means this [`SizeRange`] is open ended ("And Up").
    pub max_sqft: Option<Sqft>,
}

impl SizeRange {
    /// Returns a human-readable label of this [`SizeRange`].
    #[must_use]
    pub fn label(&self) -> String {
        match self.max_sqft {
            Some(max) => format!("{} - {max} sqft", self.min_sqft),
            None => format!("{}+ sqft", self.min_sqft),
        }
    }
}

/// ID of a [`SizeRange`].
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

/// Area of a property, in square feet.
pub type Sqft = u32;

define_kind! {
    #[doc = "Type of a property the [`SizeRange`]s are defined for."]
    enum PropertyType {
        #[doc = "Detached house."]
        House,

        #[doc = "Apartment or condominium."]
        Apartment,

        #[doc = "Commercial property."]
        Commercial,
    }
}

/// [`SizeRange`]s of a [`PropertyType`] to be created at once.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Batch {
    /// [`PropertyType`] the [`SizeRange`]s are defined for.
    pub property_type: PropertyType,

    /// [`SizeRange`]s forming a contiguous partition.
    pub ranges: Vec<SizeRange>,
}

/// Row of a [`Draft`] as edited by a user.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Row {
    /// Raw input of the upper bound.
    pub max: String,

    /// Indicator whether this [`Row`] is open ended ("And Up").
    pub and_up: bool,
}

impl Row {
    /// Creates a new bounded [`Row`] with the provided raw upper bound.
    #[must_use]
    pub fn bounded(max: impl Into<String>) -> Self {
        Self {
            max: max.into(),
            and_up: false,
        }
    }

    /// Creates a new open ended [`Row`].
    #[must_use]
    pub fn and_up() -> Self {
        Self {
            max: String::new(),
            and_up: true,
        }
    }
}

/// [`Row`] with its lower bound derived from the previous rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Derived {
    /// Derived inclusive lower bound.
    ///
    /// [`None`] if the upper bound of the previous row is not a valid number
    /// yet.
    pub min: Option<Sqft>,

    /// Raw input of the upper bound.
    ///
    /// Always empty for an open ended row.
    pub max: String,

    /// Indicator whether this row is open ended ("And Up").
    pub and_up: bool,
}

impl Derived {
    /// Validates this [`Derived`] row.
    ///
    /// Returns [`None`] if the row is valid or not filled yet.
    #[must_use]
    pub fn error(&self) -> Option<RowError> {
        if self.and_up || self.max.trim().is_empty() {
            return None;
        }
        let Some(max) = parse_sqft(&self.max) else {
            return Some(RowError::InvalidNumber);
        };
        match self.min {
            Some(min) if max < min => Some(RowError::BelowMinimum(min)),
            Some(_) | None => None,
        }
    }

    /// Converts this [`Derived`] row into a [`SizeRange`], if it's complete
    /// and valid.
    #[must_use]
    pub fn to_range(&self) -> Option<SizeRange> {
        if self.error().is_some() {
            return None;
        }
        let min_sqft = self.min?;
        let max_sqft = if self.and_up {
            None
        } else {
            Some(parse_sqft(&self.max)?)
        };
        Some(SizeRange {
            id: None,
            min_sqft,
            max_sqft,
        })
    }
}

/// Validation error of a [`Derived`] row.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum RowError {
    /// Upper bound is not a number.
    #[display("Invalid number")]
    InvalidNumber,

    /// Upper bound is less than the derived lower bound.
    #[display("Must be ≥ {_0}")]
    BelowMinimum(#[error(not(source))] Sqft),
}

/// Editable list of [`SizeRange`] upper bounds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Draft {
    /// [`Row`]s of this [`Draft`] in their display order.
    rows: Vec<Row>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            rows: vec![Row::default()],
        }
    }
}

impl Draft {
    /// Creates a new [`Draft`] out of the provided [`Row`]s.
    #[must_use]
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    /// Returns the source [`Row`]s of this [`Draft`].
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Appends a new empty [`Row`].
    ///
    /// # Errors
    ///
    /// If an open ended [`Row`] exists already, as it must remain the last
    /// one.
    pub fn push_row(&mut self) -> Result<(), AndUpExists> {
        if self.rows.iter().any(|r| r.and_up) {
            return Err(AndUpExists);
        }
        self.rows.push(Row::default());
        Ok(())
    }

    /// Sets the raw upper bound of the [`Row`] at the provided `index`.
    ///
    /// Does nothing if there is no such [`Row`].
    pub fn set_max(&mut self, index: usize, max: impl Into<String>) {
        if let Some(row) = self.rows.get_mut(index) {
            row.max = max.into();
        }
    }

    /// Toggles the open ended flag of the [`Row`] at the provided `index`.
    ///
    /// Turning the flag on removes every [`Row`] after this one. Does nothing
    /// if there is no such [`Row`].
    pub fn set_and_up(&mut self, index: usize, and_up: bool) {
        let Some(row) = self.rows.get_mut(index) else {
            return;
        };
        row.and_up = and_up;
        if and_up {
            self.rows.truncate(index + 1);
        }
    }

    /// Removes the [`Row`] at the provided `index`, if any.
    pub fn remove_row(&mut self, index: usize) {
        if index < self.rows.len() {
            drop(self.rows.remove(index));
        }
    }

    /// Derives lower bounds of all the [`Row`]s.
    ///
    /// Derivation stops right after the first open ended [`Row`], so any
    /// [`Row`] configured after it is omitted.
    #[must_use]
    pub fn derive(&self) -> Vec<Derived> {
        let mut derived = Vec::with_capacity(self.rows.len());
        let mut min = Some(0);
        for row in &self.rows {
            if row.and_up {
                derived.push(Derived {
                    min,
                    max: String::new(),
                    and_up: true,
                });
                break;
            }
            derived.push(Derived {
                min,
                max: row.max.clone(),
                and_up: false,
            });
            min = parse_sqft(&row.max).and_then(|max| max.checked_add(1));
        }
        derived
    }

    /// Validates all the [`Derived`] rows, returning the errors along with
    /// their row indices.
    #[must_use]
    pub fn validate(&self) -> Vec<(usize, RowError)> {
        self.derive()
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.error().map(|e| (i, e)))
            .collect()
    }

    /// Converts this [`Draft`] into the [`SizeRange`]s to be saved.
    ///
    /// Conversion stops at the first invalid or incomplete row, as the lower
    /// bounds of all the rows below it depend on it.
    ///
    /// # Errors
    ///
    /// If there is no valid row at all.
    pub fn to_ranges(&self) -> Result<Vec<SizeRange>, NoValidRanges> {
        let ranges = self
            .derive()
            .iter()
            .map_while(Derived::to_range)
            .collect::<Vec<_>>();
        if ranges.is_empty() {
            return Err(NoValidRanges);
        }
        Ok(ranges)
    }
}

/// Error of adding a [`Row`] after an open ended one.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("an \"And Up\" range must be the last one")]
pub struct AndUpExists;

/// Error of saving a [`Draft`] without any valid row.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("at least one valid size range is required")]
pub struct NoValidRanges;

/// Parses the raw upper bound input.
fn parse_sqft(input: &str) -> Option<Sqft> {
    input.trim().parse().ok()
}

/// Checks the provided persisted [`SizeRange`]s form a contiguous partition
/// starting at `0` with at most one open ended range being the last one.
///
/// # Errors
///
/// With the index of the first offending [`SizeRange`].
pub fn check_partition(ranges: &[SizeRange]) -> Result<(), PartitionError> {
    let mut expected_min = Some(0);
    for (i, range) in ranges.iter().enumerate() {
        if expected_min != Some(range.min_sqft) {
            return Err(PartitionError { index: i });
        }
        expected_min = match range.max_sqft {
            Some(max) if max >= range.min_sqft => max.checked_add(1),
            Some(_) | None => None,
        };
        if expected_min.is_none() && i + 1 != ranges.len() {
            return Err(PartitionError { index: i });
        }
    }
    Ok(())
}

/// Error of [`SizeRange`]s not forming a contiguous partition.
#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub struct PartitionError {
    /// Index of the first offending [`SizeRange`].
    pub index: usize,
}

impl fmt::Display for PartitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "size range #{} breaks the contiguous partition",
            self.index + 1,
        )
    }
}

#[cfg(test)]
mod spec {
    use super::{
        check_partition, AndUpExists, Derived, Draft, NoValidRanges, Row,
        RowError, SizeRange,
    };

    fn derived(min: Option<u32>, max: &str, and_up: bool) -> Derived {
        Derived {
            min,
            max: max.to_owned(),
            and_up,
        }
    }

    fn range(min: u32, max: Option<u32>) -> SizeRange {
        SizeRange {
            id: None,
            min_sqft: min,
            max_sqft: max,
        }
    }

    #[test]
    fn derives_contiguous_minimums() {
        let draft = Draft::new(
            ["100", "250", "999", "5000"].into_iter().map(Row::bounded),
        );

        let derived = draft.derive();

        assert_eq!(derived[0].min, Some(0));
        for pair in derived.windows(2) {
            let prev_max: u32 = pair[0].max.parse().unwrap();
            assert_eq!(pair[1].min, Some(prev_max + 1));
        }
    }

    #[test]
    fn minimum_is_unknown_after_invalid_maximum() {
        let draft = Draft::new([
            Row::bounded("500"),
            Row::bounded("abc"),
            Row::bounded("2000"),
        ]);

        assert_eq!(
            draft.derive(),
            [
                derived(Some(0), "500", false),
                derived(Some(501), "abc", false),
                derived(None, "2000", false),
            ],
        );
    }

    #[test]
    fn truncates_after_and_up() {
        let draft =
            Draft::new([Row::bounded("500"), Row::and_up(), Row::bounded("9")]);

        let derived = draft.derive();

        assert_eq!(derived.len(), 2);
        assert!(derived[1].and_up);
        assert!(derived[1].max.is_empty());
    }

    #[test]
    fn derives_house_sizes_scenario() {
        let draft = Draft::new([
            Row::bounded("500"),
            Row::bounded("1500"),
            Row::and_up(),
        ]);

        assert_eq!(
            draft.derive(),
            [
                derived(Some(0), "500", false),
                derived(Some(501), "1500", false),
                derived(Some(1501), "", true),
            ],
        );
        assert_eq!(
            draft.to_ranges().unwrap(),
            [
                range(0, Some(500)),
                range(501, Some(1500)),
                range(1501, None),
            ],
        );
    }

    #[test]
    fn validates_rows() {
        let draft = Draft::new([
            Row::bounded(""),
            Row::bounded("12a"),
            Row::bounded("300"),
        ]);
        assert_eq!(draft.validate(), [(1, RowError::InvalidNumber)]);

        let draft = Draft::new([Row::bounded("500"), Row::bounded("400")]);
        assert_eq!(draft.validate(), [(1, RowError::BelowMinimum(501))]);
        assert_eq!(RowError::BelowMinimum(501).to_string(), "Must be ≥ 501");
        assert_eq!(RowError::InvalidNumber.to_string(), "Invalid number");
    }

    #[test]
    fn saving_stops_at_first_failing_row() {
        let draft = Draft::new([
            Row::bounded("500"),
            Row::bounded("300"),
            Row::bounded("1000"),
            Row::and_up(),
        ]);

        assert_eq!(draft.to_ranges().unwrap(), [range(0, Some(500))]);
    }

    #[test]
    fn rejects_saving_without_valid_rows() {
        assert_eq!(Draft::default().to_ranges(), Err(NoValidRanges));
        assert_eq!(
            Draft::new([Row::bounded("x")]).to_ranges(),
            Err(NoValidRanges),
        );
    }

    #[test]
    fn only_and_up_row_is_saved_as_open_range() {
        let draft = Draft::new([Row::and_up()]);

        assert_eq!(draft.to_ranges().unwrap(), [range(0, None)]);
    }

    #[test]
    fn rejects_adding_rows_after_and_up() {
        let mut draft = Draft::new([Row::bounded("500"), Row::and_up()]);

        assert_eq!(draft.push_row(), Err(AndUpExists));
        assert_eq!(draft.rows().len(), 2);

        draft.set_and_up(1, false);
        assert_eq!(draft.push_row(), Ok(()));
        assert_eq!(draft.rows().len(), 3);
    }

    #[test]
    fn toggling_and_up_splices_following_rows() {
        let mut draft = Draft::new(
            ["500", "1000", "2000", "3000"].into_iter().map(Row::bounded),
        );

        draft.set_and_up(1, true);

        assert_eq!(draft.rows().len(), 2);
        assert!(draft.rows()[1].and_up);
        assert_eq!(draft.derive().len(), 2);
    }

    #[test]
    fn edits_rows() {
        let mut draft = Draft::default();
        draft.set_max(0, "700");
        draft.push_row().unwrap();
        draft.set_max(1, "900");
        draft.set_max(7, "ignored");
        draft.remove_row(0);
        draft.remove_row(5);

        assert_eq!(draft.rows(), [Row::bounded("900")]);
        assert_eq!(draft.to_ranges().unwrap(), [range(0, Some(900))]);
    }

    #[test]
    fn checks_partition() {
        assert!(check_partition(&[]).is_ok());
        assert!(check_partition(&[range(0, Some(10)), range(11, None)]).is_ok());

        assert_eq!(
            check_partition(&[range(1, Some(10))]).unwrap_err().index,
            0,
        );
        assert_eq!(
            check_partition(&[range(0, Some(10)), range(12, None)])
                .unwrap_err()
                .index,
            1,
        );
        assert_eq!(
            check_partition(&[range(0, None), range(1, Some(5))])
                .unwrap_err()
                .index,
            0,
        );
    }

    #[test]
    fn labels_ranges() {
        assert_eq!(range(0, Some(500)).label(), "0 - 500 sqft");
        assert_eq!(range(1501, None).label(), "1501+ sqft");
    }
}
