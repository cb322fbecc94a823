//! Core data model for Gridwalk: steps, coordinates and the immutable
//! grid index the navigation engine runs on. No DOM types in here so the
//! whole module stays unit-testable off the browser.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Coordinate pair `(row, col)` identifying a step. Tuple keys cannot
/// collide, unlike the string-concatenation keys this replaces.
pub type StepKey = (i32, i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Fixed per-direction coordinate delta `(row, col)`.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(s)
    }
}

/// A step declaration as discovered in markup, before coordinate parsing.
/// Either attribute may be missing; both must parse as base-10 integers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawStep {
    pub row: Option<String>,
    pub col: Option<String>,
}

impl RawStep {
    pub fn new(row: Option<String>, col: Option<String>) -> Self {
        Self { row, col }
    }

    /// Declaration with both coordinates already known.
    pub fn at(row: i32, col: i32) -> Self {
        Self {
            row: Some(row.to_string()),
            col: Some(col.to_string()),
        }
    }
}

/// A registered grid cell. `panel` is the index of the declaring element
/// in declaration order; the DOM layer keeps the matching element list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub row: i32,
    pub col: i32,
    pub panel: usize,
}

impl Step {
    pub fn key(&self) -> StepKey {
        (self.row, self.col)
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("step {index}: missing or non-numeric {axis} coordinate {value:?}")]
    InvalidCoordinate {
        index: usize,
        axis: &'static str,
        value: Option<String>,
    },
    #[error("duplicate step at ({row}, {col}): declared by steps {first} and {second}")]
    DuplicateStep {
        row: i32,
        col: i32,
        first: usize,
        second: usize,
    },
}

/// Immutable lookup from `(row, col)` to registered steps, built once at
/// mount time. Construction aborts on the first bad declaration; no
/// partial index is ever produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridIndex {
    steps: HashMap<StepKey, Step>,
    /// First declaration in input order, the fallback initial position.
    first: Option<StepKey>,
    max_row: Option<i32>,
    max_col: Option<i32>,
}

fn parse_coord(index: usize, axis: &'static str, value: Option<&str>) -> Result<i32, GridError> {
    let invalid = || GridError::InvalidCoordinate {
        index,
        axis,
        value: value.map(str::to_owned),
    };
    value
        .ok_or_else(invalid)?
        .trim()
        .parse::<i32>()
        .map_err(|_| invalid())
}

impl GridIndex {
    pub fn build(decls: &[RawStep]) -> Result<Self, GridError> {
        let mut index = GridIndex {
            steps: HashMap::with_capacity(decls.len()),
            ..GridIndex::default()
        };
        for (i, decl) in decls.iter().enumerate() {
            let row = parse_coord(i, "row", decl.row.as_deref())?;
            let col = parse_coord(i, "col", decl.col.as_deref())?;
            let step = Step { row, col, panel: i };
            if let Some(existing) = index.steps.insert(step.key(), step) {
                return Err(GridError::DuplicateStep {
                    row,
                    col,
                    first: existing.panel,
                    second: i,
                });
            }
            if index.first.is_none() {
                index.first = Some(step.key());
            }
            index.max_row = Some(index.max_row.map_or(row, |m| m.max(row)));
            index.max_col = Some(index.max_col.map_or(col, |m| m.max(col)));
        }
        Ok(index)
    }

    pub fn lookup(&self, row: i32, col: i32) -> Option<&Step> {
        self.steps.get(&(row, col))
    }

    pub fn contains(&self, row: i32, col: i32) -> bool {
        self.steps.contains_key(&(row, col))
    }

    /// First-declared step, deterministic w.r.t. input order.
    pub fn first(&self) -> Option<StepKey> {
        self.first
    }

    /// `(max_row, max_col)` over all registered steps, `None` when empty.
    pub fn extent(&self) -> Option<(i32, i32)> {
        self.max_row.zip(self.max_col)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_and_lookup() {
        let index =
            GridIndex::build(&[RawStep::at(0, 0), RawStep::at(0, 1), RawStep::at(1, 0)]).unwrap();
        assert_eq!(index.len(), 3);
        let step = index.lookup(0, 1).unwrap();
        assert_eq!((step.row, step.col, step.panel), (0, 1, 1));
        assert!(index.lookup(1, 1).is_none());
        assert_eq!(index.first(), Some((0, 0)));
        assert_eq!(index.extent(), Some((1, 1)));
    }

    #[test]
    fn empty_index_has_no_extent() {
        let index = GridIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.extent(), None);
        assert_eq!(index.first(), None);
    }

    #[test]
    fn coordinates_may_be_negative_and_padded() {
        let index =
            GridIndex::build(&[RawStep::new(Some(" -2 ".into()), Some("7".into()))]).unwrap();
        assert!(index.contains(-2, 7));
        assert_eq!(index.extent(), Some((-2, 7)));
    }

    #[test]
    fn duplicate_declaration_names_pair_and_both_indices() {
        let err = GridIndex::build(&[RawStep::at(2, 3), RawStep::at(0, 0), RawStep::at(2, 3)])
            .unwrap_err();
        assert_eq!(
            err,
            GridError::DuplicateStep {
                row: 2,
                col: 3,
                first: 0,
                second: 2
            }
        );
        assert!(err.to_string().contains("(2, 3)"));
    }

    #[test]
    fn missing_coordinate_is_fatal() {
        let err = GridIndex::build(&[RawStep::new(None, Some("1".into()))]).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCoordinate {
                index: 0,
                axis: "row",
                value: None
            }
        );
    }

    #[test]
    fn non_numeric_coordinate_is_fatal() {
        let err =
            GridIndex::build(&[RawStep::new(Some("0".into()), Some("two".into()))]).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidCoordinate {
                index: 0,
                axis: "col",
                value: Some("two".into())
            }
        );
    }

    #[test]
    fn deltas_are_cardinal() {
        assert_eq!(Direction::Up.delta(), (-1, 0));
        assert_eq!(Direction::Down.delta(), (1, 0));
        assert_eq!(Direction::Left.delta(), (0, -1));
        assert_eq!(Direction::Right.delta(), (0, 1));
    }
}
