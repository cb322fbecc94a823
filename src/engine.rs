//! Navigation engine: tracks the single current position over an
//! immutable [`GridIndex`] and computes legal moves. Every successful
//! transition yields a [`Transition`] value that UI bindings consume to
//! sync the viewport transform, control enablement and map highlight.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Direction, GridIndex, StepKey};

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("no step registered at ({row}, {col})")]
    UnknownStep { row: i32, col: i32 },
    #[error("no current position set")]
    NoCurrentPosition,
    #[error("no step {direction} of the current position")]
    NoStepInDirection { direction: Direction },
}

/// The subset of cardinal directions with an adjacent step. Drives
/// enabling/disabling of direction controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSet {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionSet {
    pub fn contains(self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub fn is_empty(self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }

    pub fn iter(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |d| self.contains(*d))
    }

    fn insert(&mut self, direction: Direction) {
        match direction {
            Direction::Up => self.up = true,
            Direction::Down => self.down = true,
            Direction::Left => self.left = true,
            Direction::Right => self.right = true,
        }
    }
}

/// Outcome of a successful navigation operation; doubles as the
/// position-changed notification. `moved` is false on an idempotent
/// repeat request, in which case bindings skip the sync.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub row: i32,
    pub col: i32,
    /// Declaration index of the step's content panel.
    pub panel: usize,
    pub moved: bool,
    pub available: DirectionSet,
}

/// State machine: `Uninitialized` (current = None) until the startup
/// jump, then `Positioned` for the lifetime of the instance. Failed
/// operations never change state.
#[derive(Debug)]
pub struct NavigationEngine {
    index: GridIndex,
    current: Option<StepKey>,
    debug: bool,
}

impl NavigationEngine {
    pub fn new(index: GridIndex, debug: bool) -> Self {
        Self {
            index,
            current: None,
            debug,
        }
    }

    pub fn index(&self) -> &GridIndex {
        &self.index
    }

    pub fn current(&self) -> Option<StepKey> {
        self.current
    }

    /// Preferred position if it names an existing step, else the
    /// first-declared step. `None` on an empty grid.
    pub fn initial_position(&self, preferred: Option<StepKey>) -> Option<StepKey> {
        preferred
            .filter(|&(row, col)| self.index.contains(row, col))
            .or_else(|| self.index.first())
    }

    /// Resolves the initial position and performs the one startup jump.
    pub fn start(&mut self, preferred: Option<StepKey>) -> Option<Transition> {
        let (row, col) = self.initial_position(preferred)?;
        // The resolved coordinate always names an existing step.
        self.jump_to(row, col).ok()
    }

    pub fn jump_to(&mut self, row: i32, col: i32) -> Result<Transition, NavError> {
        let Some(step) = self.index.lookup(row, col).copied() else {
            self.report(NavError::UnknownStep { row, col });
            return Err(NavError::UnknownStep { row, col });
        };
        // Repeat request for the current step: report success, fire no sync.
        let moved = self.current != Some(step.key());
        if moved {
            self.current = Some(step.key());
        }
        Ok(Transition {
            row,
            col,
            panel: step.panel,
            moved,
            available: self.available_directions(),
        })
    }

    pub fn move_direction(&mut self, direction: Direction) -> Result<Transition, NavError> {
        let Some((row, col)) = self.current else {
            self.report(NavError::NoCurrentPosition);
            return Err(NavError::NoCurrentPosition);
        };
        let (dr, dc) = direction.delta();
        let (row, col) = (row + dr, col + dc);
        if !self.index.contains(row, col) {
            self.report(NavError::NoStepInDirection { direction });
            return Err(NavError::NoStepInDirection { direction });
        }
        self.jump_to(row, col)
    }

    /// Recomputed on every call, never cached across transitions.
    pub fn available_directions(&self) -> DirectionSet {
        let mut set = DirectionSet::default();
        let Some((row, col)) = self.current else {
            return set;
        };
        for direction in Direction::ALL {
            let (dr, dc) = direction.delta();
            if self.index.contains(row + dr, col + dc) {
                set.insert(direction);
            }
        }
        set
    }

    // Runtime failures are silent no-ops unless diagnostics are on.
    fn report(&self, err: NavError) {
        if self.debug {
            log::warn!("gridwalk: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RawStep;

    fn engine(cells: &[(i32, i32)]) -> NavigationEngine {
        let decls: Vec<RawStep> = cells.iter().map(|&(r, c)| RawStep::at(r, c)).collect();
        NavigationEngine::new(GridIndex::build(&decls).unwrap(), false)
    }

    #[test]
    fn start_uses_first_declared_step() {
        let mut nav = engine(&[(0, 0), (0, 1), (1, 0)]);
        let t = nav.start(None).unwrap();
        assert_eq!((t.row, t.col), (0, 0));
        assert!(t.moved);
        assert_eq!(nav.current(), Some((0, 0)));
    }

    #[test]
    fn start_prefers_existing_requested_step() {
        let mut nav = engine(&[(0, 0), (2, 2)]);
        let t = nav.start(Some((2, 2))).unwrap();
        assert_eq!((t.row, t.col), (2, 2));
    }

    #[test]
    fn start_falls_back_when_requested_step_missing() {
        let mut nav = engine(&[(0, 0), (0, 1)]);
        let t = nav.start(Some((1, 0))).unwrap();
        assert_eq!((t.row, t.col), (0, 0));
    }

    #[test]
    fn start_on_empty_grid_yields_nothing() {
        let mut nav = engine(&[]);
        assert!(nav.start(None).is_none());
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn jump_to_unknown_step_leaves_state_unchanged() {
        let mut nav = engine(&[(0, 0), (0, 1)]);
        nav.start(None);
        assert_eq!(
            nav.jump_to(5, 5),
            Err(NavError::UnknownStep { row: 5, col: 5 })
        );
        assert_eq!(nav.current(), Some((0, 0)));
    }

    #[test]
    fn jump_to_is_idempotent() {
        let mut nav = engine(&[(0, 0), (0, 1)]);
        nav.start(None);
        let first = nav.jump_to(0, 1).unwrap();
        assert!(first.moved);
        let second = nav.jump_to(0, 1).unwrap();
        assert!(!second.moved);
        assert_eq!((second.row, second.col), (0, 1));
        assert_eq!(nav.current(), Some((0, 1)));
    }

    #[test]
    fn first_jump_establishes_position_even_at_origin() {
        let mut nav = engine(&[(0, 0)]);
        let t = nav.jump_to(0, 0).unwrap();
        assert!(t.moved);
    }

    #[test]
    fn move_without_position_fails() {
        let mut nav = engine(&[(0, 0)]);
        assert_eq!(
            nav.move_direction(Direction::Up),
            Err(NavError::NoCurrentPosition)
        );
        assert!(nav.available_directions().is_empty());
    }

    #[test]
    fn move_into_gap_is_a_no_op() {
        let mut nav = engine(&[(0, 0), (0, 1)]);
        nav.start(None);
        assert_eq!(
            nav.move_direction(Direction::Up),
            Err(NavError::NoStepInDirection {
                direction: Direction::Up
            })
        );
        assert_eq!(nav.current(), Some((0, 0)));
    }

    #[test]
    fn up_then_down_round_trips_from_interior() {
        // Plus-shaped grid around (1, 1).
        let mut nav = engine(&[(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)]);
        nav.start(None);
        nav.move_direction(Direction::Up).unwrap();
        assert_eq!(nav.current(), Some((0, 1)));
        nav.move_direction(Direction::Down).unwrap();
        assert_eq!(nav.current(), Some((1, 1)));
    }

    #[test]
    fn available_directions_match_adjacency_exhaustively() {
        let cells = [(1, 1), (0, 1), (2, 1), (1, 0), (1, 2)];
        let mut nav = engine(&cells);
        for &(row, col) in &cells {
            nav.jump_to(row, col).unwrap();
            let set = nav.available_directions();
            for direction in Direction::ALL {
                let (dr, dc) = direction.delta();
                let expected = cells.contains(&(row + dr, col + dc));
                assert_eq!(
                    set.contains(direction),
                    expected,
                    "({row}, {col}) {direction}"
                );
            }
        }
    }

    #[test]
    fn three_step_scenario() {
        let mut nav = engine(&[(0, 0), (0, 1), (1, 0)]);
        let t = nav.start(None).unwrap();
        assert_eq!((t.row, t.col), (0, 0));
        assert_eq!(
            t.available,
            DirectionSet {
                down: true,
                right: true,
                ..DirectionSet::default()
            }
        );

        let t = nav.move_direction(Direction::Right).unwrap();
        assert_eq!((t.row, t.col), (0, 1));
        assert_eq!(
            t.available,
            DirectionSet {
                left: true,
                ..DirectionSet::default()
            }
        );

        assert_eq!(
            nav.move_direction(Direction::Down),
            Err(NavError::NoStepInDirection {
                direction: Direction::Down
            })
        );
        assert_eq!(nav.current(), Some((0, 1)));
    }

    #[test]
    fn direction_set_iterates_in_declaration_order() {
        let set = DirectionSet {
            up: true,
            right: true,
            ..DirectionSet::default()
        };
        let dirs: Vec<Direction> = set.iter().collect();
        assert_eq!(dirs, vec![Direction::Up, Direction::Right]);
    }
}
