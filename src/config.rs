//! Mount-time configuration. Host pages hand this over as a camelCase
//! JSON document; everything has a usable default.

use serde::{Deserialize, Serialize};

use crate::model::{Direction, StepKey};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartAt {
    pub row: i32,
    pub col: i32,
}

impl StartAt {
    pub fn key(self) -> StepKey {
        (self.row, self.col)
    }
}

/// Element ids of external direction controls. A missing id leaves that
/// direction without a bound control.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DirectionBindings {
    pub up: Option<String>,
    pub down: Option<String>,
    pub left: Option<String>,
    pub right: Option<String>,
}

impl DirectionBindings {
    pub fn get(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::Up => self.up.as_deref(),
            Direction::Down => self.down.as_deref(),
            Direction::Left => self.left.as_deref(),
            Direction::Right => self.right.as_deref(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridwalkConfig {
    /// Preferred initial position; falls back to the first-declared step.
    pub start_at: Option<StartAt>,
    pub direction_bindings: Option<DirectionBindings>,
    pub enable_arrow_key_nav: bool,
    pub enable_swipe_nav: bool,
    /// Minimum gesture distance in px before a swipe counts.
    pub swipe_threshold: f64,
    /// Element id to build the map overview into; no map when absent.
    pub map_overview_container: Option<String>,
    /// Log failed lookups instead of silently ignoring them.
    pub debug_diagnostics: bool,
}

impl Default for GridwalkConfig {
    fn default() -> Self {
        Self {
            start_at: None,
            direction_bindings: None,
            enable_arrow_key_nav: true,
            enable_swipe_nav: true,
            swipe_threshold: 60.0,
            map_overview_container: None,
            debug_diagnostics: false,
        }
    }
}

impl GridwalkConfig {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
