// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-entity visual state and the store it lives in.
//!
//! The map session keeps one sparse [`VisualState`] per styled target. The
//! theme pass never assumes it owns that table: it reads the current state
//! where it needs to and writes partial updates that only touch the fields
//! they set.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Interior or exterior member of a wall or door group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Interior,
    Exterior,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Interior, Side::Exterior];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Interior => "interior",
            Side::Exterior => "exterior",
        }
    }
}

/// Key of the visual-state table.
///
/// Walls and doors are styled as two singleton groups each; spaces and
/// objects are styled individually.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateTarget {
    Space(String),
    Object(String),
    Walls(Side),
    Doors(Side),
}

impl StateTarget {
    pub fn space(id: impl Into<String>) -> Self {
        StateTarget::Space(id.into())
    }

    pub fn object(id: impl Into<String>) -> Self {
        StateTarget::Object(id.into())
    }
}

impl fmt::Display for StateTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateTarget::Space(id) => write!(f, "space:{id}"),
            StateTarget::Object(id) => write!(f, "object:{id}"),
            StateTarget::Walls(side) => write!(f, "walls:{}", side.as_str()),
            StateTarget::Doors(side) => write!(f, "doors:{}", side.as_str()),
        }
    }
}

/// Sparse visual properties of a rendered entity. `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interactive: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<bool>,
}

macro_rules! merge_fields {
    ($dst:expr, $patch:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $dst.$field = Some(value.clone());
            }
        )+
    };
}

impl VisualState {
    /// Overwrites the fields set in `patch`; all other fields keep their value.
    pub fn merge(&mut self, patch: &VisualState) {
        merge_fields!(
            self,
            patch,
            color,
            top_color,
            height,
            opacity,
            visible,
            interactive,
            hover_color,
            highlight_color,
            outline,
        );
    }

    pub fn is_empty(&self) -> bool {
        *self == VisualState::default()
    }
}

/// A write against one target.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    /// Field-wise overwrite of the fields that are set.
    Merge(VisualState),
    /// Whole-state replacement. Used only to drop a previously applied
    /// height; the caller has already carried over what must survive.
    Replace(VisualState),
}

impl StateUpdate {
    /// Applies this update to a state in place.
    pub fn apply_to(self, current: &mut VisualState) {
        match self {
            StateUpdate::Merge(patch) => current.merge(&patch),
            StateUpdate::Replace(state) => *current = state,
        }
    }
}

/// The map session's visual-state table, as seen by the theme pass.
pub trait StateStore {
    /// Current state of a target, if the session has one.
    fn state(&self, target: &StateTarget) -> Option<VisualState>;

    /// Commits an update for a target.
    fn update_state(&mut self, target: &StateTarget, update: StateUpdate) -> Result<()>;
}

/// In-memory [`StateStore`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateTable {
    states: FxHashMap<StateTarget, VisualState>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, target: &StateTarget) -> Option<&VisualState> {
        self.states.get(target)
    }

    /// Seeds or overwrites a state directly, bypassing merge rules.
    pub fn insert(&mut self, target: StateTarget, state: VisualState) {
        self.states.insert(target, state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StateTarget, &VisualState)> {
        self.states.iter()
    }

    /// States keyed by the display form of their target, sorted.
    pub fn to_sorted_map(&self) -> BTreeMap<String, &VisualState> {
        self.states
            .iter()
            .map(|(target, state)| (target.to_string(), state))
            .collect()
    }

    /// Serializes the table as a JSON object keyed by target.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.to_sorted_map()).map_err(Error::from)
    }
}

impl StateStore for StateTable {
    fn state(&self, target: &StateTarget) -> Option<VisualState> {
        self.states.get(target).cloned()
    }

    fn update_state(&mut self, target: &StateTarget, update: StateUpdate) -> Result<()> {
        let current = self.states.entry(target.clone()).or_default();
        update.apply_to(current);
        Ok(())
    }
}
