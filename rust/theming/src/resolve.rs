// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Style resolution: theme + entity kind (+ category) → partial visual state.
//!
//! Resolution is pure. Nothing here reads or writes a store except
//! [`SpaceStyle::into_update`], which needs the current state of a space for
//! the height reset.

use crate::classify::Category;
use crate::state::{Side, StateUpdate, VisualState};
use crate::theme::ThemeConfig;

/// Hover and highlight behavior shared by spaces and objects.
fn interactive(theme: &ThemeConfig) -> VisualState {
    let geometry = &theme.colors.map.geometry;
    VisualState {
        interactive: Some(true),
        hover_color: geometry.hover.clone(),
        highlight_color: geometry.highlight.clone(),
        ..Default::default()
    }
}

/// State for the interior or exterior wall group.
pub fn wall_state(theme: &ThemeConfig, side: Side) -> VisualState {
    let rooms = &theme.colors.rooms;
    let (color, opacity, height) = match side {
        Side::Interior => (
            rooms.interior_wall(),
            theme.opacity.interior_wall(),
            theme.wall_heights.interior,
        ),
        Side::Exterior => (
            rooms.exterior_wall(),
            theme.opacity.exterior_wall(),
            theme.wall_heights.exterior,
        ),
    };
    VisualState {
        color: color.map(str::to_string),
        top_color: theme.colors.map.geometry.wall_tops.clone(),
        opacity: Some(opacity),
        visible: Some(true),
        height,
        ..Default::default()
    }
}

/// State for the interior or exterior door group.
///
/// Both groups resolve identically and take the interior wall height.
pub fn door_state(theme: &ThemeConfig) -> VisualState {
    VisualState {
        color: Some(theme.colors.rooms.doors().to_string()),
        visible: Some(theme.show_entrances),
        opacity: Some(theme.opacity.doors()),
        height: theme.wall_heights.interior,
        ..Default::default()
    }
}

/// State for a furniture object.
pub fn object_state(theme: &ThemeConfig) -> VisualState {
    VisualState {
        color: theme.colors.rooms.desk.clone(),
        outline: Some(true),
        height: theme.object_height,
        opacity: Some(theme.opacity.desk()),
        ..interactive(theme)
    }
}

/// What happens to a space's height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    /// Write this height.
    Apply(f64),
    /// Drop any custom height so the engine default shows again.
    Reset,
    /// Leave whatever height is there.
    Keep,
}

/// Resolved style of one space.
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceStyle {
    pub category: Category,
    /// Color, interactivity and category opacity. Never carries a height.
    pub patch: VisualState,
    pub height: HeightRule,
}

impl SpaceStyle {
    /// Builds the write for this space given its current state.
    ///
    /// The reset path replaces the whole state with the resolved color and
    /// interactivity fields plus the current `visible` and `opacity`; the
    /// category opacity is not applied on that path.
    pub fn into_update(self, current: Option<&VisualState>) -> StateUpdate {
        match self.height {
            HeightRule::Apply(height) => StateUpdate::Merge(VisualState {
                height: Some(height),
                ..self.patch
            }),
            HeightRule::Keep => StateUpdate::Merge(self.patch),
            HeightRule::Reset => StateUpdate::Replace(VisualState {
                visible: current.and_then(|c| c.visible),
                opacity: current.and_then(|c| c.opacity),
                height: None,
                ..self.patch
            }),
        }
    }
}

/// Resolves the style of a space of the given category.
pub fn space_style(theme: &ThemeConfig, category: Category) -> SpaceStyle {
    let height = match &theme.room_heights {
        None => HeightRule::Reset,
        Some(heights) => heights
            .resolve(category)
            .map_or(HeightRule::Keep, HeightRule::Apply),
    };
    let patch = VisualState {
        color: theme
            .colors
            .rooms
            .category(category)
            .map(str::to_string),
        opacity: theme.opacity.category(category),
        ..interactive(theme)
    };
    SpaceStyle {
        category,
        patch,
        height,
    }
}
