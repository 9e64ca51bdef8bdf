// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Theme configuration.
//!
//! A theme is handed in fully resolved and is never mutated by the pass.
//! Everything except the category color slots is optional; absent values
//! degrade to the defaults documented on each accessor. Opacities are stored
//! as percentages (0-100) exactly as authored and converted to fractions on
//! read.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::classify::Category;
use crate::error::Result;

/// Door color used when the theme does not define one.
pub const DEFAULT_DOOR_COLOR: &str = "#40A9FF";
/// Door opacity used when the theme does not define one.
pub const DEFAULT_DOOR_OPACITY: f64 = 0.8;
/// Wall and object opacity used when the theme does not define one.
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Converts an authored percentage into a fraction.
///
/// Values outside 0-100 saturate, so the result is always a valid opacity.
pub fn percent_to_fraction(percent: f64) -> f64 {
    (percent / 100.0).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub show_entrances: bool,
    #[serde(default)]
    pub wall_heights: WallHeights,
    /// `None` means the theme wants the engine's built-in room heights.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_heights: Option<RoomHeights>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_height: Option<f64>,
    #[serde(default)]
    pub opacity: OpacitySettings,
    #[serde(default)]
    pub colors: ThemeColors,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WallHeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomHeights {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hallway: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathroom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inaccessible: Option<f64>,
}

impl RoomHeights {
    /// Height configured for exactly this category.
    pub fn for_category(&self, category: Category) -> Option<f64> {
        match category {
            Category::Bathroom => self.bathroom,
            Category::Hallway => self.hallway,
            Category::Connection => self.connection,
            Category::Inaccessible => self.inaccessible,
            Category::Standard => self.standard,
        }
    }

    /// Category height, falling back to the standard height.
    pub fn resolve(&self, category: Category) -> Option<f64> {
        self.for_category(category).or(self.standard)
    }
}

/// Opacity percentages (0-100).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpacitySettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inaccessible: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathroom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hallway: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_wall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_wall: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<f64>,
}

impl OpacitySettings {
    /// Opacity fraction for a space category, falling back to the standard
    /// slot when the category has none.
    pub fn category(&self, category: Category) -> Option<f64> {
        let percent = match category {
            Category::Bathroom => self.bathroom,
            Category::Hallway => self.hallway,
            Category::Connection => self.connection,
            Category::Inaccessible => self.inaccessible,
            Category::Standard => self.standard,
        };
        percent.or(self.standard).map(percent_to_fraction)
    }

    pub fn interior_wall(&self) -> f64 {
        self.interior_wall.map_or(DEFAULT_OPACITY, percent_to_fraction)
    }

    pub fn exterior_wall(&self) -> f64 {
        self.exterior_wall.map_or(DEFAULT_OPACITY, percent_to_fraction)
    }

    pub fn desk(&self) -> f64 {
        self.desk.map_or(DEFAULT_OPACITY, percent_to_fraction)
    }

    pub fn doors(&self) -> f64 {
        self.doors.map_or(DEFAULT_DOOR_OPACITY, percent_to_fraction)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    #[serde(default)]
    pub map: MapColors,
    #[serde(default)]
    pub rooms: RoomColors,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapColors {
    /// Map container background, applied by the caller.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default)]
    pub geometry: GeometryColors,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<LabelColors>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall_tops: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hover: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelColors {
    #[serde(default, rename = "default", skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, rename = "defaultOutline", skip_serializing_if = "Option::is_none")]
    pub text_outline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_outline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomColors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inaccessible: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathroom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hallway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wall: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desk: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_wall: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_wall: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<String>,
}

impl RoomColors {
    /// Color slot of a space category.
    pub fn category(&self, category: Category) -> Option<&str> {
        match category {
            Category::Bathroom => self.bathroom.as_deref(),
            Category::Hallway => self.hallway.as_deref(),
            Category::Connection => self.connection.as_deref(),
            Category::Inaccessible => self.inaccessible.as_deref(),
            Category::Standard => self.standard.as_deref(),
        }
    }

    pub fn interior_wall(&self) -> Option<&str> {
        self.interior_wall.as_deref().or(self.wall.as_deref())
    }

    pub fn exterior_wall(&self) -> Option<&str> {
        self.exterior_wall.as_deref().or(self.wall.as_deref())
    }

    pub fn doors(&self) -> &str {
        self.doors.as_deref().unwrap_or(DEFAULT_DOOR_COLOR)
    }
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// The built-in light theme.
    pub fn honeycrisp() -> Self {
        let color = |hex: &str| Some(hex.to_string());
        Self {
            name: Some("honeycrisp".into()),
            show_entrances: false,
            wall_heights: WallHeights {
                interior: Some(1.0),
                exterior: Some(1.1),
            },
            room_heights: Some(RoomHeights {
                standard: Some(0.1),
                hallway: Some(0.1),
                connection: Some(0.1),
                bathroom: Some(0.1),
                inaccessible: Some(0.1),
            }),
            object_height: Some(0.5),
            opacity: OpacitySettings {
                standard: Some(100.0),
                inaccessible: Some(100.0),
                bathroom: Some(100.0),
                hallway: Some(100.0),
                connection: Some(100.0),
                interior_wall: Some(100.0),
                exterior_wall: Some(100.0),
                desk: Some(100.0),
                doors: Some(100.0),
            },
            colors: ThemeColors {
                map: MapColors {
                    background: None,
                    geometry: GeometryColors {
                        wall_tops: color("#909898"),
                        hover: color("#DBC8D4"),
                        highlight: color("#C8A8C5"),
                    },
                    labels: Some(LabelColors {
                        text: color("#695D49"),
                        text_outline: color("#FFFFFF"),
                        connection: color("#338E92"),
                        connection_outline: color("#FFFFFF"),
                    }),
                },
                rooms: RoomColors {
                    standard: color("#EEECE7"),
                    inaccessible: color("#D8D5CB"),
                    bathroom: color("#D7E5EC"),
                    hallway: color("#F8F7F3"),
                    connection: color("#EEECE7"),
                    wall: color("#FFFFFF"),
                    desk: color("#C9C7C2"),
                    interior_wall: None,
                    exterior_wall: None,
                    doors: None,
                },
            },
        }
    }
}
