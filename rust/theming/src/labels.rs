// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Label planning for named rooms and connection anchors.
//!
//! Produces label descriptions only; placing them on the map is up to the
//! rendering engine.
//!
//! Text colors come from the theme's `colors.map.labels` section when it is
//! present and default to [`DEFAULT_LABEL_COLOR`] otherwise. The built-in
//! theme defines that section, so its room labels use `#695D49` rather than
//! the plain dark default.

use serde::Serialize;

use crate::geometry::Point;
use crate::theme::{LabelColors, ThemeConfig};
use crate::venue::{Connection, Space, VenueSnapshot};

pub const DEFAULT_LABEL_COLOR: &str = "#101010";
pub const PIN_COLOR: &str = "#FFFFFF";
pub const TEXT_SIZE: u32 = 15;
pub const ICON_SIZE: u32 = 30;

const ROOM_KIND: &str = "room";
const ELEVATOR_KIND: &str = "elevator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelIcon {
    PrayerRoom,
    Toilet,
    Elevator,
    Escalator,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum LabelAnchor {
    #[serde(rename_all = "camelCase")]
    Space { space_id: String },
    #[serde(rename_all = "camelCase")]
    Coordinate {
        connection_id: String,
        floor_id: String,
        point: Point,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelAppearance {
    pub text_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_outline: Option<String>,
    pub text_size: u32,
    pub icon_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<LabelIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_color_inactive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelSpec {
    pub anchor: LabelAnchor,
    pub text: String,
    pub appearance: LabelAppearance,
}

fn room_icon(name: &str) -> Option<LabelIcon> {
    let name = name.to_lowercase();
    if name.contains("prayer") {
        Some(LabelIcon::PrayerRoom)
    } else if name.contains("toilet") {
        Some(LabelIcon::Toilet)
    } else {
        None
    }
}

fn space_label(space: &Space, colors: Option<&LabelColors>) -> Option<LabelSpec> {
    let text = space.name.trim();
    if space.kind != ROOM_KIND || text.is_empty() {
        return None;
    }
    Some(LabelSpec {
        anchor: LabelAnchor::Space {
            space_id: space.id.clone(),
        },
        text: text.to_string(),
        appearance: LabelAppearance {
            text_color: colors
                .and_then(|c| c.text.clone())
                .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
            text_outline: colors.and_then(|c| c.text_outline.clone()),
            text_size: TEXT_SIZE,
            icon_size: ICON_SIZE,
            icon: room_icon(&space.name),
            pin_color: None,
            pin_color_inactive: None,
        },
    })
}

fn connection_labels<'a>(
    connection: &'a Connection,
    colors: Option<&'a LabelColors>,
) -> impl Iterator<Item = LabelSpec> + 'a {
    let icon = if connection.kind == ELEVATOR_KIND {
        LabelIcon::Elevator
    } else {
        LabelIcon::Escalator
    };
    connection.coordinates.iter().filter_map(move |coord| {
        Some(LabelSpec {
            anchor: LabelAnchor::Coordinate {
                connection_id: connection.id.clone(),
                floor_id: coord.floor_id.clone(),
                point: coord.point()?,
            },
            text: String::new(),
            appearance: LabelAppearance {
                text_color: colors
                    .and_then(|c| c.connection.clone())
                    .unwrap_or_else(|| DEFAULT_LABEL_COLOR.to_string()),
                text_outline: colors.and_then(|c| c.connection_outline.clone()),
                text_size: TEXT_SIZE,
                icon_size: ICON_SIZE,
                icon: Some(icon),
                pin_color: Some(PIN_COLOR.to_string()),
                pin_color_inactive: Some(PIN_COLOR.to_string()),
            },
        })
    })
}

/// Labels for every named room and every connection anchor of the venue.
pub fn plan_labels(venue: &VenueSnapshot, theme: &ThemeConfig) -> Vec<LabelSpec> {
    let colors = theme.colors.map.labels.as_ref();
    venue
        .spaces
        .iter()
        .filter_map(|space| space_label(space, colors))
        .chain(
            venue
                .connections
                .iter()
                .flat_map(|connection| connection_labels(connection, colors)),
        )
        .collect()
}
