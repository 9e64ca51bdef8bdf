// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Read-only venue entities as delivered by the map data provider.
//!
//! The theme pass never mutates these; it only writes visual state keyed by
//! their identifiers. Field names follow the provider's camelCase JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::geometry::{Point, PolygonInput};

/// A building level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default)]
    pub elevation: f64,
}

impl Floor {
    /// Name shown to visitors: `name`, then `shortName`, then `L{elevation}`.
    pub fn display_name(&self) -> String {
        if !self.name.is_empty() {
            return self.name.clone();
        }
        match self.short_name.as_deref() {
            Some(short) if !short.is_empty() => short.to_string(),
            _ => format!("L{}", self.elevation),
        }
    }
}

/// A floor region: room, hallway, washroom and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    pub id: String,
    pub floor_id: String,
    #[serde(default)]
    pub name: String,
    /// Upstream type tag ("room", "hallway", ...). Advisory only.
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geometry: Option<PolygonInput>,
    /// Door identifiers. `None` when the provider did not report doors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doors: Option<Vec<String>>,
}

impl Space {
    pub fn new(id: impl Into<String>, floor_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            floor_id: floor_id.into(),
            name: name.into(),
            kind: String::new(),
            geometry: None,
            doors: None,
        }
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_geometry(mut self, geometry: PolygonInput) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn with_doors<I, S>(mut self, doors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.doors = Some(doors.into_iter().map(Into::into).collect());
        self
    }
}

/// One per-floor anchor of a vertical connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCoordinate {
    pub floor_id: String,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
}

impl ConnectionCoordinate {
    pub fn new(floor_id: impl Into<String>, point: Point) -> Self {
        Self {
            floor_id: floor_id.into(),
            longitude: Some(point.x),
            latitude: Some(point.y),
        }
    }

    /// The anchor as a map point, if both coordinates are present.
    pub fn point(&self) -> Option<Point> {
        Some(Point::new(self.longitude?, self.latitude?))
    }
}

/// A vertical link between floors: elevator, escalator, stairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Vec<ConnectionCoordinate>,
}

impl Connection {
    pub fn new(id: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            coordinates: Vec::new(),
        }
    }

    pub fn with_coordinate(mut self, floor_id: impl Into<String>, point: Point) -> Self {
        self.coordinates.push(ConnectionCoordinate::new(floor_id, point));
        self
    }

    /// Anchor points of this connection on the given floor.
    pub fn points_on_floor<'a>(&'a self, floor_id: &'a str) -> impl Iterator<Item = Point> + 'a {
        self.coordinates
            .iter()
            .filter(move |c| c.floor_id == floor_id)
            .filter_map(ConnectionCoordinate::point)
    }
}

/// Furniture and fixtures placed on a floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapObject {
    pub id: String,
    #[serde(default)]
    pub floor_id: String,
    #[serde(default)]
    pub name: String,
}

impl MapObject {
    pub fn new(id: impl Into<String>, floor_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            floor_id: floor_id.into(),
            name: String::new(),
        }
    }
}

/// Every entity of a venue that the theme pass reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueSnapshot {
    #[serde(default)]
    pub floors: Vec<Floor>,
    #[serde(default)]
    pub spaces: Vec<Space>,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub objects: Vec<MapObject>,
}

impl VenueSnapshot {
    /// Parses a snapshot from the provider's JSON export.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a snapshot file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Floors ordered from highest to lowest elevation.
    pub fn floors_by_elevation(&self) -> Vec<&Floor> {
        let mut floors: Vec<&Floor> = self.floors.iter().collect();
        floors.sort_by(|a, b| b.elevation.total_cmp(&a.elevation));
        floors
    }

    /// Spaces located on the given floor.
    pub fn spaces_on_floor<'a>(&'a self, floor_id: &'a str) -> impl Iterator<Item = &'a Space> + 'a {
        self.spaces.iter().filter(move |s| s.floor_id == floor_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_provider_json() {
        let venue: VenueSnapshot = serde_json::from_value(json!({
            "floors": [{ "id": "f1", "name": "Ground", "elevation": 0 }],
            "spaces": [{
                "id": "s1",
                "floorId": "f1",
                "name": "Room 101",
                "type": "room",
                "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [0, 1], [1, 1], [1, 0]]] },
                "doors": []
            }],
            "connections": [{
                "id": "c1",
                "type": "elevator",
                "coordinates": [{ "floorId": "f1", "longitude": 0.5, "latitude": 0.5 }]
            }],
            "objects": [{ "id": "o1", "floorId": "f1" }]
        }))
        .unwrap();

        let space = &venue.spaces[0];
        assert_eq!(space.kind, "room");
        assert_eq!(space.doors.as_deref(), Some(&[][..]));
        assert!(matches!(space.geometry, Some(PolygonInput::GeoJson { .. })));
        assert_eq!(venue.connections[0].kind, "elevator");
        assert_eq!(
            venue.connections[0].coordinates[0].point(),
            Some(Point::new(0.5, 0.5))
        );
        assert_eq!(venue.objects.len(), 1);
    }

    #[test]
    fn missing_optional_fields_default() {
        let space: Space = serde_json::from_value(json!({ "id": "s", "floorId": "f" })).unwrap();
        assert!(space.name.is_empty());
        assert!(space.kind.is_empty());
        assert!(space.geometry.is_none());
        assert!(space.doors.is_none());

        let venue = VenueSnapshot::from_json("{}").unwrap();
        assert!(venue.spaces.is_empty());
    }

    #[test]
    fn coordinate_without_latitude_has_no_point() {
        let coord: ConnectionCoordinate =
            serde_json::from_value(json!({ "floorId": "f1", "longitude": 1.0 })).unwrap();
        assert_eq!(coord.point(), None);
    }

    #[test]
    fn points_on_floor_filters_other_floors() {
        let connection = Connection::new("c", "stairs")
            .with_coordinate("f1", Point::new(1.0, 1.0))
            .with_coordinate("f2", Point::new(2.0, 2.0));
        let points: Vec<Point> = connection.points_on_floor("f2").collect();
        assert_eq!(points, vec![Point::new(2.0, 2.0)]);
    }

    #[test]
    fn floor_display_name_fallbacks() {
        let mut floor = Floor {
            id: "f".into(),
            name: "Mezzanine".into(),
            short_name: Some("M".into()),
            elevation: 1.0,
        };
        assert_eq!(floor.display_name(), "Mezzanine");
        floor.name.clear();
        assert_eq!(floor.display_name(), "M");
        floor.short_name = None;
        assert_eq!(floor.display_name(), "L1");
    }

    #[test]
    fn floors_sorted_highest_first() {
        let venue = VenueSnapshot {
            floors: vec![
                Floor { id: "b".into(), name: "Basement".into(), short_name: None, elevation: -1.0 },
                Floor { id: "2".into(), name: "Second".into(), short_name: None, elevation: 2.0 },
                Floor { id: "g".into(), name: "Ground".into(), short_name: None, elevation: 0.0 },
            ],
            ..Default::default()
        };
        let ids: Vec<&str> = venue.floors_by_elevation().iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "g", "b"]);
    }
}
