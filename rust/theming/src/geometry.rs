// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point-in-polygon containment for space footprints.
//!
//! Upstream geometry arrives in more than one shape: GeoJSON polygons with
//! nested rings, bare nested ring arrays, or a flat list of positions.
//! [`PolygonInput`] captures all of them as a tagged union and
//! [`PolygonInput::outer_ring`] normalizes the recognized shapes into a single
//! [`Ring`]. Only the outer ring is ever evaluated; holes are ignored.
//!
//! ## Boundary behavior
//!
//! Containment uses the even-odd ray casting rule with a half-open test on the
//! second axis. Points exactly on an edge or vertex are decided by that rule
//! and nothing else: for the unit square `(0,0) (0,1) (1,1) (1,0)` the
//! vertex `(0,0)` and the left edge are inside, while `(1,1)` and the right
//! edge are outside. The answer is deterministic, not geometrically meaningful.

use serde::{Deserialize, Serialize};

use crate::error::GeometryError;

/// A 2D map coordinate. `x` is longitude-like, `y` latitude-like.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Polygon geometry as supplied by the map data provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolygonInput {
    /// GeoJSON `Polygon` object. Extra members such as `type` are ignored.
    GeoJson { coordinates: Vec<Vec<Vec<f64>>> },
    /// Bare nested ring array, outer ring first.
    Rings(Vec<Vec<Vec<f64>>>),
    /// Flat list of positions forming a single ring.
    Ring(Vec<Vec<f64>>),
    /// Anything else the provider sent.
    Unrecognized(serde_json::Value),
}

impl PolygonInput {
    /// Builds a flat-ring input from `(x, y)` pairs.
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        PolygonInput::Ring(points.iter().map(|&(x, y)| vec![x, y]).collect())
    }

    /// Normalizes the input into its outer ring.
    pub fn outer_ring(&self) -> Result<Ring, GeometryError> {
        let positions = match self {
            PolygonInput::GeoJson { coordinates } | PolygonInput::Rings(coordinates) => {
                coordinates.first().ok_or(GeometryError::EmptyRing)?
            }
            PolygonInput::Ring(positions) => positions,
            PolygonInput::Unrecognized(_) => return Err(GeometryError::UnrecognizedShape),
        };
        Ring::from_positions(positions)
    }
}

/// A closed ring of points; the last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring(Vec<Point>);

impl Ring {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Converts raw positions, keeping the first two coordinates of each.
    fn from_positions(positions: &[Vec<f64>]) -> Result<Self, GeometryError> {
        positions
            .iter()
            .enumerate()
            .map(|(index, pos)| match pos.as_slice() {
                [x, y, ..] => Ok(Point::new(*x, *y)),
                _ => Err(GeometryError::ShortPosition {
                    index,
                    len: pos.len(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Ring)
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Even-odd containment test against this ring.
    pub fn contains(&self, point: &Point) -> bool {
        let ring = &self.0;
        let n = ring.len();
        if n == 0 {
            return false;
        }

        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = (ring[i].x, ring[i].y);
            let (xj, yj) = (ring[j].x, ring[j].y);

            if ((yi > point.y) != (yj > point.y))
                && (point.x < (xj - xi) * (point.y - yi) / (yj - yi) + xi)
            {
                inside = !inside;
            }
            j = i;
        }

        inside
    }
}

/// Returns whether `point` lies inside `polygon`.
///
/// Unrecognized or malformed input yields `false`.
pub fn contains(point: &Point, polygon: &PolygonInput) -> bool {
    polygon
        .outer_ring()
        .map(|ring| ring.contains(point))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit_square() -> PolygonInput {
        PolygonInput::from_points(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)])
    }

    #[test]
    fn center_inside_far_point_outside() {
        let square = unit_square();
        assert!(contains(&Point::new(0.5, 0.5), &square));
        assert!(!contains(&Point::new(2.0, 2.0), &square));
        assert!(!contains(&Point::new(-0.5, 0.5), &square));
    }

    #[test]
    fn boundary_behavior_is_locked() {
        let square = unit_square();
        // Lower-left vertex and left edge count as inside.
        assert!(contains(&Point::new(0.0, 0.0), &square));
        assert!(contains(&Point::new(0.0, 0.5), &square));
        // Upper-right vertex and right edge count as outside.
        assert!(!contains(&Point::new(1.0, 1.0), &square));
        assert!(!contains(&Point::new(1.0, 0.5), &square));
        // Same answer every time.
        for _ in 0..3 {
            assert!(contains(&Point::new(0.0, 0.0), &square));
        }
    }

    #[test]
    fn geojson_and_flat_shapes_agree() {
        let geojson: PolygonInput = serde_json::from_value(json!({
            "type": "Polygon",
            "coordinates": [
                [[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
                [[0.2, 0.2], [0.2, 0.4], [0.4, 0.4], [0.4, 0.2], [0.2, 0.2]]
            ]
        }))
        .unwrap();
        assert!(matches!(geojson, PolygonInput::GeoJson { .. }));

        let flat: PolygonInput =
            serde_json::from_value(json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]])).unwrap();
        assert!(matches!(flat, PolygonInput::Ring(_)));

        for p in [Point::new(0.5, 0.5), Point::new(0.3, 0.3), Point::new(1.5, 0.5)] {
            assert_eq!(contains(&p, &geojson), contains(&p, &flat));
        }
        // Holes are ignored: a point in the inner ring is still inside.
        assert!(contains(&Point::new(0.3, 0.3), &geojson));
    }

    #[test]
    fn bare_nested_rings_use_outer_ring() {
        let rings: PolygonInput =
            serde_json::from_value(json!([[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0]]])).unwrap();
        assert!(matches!(rings, PolygonInput::Rings(_)));
        assert!(contains(&Point::new(1.0, 1.0), &rings));
    }

    #[test]
    fn positions_with_altitude_are_accepted() {
        let polygon: PolygonInput = serde_json::from_value(json!({
            "coordinates": [[[0.0, 0.0, 3.0], [0.0, 1.0, 3.0], [1.0, 1.0, 3.0], [1.0, 0.0, 3.0]]]
        }))
        .unwrap();
        assert!(contains(&Point::new(0.5, 0.5), &polygon));
    }

    #[test]
    fn malformed_input_is_not_containment() {
        let unrecognized: PolygonInput = serde_json::from_value(json!({ "type": "Point" })).unwrap();
        assert!(matches!(unrecognized, PolygonInput::Unrecognized(_)));
        assert_eq!(
            unrecognized.outer_ring(),
            Err(GeometryError::UnrecognizedShape)
        );
        assert!(!contains(&Point::new(0.5, 0.5), &unrecognized));

        let empty = PolygonInput::GeoJson {
            coordinates: vec![],
        };
        assert_eq!(empty.outer_ring(), Err(GeometryError::EmptyRing));
        assert!(!contains(&Point::new(0.0, 0.0), &empty));

        let short = PolygonInput::Ring(vec![vec![0.0, 0.0], vec![1.0]]);
        assert_eq!(
            short.outer_ring(),
            Err(GeometryError::ShortPosition { index: 1, len: 1 })
        );
        assert!(!contains(&Point::new(0.0, 0.0), &short));
    }

    #[test]
    fn degenerate_rings_do_not_panic() {
        let empty = Ring::new(vec![]);
        assert!(!empty.contains(&Point::new(0.0, 0.0)));

        let segment = Ring::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(!segment.contains(&Point::new(0.5, 0.5)));
    }
}
