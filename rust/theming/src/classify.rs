// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Space classification.
//!
//! Every space gets exactly one [`Category`]. Signals are evaluated through an
//! ordered rule table, first match wins:
//!
//! 1. `Bathroom`: name mentions a washroom.
//! 2. `Hallway`: upstream type is `hallway`, or the name mentions a corridor.
//! 3. `Connection`: a stairs/elevator/escalator anchor on the same floor lies
//!    inside the space footprint, or the name mentions one.
//! 4. `Inaccessible`: the space reports a door list and it is empty.
//! 5. `Standard`: everything else.
//!
//! Classification is a pure function of the space and the connection anchors
//! on its floor. Geometry problems never fail it; they only disable the
//! geometric part of the connection rule for that space.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::GeometryError;
use crate::geometry::Point;
use crate::venue::{Connection, Space};

const BATHROOM_KEYWORDS: &[&str] = &["bathroom", "washroom", "restroom", "toilet", "wc"];
const HALLWAY_KEYWORDS: &[&str] = &["hallway", "corridor", "passage", "hall"];
const CONNECTION_KEYWORDS: &[&str] = &["elevator", "stair", "stairs", "escalator"];
const HALLWAY_KIND: &str = "hallway";

/// Semantic category of a space, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Bathroom,
    Hallway,
    Connection,
    Inaccessible,
    Standard,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Bathroom,
        Category::Hallway,
        Category::Connection,
        Category::Inaccessible,
        Category::Standard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bathroom => "bathroom",
            Category::Hallway => "hallway",
            Category::Connection => "connection",
            Category::Inaccessible => "inaccessible",
            Category::Standard => "standard",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the geometric connection check could not run for a space.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClassificationError {
    #[error("space {space_id}: {source}")]
    Geometry {
        space_id: String,
        #[source]
        source: GeometryError,
    },
}

/// What the rules see: the space plus connection anchors on its floor.
struct RuleInput<'a> {
    space: &'a Space,
    name: String,
    anchors: &'a [Point],
}

impl RuleInput<'_> {
    fn name_mentions(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|k| self.name.contains(k))
    }
}

struct Rule {
    category: Category,
    matches: fn(&RuleInput<'_>) -> bool,
}

const RULES: &[Rule] = &[
    Rule {
        category: Category::Bathroom,
        matches: is_bathroom,
    },
    Rule {
        category: Category::Hallway,
        matches: is_hallway,
    },
    Rule {
        category: Category::Connection,
        matches: is_connection,
    },
    Rule {
        category: Category::Inaccessible,
        matches: is_inaccessible,
    },
];

fn is_bathroom(input: &RuleInput<'_>) -> bool {
    input.name_mentions(BATHROOM_KEYWORDS)
}

fn is_hallway(input: &RuleInput<'_>) -> bool {
    input.space.kind == HALLWAY_KIND || input.name_mentions(HALLWAY_KEYWORDS)
}

fn is_connection(input: &RuleInput<'_>) -> bool {
    let contains_anchor = contains_connection_anchor(input.space, input.anchors).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "skipping geometric connection check");
        false
    });
    contains_anchor || input.name_mentions(CONNECTION_KEYWORDS)
}

fn is_inaccessible(input: &RuleInput<'_>) -> bool {
    matches!(input.space.doors.as_deref(), Some([]))
}

/// Geometric half of the connection rule.
///
/// With no anchors on the floor there is nothing to test and the answer is
/// `Ok(false)` regardless of the space geometry.
fn contains_connection_anchor(
    space: &Space,
    anchors: &[Point],
) -> Result<bool, ClassificationError> {
    if anchors.is_empty() {
        return Ok(false);
    }
    let geometry_error = |source| ClassificationError::Geometry {
        space_id: space.id.clone(),
        source,
    };
    let ring = space
        .geometry
        .as_ref()
        .ok_or(GeometryError::MissingGeometry)
        .and_then(|g| g.outer_ring())
        .map_err(geometry_error)?;
    Ok(anchors.iter().any(|p| ring.contains(p)))
}

fn classify_with_anchors(space: &Space, anchors: &[Point]) -> Category {
    let input = RuleInput {
        space,
        name: space.name.to_lowercase(),
        anchors,
    };
    RULES
        .iter()
        .find(|rule| (rule.matches)(&input))
        .map(|rule| rule.category)
        .unwrap_or(Category::Standard)
}

/// Classifies a space against a set of connections.
///
/// Connections may span the whole venue: only anchors on the space's own
/// floor are considered.
pub fn classify(space: &Space, connections: &[Connection]) -> Category {
    let anchors: Vec<Point> = connections
        .iter()
        .flat_map(|c| c.points_on_floor(&space.floor_id))
        .collect();
    classify_with_anchors(space, &anchors)
}

/// Connection anchors grouped by floor, built once per pass.
#[derive(Debug, Default, Clone)]
pub struct FloorConnectionIndex {
    anchors: FxHashMap<String, Vec<Point>>,
}

impl FloorConnectionIndex {
    pub fn new(connections: &[Connection]) -> Self {
        let mut anchors: FxHashMap<String, Vec<Point>> = FxHashMap::default();
        for coord in connections.iter().flat_map(|c| &c.coordinates) {
            if let Some(point) = coord.point() {
                anchors.entry(coord.floor_id.clone()).or_default().push(point);
            }
        }
        Self { anchors }
    }

    /// Anchor points on a floor; empty when the floor has none.
    pub fn anchors_on(&self, floor_id: &str) -> &[Point] {
        self.anchors.get(floor_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Same result as [`classify`] with the indexed connections.
    pub fn classify(&self, space: &Space) -> Category {
        classify_with_anchors(space, self.anchors_on(&space.floor_id))
    }
}
