// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for theme loading, geometry normalization and state writes.

/// Result type alias for theming operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the crate.
///
/// None of these abort a theme pass: per-entity problems are collected in the
/// pass report instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Theme or venue JSON could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A theme or venue file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The map session rejected a state write.
    #[error("state store rejected write: {0}")]
    Store(String),

    /// An entity without an identifier cannot be keyed in the state table.
    #[error("{0} has an empty identifier")]
    MissingEntityId(&'static str),
}

/// Errors raised while normalizing polygon input into a ring.
///
/// These never cross the containment boundary: [`crate::geometry::contains`]
/// turns every one of them into `false`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The space carries no geometry at all.
    #[error("space has no geometry")]
    MissingGeometry,

    /// The polygon input matched neither the nested-ring nor the flat shape.
    #[error("unrecognized polygon shape")]
    UnrecognizedShape,

    /// The nested-ring shape had no outer ring.
    #[error("polygon has no outer ring")]
    EmptyRing,

    /// A position had fewer than two coordinates.
    #[error("position {index} has {len} coordinates, expected at least 2")]
    ShortPosition { index: usize, len: usize },
}
