// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Wayfind Theming
//!
//! Space classification and theme application for indoor wayfinding maps.
//!
//! A map engine supplies venue entities (floors, spaces, vertical
//! connections, objects). This crate decides what each space *is* and what
//! it should look like:
//!
//! - [`geometry`]: even-odd point-in-polygon over loosely shaped input
//! - [`classify`]: ordered rules mapping a space to a [`Category`]
//! - [`theme`]: the theme configuration tree
//! - [`resolve`]: theme + category → partial [`VisualState`]
//! - [`apply`]: the full pass, merging into a caller-owned [`StateStore`]
//! - [`labels`]: label descriptions for rooms and connection anchors
//!
//! ```
//! use wayfind_theming::{apply_theme, Category, Space, StateTable, ThemeConfig, VenueSnapshot};
//!
//! let venue = VenueSnapshot {
//!     spaces: vec![Space::new("s1", "f1", "Restroom")],
//!     ..Default::default()
//! };
//! let mut states = StateTable::new();
//! let report = apply_theme(&mut states, &venue, &ThemeConfig::honeycrisp());
//! assert_eq!(report.spaces["s1"], Category::Bathroom);
//! ```

pub mod apply;
pub mod classify;
pub mod error;
pub mod geometry;
pub mod labels;
pub mod resolve;
pub mod state;
pub mod theme;
pub mod venue;

pub use apply::{apply_theme, ApplyReport, EntityFailure};
pub use classify::{classify, Category, FloorConnectionIndex};
pub use error::{Error, GeometryError, Result};
pub use geometry::{contains, Point, PolygonInput, Ring};
pub use labels::{plan_labels, LabelSpec};
pub use state::{Side, StateStore, StateTable, StateTarget, StateUpdate, VisualState};
pub use theme::ThemeConfig;
pub use venue::{Connection, Floor, MapObject, Space, VenueSnapshot};
