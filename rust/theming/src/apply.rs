// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The theme pass: classify, resolve and commit state for a whole venue.
//!
//! The pass is synchronous and idempotent. It writes wall and door groups
//! first, then objects, then spaces. Each entity is handled on its own: a
//! failure is logged, recorded in the [`ApplyReport`] and the pass moves on.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{Category, FloorConnectionIndex};
use crate::error::{Error, Result};
use crate::resolve::{door_state, object_state, space_style, wall_state, HeightRule};
use crate::state::{Side, StateStore, StateTarget, StateUpdate, VisualState};
use crate::theme::ThemeConfig;
use crate::venue::{MapObject, Space, VenueSnapshot};

/// An entity the pass could not style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityFailure {
    /// Target key, or the entity's position when it has no identifier.
    pub entity: String,
    pub message: String,
}

/// Outcome of one theme pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyReport {
    /// Category assigned to each styled space, by space id.
    pub spaces: BTreeMap<String, Category>,
    pub objects_styled: usize,
    /// Wall and door groups written.
    pub groups_styled: usize,
    pub failures: Vec<EntityFailure>,
    /// Map background color for the caller's container, if themed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl ApplyReport {
    /// Number of styled spaces in a category.
    pub fn count(&self, category: Category) -> usize {
        self.spaces.values().filter(|&&c| c == category).count()
    }

    pub fn spaces_styled(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, entity: String, error: &Error) {
        tracing::warn!(entity = %entity, error = %error, "failed to apply theme state");
        self.failures.push(EntityFailure {
            entity,
            message: error.to_string(),
        });
    }
}

/// Applies `theme` to every entity of `venue`, writing into `store`.
pub fn apply_theme<S>(store: &mut S, venue: &VenueSnapshot, theme: &ThemeConfig) -> ApplyReport
where
    S: StateStore + ?Sized,
{
    let mut report = ApplyReport {
        background: theme.colors.map.background.clone(),
        ..Default::default()
    };

    let door_patch = door_state(theme);
    for side in Side::ALL {
        let groups = [
            (StateTarget::Walls(side), wall_state(theme, side)),
            (StateTarget::Doors(side), door_patch.clone()),
        ];
        for (target, patch) in groups {
            match store.update_state(&target, StateUpdate::Merge(patch)) {
                Ok(()) => report.groups_styled += 1,
                Err(e) => report.fail(target.to_string(), &e),
            }
        }
    }

    let object_patch = object_state(theme);
    for (position, object) in venue.objects.iter().enumerate() {
        match style_object(store, object, &object_patch) {
            Ok(()) => report.objects_styled += 1,
            Err(e) => report.fail(entity_label("object", &object.id, position), &e),
        }
    }

    let index = FloorConnectionIndex::new(&venue.connections);
    for (position, space) in venue.spaces.iter().enumerate() {
        match style_space(store, &index, space, theme) {
            Ok(category) => {
                report.spaces.insert(space.id.clone(), category);
            }
            Err(e) => report.fail(entity_label("space", &space.id, position), &e),
        }
    }

    tracing::debug!(
        theme = theme.name.as_deref().unwrap_or("unnamed"),
        spaces = report.spaces_styled(),
        objects = report.objects_styled,
        groups = report.groups_styled,
        failures = report.failures.len(),
        "theme pass complete"
    );

    report
}

fn entity_label(kind: &str, id: &str, position: usize) -> String {
    if id.is_empty() {
        format!("{kind}[{position}]")
    } else {
        format!("{kind}:{id}")
    }
}

fn style_object<S>(store: &mut S, object: &MapObject, patch: &VisualState) -> Result<()>
where
    S: StateStore + ?Sized,
{
    if object.id.is_empty() {
        return Err(Error::MissingEntityId("object"));
    }
    store.update_state(
        &StateTarget::object(&object.id),
        StateUpdate::Merge(patch.clone()),
    )
}

fn style_space<S>(
    store: &mut S,
    index: &FloorConnectionIndex,
    space: &Space,
    theme: &ThemeConfig,
) -> Result<Category>
where
    S: StateStore + ?Sized,
{
    if space.id.is_empty() {
        return Err(Error::MissingEntityId("space"));
    }
    let target = StateTarget::space(&space.id);
    let style = space_style(theme, index.classify(space));
    let category = style.category;

    // Only the reset path needs to look at what is already there.
    let current = match style.height {
        HeightRule::Reset => store.state(&target),
        HeightRule::Apply(_) | HeightRule::Keep => None,
    };
    store.update_state(&target, style.into_update(current.as_ref()))?;
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, PolygonInput};
    use crate::state::StateTable;
    use crate::venue::Connection;
    use approx::assert_relative_eq;

    fn square(x0: f64, y0: f64) -> PolygonInput {
        PolygonInput::from_points(&[(x0, y0), (x0, y0 + 1.0), (x0 + 1.0, y0 + 1.0), (x0 + 1.0, y0)])
    }

    fn sample_venue() -> VenueSnapshot {
        VenueSnapshot {
            spaces: vec![
                Space::new("office", "f1", "Office 12")
                    .with_kind("room")
                    .with_geometry(square(0.0, 0.0))
                    .with_doors(["d1"]),
                Space::new("wc", "f1", "Restroom").with_geometry(square(2.0, 0.0)),
                Space::new("lift", "f1", "").with_geometry(square(4.0, 0.0)),
                Space::new("hall", "f1", "").with_kind("hallway"),
                Space::new("closet", "f1", "Closet").with_doors(Vec::<String>::new()),
            ],
            connections: vec![
                Connection::new("c1", "elevator").with_coordinate("f1", Point::new(4.5, 0.5)),
            ],
            objects: vec![MapObject::new("desk-1", "f1")],
            ..Default::default()
        }
    }

    /// Store that refuses writes for one space.
    struct RejectingStore {
        inner: StateTable,
        reject: StateTarget,
    }

    impl StateStore for RejectingStore {
        fn state(&self, target: &StateTarget) -> Option<VisualState> {
            self.inner.state(target)
        }

        fn update_state(&mut self, target: &StateTarget, update: StateUpdate) -> Result<()> {
            if *target == self.reject {
                return Err(Error::Store(format!("{target} is locked")));
            }
            self.inner.update_state(target, update)
        }
    }

    #[test]
    fn every_entity_gets_state() {
        let mut table = StateTable::new();
        let report = apply_theme(&mut table, &sample_venue(), &ThemeConfig::honeycrisp());

        assert!(report.is_clean());
        assert_eq!(report.groups_styled, 4);
        assert_eq!(report.objects_styled, 1);
        assert_eq!(report.spaces_styled(), 5);
        assert_eq!(report.spaces["office"], Category::Standard);
        assert_eq!(report.spaces["wc"], Category::Bathroom);
        assert_eq!(report.spaces["lift"], Category::Connection);
        assert_eq!(report.spaces["hall"], Category::Hallway);
        assert_eq!(report.spaces["closet"], Category::Inaccessible);
        assert_eq!(report.count(Category::Standard), 1);
        // 4 groups + 1 object + 5 spaces
        assert_eq!(table.len(), 10);

        let closet = table.get(&StateTarget::space("closet")).unwrap();
        assert_eq!(closet.color.as_deref(), Some("#D8D5CB"));
        assert_eq!(closet.height, Some(0.1));
        assert_eq!(closet.interactive, Some(true));
    }

    #[test]
    fn second_pass_changes_nothing() {
        let venue = sample_venue();
        let theme = ThemeConfig::honeycrisp();
        let mut table = StateTable::new();
        apply_theme(&mut table, &venue, &theme);
        let first = table.clone();
        apply_theme(&mut table, &venue, &theme);
        assert_eq!(table, first);
    }

    #[test]
    fn reset_pass_is_idempotent_too() {
        let venue = sample_venue();
        let mut theme = ThemeConfig::honeycrisp();
        theme.room_heights = None;

        let mut table = StateTable::new();
        table.insert(
            StateTarget::space("office"),
            VisualState {
                height: Some(0.3),
                visible: Some(true),
                opacity: Some(0.7),
                ..Default::default()
            },
        );
        apply_theme(&mut table, &venue, &theme);
        let first = table.clone();
        apply_theme(&mut table, &venue, &theme);
        assert_eq!(table, first);

        let office = table.get(&StateTarget::space("office")).unwrap();
        assert_eq!(office.height, None);
        assert_eq!(office.visible, Some(true));
        assert_relative_eq!(office.opacity.unwrap(), 0.7);
    }

    #[test]
    fn unrelated_fields_survive_a_pass() {
        let mut table = StateTable::new();
        table.insert(
            StateTarget::space("office"),
            VisualState {
                outline: Some(true),
                visible: Some(false),
                ..Default::default()
            },
        );
        apply_theme(&mut table, &sample_venue(), &ThemeConfig::honeycrisp());
        let office = table.get(&StateTarget::space("office")).unwrap();
        assert_eq!(office.outline, Some(true));
        assert_eq!(office.visible, Some(false));
        assert_eq!(office.color.as_deref(), Some("#EEECE7"));
    }

    #[test]
    fn one_rejected_write_does_not_stop_the_pass() {
        let mut store = RejectingStore {
            inner: StateTable::new(),
            reject: StateTarget::space("wc"),
        };
        let report = apply_theme(&mut store, &sample_venue(), &ThemeConfig::honeycrisp());

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].entity, "space:wc");
        assert!(report.failures[0].message.contains("locked"));
        assert_eq!(report.spaces_styled(), 4);
        assert!(!report.spaces.contains_key("wc"));
        assert!(store.inner.get(&StateTarget::space("closet")).is_some());
    }

    #[test]
    fn entities_without_ids_are_reported() {
        let mut venue = sample_venue();
        venue.spaces.push(Space::new("", "f1", "Ghost"));
        venue.objects.insert(0, MapObject::new("", "f1"));

        let mut table = StateTable::new();
        let report = apply_theme(&mut table, &venue, &ThemeConfig::honeycrisp());
        let entities: Vec<&str> = report.failures.iter().map(|f| f.entity.as_str()).collect();
        assert_eq!(entities, vec!["object[0]", "space[5]"]);
        assert_eq!(report.objects_styled, 1);
        assert_eq!(report.spaces_styled(), 5);
    }

    #[test]
    fn works_through_a_trait_object() {
        let mut table = StateTable::new();
        let store: &mut dyn StateStore = &mut table;
        let report = apply_theme(store, &sample_venue(), &ThemeConfig::default());
        assert!(report.is_clean());

        let doors = table.get(&StateTarget::Doors(Side::Interior)).unwrap();
        assert_eq!(doors.visible, Some(false));
        assert_relative_eq!(doors.opacity.unwrap(), 0.8);
    }

    #[test]
    fn background_is_reported() {
        let mut theme = ThemeConfig::honeycrisp();
        theme.colors.map.background = Some("#444444".into());
        let report = apply_theme(&mut StateTable::new(), &VenueSnapshot::default(), &theme);
        assert_eq!(report.background.as_deref(), Some("#444444"));
        assert_eq!(report.groups_styled, 4);
    }
}
