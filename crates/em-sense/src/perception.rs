//! Built-in radius perception pass.
//!
//! Stands in for the engine's event-tag perception system in tests and
//! demos: every live entity senses every *other* live entity within
//! `radius`, bucketed by the sensed entity's tags.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) over live entity positions keeps the pass at
//! O(N log N + K) instead of the naive O(N²) pairwise scan.

use log::debug;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use em_core::EntityId;

use crate::{EntityStore, SensedEntityRegistry};

/// R-tree entry: a 2-D `[x, y]` point with its `EntityId`.
#[derive(Clone)]
struct EntityEntry {
    point: [f32; 2],
    id:    EntityId,
}

impl RTreeObject for EntityEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for EntityEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Rebuild `registry` from scratch from the positions and tags in `store`.
///
/// Untagged entities are never sensed (there is no bucket to put them in).
/// Returns the number of `(observer, sensed)` pairs recorded.
pub fn perceive_within_radius(
    store:    &EntityStore,
    radius:   f32,
    registry: &mut SensedEntityRegistry,
) -> usize {
    registry.clear();

    let entries: Vec<EntityEntry> = store
        .live_ids()
        .filter(|e| !store.tags[e.index()].is_empty())
        .map(|e| EntityEntry { point: store.positions[e.index()].to_array(), id: e })
        .collect();
    if entries.is_empty() {
        return 0;
    }
    let tree = RTree::bulk_load(entries);
    let radius_2 = radius * radius;

    let mut pairs = 0;
    for observer in store.live_ids() {
        let at = store.positions[observer.index()].to_array();
        let mut seen: Vec<EntityId> = tree
            .locate_within_distance(at, radius_2)
            .map(|entry| entry.id)
            .filter(|&id| id != observer)
            .collect();
        seen.sort_unstable();

        for sensed in seen {
            for tag in &store.tags[sensed.index()] {
                registry.insert(observer, tag.clone(), sensed);
            }
            pairs += 1;
        }
    }

    debug!("perception pass: {pairs} sensed pairs within {radius} m");
    pairs
}
