//! Per-entity sensed-entity registry.
//!
//! Maps `(observer, tag)` to the entities the observer currently senses with
//! that tag.  The registry is written by a perception pass and read by the
//! reaction core through the [`SensedEntities`] trait.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;
#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use em_core::{EntityId, Tag};

/// Read-only view of what entities sense, keyed by semantic tag.
///
/// This is the only perception interface the reaction core consumes.  It
/// must be `Sync`: the reaction phase may query it from several threads.
pub trait SensedEntities: Sync {
    /// Entities sensed by `scope` that carry `tag`.
    ///
    /// Unknown scopes or tags yield an empty slice, never an error.
    fn entities_with_tag(&self, tag: &Tag, scope: EntityId) -> &[EntityId];
}

/// Default [`SensedEntities`] implementation.
///
/// Lists are deduplicated on insert and kept in ascending `EntityId` order
/// so rule evaluation sees a deterministic sequence.
#[derive(Clone, Debug, Default)]
pub struct SensedEntityRegistry {
    by_entity: HashMap<EntityId, HashMap<Tag, Vec<EntityId>>>,
}

impl SensedEntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything `scope` senses under `tag`.
    pub fn set(&mut self, scope: EntityId, tag: Tag, mut entities: Vec<EntityId>) {
        entities.sort_unstable();
        entities.dedup();
        if entities.is_empty() {
            if let Some(tags) = self.by_entity.get_mut(&scope) {
                tags.remove(&tag);
            }
            return;
        }
        self.by_entity.entry(scope).or_default().insert(tag, entities);
    }

    /// Record that `scope` senses `entity` under `tag`.
    pub fn insert(&mut self, scope: EntityId, tag: Tag, entity: EntityId) {
        let list = self.by_entity.entry(scope).or_default().entry(tag).or_default();
        if let Err(pos) = list.binary_search(&entity) {
            list.insert(pos, entity);
        }
    }

    /// Forget everything `scope` senses.
    pub fn clear_entity(&mut self, scope: EntityId) {
        self.by_entity.remove(&scope);
    }

    /// Forget everything.  Called at the start of each perception pass.
    pub fn clear(&mut self) {
        self.by_entity.clear();
    }

    /// Tags under which `scope` senses at least one entity, sorted.
    pub fn tags_for(&self, scope: EntityId) -> Vec<Tag> {
        let mut tags: Vec<Tag> = self
            .by_entity
            .get(&scope)
            .map(|m| m.keys().cloned().collect())
            .unwrap_or_default();
        tags.sort();
        tags
    }

    /// Number of entities with at least one sensed tag bucket.
    pub fn len(&self) -> usize {
        self.by_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_entity.is_empty()
    }
}

impl SensedEntities for SensedEntityRegistry {
    fn entities_with_tag(&self, tag: &Tag, scope: EntityId) -> &[EntityId] {
        self.by_entity
            .get(&scope)
            .and_then(|tags| tags.get(tag))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
