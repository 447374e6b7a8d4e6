//! Structure-of-Arrays entity storage.
//!
//! The reaction core needs three facts about every entity: where it stands,
//! which semantic tags it carries, and whether it still exists.  They are
//! kept in parallel `Vec`s indexed by `EntityId`:
//!
//! ```ignore
//! let pos = store.positions[entity.index()];  // O(1), cache-friendly
//! ```
//!
//! Entity lookup for the wider game world is an external concern; this store
//! is the narrow mirror the AI pass reads from.

use em_core::{EntityId, Position, Tag};

/// SoA storage for entity state.
///
/// Every `Vec` field has exactly `count` elements.  Do not resize the vectors
/// directly; despawning is modelled by clearing `alive`, never by removal,
/// so `EntityId`s stay stable.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityStore {
    /// Number of entity slots.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Ground-plane position of each entity.
    pub positions: Vec<Position>,

    /// Semantic tags of each entity (`"fire_danger"`, `"gangster"`, …).
    pub tags: Vec<Vec<Tag>>,

    /// `false` once the entity has been despawned.
    pub alive: Vec<bool>,
}

impl EntityStore {
    /// `true` if there are no entity slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `EntityId`s in ascending index order.
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        (0..self.count as u32).map(EntityId)
    }

    /// Iterator over live `EntityId`s in ascending index order.
    pub fn live_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entity_ids().filter(|e| self.alive[e.index()])
    }

    /// Position of `entity`, or `None` if the id is out of range or dead.
    #[inline]
    pub fn position(&self, entity: EntityId) -> Option<Position> {
        let i = entity.index();
        if i < self.count && self.alive[i] {
            Some(self.positions[i])
        } else {
            None
        }
    }

    #[inline]
    pub fn is_alive(&self, entity: EntityId) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    pub fn has_tag(&self, entity: EntityId, tag: &Tag) -> bool {
        self.tags
            .get(entity.index())
            .is_some_and(|tags| tags.contains(tag))
    }

    /// Attach `tag` to `entity` (no-op if already present or out of range).
    pub fn add_tag(&mut self, entity: EntityId, tag: Tag) {
        if let Some(tags) = self.tags.get_mut(entity.index()) {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
    }

    /// Detach `tag` from `entity`.  Returns `true` if it was present.
    pub fn remove_tag(&mut self, entity: EntityId, tag: &Tag) -> bool {
        match self.tags.get_mut(entity.index()) {
            Some(tags) => {
                let before = tags.len();
                tags.retain(|t| t != tag);
                tags.len() != before
            }
            None => false,
        }
    }

    /// Mark `entity` as despawned.  Its slot (and id) is never reused.
    pub fn despawn(&mut self, entity: EntityId) {
        if let Some(alive) = self.alive.get_mut(entity.index()) {
            *alive = false;
        }
    }

    pub(crate) fn new(positions: Vec<Position>, tags: Vec<Vec<Tag>>) -> Self {
        let count = positions.len();
        Self {
            count,
            positions,
            tags,
            alive: vec![true; count],
        }
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Fluent builder for [`EntityStore`].
///
/// ```rust
/// use em_core::{Position, Tag};
/// use em_sense::EntityStoreBuilder;
///
/// let store = EntityStoreBuilder::new()
///     .spawn(Position::new(0.0, 0.0), &[])
///     .spawn(Position::new(5.0, 0.0), &[Tag::new("fire_danger")])
///     .build();
///
/// assert_eq!(store.count, 2);
/// ```
#[derive(Default)]
pub struct EntityStoreBuilder {
    positions: Vec<Position>,
    tags:      Vec<Vec<Tag>>,
}

impl EntityStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate `count` untagged entities at the origin.
    pub fn with_capacity(count: usize) -> Self {
        Self {
            positions: vec![Position::ORIGIN; count],
            tags:      vec![Vec::new(); count],
        }
    }

    /// Append one entity; its `EntityId` is the number of entities before it.
    pub fn spawn(mut self, position: Position, tags: &[Tag]) -> Self {
        self.positions.push(position);
        self.tags.push(tags.to_vec());
        self
    }

    pub fn build(self) -> EntityStore {
        EntityStore::new(self.positions, self.tags)
    }
}
