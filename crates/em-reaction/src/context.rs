//! Per-tick input passed to every rule evaluation.

use em_core::{EntityId, Position, Tag, Tick};
use em_sense::{EntityStore, SensedEntities};

/// Everything a [`ReactionRule`][crate::ReactionRule] may look at when it
/// decides whether its entity reacts.
///
/// Built by the dispatcher for one entity at a time, borrowed for the length
/// of that entity's evaluation, and never stored.  Both borrows are
/// read-only: the perception pass has finished before the AI pass begins.
pub struct EvaluationParameters<'a> {
    /// Current AI-pass tick.
    pub tick: Tick,

    /// The entity doing the sensing (and, if a rule handles, the reacting).
    pub entity: EntityId,

    /// Where `entity` stands this tick.
    pub position: Position,

    /// What `entity` currently senses, bucketed by tag.
    pub sensed: &'a dyn SensedEntities,

    /// Read-only entity state (positions, tags, liveness).
    pub store: &'a EntityStore,
}

impl<'a> EvaluationParameters<'a> {
    #[inline]
    pub fn new(
        tick:     Tick,
        entity:   EntityId,
        position: Position,
        sensed:   &'a dyn SensedEntities,
        store:    &'a EntityStore,
    ) -> Self {
        Self { tick, entity, position, sensed, store }
    }

    /// Entities this entity senses under `tag`.
    #[inline]
    pub fn sensed_with_tag(&self, tag: &Tag) -> &'a [EntityId] {
        self.sensed.entities_with_tag(tag, self.entity)
    }

    /// Current position of `other`, `None` if it has despawned.
    #[inline]
    pub fn position_of(&self, other: EntityId) -> Option<Position> {
        self.store.position(other)
    }

    /// Sensed entities under `tag` that still exist, with their positions.
    pub fn located_with_tag(&self, tag: &Tag) -> Vec<(EntityId, Position)> {
        self.sensed_with_tag(tag)
            .iter()
            .filter_map(|&e| self.position_of(e).map(|p| (e, p)))
            .collect()
    }

    /// The closest live sensed entity under `tag`, with its position and
    /// distance.  Ties go to the lower `EntityId`.
    pub fn nearest_with_tag(&self, tag: &Tag) -> Option<(EntityId, Position, f32)> {
        self.located_with_tag(tag)
            .into_iter()
            .map(|(e, p)| (e, p, self.position.distance_squared(p)))
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(e, p, d2)| (e, p, d2.sqrt()))
    }
}
