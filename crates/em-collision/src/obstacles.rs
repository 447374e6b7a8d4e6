//! Dynamic circular obstacles indexed by an R-tree.
//!
//! # Data layout
//!
//! Obstacles live twice: in a `HashMap<ObstacleId, ObstacleEntry>` for O(1)
//! lookup by id, and in an `rstar` R-tree keyed by each disc's bounding box
//! for point queries.  Moving an obstacle is a remove + insert in the tree.
//!
//! # Clearance
//!
//! A steering agent is not a point.  `clearance` (the agent's radius) is
//! added to every obstacle radius at query time, so a position is free only
//! if a disc of radius `clearance` centred there touches no obstacle.

use std::collections::HashMap;

use rstar::{RTree, RTreeObject, AABB};

use em_core::{ObstacleId, Position};

use crate::{CollisionError, CollisionResult, CollisionTester};

/// Entry stored in the R-tree: a disc with its id.
#[derive(Clone, Debug, PartialEq)]
struct ObstacleEntry {
    id:     ObstacleId,
    centre: [f32; 2],
    radius: f32,
}

impl RTreeObject for ObstacleEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        let [x, y] = self.centre;
        let r = self.radius;
        AABB::from_corners([x - r, y - r], [x + r, y + r])
    }
}

/// A [`CollisionTester`] over dynamic circular obstacles (vehicles, burning
/// debris, other units standing still).
pub struct ObstacleField {
    clearance: f32,
    by_id:     HashMap<ObstacleId, ObstacleEntry>,
    tree:      RTree<ObstacleEntry>,
}

impl ObstacleField {
    /// Create an empty field.  `clearance` is clamped to be non-negative.
    pub fn new(clearance: f32) -> Self {
        Self {
            clearance: clearance.max(0.0),
            by_id:     HashMap::new(),
            tree:      RTree::new(),
        }
    }

    pub fn clearance(&self) -> f32 {
        self.clearance
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Add (or replace) obstacle `id` as a disc of `radius` around `centre`.
    pub fn insert(&mut self, id: ObstacleId, centre: Position, radius: f32) -> CollisionResult<()> {
        if !centre.is_finite() {
            return Err(CollisionError::InvalidPosition(centre));
        }
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(CollisionError::InvalidRadius { id, radius });
        }
        let entry = ObstacleEntry { id, centre: centre.to_array(), radius };
        if let Some(old) = self.by_id.insert(id, entry.clone()) {
            self.tree.remove(&old);
        }
        self.tree.insert(entry);
        Ok(())
    }

    /// Remove obstacle `id`.
    pub fn remove(&mut self, id: ObstacleId) -> CollisionResult<()> {
        let old = self.by_id.remove(&id).ok_or(CollisionError::UnknownObstacle(id))?;
        self.tree.remove(&old);
        Ok(())
    }

    /// Move obstacle `id` to a new centre, keeping its radius.
    pub fn move_obstacle(&mut self, id: ObstacleId, centre: Position) -> CollisionResult<()> {
        let radius = self
            .by_id
            .get(&id)
            .map(|e| e.radius)
            .ok_or(CollisionError::UnknownObstacle(id))?;
        self.insert(id, centre, radius)
    }

    /// Ids of all obstacles blocking `position`, ascending.
    pub fn blocking(&self, position: Position) -> CollisionResult<Vec<ObstacleId>> {
        if !position.is_finite() {
            return Err(CollisionError::InvalidPosition(position));
        }
        let c = self.clearance;
        let p = position.to_array();
        let query = AABB::from_corners([p[0] - c, p[1] - c], [p[0] + c, p[1] + c]);

        let mut hits: Vec<ObstacleId> = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .filter(|e| {
                let reach = e.radius + c;
                Position::from(e.centre).distance_squared(position) < reach * reach
            })
            .map(|e| e.id)
            .collect();
        hits.sort_unstable();
        Ok(hits)
    }
}

impl CollisionTester for ObstacleField {
    fn is_position_collision_free(&self, position: Position) -> CollisionResult<bool> {
        Ok(self.blocking(position)?.is_empty())
    }
}
