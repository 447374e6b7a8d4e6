//! Per-entity steering state.

use em_core::{EntityId, Position};

use crate::Path;

/// The steering component of one entity.
///
/// Holds the path currently being followed plus the motion parameters the
/// planner and the repair algorithm need when they synthesize control
/// points.  Exclusively owned and mutated by its entity's update.
#[derive(Clone, Debug)]
pub struct Navigator {
    pub entity:        EntityId,
    /// Speed for intermediate control points, metres per second.
    pub cruise_speed:  f32,
    /// Speed at the path terminus (0 = come to a stop).
    pub arrival_speed: f32,
    pub path:          Path,
}

impl Navigator {
    pub const DEFAULT_CRUISE_SPEED: f32 = 3.0;

    pub fn new(entity: EntityId) -> Self {
        Self {
            entity,
            cruise_speed:  Self::DEFAULT_CRUISE_SPEED,
            arrival_speed: 0.0,
            path:          Path::empty(),
        }
    }

    pub fn with_speeds(mut self, cruise_speed: f32, arrival_speed: f32) -> Self {
        self.cruise_speed = cruise_speed;
        self.arrival_speed = arrival_speed;
        self
    }

    /// `true` while there is a path to follow.
    pub fn has_path(&self) -> bool {
        !self.path.is_empty()
    }

    /// Where the current path ends, if any.
    pub fn destination(&self) -> Option<Position> {
        self.path.last().map(|p| p.position)
    }

    /// Replace the current path (the previous one is dropped).
    pub fn set_path(&mut self, path: Path) {
        self.path = path;
    }

    pub fn clear_path(&mut self) {
        self.path = Path::empty();
    }
}
