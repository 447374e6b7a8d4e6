//! Path planning trait and the default straight-line planner.
//!
//! # Pluggability
//!
//! The AI pass calls planning through the [`PathPlanner`] trait, so games can
//! swap in their navmesh router without touching the reaction core.  The
//! default [`StraightLinePlanner`] ignores static geometry entirely; dynamic
//! obstacles are handled afterwards by [`repair_path`][crate::repair_path].

use em_core::Position;

use crate::{Navigator, Path, SteeringControlPoint};

/// Pluggable route planner producing steering paths.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one planner can be shared by the
/// whole AI pass.
pub trait PathPlanner: Send + Sync {
    /// Plan a path from `from` to `to` for `navigator`'s entity.
    ///
    /// The returned path starts at (or next to) `from` and ends at `to`.
    /// `from == to` yields a single-point path, never an empty one.
    fn plan(&self, from: Position, to: Position, navigator: &Navigator) -> Path;
}

/// Emits evenly spaced control points on the straight segment `from → to`.
///
/// Intermediate points carry the navigator's cruise speed; the final point
/// carries its arrival speed.  Every point is headed along the segment.
#[derive(Clone, Copy, Debug)]
pub struct StraightLinePlanner {
    /// Maximum distance between consecutive control points, metres.
    pub spacing: f32,
}

impl StraightLinePlanner {
    pub fn new(spacing: f32) -> Self {
        Self { spacing }
    }
}

impl Default for StraightLinePlanner {
    fn default() -> Self {
        Self { spacing: 2.0 }
    }
}

impl PathPlanner for StraightLinePlanner {
    fn plan(&self, from: Position, to: Position, navigator: &Navigator) -> Path {
        let length = from.distance(to);
        if length <= f32::EPSILON {
            return Path::new(vec![SteeringControlPoint::new(to, navigator.arrival_speed)]);
        }

        let heading = from.heading_to(to);
        let spacing = if self.spacing > 0.0 { self.spacing } else { length };
        let segments = (length / spacing).ceil().max(1.0) as usize;

        (0..=segments)
            .map(|i| {
                let speed = if i == segments { navigator.arrival_speed } else { navigator.cruise_speed };
                let position = if i == segments { to } else { from.lerp(to, i as f32 / segments as f32) };
                SteeringControlPoint::new(position, speed).with_heading(heading)
            })
            .collect()
    }
}
