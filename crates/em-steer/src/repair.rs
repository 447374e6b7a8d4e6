//! Collision repair of planned paths.
//!
//! # Algorithm
//!
//! ```text
//! if path is empty                 → Empty (nothing to steer to)
//! if last point is free            → Unchanged   (one query; common case)
//! for i in (0 .. len-1).rev():
//!     if point i is free:
//!         truncate to 0..=i
//!         push synthesized terminus at point i   → Truncated
//! no free point                    → keep point 0 only → Blocked
//! ```
//!
//! The backward walk stops at the first free point it meets, so the worst
//! case is `len` collision queries.  The synthesized terminus duplicates the
//! anchor's position but carries the navigator's arrival speed, so the
//! repaired path always ends in a well-formed stopping point.
//!
//! Blocked paths keep their first point: steering needs at least one target
//! and the start of a path is where the agent already stands.
//!
//! Repair is idempotent: the terminus of a repaired path is free by
//! construction, so a second call returns `Unchanged`.  The one exception is
//! a `Blocked` path, which stays a one-point `Blocked` path.

use log::{debug, warn};

use em_collision::CollisionFacade;

use crate::{Navigator, Path, SteeringControlPoint};

/// What [`repair_path`] did to the path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RepairOutcome {
    /// The path had no points.
    Empty,
    /// The final point was free; the path was not modified.
    Unchanged,
    /// Points after `anchor` were removed and a terminus appended at
    /// `anchor`'s position.
    Truncated {
        anchor:  usize,
        removed: usize,
    },
    /// No point was free; only the first point was kept.
    Blocked {
        removed: usize,
    },
}

impl RepairOutcome {
    /// `true` if the path was modified.
    pub fn changed(self) -> bool {
        match self {
            RepairOutcome::Empty | RepairOutcome::Unchanged => false,
            RepairOutcome::Truncated { .. } => true,
            RepairOutcome::Blocked { removed } => removed > 0,
        }
    }
}

/// Repair `path` in place against dynamic obstacles.
///
/// `navigator` supplies the motion parameters of the synthesized terminus.
pub fn repair_path(navigator: &Navigator, path: &mut Path, facade: &CollisionFacade<'_>) -> RepairOutcome {
    let Some(last) = path.last() else {
        return RepairOutcome::Empty;
    };
    if facade.is_free(last.position) {
        return RepairOutcome::Unchanged;
    }

    let len = path.len();
    let anchor = (0..len - 1)
        .rev()
        .find(|&i| facade.is_free(path.points[i].position));

    match anchor {
        Some(i) => {
            let anchor_point = path.points[i];
            // Points i+1.. are dropped; the terminus is added below.
            let removed = len - (i + 1);
            path.truncate(i + 1);
            path.push(SteeringControlPoint {
                position: anchor_point.position,
                speed:    navigator.arrival_speed,
                heading:  anchor_point.heading,
            });
            debug!(
                "{}: path cut at control point {i} of {len} ({removed} removed)",
                navigator.entity
            );
            RepairOutcome::Truncated { anchor: i, removed }
        }
        None => {
            let removed = len - 1;
            path.truncate(1);
            warn!(
                "{}: no collision-free control point on {len}-point path; keeping start point only",
                navigator.entity
            );
            RepairOutcome::Blocked { removed }
        }
    }
}

/// Copy-on-write variant of [`repair_path`]: returns the repaired path and
/// leaves `path` untouched.
pub fn repaired(navigator: &Navigator, path: &Path, facade: &CollisionFacade<'_>) -> (Path, RepairOutcome) {
    let mut copy = path.clone();
    let outcome = repair_path(navigator, &mut copy, facade);
    (copy, outcome)
}
