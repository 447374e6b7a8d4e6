//! Collision tester trait and the conservative query facade.

use log::{debug, warn};

use em_core::Position;

use crate::CollisionResult;

// ── CollisionTester trait ─────────────────────────────────────────────────────

/// Answers point-in-obstacle queries against dynamic obstacles.
///
/// Implement this over the game's physics broadphase or local planner.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; the AI pass may share one tester
/// across Rayon workers.
pub trait CollisionTester: Send + Sync {
    /// `Ok(true)` if an agent can stand at `position` without colliding.
    fn is_position_collision_free(&self, position: Position) -> CollisionResult<bool>;
}

impl<T: CollisionTester + ?Sized> CollisionTester for &T {
    fn is_position_collision_free(&self, position: Position) -> CollisionResult<bool> {
        (**self).is_position_collision_free(position)
    }
}

// ── CollisionFacade ───────────────────────────────────────────────────────────

/// The narrow query surface the steering code uses.
///
/// Every failure mode collapses to "not free": a missing tester, or a tester
/// that returns an error, never lets steering target a position whose safety
/// is unknown.
#[derive(Clone, Copy)]
pub struct CollisionFacade<'a> {
    tester: Option<&'a dyn CollisionTester>,
}

impl<'a> CollisionFacade<'a> {
    pub fn new(tester: &'a dyn CollisionTester) -> Self {
        Self { tester: Some(tester) }
    }

    /// A facade with no backend.  Every query reports "not free".
    pub fn unavailable() -> Self {
        Self { tester: None }
    }

    pub fn is_available(&self) -> bool {
        self.tester.is_some()
    }

    /// `true` only if the tester positively reports `position` as free.
    pub fn is_free(&self, position: Position) -> bool {
        match self.tester {
            None => {
                debug!("collision query at {position} with no tester: treating as blocked");
                false
            }
            Some(tester) => match tester.is_position_collision_free(position) {
                Ok(free) => free,
                Err(e) => {
                    warn!("collision query at {position} failed ({e}): treating as blocked");
                    false
                }
            },
        }
    }
}

impl<'a> From<Option<&'a dyn CollisionTester>> for CollisionFacade<'a> {
    fn from(tester: Option<&'a dyn CollisionTester>) -> Self {
        Self { tester }
    }
}
