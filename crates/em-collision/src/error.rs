//! Collision-subsystem error type.

use thiserror::Error;

use em_core::{ObstacleId, Position};

/// Errors produced by collision testers.
#[derive(Debug, Error)]
pub enum CollisionError {
    #[error("position {0} is not a finite point")]
    InvalidPosition(Position),

    #[error("obstacle {0} is not registered")]
    UnknownObstacle(ObstacleId),

    #[error("obstacle {id} has invalid radius {radius}")]
    InvalidRadius { id: ObstacleId, radius: f32 },

    #[error("collision backend unavailable: {0}")]
    Unavailable(String),
}

pub type CollisionResult<T> = Result<T, CollisionError>;
