//! `em-steer`: steering paths and local collision repair.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`path`]      | `SteeringControlPoint`, `Path`                               |
//! | [`navigator`] | `Navigator` - per-entity steering state owning its `Path`    |
//! | [`planner`]   | `PathPlanner` trait, `StraightLinePlanner`                   |
//! | [`repair`]    | `repair_path`, `repaired`, `RepairOutcome`                   |
//!
//! # Repair in one paragraph
//!
//! Planners work against the static world.  Before steering follows a fresh
//! path, [`repair_path`] walks it backwards from the final control point
//! asking the collision facade whether each point is free of dynamic
//! obstacles.  The path is cut after the last free point and re-anchored
//! there with a synthesized terminus, so the agent stops short of the
//! obstruction instead of steering into it.

pub mod navigator;
pub mod path;
pub mod planner;
pub mod repair;

#[cfg(test)]
mod tests;

pub use navigator::Navigator;
pub use path::{Path, SteeringControlPoint};
pub use planner::{PathPlanner, StraightLinePlanner};
pub use repair::{repair_path, repaired, RepairOutcome};
