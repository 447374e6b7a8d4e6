//! `em-core`: foundational types for the emergency AI reaction core.
//!
//! This crate is a dependency of every other `em-*` crate.  It intentionally
//! has no `em-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `EntityId`, `ObstacleId`, `Tag`                       |
//! | [`geo`]         | `Position` (ground-plane metres)                      |
//! | [`time`]        | `Tick`, `AiConfig`                                    |
//! | [`rng`]         | `EntityRng` (per-entity)                              |
//! | [`error`]       | `EmError`, `EmResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EmError, EmResult};
pub use geo::Position;
pub use ids::{EntityId, ObstacleId, Tag};
pub use rng::EntityRng;
pub use time::{AiConfig, Tick};
