//! `em-collision`: "is this position free?" queries for local steering.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`tester`]    | `CollisionTester` trait, `CollisionFacade`                  |
//! | [`obstacles`] | `ObstacleField` - dynamic circular obstacles in an R-tree   |
//! | [`error`]     | `CollisionError`, `CollisionResult<T>`                      |
//!
//! # Pluggability
//!
//! The path-repair algorithm only talks to [`CollisionFacade`], which wraps
//! any [`CollisionTester`].  Games plug in their physics-backed local planner;
//! tests and demos use [`ObstacleField`].

pub mod error;
pub mod obstacles;
pub mod tester;


pub use error::{CollisionError, CollisionResult};
pub use obstacles::ObstacleField;
pub use tester::{CollisionFacade, CollisionTester};
