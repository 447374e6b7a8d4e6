//! `em-sense`: what each entity currently perceives.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`store`]      | `EntityStore` (SoA positions + tags), `EntityStoreBuilder` |
//! | [`registry`]   | `SensedEntities` trait, `SensedEntityRegistry`             |
//! | [`perception`] | `perceive_within_radius` - R-tree backed perception pass   |
//!
//! # Data flow
//!
//! A perception pass (the built-in [`perceive_within_radius`] or an external
//! event-tag system) fills the [`SensedEntityRegistry`] *before* the AI pass.
//! During the AI pass the registry is only ever borrowed immutably as
//! `&dyn SensedEntities`, so reaction evaluation can run on many threads.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                   |
//! |-----------|----------------------------------------------------------|
//! | `fx-hash` | Use FxHash instead of SipHash for the registry maps.     |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.       |

pub mod perception;
pub mod registry;
pub mod store;


pub use perception::perceive_within_radius;
pub use registry::{SensedEntities, SensedEntityRegistry};
pub use store::{EntityStore, EntityStoreBuilder};
