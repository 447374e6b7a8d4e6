//! `em-dispatch`: reaction dispatch and the per-tick AI pass.
//!
//! # Two-phase AI pass
//!
//! ```text
//! for each tick:
//!   ① Reactions  for every live entity with an enabled ReactionComponent,
//!                walk its rule table in priority order; the first rule
//!                that handles wins (parallel with the `parallel` feature).
//!   ② Apply      for each reaction in ascending EntityId order:
//!                  plan a path to the directive's destination,
//!                  repair it against the collision tester,
//!                  install it in the entity's Navigator.
//! ```
//!
//! Rules that fail or panic are isolated: the fault is logged, reported to
//! the observer, and evaluation moves on to the next rule.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the reaction phase on Rayon's thread pool.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! let mut registry = ReactionRegistry::new();
//! install_reactions_and_reaction_rules(&mut registry);
//! let template = load_table_or_empty(Path::new("civilian.json"), &registry);
//!
//! let mut pass = AiPassBuilder::new(config, store, template).build()?;
//! let mut sensed = SensedEntityRegistry::new();
//! pass.perceive(&mut sensed);
//! let report = pass.tick(&sensed, Some(&obstacles), &mut NoopObserver);
//! ```

pub mod builder;
pub mod component;
pub mod engine;
pub mod error;
pub mod observer;
pub mod pass;


pub use builder::AiPassBuilder;
pub use component::ReactionComponent;
pub use engine::{dispatch, Dispatched, RuleFault};
pub use error::{DispatchError, DispatchResult};
pub use observer::{AiObserver, NoopObserver};
pub use pass::{AiPass, TickReport};
