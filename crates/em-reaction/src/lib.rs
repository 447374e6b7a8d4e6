//! `em-reaction`: reaction rules and the tables that order them.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                      |
//! |----------------|---------------------------------------------------------------|
//! | [`context`]    | `EvaluationParameters<'a>` - per-tick input to every rule     |
//! | [`directive`]  | `Directive` (`Flee`, `Gawk`) - what a handled rule produces   |
//! | [`params`]     | `RuleParams`, `ParamValue` - serializable rule parameters     |
//! | [`reaction`]   | `Reaction` trait, `FleeReaction`, `GawkReaction`              |
//! | [`rule`]       | `ReactionRule` trait                                          |
//! | [`rules`]      | `FireDangerRule`, `ThreatProximityRule`, `CuriosityRule`      |
//! | [`registry`]   | `ReactionRegistry`, `install_reactions_and_reaction_rules`    |
//! | [`table`]      | `ReactionRulesTable` - priority-ordered rules                 |
//! | [`codec`]      | `RuleTableCodec`, `JsonCodec`, `RonCodec`, `codec_for_path`   |
//! | [`serializer`] | `deserialize`, `serialize`, `load_table_or_empty`             |
//! | [`error`]      | `ReactionError`, `RuleResult<T>`                              |
//!
//! # Rules vs. reactions
//!
//! A *rule* decides **whether** an entity reacts to what it senses and picks
//! the entity it reacts to.  A *reaction* decides **what** the entity does
//! about it (flee, stand and watch).  Rules own a boxed reaction chosen by
//! name from the registry, so the same trigger can be wired to different
//! behaviours from data alone.
//!
//! # Priority convention
//!
//! Tables evaluate in ascending priority number: priority `1` is evaluated
//! before priority `2`.  Equal priorities keep their insertion order.

pub mod codec;
pub mod context;
pub mod directive;
pub mod error;
pub mod params;
pub mod reaction;
pub mod registry;
pub mod rule;
pub mod rules;
pub mod serializer;
pub mod table;

#[cfg(test)]
mod tests;

pub use codec::{codec_for_path, JsonCodec, RawRuleTable, RonCodec, RuleEntry, RuleTableCodec, RuleTableFile};
pub use context::EvaluationParameters;
pub use directive::Directive;
pub use error::{ReactionError, RuleResult};
pub use params::{ParamValue, RuleParams};
pub use reaction::{FleeReaction, GawkReaction, Reaction};
pub use registry::{install_reactions_and_reaction_rules, ReactionFactory, ReactionRegistry, RuleFactory};
pub use rule::ReactionRule;
pub use rules::{CuriosityRule, FireDangerRule, TargetSelection, ThreatProximityRule};
pub use serializer::{
    deserialize, deserialize_str, load_table_or_empty, serialize, serialize_to_string, LoadReport,
    SkippedRule,
};
pub use table::{ReactionRulesTable, TableEntry};
