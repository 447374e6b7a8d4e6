//! Name → factory registry used to rebuild rules and reactions from files.
//!
//! The registry is an ordinary value: the application creates one, installs
//! the built-ins with [`install_reactions_and_reaction_rules`], registers its
//! own content types, and passes it to the serializer.  There is no global.

use std::collections::BTreeMap;

use log::{debug, warn};

use crate::{
    CuriosityRule, FireDangerRule, FleeReaction, GawkReaction, Reaction, ReactionError,
    ReactionRule, RuleParams, RuleResult, ThreatProximityRule,
};

/// Builds a rule from its parameters.  Gets the registry so the rule can
/// build the reaction it owns.
pub type RuleFactory = fn(&RuleParams, &ReactionRegistry) -> RuleResult<Box<dyn ReactionRule>>;

/// Builds a reaction from its parameters.
pub type ReactionFactory = fn(&RuleParams) -> RuleResult<Box<dyn Reaction>>;

#[derive(Clone, Debug, Default)]
pub struct ReactionRegistry {
    rules:     BTreeMap<String, RuleFactory>,
    reactions: BTreeMap<String, ReactionFactory>,
    installed: bool,
}

impl ReactionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule type.  A name registered twice keeps its first
    /// factory and the second call fails with `DuplicateType`.
    pub fn register_rule(&mut self, name: &str, factory: RuleFactory) -> RuleResult<()> {
        if self.rules.contains_key(name) {
            warn!("reaction rule type {name:?} registered twice; keeping the first registration");
            return Err(ReactionError::DuplicateType { kind: "rule", name: name.to_owned() });
        }
        self.rules.insert(name.to_owned(), factory);
        Ok(())
    }

    /// Register a reaction type.  Same duplicate policy as rules.
    pub fn register_reaction(&mut self, name: &str, factory: ReactionFactory) -> RuleResult<()> {
        if self.reactions.contains_key(name) {
            warn!("reaction type {name:?} registered twice; keeping the first registration");
            return Err(ReactionError::DuplicateType { kind: "reaction", name: name.to_owned() });
        }
        self.reactions.insert(name.to_owned(), factory);
        Ok(())
    }

    pub fn create_rule(&self, name: &str, params: &RuleParams) -> RuleResult<Box<dyn ReactionRule>> {
        let factory = self
            .rules
            .get(name)
            .ok_or_else(|| ReactionError::UnknownRuleType(name.to_owned()))?;
        factory(params, self)
    }

    pub fn create_reaction(&self, name: &str, params: &RuleParams) -> RuleResult<Box<dyn Reaction>> {
        let factory = self
            .reactions
            .get(name)
            .ok_or_else(|| ReactionError::UnknownReactionType(name.to_owned()))?;
        factory(params)
    }

    /// Registered rule type names, sorted.
    pub fn rule_types(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Registered reaction type names, sorted.
    pub fn reaction_types(&self) -> impl Iterator<Item = &str> {
        self.reactions.keys().map(String::as_str)
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// `true` once [`install_reactions_and_reaction_rules`] has run.
    pub fn is_installed(&self) -> bool {
        self.installed
    }
}

/// Register every built-in rule and reaction type.
///
/// Must run before any rule table is deserialized.  Calling it again is a
/// no-op; returns `true` only on the call that did the installing.
pub fn install_reactions_and_reaction_rules(registry: &mut ReactionRegistry) -> bool {
    if registry.installed {
        debug!("reaction registry already installed");
        return false;
    }

    let reactions: [(&str, ReactionFactory); 2] = [
        (FleeReaction::TYPE_NAME, FleeReaction::from_params),
        (GawkReaction::TYPE_NAME, GawkReaction::from_params),
    ];
    let rules: [(&str, RuleFactory); 3] = [
        (FireDangerRule::TYPE_NAME,      FireDangerRule::from_params),
        (ThreatProximityRule::TYPE_NAME, ThreatProximityRule::from_params),
        (CuriosityRule::TYPE_NAME,       CuriosityRule::from_params),
    ];

    // A content type registered earlier under a built-in name wins; the
    // duplicate is already logged by `register_*`.
    for (name, factory) in reactions {
        let _ = registry.register_reaction(name, factory);
    }
    for (name, factory) in rules {
        let _ = registry.register_rule(name, factory);
    }

    registry.installed = true;
    debug!(
        "installed {} reaction rule types and {} reaction types",
        registry.rules.len(),
        registry.reactions.len(),
    );
    true
}
