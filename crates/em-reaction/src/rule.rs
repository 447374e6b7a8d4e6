//! The `ReactionRule` trait: the main extension point for content code.

use std::fmt;

use em_core::EntityRng;

use crate::{Directive, EvaluationParameters, RuleParams, RuleResult};

/// Decides whether an entity reacts to what it currently senses.
///
/// # Contract
///
/// - `Ok(Some(directive))`: the rule *handled* the situation.  The
///   dispatcher stops evaluating lower-priority rules and applies the
///   directive.
/// - `Ok(None)`: not handled; evaluation moves on to the next rule.
/// - `Err(_)`: the rule faulted.  The dispatcher logs it, treats it as not
///   handled, and moves on.
///
/// The directive is the rule's only effect, so a rule that does not handle
/// leaves nothing half-done behind.
///
/// # Thread safety
///
/// Tables are cloned per entity, but the dispatcher may evaluate different
/// entities on different Rayon workers, so rules must be `Send + Sync`.
/// Randomness must come from the supplied per-entity `rng`.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// struct PanicAtAnyFire;
///
/// impl ReactionRule for PanicAtAnyFire {
///     fn type_name(&self) -> &'static str { "PanicAtAnyFire" }
///
///     fn evaluate(&self, params: &EvaluationParameters<'_>, _rng: &mut EntityRng)
///         -> RuleResult<Option<Directive>>
///     {
///         let fire = Tag::new(Tag::FIRE_DANGER);
///         Ok(params.nearest_with_tag(&fire).map(|(threat, at, _)| Directive::Flee {
///             threat,
///             destination: params.position.away_from(at, 40.0),
///         }))
///     }
///
///     fn parameters(&self) -> RuleParams { RuleParams::new() }
///     fn clone_box(&self) -> Box<dyn ReactionRule> { Box::new(self.clone()) }
/// }
/// ```
pub trait ReactionRule: Send + Sync + 'static {
    /// Registry name, written to rule-table files as `type`.
    fn type_name(&self) -> &'static str;

    /// Evaluate the rule for `params.entity`.
    fn evaluate(
        &self,
        params: &EvaluationParameters<'_>,
        rng:    &mut EntityRng,
    ) -> RuleResult<Option<Directive>>;

    /// Parameters needed to rebuild this rule through the registry.
    fn parameters(&self) -> RuleParams;

    /// Deep copy, used when a table is cloned into an entity's component.
    fn clone_box(&self) -> Box<dyn ReactionRule>;

    /// `true` if the rule handles the situation.  Faults count as not handled.
    fn handle(&self, params: &EvaluationParameters<'_>, rng: &mut EntityRng) -> bool {
        matches!(self.evaluate(params, rng), Ok(Some(_)))
    }
}

impl Clone for Box<dyn ReactionRule> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Debug for dyn ReactionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactionRule")
            .field("type", &self.type_name())
            .field("parameters", &self.parameters())
            .finish()
    }
}
