use em_core::{EntityRng, Tag};

use super::{reaction_from_params, with_reaction, TAG_KEY};
use crate::{
    Directive, EvaluationParameters, GawkReaction, Reaction, ReactionError, ReactionRegistry,
    ReactionRule, RuleParams, RuleResult,
};

/// Bystanders drift towards an incident to watch, with probability `chance`
/// per tick while the incident is sensed.
///
/// Usually placed below the danger rules in a table so that fleeing always
/// wins over gawking.
///
/// | Parameter  | Default      |
/// |------------|--------------|
/// | `tag`      | `"incident"` |
/// | `chance`   | `0.5`        |
/// | `reaction` | `"gawk"`     |
#[derive(Clone, Debug)]
pub struct CuriosityRule {
    pub tag:      Tag,
    pub chance:   f64,
    pub reaction: Box<dyn Reaction>,
}

impl CuriosityRule {
    pub const TYPE_NAME: &'static str = "CuriosityRule";
    pub const CHANCE_KEY: &'static str = "chance";
    pub const DEFAULT_CHANCE: f64 = 0.5;

    pub fn new(chance: f64, reaction: Box<dyn Reaction>) -> Self {
        Self { tag: Tag::new(Tag::INCIDENT), chance, reaction }
    }

    pub fn from_params(params: &RuleParams, registry: &ReactionRegistry) -> RuleResult<Box<dyn ReactionRule>> {
        let chance = params.get_f64_or(Self::CHANCE_KEY, Self::DEFAULT_CHANCE)?;
        if !(0.0..=1.0).contains(&chance) {
            return Err(ReactionError::InvalidParameter {
                key:    Self::CHANCE_KEY.to_owned(),
                reason: format!("{chance} is not a probability in [0, 1]"),
            });
        }
        Ok(Box::new(Self {
            tag:      params.get_tag_or(TAG_KEY, Tag::INCIDENT)?,
            chance,
            reaction: reaction_from_params(params, registry, GawkReaction::TYPE_NAME)?,
        }))
    }
}

impl ReactionRule for CuriosityRule {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn evaluate(&self, params: &EvaluationParameters<'_>, rng: &mut EntityRng) -> RuleResult<Option<Directive>> {
        let Some((target, at, _)) = params.nearest_with_tag(&self.tag) else {
            return Ok(None);
        };
        if !rng.gen_bool(self.chance) {
            return Ok(None);
        }
        Ok(Some(self.reaction.react(params, target, at)))
    }

    fn parameters(&self) -> RuleParams {
        let own = RuleParams::new()
            .with(TAG_KEY, self.tag.as_str())
            .with(Self::CHANCE_KEY, self.chance);
        with_reaction(own, self.reaction.as_ref())
    }

    fn clone_box(&self) -> Box<dyn ReactionRule> {
        Box::new(self.clone())
    }
}
