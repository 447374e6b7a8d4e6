use em_core::{EntityRng, Tag};

use super::{reaction_from_params, with_reaction, TAG_KEY};
use crate::params::check_distance;
use crate::{
    Directive, EvaluationParameters, FleeReaction, Reaction, ReactionRegistry, ReactionRule,
    RuleParams, RuleResult,
};

/// Civilians react to a threatening entity (a gangster) once it comes
/// within `radius` metres.
///
/// Sensing alone is not enough: a gangster seen across the square does not
/// trigger a reaction, one closing in does.  The reaction targets the
/// nearest threat.
///
/// | Parameter  | Default      |
/// |------------|--------------|
/// | `tag`      | `"gangster"` |
/// | `radius`   | `15.0`       |
/// | `reaction` | `"flee"`     |
#[derive(Clone, Debug)]
pub struct ThreatProximityRule {
    pub tag:      Tag,
    pub radius:   f32,
    pub reaction: Box<dyn Reaction>,
}

impl ThreatProximityRule {
    pub const TYPE_NAME: &'static str = "ThreatProximityRule";
    pub const RADIUS_KEY: &'static str = "radius";
    pub const DEFAULT_RADIUS: f32 = 15.0;

    pub fn new(radius: f32, reaction: Box<dyn Reaction>) -> Self {
        Self { tag: Tag::new(Tag::GANGSTER), radius, reaction }
    }

    pub fn from_params(params: &RuleParams, registry: &ReactionRegistry) -> RuleResult<Box<dyn ReactionRule>> {
        let radius = params.get_f32_or(Self::RADIUS_KEY, Self::DEFAULT_RADIUS)?;
        Ok(Box::new(Self {
            tag:      params.get_tag_or(TAG_KEY, Tag::GANGSTER)?,
            radius:   check_distance(Self::RADIUS_KEY, radius, true)?,
            reaction: reaction_from_params(params, registry, FleeReaction::TYPE_NAME)?,
        }))
    }
}

impl ReactionRule for ThreatProximityRule {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn evaluate(&self, params: &EvaluationParameters<'_>, _rng: &mut EntityRng) -> RuleResult<Option<Directive>> {
        Ok(params
            .nearest_with_tag(&self.tag)
            .filter(|&(_, _, distance)| distance <= self.radius)
            .map(|(threat, at, _)| self.reaction.react(params, threat, at)))
    }

    fn parameters(&self) -> RuleParams {
        let own = RuleParams::new()
            .with(TAG_KEY, self.tag.as_str())
            .with(Self::RADIUS_KEY, self.radius);
        with_reaction(own, self.reaction.as_ref())
    }

    fn clone_box(&self) -> Box<dyn ReactionRule> {
        Box::new(self.clone())
    }
}
