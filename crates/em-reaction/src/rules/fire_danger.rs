use em_core::{EntityRng, Tag};

use super::{reaction_from_params, with_reaction, TargetSelection, TAG_KEY};
use crate::{
    Directive, EvaluationParameters, FleeReaction, Reaction, ReactionRegistry, ReactionRule,
    RuleParams, RuleResult,
};

/// Civilians react to sensed fire hazards, fleeing by default.
///
/// Handles whenever at least one live entity tagged `tag` is sensed.  With
/// several fires in view, `selection` decides which one the reaction is
/// aimed at.
///
/// | Parameter   | Default         |
/// |-------------|-----------------|
/// | `tag`       | `"fire_danger"` |
/// | `selection` | `"random"`      |
/// | `reaction`  | `"flee"`        |
#[derive(Clone, Debug)]
pub struct FireDangerRule {
    pub tag:       Tag,
    pub selection: TargetSelection,
    pub reaction:  Box<dyn Reaction>,
}

impl FireDangerRule {
    pub const TYPE_NAME: &'static str = "FireDangerRule";

    pub fn new(selection: TargetSelection, reaction: Box<dyn Reaction>) -> Self {
        Self { tag: Tag::new(Tag::FIRE_DANGER), selection, reaction }
    }

    /// Flee `distance` metres from a randomly chosen fire.
    pub fn fleeing(distance: f32) -> Self {
        Self::new(TargetSelection::Random, Box::new(FleeReaction::new(distance)))
    }

    pub fn from_params(params: &RuleParams, registry: &ReactionRegistry) -> RuleResult<Box<dyn ReactionRule>> {
        Ok(Box::new(Self {
            tag:       params.get_tag_or(TAG_KEY, Tag::FIRE_DANGER)?,
            selection: TargetSelection::from_params(params)?,
            reaction:  reaction_from_params(params, registry, FleeReaction::TYPE_NAME)?,
        }))
    }
}

impl ReactionRule for FireDangerRule {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn evaluate(&self, params: &EvaluationParameters<'_>, rng: &mut EntityRng) -> RuleResult<Option<Directive>> {
        let fires = params.located_with_tag(&self.tag);
        let chosen = match self.selection {
            TargetSelection::Random => rng.choose(&fires).copied(),
            TargetSelection::Nearest => fires
                .iter()
                .copied()
                .min_by(|a, b| {
                    params.position.distance_squared(a.1)
                        .total_cmp(&params.position.distance_squared(b.1))
                }),
        };

        Ok(chosen.map(|(fire, at)| self.reaction.react(params, fire, at)))
    }

    fn parameters(&self) -> RuleParams {
        let own = RuleParams::new()
            .with(TAG_KEY, self.tag.as_str())
            .with(TargetSelection::KEY, self.selection.as_str());
        with_reaction(own, self.reaction.as_ref())
    }

    fn clone_box(&self) -> Box<dyn ReactionRule> {
        Box::new(self.clone())
    }
}
