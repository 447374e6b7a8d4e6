//! Built-in reaction rules for civilians.

mod curiosity;
mod fire_danger;
mod threat_proximity;

pub use curiosity::CuriosityRule;
pub use fire_danger::FireDangerRule;
pub use threat_proximity::ThreatProximityRule;

use crate::{Reaction, ReactionError, ReactionRegistry, RuleParams, RuleResult};

/// Parameter key naming the reaction a rule triggers.
pub(crate) const REACTION_KEY: &str = "reaction";
/// Parameter key naming the tag a rule watches.
pub(crate) const TAG_KEY: &str = "tag";

/// How a rule picks one target among several sensed candidates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TargetSelection {
    /// Uniformly at random, from the acting entity's RNG.
    #[default]
    Random,
    /// The closest candidate; ties go to the lower `EntityId`.
    Nearest,
}

impl TargetSelection {
    pub const KEY: &'static str = "selection";

    pub fn as_str(self) -> &'static str {
        match self {
            TargetSelection::Random  => "random",
            TargetSelection::Nearest => "nearest",
        }
    }

    pub(crate) fn from_params(params: &RuleParams) -> RuleResult<Self> {
        match params.get_str_or(Self::KEY, "random")? {
            "random"  => Ok(TargetSelection::Random),
            "nearest" => Ok(TargetSelection::Nearest),
            other => Err(ReactionError::InvalidParameter {
                key:    Self::KEY.to_owned(),
                reason: format!("expected \"random\" or \"nearest\", got {other:?}"),
            }),
        }
    }
}

/// Build the reaction named by the `reaction` parameter.
pub(crate) fn reaction_from_params(
    params:   &RuleParams,
    registry: &ReactionRegistry,
    default:  &str,
) -> RuleResult<Box<dyn Reaction>> {
    let name = params.get_str_or(REACTION_KEY, default)?;
    registry.create_reaction(name, params)
}

/// Common parameter tail: the reaction's name plus its own parameters.
pub(crate) fn with_reaction(mut params: RuleParams, reaction: &dyn Reaction) -> RuleParams {
    params.insert(REACTION_KEY, reaction.type_name());
    params.extend(reaction.parameters());
    params
}
