//! The `Reaction` trait and the built-in reactions.

use std::fmt;

use em_core::{EntityId, Position};

use crate::params::check_distance;
use crate::{Directive, EvaluationParameters, RuleParams, RuleResult};

/// Turns "react to `target`" into a concrete [`Directive`].
///
/// Reactions are chosen by name (the `reaction` rule parameter) and built
/// by the registry from the same parameter map as the rule owning them.
pub trait Reaction: Send + Sync + 'static {
    /// Registry name, e.g. `"flee"`.
    fn type_name(&self) -> &'static str;

    /// Produce the directive for reacting to `target` standing at
    /// `target_position`.
    fn react(
        &self,
        params:          &EvaluationParameters<'_>,
        target:          EntityId,
        target_position: Position,
    ) -> Directive;

    /// Parameters needed to rebuild this reaction through the registry.
    fn parameters(&self) -> RuleParams;

    fn clone_box(&self) -> Box<dyn Reaction>;
}

impl Clone for Box<dyn Reaction> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

impl fmt::Debug for dyn Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reaction")
            .field("type", &self.type_name())
            .field("parameters", &self.parameters())
            .finish()
    }
}

// ── FleeReaction ──────────────────────────────────────────────────────────────

/// Run `distance` metres directly away from the target.
#[derive(Clone, Debug, PartialEq)]
pub struct FleeReaction {
    pub distance: f32,
}

impl FleeReaction {
    pub const TYPE_NAME: &'static str = "flee";
    pub const DISTANCE_KEY: &'static str = "flee_distance";
    pub const DEFAULT_DISTANCE: f32 = 25.0;

    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    pub fn from_params(params: &RuleParams) -> RuleResult<Box<dyn Reaction>> {
        let distance = params.get_f32_or(Self::DISTANCE_KEY, Self::DEFAULT_DISTANCE)?;
        Ok(Box::new(Self::new(check_distance(Self::DISTANCE_KEY, distance, false)?)))
    }
}

impl Reaction for FleeReaction {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn react(&self, params: &EvaluationParameters<'_>, target: EntityId, target_position: Position) -> Directive {
        Directive::Flee {
            threat:      target,
            destination: params.position.away_from(target_position, self.distance),
        }
    }

    fn parameters(&self) -> RuleParams {
        RuleParams::new().with(Self::DISTANCE_KEY, self.distance)
    }

    fn clone_box(&self) -> Box<dyn Reaction> {
        Box::new(self.clone())
    }
}

// ── GawkReaction ──────────────────────────────────────────────────────────────

/// Walk towards the target and stop `distance` metres short to watch.
#[derive(Clone, Debug, PartialEq)]
pub struct GawkReaction {
    pub distance: f32,
}

impl GawkReaction {
    pub const TYPE_NAME: &'static str = "gawk";
    pub const DISTANCE_KEY: &'static str = "watch_distance";
    pub const DEFAULT_DISTANCE: f32 = 8.0;

    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    pub fn from_params(params: &RuleParams) -> RuleResult<Box<dyn Reaction>> {
        let distance = params.get_f32_or(Self::DISTANCE_KEY, Self::DEFAULT_DISTANCE)?;
        Ok(Box::new(Self::new(check_distance(Self::DISTANCE_KEY, distance, true)?)))
    }
}

impl Reaction for GawkReaction {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn react(&self, params: &EvaluationParameters<'_>, target: EntityId, target_position: Position) -> Directive {
        Directive::Gawk {
            target,
            stand_at: params.position.short_of(target_position, self.distance),
        }
    }

    fn parameters(&self) -> RuleParams {
        RuleParams::new().with(Self::DISTANCE_KEY, self.distance)
    }

    fn clone_box(&self) -> Box<dyn Reaction> {
        Box::new(self.clone())
    }
}
