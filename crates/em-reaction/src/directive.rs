//! Directives: the behavioural output of a handled rule.

use em_core::{EntityId, Position};

/// What an entity has been told to do this tick.
///
/// Produced by a [`Reaction`][crate::Reaction] when its rule handles the
/// situation, and consumed by the AI pass, which plans a path to
/// [`destination`][Self::destination].  Whether the entity is "currently
/// fleeing" across ticks is the behaviour system's business, not the
/// directive's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Directive {
    /// Run from `threat` towards `destination`.
    Flee {
        threat:      EntityId,
        destination: Position,
    },

    /// Walk to `stand_at` and watch `target`.
    Gawk {
        target:   EntityId,
        stand_at: Position,
    },
}

impl Directive {
    /// The position steering should head for.
    pub fn destination(&self) -> Position {
        match *self {
            Directive::Flee { destination, .. } => destination,
            Directive::Gawk { stand_at, .. } => stand_at,
        }
    }

    /// The entity the directive reacts to.
    pub fn subject(&self) -> EntityId {
        match *self {
            Directive::Flee { threat, .. } => threat,
            Directive::Gawk { target, .. } => target,
        }
    }

    /// Short label, useful in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::Flee { .. } => "flee",
            Directive::Gawk { .. } => "gawk",
        }
    }
}

impl std::fmt::Display for Directive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} → {}", self.as_str(), self.subject(), self.destination())
    }
}
