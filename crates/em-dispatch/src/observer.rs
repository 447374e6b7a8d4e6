//! AI pass observer trait for diagnostics and data collection.

use em_core::{EntityId, Tick};
use em_steer::RepairOutcome;

use crate::{Dispatched, RuleFault, TickReport};

/// Callbacks invoked by [`AiPass::tick`][crate::AiPass::tick].
///
/// All methods default to no-ops so implementors only override what they
/// care about.  Hooks run on the calling thread, in the sequential apply
/// phase, so implementations need not be `Sync`.
///
/// # Example: reaction logger
///
/// ```rust,ignore
/// struct ReactionLog(Vec<String>);
///
/// impl AiObserver for ReactionLog {
///     fn on_reaction(&mut self, tick: Tick, reaction: &Dispatched) {
///         self.0.push(format!("{tick} {}: {}", reaction.entity, reaction.directive));
///     }
/// }
/// ```
pub trait AiObserver {
    /// Called at the very start of each tick, before any evaluation.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per entity whose table produced a reaction, in ascending
    /// `EntityId` order.
    fn on_reaction(&mut self, _tick: Tick, _reaction: &Dispatched) {}

    /// Called once per rule that errored or panicked.
    fn on_rule_fault(&mut self, _tick: Tick, _fault: &RuleFault) {}

    /// Called when collision repair modified a freshly planned path.
    fn on_path_repaired(&mut self, _tick: Tick, _entity: EntityId, _outcome: RepairOutcome) {}

    /// Called at the end of each tick with its summary.
    fn on_tick_end(&mut self, _tick: Tick, _report: &TickReport) {}
}

/// An [`AiObserver`] that does nothing.
pub struct NoopObserver;

impl AiObserver for NoopObserver {}
