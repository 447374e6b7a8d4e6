//! The `AiPass` struct and its per-tick update.

use log::debug;

use em_collision::{CollisionFacade, CollisionTester};
use em_core::{AiConfig, EmError, EntityId, EntityRng, Tick};
use em_reaction::{Directive, EvaluationParameters};
use em_sense::{perceive_within_radius, EntityStore, SensedEntities, SensedEntityRegistry};
use em_steer::{repair_path, Navigator, PathPlanner};

use crate::{dispatch, AiObserver, DispatchError, DispatchResult, Dispatched, ReactionComponent, RuleFault};

/// Summary of one AI pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub tick:      Tick,
    /// Entities whose rule tables were evaluated.
    pub evaluated: usize,
    /// Reactions applied this tick, in ascending `EntityId` order.
    pub reactions: Vec<Dispatched>,
    /// Rules that errored or panicked, in ascending `EntityId` order.
    pub faults:    Vec<RuleFault>,
    /// Freshly planned paths that collision repair had to modify.
    pub repairs:   usize,
}

/// One entity's output of the reaction phase.
type Evaluation = (Option<Dispatched>, Vec<RuleFault>);

/// Per-tick AI update for a population of entities.
///
/// Each tick runs two phases:
///
/// 1. **Reaction phase** (optionally parallel with the `parallel` feature):
///    every live entity with an active [`ReactionComponent`] evaluates its
///    table against the read-only entity store and sensed-entity registry.
///    The phase only reads shared state and writes each entity's own RNG.
/// 2. **Apply phase** (sequential, ascending `EntityId` for determinism):
///    for each reaction, record the directive, plan a path to its
///    destination, repair the path against the collision tester, and hand
///    it to the entity's [`Navigator`].
///
/// Create via [`AiPassBuilder`][crate::AiPassBuilder].
pub struct AiPass<P: PathPlanner> {
    pub config: AiConfig,

    /// The next tick to run.
    pub current_tick: Tick,

    /// Entity positions, tags and liveness.  Callers move and despawn
    /// entities between ticks; rules only ever read it.
    pub store: EntityStore,

    /// Per-entity reaction tables, indexed by `EntityId`.
    pub components: Vec<ReactionComponent>,

    /// Per-entity steering state, indexed by `EntityId`.
    pub navigators: Vec<Navigator>,

    /// Per-entity deterministic RNGs, indexed by `EntityId`.
    pub rngs: Vec<EntityRng>,

    /// Most recent directive per entity, indexed by `EntityId`.
    pub directives: Vec<Option<Directive>>,

    /// Turns a directive's destination into a path.
    pub planner: P,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<P: PathPlanner> AiPass<P> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Rebuild `registry` from the built-in radius perception over the
    /// current store.  Returns the number of `(observer, sensed)` pairs.
    pub fn perceive(&self, registry: &mut SensedEntityRegistry) -> usize {
        perceive_within_radius(&self.store, self.config.perception_radius, registry)
    }

    /// Run ticks from the current one up to `config.end_tick()`.
    pub fn run<O: AiObserver>(
        &mut self,
        sensed:   &dyn SensedEntities,
        tester:   Option<&dyn CollisionTester>,
        observer: &mut O,
    ) -> Vec<TickReport> {
        let mut reports = Vec::new();
        while self.current_tick < self.config.end_tick() {
            reports.push(self.tick(sensed, tester, observer));
        }
        reports
    }

    /// Run exactly `n` ticks from the current one (ignores `end_tick`).
    pub fn run_ticks<O: AiObserver>(
        &mut self,
        n:        u64,
        sensed:   &dyn SensedEntities,
        tester:   Option<&dyn CollisionTester>,
        observer: &mut O,
    ) -> Vec<TickReport> {
        (0..n).map(|_| self.tick(sensed, tester, observer)).collect()
    }

    /// Run one AI pass and advance the tick.
    ///
    /// `tester` is the dynamic-obstacle backend used for path repair.  With
    /// `None` every point counts as blocked, so new paths collapse to their
    /// starting point.
    pub fn tick<O: AiObserver>(
        &mut self,
        sensed:   &dyn SensedEntities,
        tester:   Option<&dyn CollisionTester>,
        observer: &mut O,
    ) -> TickReport {
        let now = self.current_tick;
        observer.on_tick_start(now);

        // ── Phase 1: reaction phase (produce) ─────────────────────────────
        let evaluations = self.evaluate_reactions(now, sensed);

        let mut report = TickReport { tick: now, ..TickReport::default() };
        report.evaluated = evaluations.len();

        // ── Phase 2: apply phase (consume) ────────────────────────────────
        //
        // Evaluations arrive in ascending EntityId order whether or not the
        // reaction phase ran in parallel.
        let facade = CollisionFacade::from(tester);
        for (reaction, faults) in evaluations {
            for fault in faults {
                observer.on_rule_fault(now, &fault);
                report.faults.push(fault);
            }
            if let Some(reaction) = reaction {
                if self.apply_reaction(now, &reaction, &facade, observer) {
                    report.repairs += 1;
                }
                report.reactions.push(reaction);
            }
        }

        debug!(
            "{now}: evaluated {} entities, {} reactions, {} faults, {} repairs",
            report.evaluated,
            report.reactions.len(),
            report.faults.len(),
            report.repairs,
        );
        observer.on_tick_end(now, &report);
        self.current_tick = now.next();
        report
    }

    /// The latest directive issued to `entity`.
    pub fn directive(&self, entity: EntityId) -> DispatchResult<Option<Directive>> {
        self.directives
            .get(entity.index())
            .copied()
            .ok_or(DispatchError::Core(EmError::EntityNotFound(entity)))
    }

    /// The steering state of `entity`.
    pub fn navigator(&self, entity: EntityId) -> DispatchResult<&Navigator> {
        self.navigators
            .get(entity.index())
            .ok_or(DispatchError::Core(EmError::EntityNotFound(entity)))
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Evaluate every live entity with an active component.
    ///
    /// With the `parallel` Cargo feature this runs on Rayon's thread pool
    /// (or the pass's own pool when `config.num_threads` is set).
    fn evaluate_reactions(&mut self, now: Tick, sensed: &dyn SensedEntities) -> Vec<Evaluation> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let store      = &self.store;
        let components = self.components.as_slice();
        let rngs       = &mut self.rngs;

        let evaluate = |i: usize, rng: &mut EntityRng| -> Option<Evaluation> {
            let entity = EntityId(i as u32);
            let component = &components[i];
            if !component.is_active() {
                return None;
            }
            let position = store.position(entity)?;
            let params = EvaluationParameters::new(now, entity, position, sensed, store);
            let mut faults = Vec::new();
            let reaction = dispatch(&component.table, &params, rng, &mut faults);
            Some((reaction, faults))
        };

        #[cfg(not(feature = "parallel"))]
        {
            rngs.iter_mut()
                .enumerate()
                .filter_map(|(i, rng)| evaluate(i, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            // Each worker gets a disjoint `&mut EntityRng`; `collect` keeps
            // index order.  `run` owns the RNG borrow, so it is `FnOnce`.
            let run = move || -> Vec<Evaluation> {
                rngs.par_iter_mut()
                    .enumerate()
                    .filter_map(|(i, rng)| evaluate(i, rng))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None => run(),
            }
        }
    }

    /// Plan, repair and install the path for one reaction.  Returns `true`
    /// if repair modified the planned path.
    fn apply_reaction<O: AiObserver>(
        &mut self,
        now:      Tick,
        reaction: &Dispatched,
        facade:   &CollisionFacade<'_>,
        observer: &mut O,
    ) -> bool {
        let i = reaction.entity.index();
        self.directives[i] = Some(reaction.directive);
        observer.on_reaction(now, reaction);

        // Evaluated entities are live, so the position exists.
        let Some(from) = self.store.position(reaction.entity) else {
            return false;
        };
        let navigator = &mut self.navigators[i];
        let mut path = self.planner.plan(from, reaction.directive.destination(), navigator);
        let outcome = repair_path(navigator, &mut path, facade);
        navigator.set_path(path);

        if outcome.changed() {
            observer.on_path_repaired(now, reaction.entity, outcome);
            true
        } else {
            false
        }
    }
}
