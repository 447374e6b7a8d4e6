//! Fluent builder for constructing an [`AiPass`].

use em_core::{AiConfig, EntityRng, Tag, Tick};
use em_reaction::ReactionRulesTable;
use em_sense::EntityStore;
use em_steer::{Navigator, PathPlanner, StraightLinePlanner};

use crate::{AiPass, DispatchError, DispatchResult, ReactionComponent};

/// Fluent builder for [`AiPass<P>`].
///
/// # Required inputs
///
/// - [`AiConfig`]: seed, perception radius, path spacing, …
/// - [`EntityStore`]: from [`em_sense::EntityStoreBuilder`]
/// - A template [`ReactionRulesTable`], cloned into every entity's
///   component (typically from [`em_reaction::load_table_or_empty`])
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                                        |
/// |------------------------|------------------------------------------------|
/// | `.components(v)`       | `ReactionComponent::from_template` per entity  |
/// | `.disable_tagged(tag)` | every component enabled                        |
/// | `.speeds(c, a)`        | `Navigator::DEFAULT_CRUISE_SPEED`, stop at end |
/// | `.planner(p)`          | `StraightLinePlanner` at `config.path_spacing` |
///
/// # Example
///
/// ```rust,ignore
/// let mut pass = AiPassBuilder::new(config, store, template)
///     .disable_tagged(Tag::new(Tag::FIRE_DANGER))
///     .speeds(4.0, 0.0)
///     .build()?;
/// ```
pub struct AiPassBuilder<P: PathPlanner = StraightLinePlanner> {
    config:         AiConfig,
    store:          EntityStore,
    template:       ReactionRulesTable,
    components:     Option<Vec<ReactionComponent>>,
    disabled_tags:  Vec<Tag>,
    cruise_speed:   f32,
    arrival_speed:  f32,
    planner:        P,
}

impl AiPassBuilder<StraightLinePlanner> {
    /// Create a builder with all required inputs.
    pub fn new(config: AiConfig, store: EntityStore, template: ReactionRulesTable) -> Self {
        Self {
            store,
            template,
            components:    None,
            disabled_tags: Vec::new(),
            cruise_speed:  Navigator::DEFAULT_CRUISE_SPEED,
            arrival_speed: 0.0,
            planner:       StraightLinePlanner::new(config.path_spacing),
            config,
        }
    }
}

impl<P: PathPlanner> AiPassBuilder<P> {
    /// Supply per-entity components (must be length `store.count`),
    /// replacing the template for every entity.
    pub fn components(mut self, components: Vec<ReactionComponent>) -> Self {
        self.components = Some(components);
        self
    }

    /// Disable the components of entities carrying `tag` at build time.
    /// Hazards and threats usually should not react to each other.
    pub fn disable_tagged(mut self, tag: Tag) -> Self {
        self.disabled_tags.push(tag);
        self
    }

    /// Navigator speeds for every entity.
    pub fn speeds(mut self, cruise_speed: f32, arrival_speed: f32) -> Self {
        self.cruise_speed = cruise_speed;
        self.arrival_speed = arrival_speed;
        self
    }

    /// Replace the path planner.
    pub fn planner<Q: PathPlanner>(self, planner: Q) -> AiPassBuilder<Q> {
        AiPassBuilder {
            config:        self.config,
            store:         self.store,
            template:      self.template,
            components:    self.components,
            disabled_tags: self.disabled_tags,
            cruise_speed:  self.cruise_speed,
            arrival_speed: self.arrival_speed,
            planner,
        }
    }

    /// Validate inputs, seed per-entity state, and return a ready-to-run
    /// [`AiPass`].
    pub fn build(self) -> DispatchResult<AiPass<P>> {
        self.config.validate().map_err(DispatchError::Config)?;
        if !(self.cruise_speed.is_finite() && self.cruise_speed >= 0.0)
            || !(self.arrival_speed.is_finite() && self.arrival_speed >= 0.0)
        {
            return Err(DispatchError::Config(format!(
                "navigator speeds ({}, {}) must be finite and non-negative",
                self.cruise_speed, self.arrival_speed,
            )));
        }

        let count = self.store.count;

        // ── Validate and resolve optional inputs ──────────────────────────
        let mut components = match self.components {
            Some(c) => {
                if c.len() != count {
                    return Err(DispatchError::EntityCountMismatch {
                        expected: count,
                        got:      c.len(),
                        what:     "reaction components",
                    });
                }
                c
            }
            None => vec![ReactionComponent::from_template(&self.template); count],
        };

        for tag in &self.disabled_tags {
            for entity in self.store.entity_ids() {
                if self.store.has_tag(entity, tag) {
                    components[entity.index()].enabled = false;
                }
            }
        }

        // ── Per-entity state ──────────────────────────────────────────────
        let navigators = self
            .store
            .entity_ids()
            .map(|e| Navigator::new(e).with_speeds(self.cruise_speed, self.arrival_speed))
            .collect();
        let rngs = self
            .store
            .entity_ids()
            .map(|e| EntityRng::new(self.config.seed, e))
            .collect();

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            None => None,
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| DispatchError::Config(format!("thread pool: {e}")))?,
            ),
        };

        Ok(AiPass {
            config:       self.config,
            current_tick: Tick::ZERO,
            store:        self.store,
            components,
            navigators,
            rngs,
            directives:   vec![None; count],
            planner:      self.planner,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
