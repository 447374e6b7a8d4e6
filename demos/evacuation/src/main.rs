//! evacuation: a plaza full of civilians reacting to a fire, a gangster and
//! a street incident.
//!
//! Civilians stand on a grid.  A fire breaks out on the east side, a gangster
//! loiters to the west, and an incident draws onlookers to the south.  Parked
//! vans are dynamic obstacles that collision repair has to steer around.
//!
//! Usage:
//!
//! ```text
//! evacuation                      # embedded rule table
//! evacuation path/to/rules.ron    # rule table from disk (.json or .ron)
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use em_collision::ObstacleField;
use em_core::{AiConfig, EntityId, ObstacleId, Position, Tag, Tick};
use em_dispatch::{AiObserver, AiPassBuilder, Dispatched, RuleFault, TickReport};
use em_reaction::{
    deserialize_str, install_reactions_and_reaction_rules, load_table_or_empty, serialize_to_string,
    JsonCodec, ReactionRegistry, ReactionRulesTable, RonCodec,
};
use em_sense::{EntityStoreBuilder, SensedEntityRegistry};
use em_steer::RepairOutcome;

// ── Constants ─────────────────────────────────────────────────────────────────

const GRID_SIDE:    usize = 8;
const GRID_SPACING: f32   = 6.0; // metres between civilians

// Partial config; everything else keeps its default.
const CONFIG_JSON: &str = r#"{
    "seed": 42,
    "total_ticks": 3,
    "perception_radius": 30.0,
    "clearance": 0.5,
    "path_spacing": 2.0
}"#;

// Fleeing fire beats running from the gangster, which beats gawking.
const RULES_JSON: &str = r#"{
    "rules": [
        { "type": "FireDangerRule", "priority": 1,
          "parameters": { "selection": "nearest", "flee_distance": 35.0 } },
        { "type": "ThreatProximityRule", "priority": 2,
          "parameters": { "radius": 12.0, "flee_distance": 20.0 } },
        { "type": "CuriosityRule", "priority": 5,
          "parameters": { "chance": 0.3, "watch_distance": 6.0 } }
    ]
}"#;

// ── Observer ──────────────────────────────────────────────────────────────────

/// Tallies reactions by rule type and repairs by outcome.
#[derive(Default)]
struct Tally {
    by_rule:   BTreeMap<&'static str, usize>,
    truncated: usize,
    blocked:   usize,
    faults:    usize,
}

impl AiObserver for Tally {
    fn on_reaction(&mut self, _tick: Tick, reaction: &Dispatched) {
        *self.by_rule.entry(reaction.rule_type).or_default() += 1;
    }

    fn on_rule_fault(&mut self, tick: Tick, fault: &RuleFault) {
        self.faults += 1;
        eprintln!("{tick} {}: {} faulted: {}", fault.entity, fault.rule_type, fault.reason);
    }

    fn on_path_repaired(&mut self, _tick: Tick, _entity: EntityId, outcome: RepairOutcome) {
        match outcome {
            RepairOutcome::Truncated { .. } => self.truncated += 1,
            RepairOutcome::Blocked { .. } => self.blocked += 1,
            RepairOutcome::Empty | RepairOutcome::Unchanged => {}
        }
    }

    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        println!(
            "{tick}: evaluated {:>3}  reactions {:>3}  repairs {:>2}",
            report.evaluated,
            report.reactions.len(),
            report.repairs,
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== evacuation: reaction core demo ===");

    // 1. Config.
    let config: AiConfig = serde_json::from_str(CONFIG_JSON)?;
    println!(
        "Seed: {}  |  Ticks: {}  |  Perception radius: {} m",
        config.seed, config.total_ticks, config.perception_radius
    );

    // 2. Registry and rule table.
    let mut registry = ReactionRegistry::new();
    install_reactions_and_reaction_rules(&mut registry);

    let template = match std::env::args().nth(1) {
        Some(path) => load_table_or_empty(Path::new(&path), &registry),
        None => {
            let mut table = ReactionRulesTable::new();
            let report = deserialize_str(&mut table, RULES_JSON, &JsonCodec, true, &registry)?;
            println!("Loaded {} rules ({} skipped)", report.loaded, report.skipped.len());
            table
        }
    };
    println!("Rule order: {:?}", template.rule_types());
    println!();

    // 3. Entities: civilians on a grid, then the hazards.
    let fire     = Tag::new(Tag::FIRE_DANGER);
    let gangster = Tag::new(Tag::GANGSTER);
    let incident = Tag::new(Tag::INCIDENT);

    let mut builder = EntityStoreBuilder::with_capacity(GRID_SIDE * GRID_SIDE + 3);
    for row in 0..GRID_SIDE {
        for col in 0..GRID_SIDE {
            builder = builder.spawn(Position::new(col as f32 * GRID_SPACING, row as f32 * GRID_SPACING), &[]);
        }
    }
    let extent = (GRID_SIDE - 1) as f32 * GRID_SPACING;
    let store = builder
        .spawn(Position::new(extent + 4.0, extent / 2.0), &[fire.clone()])
        .spawn(Position::new(-6.0, extent / 2.0), &[gangster.clone()])
        .spawn(Position::new(extent / 2.0, -15.0), &[incident.clone()])
        .build();
    println!("Entities: {} ({} civilians)", store.count, GRID_SIDE * GRID_SIDE);

    // 4. Parked vans on the west side, where civilians flee the fire to.
    let mut vans = ObstacleField::new(config.clearance);
    for (i, y) in [6.0_f32, 18.0, 30.0].into_iter().enumerate() {
        vans.insert(ObstacleId(i as u32), Position::new(-30.0, y), 2.5)?;
    }
    println!("Obstacles: {} vans", vans.len());
    println!();

    // 5. Build the pass; hazards do not react.
    let mut pass = AiPassBuilder::new(config, store, template)
        .disable_tagged(fire)
        .disable_tagged(gangster)
        .disable_tagged(incident)
        .speeds(4.0, 0.0)
        .build()?;

    // 6. Perceive once and run.
    let mut sensed = SensedEntityRegistry::new();
    let pairs = pass.perceive(&mut sensed);
    println!("Perception: {pairs} sensed pairs");

    let mut tally = Tally::default();
    let t0 = Instant::now();
    pass.run(&sensed, Some(&vans), &mut tally);
    let elapsed = t0.elapsed();

    // 7. Summary.
    println!();
    println!("AI pass complete in {:.3} ms", elapsed.as_secs_f64() * 1_000.0);
    for (rule, count) in &tally.by_rule {
        println!("  {rule:<20} {count:>4} reactions");
    }
    println!("  repairs: {} truncated, {} blocked; faults: {}", tally.truncated, tally.blocked, tally.faults);
    println!();

    println!("{:<8} {:<28} {:<8}", "Entity", "Directive", "Path");
    println!("{}", "-".repeat(46));
    for entity in pass.store.entity_ids().take(GRID_SIDE) {
        let directive = pass
            .directive(entity)?
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into());
        let points = pass.navigator(entity)?.path.len();
        println!("{:<8} {:<28} {:<8}", entity.to_string(), directive, points);
    }
    println!();

    // 8. The same table in RON, ready to be edited and passed back in.
    println!("{}", serialize_to_string(&pass.components[0].table, &RonCodec)?);

    Ok(())
}
