//! Unit tests for em-reaction.

use em_core::{EntityId, EntityRng, Position, Tag, Tick};
use em_sense::{EntityStore, EntityStoreBuilder, SensedEntityRegistry};

use crate::*;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn fire() -> Tag {
    Tag::new(Tag::FIRE_DANGER)
}

fn gangster() -> Tag {
    Tag::new(Tag::GANGSTER)
}

fn incident() -> Tag {
    Tag::new(Tag::INCIDENT)
}

/// 0: civilian at the origin; 1: fire 10 m east; 2: fire 4 m north;
/// 3: gangster 12 m west; 4: incident 30 m south.
fn square() -> EntityStore {
    EntityStoreBuilder::new()
        .spawn(Position::new(0.0, 0.0), &[])
        .spawn(Position::new(10.0, 0.0), &[fire()])
        .spawn(Position::new(0.0, 4.0), &[fire()])
        .spawn(Position::new(-12.0, 0.0), &[gangster()])
        .spawn(Position::new(0.0, -30.0), &[incident()])
        .build()
}

fn installed() -> ReactionRegistry {
    let mut registry = ReactionRegistry::new();
    install_reactions_and_reaction_rules(&mut registry);
    registry
}

fn params<'a>(store: &'a EntityStore, sensed: &'a SensedEntityRegistry) -> EvaluationParameters<'a> {
    EvaluationParameters::new(Tick(3), EntityId(0), store.positions[0], sensed, store)
}

fn rng() -> EntityRng {
    EntityRng::new(42, EntityId(0))
}

/// A rule that handles every time with a fixed flee directive.
#[derive(Clone)]
struct AlwaysFlee;

impl ReactionRule for AlwaysFlee {
    fn type_name(&self) -> &'static str {
        "AlwaysFlee"
    }

    fn evaluate(&self, p: &EvaluationParameters<'_>, _rng: &mut EntityRng) -> RuleResult<Option<Directive>> {
        Ok(Some(Directive::Flee { threat: p.entity, destination: Position::new(1.0, 1.0) }))
    }

    fn parameters(&self) -> RuleParams {
        RuleParams::new()
    }

    fn clone_box(&self) -> Box<dyn ReactionRule> {
        Box::new(self.clone())
    }
}

fn always_flee_factory(_: &RuleParams, _: &ReactionRegistry) -> RuleResult<Box<dyn ReactionRule>> {
    Ok(Box::new(AlwaysFlee))
}

// ── Params ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod params_tests {
    use super::*;

    #[test]
    fn typed_getters_fall_back_to_defaults() {
        let p = RuleParams::new();
        assert_eq!(p.get_f32_or("radius", 15.0).unwrap(), 15.0);
        assert_eq!(p.get_str_or("reaction", "flee").unwrap(), "flee");
        assert!(p.get_bool_or("enabled", true).unwrap());
        assert_eq!(p.get_tag_or("tag", Tag::FIRE_DANGER).unwrap(), fire());
    }

    #[test]
    fn integers_are_accepted_as_floats() {
        let p = RuleParams::new().with("radius", 20_i64);
        assert_eq!(p.get_f32_or("radius", 15.0).unwrap(), 20.0);
    }

    #[test]
    fn wrong_type_is_invalid_parameter() {
        let p = RuleParams::new().with("radius", "far");
        assert!(matches!(
            p.get_f32_or("radius", 15.0),
            Err(ReactionError::InvalidParameter { key, .. }) if key == "radius"
        ));
    }

    #[test]
    fn empty_tag_is_rejected() {
        let p = RuleParams::new().with("tag", "");
        assert!(p.get_tag_or("tag", Tag::GANGSTER).is_err());
    }
}

// ── Reactions ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod reaction_tests {
    use super::*;

    #[test]
    fn flee_runs_directly_away_from_the_threat() {
        let store = square();
        let sensed = SensedEntityRegistry::new();
        let p = params(&store, &sensed);

        let d = FleeReaction::new(25.0).react(&p, EntityId(1), Position::new(10.0, 0.0));
        assert_eq!(d, Directive::Flee { threat: EntityId(1), destination: Position::new(-25.0, 0.0) });
    }

    #[test]
    fn gawk_stops_short_of_the_target() {
        let store = square();
        let sensed = SensedEntityRegistry::new();
        let p = params(&store, &sensed);

        let d = GawkReaction::new(8.0).react(&p, EntityId(4), Position::new(0.0, -30.0));
        assert_eq!(d.subject(), EntityId(4));
        assert!((d.destination().y + 22.0).abs() < 1e-4);
        assert_eq!(d.as_str(), "gawk");
    }

    #[test]
    fn flee_rejects_zero_distance() {
        let p = RuleParams::new().with(FleeReaction::DISTANCE_KEY, 0.0);
        assert!(FleeReaction::from_params(&p).is_err());
    }

    #[test]
    fn gawk_accepts_zero_distance() {
        let p = RuleParams::new().with(GawkReaction::DISTANCE_KEY, 0.0);
        assert!(GawkReaction::from_params(&p).is_ok());
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod rule_tests {
    use super::*;

    #[test]
    fn fire_rule_handles_when_fire_is_sensed() {
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), fire(), vec![EntityId(1)]);

        let rule = FireDangerRule::fleeing(25.0);
        let d = rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap();
        assert_eq!(d, Some(Directive::Flee { threat: EntityId(1), destination: Position::new(-25.0, 0.0) }));
        assert!(rule.handle(&params(&store, &sensed), &mut rng()));
    }

    #[test]
    fn fire_rule_ignores_other_tags() {
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), gangster(), vec![EntityId(3)]);

        let rule = FireDangerRule::fleeing(25.0);
        assert_eq!(rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap(), None);
    }

    #[test]
    fn no_sensed_entities_means_no_rule_handles() {
        let store = square();
        let sensed = SensedEntityRegistry::new();
        let registry = installed();

        for name in registry.rule_types() {
            let rule = registry.create_rule(name, &RuleParams::new().with("chance", 1.0)).unwrap();
            assert!(!rule.handle(&params(&store, &sensed), &mut rng()), "{name} handled with nothing sensed");
        }
    }

    #[test]
    fn fire_rule_skips_despawned_fires() {
        let mut store = square();
        store.despawn(EntityId(1));
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), fire(), vec![EntityId(1)]);

        let rule = FireDangerRule::fleeing(25.0);
        assert_eq!(rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap(), None);
    }

    #[test]
    fn nearest_selection_picks_the_closest_fire() {
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), fire(), vec![EntityId(1), EntityId(2)]);

        let rule = FireDangerRule::new(TargetSelection::Nearest, Box::new(FleeReaction::new(10.0)));
        let d = rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap().unwrap();
        assert_eq!(d.subject(), EntityId(2));
        assert_eq!(d.destination(), Position::new(0.0, -10.0));
    }

    #[test]
    fn random_selection_is_reproducible_per_entity() {
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), fire(), vec![EntityId(1), EntityId(2)]);

        let rule = FireDangerRule::fleeing(25.0);
        let a = rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap();
        let b = rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap();
        assert_eq!(a, b);
        assert!(a.is_some());
    }

    #[test]
    fn threat_rule_respects_radius() {
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), gangster(), vec![EntityId(3)]);
        let p = params(&store, &sensed);

        let near = ThreatProximityRule::new(15.0, Box::new(FleeReaction::new(20.0)));
        let far  = ThreatProximityRule::new(10.0, Box::new(FleeReaction::new(20.0)));
        assert_eq!(
            near.evaluate(&p, &mut rng()).unwrap(),
            Some(Directive::Flee { threat: EntityId(3), destination: Position::new(20.0, 0.0) })
        );
        assert_eq!(far.evaluate(&p, &mut rng()).unwrap(), None);
    }

    #[test]
    fn curiosity_chance_extremes() {
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), incident(), vec![EntityId(4)]);
        let p = params(&store, &sensed);

        let always = CuriosityRule::new(1.0, Box::new(GawkReaction::new(8.0)));
        let never  = CuriosityRule::new(0.0, Box::new(GawkReaction::new(8.0)));
        for _ in 0..20 {
            assert!(always.handle(&p, &mut rng()));
            assert!(!never.handle(&p, &mut rng()));
        }
    }

    #[test]
    fn curiosity_rejects_out_of_range_chance() {
        let registry = installed();
        let err = registry
            .create_rule(CuriosityRule::TYPE_NAME, &RuleParams::new().with("chance", 1.5))
            .unwrap_err();
        assert!(matches!(err, ReactionError::InvalidParameter { key, .. } if key == "chance"));
    }

    #[test]
    fn rule_parameters_include_the_reaction() {
        let p = FireDangerRule::fleeing(30.0).parameters();
        assert_eq!(p.get_str_or("reaction", "").unwrap(), "flee");
        assert_eq!(p.get_f32_or(FleeReaction::DISTANCE_KEY, 0.0).unwrap(), 30.0);
        assert_eq!(p.get_str_or("tag", "").unwrap(), Tag::FIRE_DANGER);
        assert_eq!(p.get_str_or("selection", "").unwrap(), "random");
    }

    #[test]
    fn rule_can_be_wired_to_another_reaction() {
        let registry = installed();
        let store = square();
        let mut sensed = SensedEntityRegistry::new();
        sensed.set(EntityId(0), fire(), vec![EntityId(1)]);

        let rule = registry
            .create_rule(FireDangerRule::TYPE_NAME, &RuleParams::new().with("reaction", "gawk"))
            .unwrap();
        let d = rule.evaluate(&params(&store, &sensed), &mut rng()).unwrap().unwrap();
        assert_eq!(d.as_str(), "gawk");
    }
}

// ── Registry ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[test]
    fn install_registers_builtins() {
        let registry = installed();
        assert!(registry.is_installed());
        let rules: Vec<&str> = registry.rule_types().collect();
        assert_eq!(rules, vec!["CuriosityRule", "FireDangerRule", "ThreatProximityRule"]);
        let reactions: Vec<&str> = registry.reaction_types().collect();
        assert_eq!(reactions, vec!["flee", "gawk"]);
    }

    #[test]
    fn install_is_idempotent() {
        let mut registry = ReactionRegistry::new();
        assert!(install_reactions_and_reaction_rules(&mut registry));
        assert!(!install_reactions_and_reaction_rules(&mut registry));
        assert_eq!(registry.rule_types().count(), 3);
    }

    #[test]
    fn duplicate_registration_keeps_the_first() {
        let mut registry = installed();
        let err = registry
            .register_rule(FireDangerRule::TYPE_NAME, always_flee_factory)
            .unwrap_err();
        assert!(matches!(err, ReactionError::DuplicateType { kind: "rule", .. }));

        let rule = registry.create_rule(FireDangerRule::TYPE_NAME, &RuleParams::new()).unwrap();
        assert_eq!(rule.type_name(), FireDangerRule::TYPE_NAME);
    }

    #[test]
    fn unknown_names_are_errors() {
        let registry = installed();
        assert!(matches!(
            registry.create_rule("NoSuchRule", &RuleParams::new()),
            Err(ReactionError::UnknownRuleType(_))
        ));
        assert!(matches!(
            registry.create_reaction("dance", &RuleParams::new()),
            Err(ReactionError::UnknownReactionType(_))
        ));
    }
}

// ── Table ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod table_tests {
    use super::*;

    #[test]
    fn iterates_in_ascending_priority() {
        let mut table = ReactionRulesTable::new();
        table.insert(5, Box::new(CuriosityRule::new(0.5, Box::new(GawkReaction::new(8.0)))));
        table.insert(1, Box::new(FireDangerRule::fleeing(25.0)));
        table.insert(3, Box::new(ThreatProximityRule::new(15.0, Box::new(FleeReaction::new(25.0)))));
        assert_eq!(table.priorities(), vec![1, 3, 5]);
        assert_eq!(table.rule_types(), vec!["FireDangerRule", "ThreatProximityRule", "CuriosityRule"]);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let table = ReactionRulesTable::new()
            .with(2, AlwaysFlee)
            .with(2, FireDangerRule::fleeing(25.0))
            .with(1, CuriosityRule::new(0.5, Box::new(GawkReaction::new(8.0))));
        assert_eq!(table.rule_types(), vec!["CuriosityRule", "AlwaysFlee", "FireDangerRule"]);
    }

    #[test]
    fn remove_type_and_clear() {
        let mut table = ReactionRulesTable::new()
            .with(1, AlwaysFlee)
            .with(2, AlwaysFlee)
            .with(3, FireDangerRule::fleeing(25.0));
        assert_eq!(table.remove_type("AlwaysFlee"), 2);
        assert_eq!(table.len(), 1);
        table.clear();
        assert!(table.is_empty());
    }

    #[test]
    fn clone_is_deep_and_equal() {
        let table = ReactionRulesTable::new().with(1, FireDangerRule::fleeing(25.0));
        let mut copy = table.clone();
        assert_eq!(copy, table);
        copy.insert(2, Box::new(AlwaysFlee));
        assert_ne!(copy, table);
        assert_eq!(table.len(), 1);
    }
}

// ── Serialization ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod serializer_tests {
    use super::*;

    use std::path::Path;

    const JSON_TABLE: &str = r#"{
        "rules": [
            { "type": "CuriosityRule", "priority": 5, "parameters": { "chance": 0.25 } },
            { "type": "FireDangerRule", "priority": 1,
              "parameters": { "reaction": "flee", "flee_distance": 40, "selection": "nearest" } },
            { "type": "ThreatProximityRule", "priority": 3 }
        ]
    }"#;

    fn sample_table() -> ReactionRulesTable {
        let registry = installed();
        let mut table = ReactionRulesTable::new();
        deserialize_str(&mut table, JSON_TABLE, &JsonCodec, true, &registry).unwrap();
        table
    }

    #[test]
    fn json_load_orders_by_priority() {
        let table = sample_table();
        assert_eq!(table.priorities(), vec![1, 3, 5]);
        assert_eq!(table.rule_types(), vec!["FireDangerRule", "ThreatProximityRule", "CuriosityRule"]);

        let fire_params = table.iter().next().unwrap().rule.parameters();
        assert_eq!(fire_params.get_f32_or(FleeReaction::DISTANCE_KEY, 0.0).unwrap(), 40.0);
        assert_eq!(fire_params.get_str_or("selection", "").unwrap(), "nearest");
    }

    #[test]
    fn json_round_trip() {
        let table = sample_table();
        let text = serialize_to_string(&table, &JsonCodec).unwrap();

        let mut reloaded = ReactionRulesTable::new();
        let report = deserialize_str(&mut reloaded, &text, &JsonCodec, true, &installed()).unwrap();
        assert!(report.is_complete());
        assert_eq!(reloaded, table);
    }

    #[test]
    fn ron_round_trip() {
        let table = sample_table();
        let text = serialize_to_string(&table, &RonCodec).unwrap();

        let mut reloaded = ReactionRulesTable::new();
        deserialize_str(&mut reloaded, &text, &RonCodec, true, &installed()).unwrap();
        assert_eq!(reloaded, table);
    }

    #[test]
    fn unknown_rule_is_skipped_and_the_rest_loads() {
        let text = r#"{ "rules": [
            { "type": "Teleport", "priority": 1 },
            { "type": "FireDangerRule", "priority": 2 },
            { "type": "CuriosityRule", "priority": 4, "parameters": { "chance": 7.0 } }
        ] }"#;
        let mut table = ReactionRulesTable::new();
        let report = deserialize_str(&mut table, text, &JsonCodec, true, &installed()).unwrap();

        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.skipped[0].index, 0);
        assert_eq!(report.skipped[0].rule_type, "Teleport");
        assert_eq!(report.skipped[1].rule_type, "CuriosityRule");
        assert_eq!(table.priorities(), vec![2]);
    }

    #[test]
    fn plugin_rule_with_nested_parameters_is_skipped() {
        let text = r#"{ "rules": [
            { "type": "FireDangerRule", "priority": 1 },
            { "type": "PluginRule", "priority": 2, "parameters": { "waypoints": [1, 2], "extra": null } }
        ] }"#;
        let mut table = ReactionRulesTable::new();
        let report = deserialize_str(&mut table, text, &JsonCodec, true, &installed()).unwrap();

        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].index, 1);
        assert_eq!(report.skipped[0].rule_type, "PluginRule");
        assert_eq!(table.rule_types(), vec!["FireDangerRule"]);
    }

    #[test]
    fn entries_with_bad_priority_or_no_type_are_skipped() {
        let text = r#"{ "rules": [
            { "type": "FireDangerRule" },
            { "type": "ThreatProximityRule", "priority": "high" },
            { "priority": 3 },
            { "type": "CuriosityRule", "priority": 4 }
        ] }"#;
        let mut table = ReactionRulesTable::new();
        let report = deserialize_str(&mut table, text, &JsonCodec, true, &installed()).unwrap();

        assert_eq!(report.loaded, 1);
        let skipped: Vec<usize> = report.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![0, 1, 2]);
        assert_eq!(report.skipped[2].rule_type, "<untyped>");
        assert_eq!(table.rule_types(), vec!["CuriosityRule"]);
        assert_eq!(table.priorities(), vec![4]);
    }

    #[test]
    fn ron_plugin_rule_with_nested_parameters_is_skipped() {
        let text = r#"(
            rules: [
                (type: "PluginRule", priority: 1, parameters: {"waypoints": [1, 2]}),
                (type: "ThreatProximityRule", priority: 2, parameters: {"radius": 9.0}),
            ],
        )"#;
        let mut table = ReactionRulesTable::new();
        let report = deserialize_str(&mut table, text, &RonCodec, true, &installed()).unwrap();

        assert_eq!(report.loaded, 1);
        assert_eq!(report.skipped[0].rule_type, "PluginRule");
        assert_eq!(table.rule_types(), vec!["ThreatProximityRule"]);
    }

    #[test]
    fn malformed_input_leaves_table_untouched() {
        let mut table = sample_table();
        let before = table.clone();
        let result = deserialize_str(&mut table, "{ not json", &JsonCodec, true, &installed());
        assert!(matches!(result, Err(ReactionError::Json(_))));
        assert_eq!(table, before);
    }

    #[test]
    fn merge_without_clearing() {
        let mut table = ReactionRulesTable::new().with(2, AlwaysFlee);
        deserialize_str(&mut table, JSON_TABLE, &JsonCodec, false, &installed()).unwrap();
        assert_eq!(table.priorities(), vec![1, 2, 3, 5]);
        assert_eq!(table.rule_types()[1], "AlwaysFlee");
    }

    #[test]
    fn uninstalled_registry_is_rejected() {
        let mut table = ReactionRulesTable::new();
        let result = deserialize_str(&mut table, JSON_TABLE, &JsonCodec, true, &ReactionRegistry::new());
        assert!(matches!(result, Err(ReactionError::RegistryNotInstalled)));
    }

    #[test]
    fn codec_is_chosen_by_extension() {
        assert_eq!(codec_for_path(Path::new("rules.json")).unwrap().name(), "json");
        assert_eq!(codec_for_path(Path::new("rules.RON")).unwrap().name(), "ron");
        assert!(matches!(
            codec_for_path(Path::new("rules.xml")),
            Err(ReactionError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn file_round_trip_through_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("civilian.ron");
        let table = sample_table();
        serialize(&table, &path).unwrap();

        let mut reloaded = ReactionRulesTable::new();
        let report = deserialize(&mut reloaded, &path, true, &installed()).unwrap();
        assert_eq!(report.loaded, 3);
        assert_eq!(reloaded, table);
    }

    #[test]
    fn missing_file_falls_back_to_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = load_table_or_empty(&dir.path().join("absent.json"), &installed());
        assert!(table.is_empty());
    }
}
