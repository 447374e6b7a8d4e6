//! Unit tests for em-steer.

use std::sync::atomic::{AtomicUsize, Ordering};

use em_collision::{CollisionFacade, CollisionResult, CollisionTester, ObstacleField};
use em_core::{EntityId, ObstacleId, Position};

use crate::{
    repair_path, repaired, Navigator, Path, PathPlanner, RepairOutcome, SteeringControlPoint,
    StraightLinePlanner,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Blocks exactly the listed positions and counts every query.
struct ScriptedTester {
    blocked: Vec<Position>,
    queries: AtomicUsize,
}

impl ScriptedTester {
    fn blocking(blocked: &[Position]) -> Self {
        Self { blocked: blocked.to_vec(), queries: AtomicUsize::new(0) }
    }

    fn queries(&self) -> usize {
        self.queries.load(Ordering::Relaxed)
    }
}

impl CollisionTester for ScriptedTester {
    fn is_position_collision_free(&self, position: Position) -> CollisionResult<bool> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(!self.blocked.contains(&position))
    }
}

fn p(x: f32) -> Position {
    Position::new(x, 0.0)
}

fn cp(x: f32) -> SteeringControlPoint {
    SteeringControlPoint::new(p(x), 3.0)
}

fn navigator() -> Navigator {
    Navigator::new(EntityId(0)).with_speeds(3.0, 0.5)
}

// ── Path ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path_tests {
    use super::*;

    #[test]
    fn length_sums_segments() {
        let path = Path::new(vec![cp(0.0), cp(3.0), cp(10.0)]);
        assert!((path.length() - 10.0).abs() < 1e-5);
        assert_eq!(path.positions().count(), 3);
        assert_eq!(Path::empty().length(), 0.0);
    }

    #[test]
    fn navigator_path_lifecycle() {
        let mut nav = navigator();
        assert!(!nav.has_path());
        nav.set_path(Path::new(vec![cp(0.0), cp(4.0)]));
        assert_eq!(nav.destination(), Some(p(4.0)));
        nav.clear_path();
        assert_eq!(nav.destination(), None);
    }
}

// ── StraightLinePlanner ───────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn evenly_spaced_points_end_at_target() {
        let planner = StraightLinePlanner::new(2.0);
        let path = planner.plan(p(0.0), p(10.0), &navigator());
        assert_eq!(path.len(), 6);
        assert_eq!(path.first().unwrap().position, p(0.0));
        assert_eq!(path.last().unwrap().position, p(10.0));
        assert!((path.points[1].position.x - 2.0).abs() < 1e-5);
    }

    #[test]
    fn speeds_and_heading() {
        let path = StraightLinePlanner::new(5.0).plan(p(0.0), p(10.0), &navigator());
        assert_eq!(path.points[0].speed, 3.0);
        assert_eq!(path.last().unwrap().speed, 0.5);
        assert!(path.points.iter().all(|c| c.heading == Some(0.0)));
    }

    #[test]
    fn uneven_length_rounds_up_segments() {
        let path = StraightLinePlanner::new(4.0).plan(p(0.0), p(10.0), &navigator());
        // ceil(10 / 4) = 3 segments → 4 points.
        assert_eq!(path.len(), 4);
    }

    #[test]
    fn zero_length_is_single_point() {
        let path = StraightLinePlanner::default().plan(p(3.0), p(3.0), &navigator());
        assert_eq!(path.len(), 1);
        assert_eq!(path.points[0].position, p(3.0));
    }
}

// ── repair_path ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod repair_tests {
    use super::*;

    #[test]
    fn free_terminus_short_circuits() {
        let tester = ScriptedTester::blocking(&[p(1.0)]);
        let facade = CollisionFacade::new(&tester);
        let mut path = Path::new(vec![cp(0.0), cp(1.0), cp(2.0), cp(3.0)]);
        let before = path.clone();

        let outcome = repair_path(&navigator(), &mut path, &facade);

        assert_eq!(outcome, RepairOutcome::Unchanged);
        assert_eq!(path, before);
        assert_eq!(tester.queries(), 1, "only the final point may be queried");
    }

    #[test]
    fn blocked_terminus_is_cut_and_reanchored() {
        // [P0 free, P1 free, P2 blocked] → [P0, P1, P1']
        let tester = ScriptedTester::blocking(&[p(2.0)]);
        let facade = CollisionFacade::new(&tester);
        let mut path = Path::new(vec![cp(0.0), cp(1.0), cp(2.0)]);

        let outcome = repair_path(&navigator(), &mut path, &facade);

        assert_eq!(outcome, RepairOutcome::Truncated { anchor: 1, removed: 1 });
        assert_eq!(path.len(), 3);
        assert_eq!(path.points[0], cp(0.0));
        assert_eq!(path.points[1], cp(1.0));
        let terminus = path.points[2];
        assert_eq!(terminus.position, p(1.0));
        assert_eq!(terminus.speed, 0.5, "terminus takes the arrival speed");
        assert!(!path.positions().any(|q| q == p(2.0)));
    }

    #[test]
    fn stops_at_first_free_point_walking_backwards() {
        // P1 is blocked too, but the walk never gets there: P3 is free.
        let tester = ScriptedTester::blocking(&[p(1.0), p(4.0), p(5.0)]);
        let facade = CollisionFacade::new(&tester);
        let mut path = Path::new(vec![cp(0.0), cp(1.0), cp(2.0), cp(3.0), cp(4.0), cp(5.0)]);

        let outcome = repair_path(&navigator(), &mut path, &facade);

        assert_eq!(outcome, RepairOutcome::Truncated { anchor: 3, removed: 2 });
        let xs: Vec<f32> = path.positions().map(|q| q.x).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0, 3.0]);
        assert_eq!(tester.queries(), 3);
    }

    #[test]
    fn repair_is_idempotent() {
        let tester = ScriptedTester::blocking(&[p(2.0), p(3.0)]);
        let facade = CollisionFacade::new(&tester);
        let mut path = Path::new(vec![cp(0.0), cp(1.0), cp(2.0), cp(3.0)]);

        repair_path(&navigator(), &mut path, &facade);
        let once = path.clone();
        let second = repair_path(&navigator(), &mut path, &facade);

        assert_eq!(second, RepairOutcome::Unchanged);
        assert_eq!(path, once);
    }

    #[test]
    fn single_blocked_point_is_kept() {
        let tester = ScriptedTester::blocking(&[p(0.0)]);
        let facade = CollisionFacade::new(&tester);
        let mut path = Path::new(vec![cp(0.0)]);

        let outcome = repair_path(&navigator(), &mut path, &facade);

        assert_eq!(outcome, RepairOutcome::Blocked { removed: 0 });
        assert!(!outcome.changed());
        assert_eq!(path.len(), 1, "repair must never empty a path");
        assert_eq!(path.points[0], cp(0.0));
    }

    #[test]
    fn fully_blocked_path_keeps_start_point() {
        let tester = ScriptedTester::blocking(&[p(0.0), p(1.0), p(2.0)]);
        let facade = CollisionFacade::new(&tester);
        let mut path = Path::new(vec![cp(0.0), cp(1.0), cp(2.0)]);

        let outcome = repair_path(&navigator(), &mut path, &facade);
        assert_eq!(outcome, RepairOutcome::Blocked { removed: 2 });
        assert_eq!(path, Path::new(vec![cp(0.0)]));

        // Still blocked, still one point.
        let again = repair_path(&navigator(), &mut path, &facade);
        assert_eq!(again, RepairOutcome::Blocked { removed: 0 });
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn empty_path_is_left_alone() {
        let facade = CollisionFacade::unavailable();
        let mut path = Path::empty();
        assert_eq!(repair_path(&navigator(), &mut path, &facade), RepairOutcome::Empty);
        assert!(path.is_empty());
    }

    #[test]
    fn unavailable_tester_blocks_everything() {
        let facade = CollisionFacade::unavailable();
        let mut path = Path::new(vec![cp(0.0), cp(1.0)]);
        let outcome = repair_path(&navigator(), &mut path, &facade);
        assert_eq!(outcome, RepairOutcome::Blocked { removed: 1 });
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn copy_on_write_variant_leaves_input() {
        let tester = ScriptedTester::blocking(&[p(2.0)]);
        let facade = CollisionFacade::new(&tester);
        let path = Path::new(vec![cp(0.0), cp(1.0), cp(2.0)]);

        let (fixed, outcome) = repaired(&navigator(), &path, &facade);

        assert!(outcome.changed());
        assert_eq!(path.len(), 3);
        assert_eq!(path.last().unwrap().position, p(2.0));
        assert_eq!(fixed.last().unwrap().position, p(1.0));
    }

    #[test]
    fn planned_path_into_obstacle_stops_short() {
        let mut field = ObstacleField::new(0.5);
        field.insert(ObstacleId(0), p(10.0), 1.0).unwrap();
        let facade = CollisionFacade::new(&field);
        let nav = navigator();
        let mut path = StraightLinePlanner::new(1.0).plan(p(0.0), p(10.0), &nav);

        let outcome = repair_path(&nav, &mut path, &facade);

        // Points at 9.0 and 10.0 lie within 1.5 m of the obstacle; 8.0 is the anchor.
        assert_eq!(outcome, RepairOutcome::Truncated { anchor: 8, removed: 2 });
        let terminus = path.last().unwrap().position;
        assert!((terminus.x - 8.0).abs() < 1e-4, "got {terminus}");
        assert!(facade.is_free(terminus));
    }
}
