//! End-to-end checks of the cave model, the risk scan and the search.

use maze_cave::{Cave, CaveConfig, Puzzle, RegionType, RiskScan};
use maze_core::Point;
use maze_paths::{Equipment, MOVE_COST, PathCell, SWITCH_COST, Step, ToolPather};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn sample(config: &CaveConfig) -> Cave {
    let puzzle: Puzzle = "depth: 510\ntarget: 10,10\n".parse().unwrap();
    Cave::from_puzzle(&puzzle, config)
}

#[test]
fn sample_risk_is_114() {
    let cave = sample(&CaveConfig::default());
    let mut scan = RiskScan::new(&cave);
    assert_eq!(scan.run(&cave), 114);
}

#[test]
fn sample_fastest_route_is_45() {
    let cave = sample(&CaveConfig::default());
    let mut pf = cave.pathfinder();
    assert_eq!(pf.run(&cave), Some(45));

    let path = pf.path();
    assert_eq!(path.first().map(|n| n.cell), Some(pf.start()));
    assert_eq!(path.last().map(|n| n.cell), Some(pf.goal()));
    assert_eq!(path.last().map(|n| n.cost), Some(45));
    // the best route steps below the target row
    assert!(path.iter().any(|n| n.cell.pos.y > 10));
}

#[test]
fn sample_confined_to_target_rectangle_is_48() {
    let cave = sample(&CaveConfig::EXACT);
    assert_eq!(cave.pathfinder().run(&cave), Some(48));
}

#[test]
fn trivial_cave() {
    let cave = Cave::new(0, Point::ZERO);
    assert_eq!(RiskScan::new(&cave).run(&cave), 0);
    let mut pf = cave.pathfinder();
    assert!(matches!(pf.step(&cave), Step::GoalReached(_)));
    assert_eq!(pf.goal_cost(), Some(0));
}

#[test]
fn wet_target_forces_torch_switch_on_entry() {
    let cave = Cave::new(1, Point::new(2, 2));
    assert_eq!(cave.region_type(cave.target()), Some(RegionType::Wet));
    let mut pf = cave.pathfinder();
    let cost = pf.run(&cave).expect("target reachable");
    let path = pf.path();
    let last = path[path.len() - 1];
    let before = path[path.len() - 2];
    assert_eq!(last.cell.tool, Equipment::Torch);
    let entry = if before.cell.tool == Equipment::Torch {
        MOVE_COST
    } else {
        MOVE_COST + SWITCH_COST
    };
    assert_eq!(last.cost - before.cost, entry);
    assert_eq!(last.cost, cost);
}

/// Cost of the fused edge from `from` to `to`, if the cave offers one.
fn edge_cost(cave: &Cave, from: PathCell, to: PathCell) -> Option<i32> {
    let mut buf = Vec::new();
    cave.edges(from, &mut buf);
    buf.iter().find(|e| e.to == to).map(|e| e.cost)
}

#[test]
fn random_caves_are_consistent() {
    let mut rng = StdRng::seed_from_u64(22);
    for _ in 0..20 {
        let depth = rng.random_range(0..20_000u64);
        let target = Point::new(rng.random_range(0..12), rng.random_range(0..12));
        let config = CaveConfig {
            search_margin: rng.random_range(0..6),
        };
        let cave = Cave::with_config(depth, target, &config);

        // same inputs, same cave
        assert_eq!(cave, Cave::with_config(depth, target, &config));

        let expected: u32 = cave
            .target_range()
            .iter()
            .map(|p| cave.region_type(p).map_or(0, RegionType::risk))
            .sum();
        assert_eq!(RiskScan::new(&cave).run(&cave), expected);

        let mut pf = cave.pathfinder();
        let mut prev = 0;
        let cost = loop {
            match pf.step(&cave) {
                Step::Expanded(cell) => {
                    let c = pf.cost_of(cell).expect("finalized cost");
                    assert!(c >= prev);
                    assert!(cave.region_type(cell.pos).is_some_and(|ty| ty.allows(cell.tool))
                        || cell == pf.start());
                    prev = c;
                }
                Step::GoalReached(_) => break pf.goal_cost().expect("goal cost"),
                Step::Exhausted => panic!("target of {depth} {target} unreachable"),
            }
        };

        // walking the route re-adds to the same total
        let path = pf.path();
        let walked: i32 = path
            .windows(2)
            .map(|w| edge_cost(&cave, w[0].cell, w[1].cell).expect("route follows edges"))
            .sum();
        assert_eq!(walked, cost);

        // straight walk holding the torch, switching when needed, bounds it
        let bound = (target.x + target.y) * (MOVE_COST + SWITCH_COST);
        assert!(cost <= bound, "{cost} > {bound}");
    }
}

#[test]
fn wider_margin_never_costs_more() {
    let mut rng = StdRng::seed_from_u64(2018);
    for _ in 0..10 {
        let depth = rng.random_range(1..20_000u64);
        let target = Point::new(rng.random_range(1..10), rng.random_range(1..10));
        let exact = Cave::new(depth, target);
        let wide = Cave::with_config(depth, target, &CaveConfig { search_margin: 8 });
        let a = exact.pathfinder().run(&exact).expect("reachable");
        let b = wide.pathfinder().run(&wide).expect("reachable");
        assert!(b <= a, "margin raised cost {a} -> {b}");
    }
}
