use gridwalk::{
    AgentKind, CostModel, CostTable, Grid, MovementCost, Position, StepLog, StepMode, Strategy,
    TerrainCategory, path_cost, search,
};

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::{HashMap, HashSet, VecDeque};

const STRATEGIES: [Strategy; 3] = [Strategy::BreadthFirst, Strategy::DepthFirst, Strategy::AStar];

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Hop distances from `start` over passable cells, computed independently of the crate
fn flood_fill<M: CostModel>(grid: &Grid, model: &M, start: Position) -> HashMap<Position, usize> {
    let mut dist = HashMap::from([(start, 0)]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let d = dist[&current];
        for next in current.neighbors() {
            let passable = grid
                .terrain(next)
                .is_some_and(|t| model.movement_cost(t).is_passable());
            if passable && !dist.contains_key(&next) {
                dist.insert(next, d + 1);
                queue.push_back(next);
            }
        }
    }
    dist
}

fn random_cell<R: Rng>(grid: &Grid, rng: &mut R) -> Position {
    Position::new(
        rng.random_range(0..grid.width() as i32),
        rng.random_range(0..grid.height() as i32),
    )
}

/// Random grids for every agent, with random endpoints
fn cases(seed: u64, count: usize) -> Vec<(Grid, AgentKind, Position, Position)> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let width = rng.random_range(1..9);
            let height = rng.random_range(1..9);
            let grid = Grid::random(width, height, &mut rng);
            let agent = AgentKind::ALL[i % AgentKind::ALL.len()];
            let start = random_cell(&grid, &mut rng);
            let goal = random_cell(&grid, &mut rng);
            (grid, agent, start, goal)
        })
        .collect()
}

#[test]
fn paths_are_connected_and_match_reachability() {
    init();
    for (grid, agent, start, goal) in cases(7, 300) {
        let reachable = flood_fill(&grid, &agent, start).contains_key(&goal);
        for strategy in STRATEGIES {
            let outcome = search(&grid, start, goal, &agent, strategy, StepMode::StepByStep, &mut StepLog::default()).unwrap();
            assert_eq!(outcome.is_found(), reachable, "{strategy} {agent} {start} -> {goal}");
            if outcome.is_found() {
                assert_eq!(outcome.path.first(), Some(&start));
                assert_eq!(outcome.path.last(), Some(&goal));
                assert!(outcome.path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
                assert!(path_cost(&grid, &agent, &outcome.path).is_some());
            }
        }
    }
}

#[test]
fn bfs_paths_have_minimal_hop_count() {
    init();
    for (grid, agent, start, goal) in cases(21, 300) {
        let hops = flood_fill(&grid, &agent, start);
        let outcome = search(&grid, start, goal, &agent, Strategy::BreadthFirst, StepMode::StepByStep, &mut StepLog::default()).unwrap();
        if let Some(&d) = hops.get(&goal) {
            assert_eq!(outcome.path.len(), d + 1, "{agent} {start} -> {goal}");
        }
    }
}

#[test]
fn a_star_is_cheapest_under_uniform_costs() {
    init();
    let model = CostTable::uniform(1)
        .with(TerrainCategory::Mountain, MovementCost::Impassable)
        .with(TerrainCategory::Water, MovementCost::Impassable);
    for (grid, _, start, goal) in cases(99, 300) {
        let cost = |strategy| {
            let outcome = search(&grid, start, goal, &model, strategy, StepMode::StepByStep, &mut StepLog::default()).unwrap();
            path_cost(&grid, &model, &outcome.path)
        };
        let (Some(a), Some(b), Some(d)) = (cost(Strategy::AStar), cost(Strategy::BreadthFirst), cost(Strategy::DepthFirst)) else {
            continue;
        };
        assert!(a <= b && a <= d, "{start} -> {goal}: a*={a} bfs={b} dfs={d}");
    }
}

#[test]
fn tree_holds_one_node_per_accepted_position() {
    init();
    for (grid, agent, start, goal) in cases(3, 200) {
        for strategy in STRATEGIES {
            let mut log = StepLog::default();
            let outcome = search(&grid, start, goal, &agent, strategy, StepMode::StepByStep, &mut log).unwrap();

            let accepted: HashSet<Position> = log.expansions().map(|(_, to)| to).collect();
            let nodes: HashSet<Position> = outcome.tree.positions().collect();
            assert_eq!(nodes.len(), outcome.tree.len(), "duplicate node");
            assert_eq!(outcome.tree.len(), accepted.len() + 1);
            assert!(accepted.iter().all(|p| nodes.contains(p)));
            assert_eq!(outcome.tree.root(), start);
            assert_eq!(outcome.tree.pre_order().count(), outcome.tree.len());
        }
    }
}

#[test]
fn searches_are_repeatable() {
    init();
    for (grid, agent, start, goal) in cases(42, 100) {
        for strategy in STRATEGIES {
            for mode in [StepMode::StepByStep, StepMode::DecisionPoints] {
                let mut first_log = StepLog::default();
                let mut second_log = StepLog::default();
                let first = search(&grid, start, goal, &agent, strategy, mode, &mut first_log).unwrap();
                let second = search(&grid, start, goal, &agent, strategy, mode, &mut second_log).unwrap();
                assert_eq!(first.path, second.path);
                assert_eq!(first.tree.to_string(), second.tree.to_string());
                assert_eq!(first_log.events, second_log.events);
            }
        }
    }
}

#[test]
fn modes_differ_only_in_signals() {
    init();
    for (grid, agent, start, goal) in cases(5, 100) {
        for strategy in STRATEGIES {
            let mut step_log = StepLog::default();
            let mut decision_log = StepLog::default();
            let step = search(&grid, start, goal, &agent, strategy, StepMode::StepByStep, &mut step_log).unwrap();
            let decision = search(&grid, start, goal, &agent, strategy, StepMode::DecisionPoints, &mut decision_log).unwrap();

            assert_eq!(step.path, decision.path);
            assert_eq!(step.tree.to_string(), decision.tree.to_string());
            assert!(step_log.expansions().eq(decision_log.expansions()));
        }
    }
}
