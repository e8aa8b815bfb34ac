//! Search strategies over a 4-connected terrain grid
//!
//! All strategies share one contract: explore from `start`, stop as soon as `goal` is
//! *popped* from the frontier, and return the path recorded in that frontier entry along
//! with the decision tree built so far. An exhausted frontier yields an empty path.

pub mod a_star;
pub mod bfs;
pub mod dfs;
mod trail;

use trail::Trail;

use crate::collections::{FxHashMap, FxHashSet};
use crate::decision_tree::DecisionTree;
use crate::driver::{Driver, FrontierView, SearchView, StepEvent, StepMode, StepObserver};
use crate::errors::{ParseError, SearchError};
use crate::geometry::Position;
use crate::grid::Grid;
use crate::terrain::{CostModel, MovementCost};

use log::{debug, trace};
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Which frontier discipline drives the search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strategy {
    /// FIFO, hop-count shortest, ignores terrain cost
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "bfs"))]
    BreadthFirst,
    /// LIFO, finds some path
    #[cfg_attr(feature = "serde", serde(rename = "dfs"))]
    DepthFirst,
    /// Priority on accumulated cost plus Manhattan distance
    #[cfg_attr(feature = "serde", serde(rename = "astar", alias = "a*"))]
    AStar,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::BreadthFirst => f.write_str("bfs"),
            Strategy::DepthFirst => f.write_str("dfs"),
            Strategy::AStar => f.write_str("a*"),
        }
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bfs" => Ok(Strategy::BreadthFirst),
            "dfs" => Ok(Strategy::DepthFirst),
            "a*" | "astar" => Ok(Strategy::AStar),
            _ => Err(ParseError::new("strategy", s)),
        }
    }
}


/// Result of one search run
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Start to goal inclusive, empty when the goal is unreachable
    pub path: Vec<Position>,
    pub tree: DecisionTree,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }
}


/// Run `strategy` from `start` to `goal`, signalling `observer` according to `mode`
/// Start and goal must lie inside the grid. An unreachable goal is not an error
pub fn search<M, O>(
    grid: &Grid,
    start: Position,
    goal: Position,
    model: &M,
    strategy: Strategy,
    mode: StepMode,
    observer: &mut O,
) -> Result<SearchOutcome, SearchError>
where
    M: CostModel + ?Sized,
    O: StepObserver + ?Sized,
{
    for (role, position) in [("start", start), ("goal", goal)] {
        if !grid.contains(position) {
            return Err(SearchError::OutOfBounds {
                role,
                position,
                width: grid.width(),
                height: grid.height(),
            });
        }
    }

    debug!("{strategy} search from {start} to {goal} ({mode} mode)");

    let mut session = Session::new(grid, start, goal, model, Driver::new(mode, observer));
    let path = match strategy {
        Strategy::BreadthFirst => explore_unweighted(&mut session, bfs::Queue::default()),
        Strategy::DepthFirst => explore_unweighted(&mut session, dfs::Stack::default()),
        Strategy::AStar => a_star::explore(&mut session),
    };

    if path.is_empty() {
        debug!("no path from {start} to {goal}, {} nodes explored", session.tree.len());
    } else {
        debug!("path found with {} cells", path.len());
    }

    Ok(SearchOutcome { path, tree: session.tree })
}


/// Sum of entry costs along `path`, the start cell is free
/// `None` when a cell is off the grid or impassable
pub fn path_cost<M: CostModel + ?Sized>(grid: &Grid, model: &M, path: &[Position]) -> Option<u32> {
    path.iter().skip(1).try_fold(0u32, |total, &position| {
        let cost = model.movement_cost(grid.terrain(position)?).value()?;
        Some(total.saturating_add(cost))
    })
}


/// Frontier entry: a position plus the trail link holding its path-so-far
#[derive(Clone, Copy, Debug)]
pub(crate) struct Entry {
    pub position: Position,
    pub link: usize,
}

/// Frontier for the unweighted strategies, ordering is implicit in the container
pub(crate) trait Frontier: FrontierView {
    fn push(&mut self, entry: Entry);
    fn pop(&mut self) -> Option<Entry>;
}


/// State owned by a single search call
pub(crate) struct Session<'a, 'o, M: ?Sized, O: ?Sized> {
    pub grid: &'a Grid,
    pub start: Position,
    pub goal: Position,
    model: &'a M,
    driver: Driver<'o, O>,
    pub tree: DecisionTree,
    pub visited: FxHashSet<Position>,
    pub costs: FxHashMap<Position, u32>, // accumulated costs, only A* fills it
    pub trail: Trail,
}

impl<'a, 'o, M, O> Session<'a, 'o, M, O>
where
    M: CostModel + ?Sized,
    O: StepObserver + ?Sized,
{

    fn new(grid: &'a Grid, start: Position, goal: Position, model: &'a M, driver: Driver<'o, O>) -> Self {
        Self {
            grid,
            start,
            goal,
            model,
            driver,
            tree: DecisionTree::new(start),
            visited: FxHashSet::default(),
            costs: FxHashMap::default(),
            trail: Trail::new(start),
        }
    }

    /// Cost of entering `position`, `None` when off the grid or impassable
    /// Asks the cost model every time
    pub fn entry_cost(&self, position: Position) -> Option<u32> {
        let Some(terrain) = self.grid.terrain(position) else {
            trace!("{position} is out of bounds");
            return None;
        };
        match self.model.movement_cost(terrain) {
            MovementCost::Passable(cost) => Some(cost),
            MovementCost::Impassable => {
                trace!("{terrain} at {position} is impassable");
                None
            }
        }
    }

    /// Neighbors that are in bounds, passable and not yet visited
    fn open_options(&self, position: Position) -> usize {
        position
            .neighbors()
            .filter(|n| !self.visited.contains(n) && self.entry_cost(*n).is_some())
            .count()
    }

    fn signal(&mut self, event: StepEvent, frontier: &dyn FrontierView) {
        let view = SearchView {
            visited: &self.visited,
            frontier,
            tree: &self.tree,
            costs: (!self.costs.is_empty()).then_some(&self.costs),
        };
        self.driver.signal(event, &view);
    }

    /// An entry was just popped
    pub fn popped(&mut self, position: Position, frontier: &dyn FrontierView) {
        if self.driver.mode() == StepMode::StepByStep {
            self.signal(StepEvent::Popped { position }, frontier);
        }
    }

    /// About to expand `position`, a decision point when it is the start or a branch
    pub fn deliberate(&mut self, position: Position, frontier: &dyn FrontierView) {
        if self.driver.mode() != StepMode::DecisionPoints {
            return;
        }
        let options = self.open_options(position);
        if options > 1 || position == self.start {
            self.signal(StepEvent::DecisionPoint { position, options }, frontier);
        }
    }

    /// `to` has been put on the frontier, record it in the tree and tell the observer
    pub fn expanded(&mut self, from: Position, to: Position, cost: u32, frontier: &dyn FrontierView) {
        self.tree.attach(from, to);
        trace!("moving to {to} with cost {cost}");
        self.signal(StepEvent::Expanded { from, to, cost }, frontier);
    }
}


/// Shared loop for BFS and DFS
/// Positions are marked visited when enqueued, so each one enters the frontier at most once.
/// Movement cost only decides passability here, it never orders the frontier
pub(crate) fn explore_unweighted<M, O, F>(session: &mut Session<'_, '_, M, O>, mut frontier: F) -> Vec<Position>
where
    M: CostModel + ?Sized,
    O: StepObserver + ?Sized,
    F: Frontier,
{
    session.visited.insert(session.start);
    frontier.push(Entry { position: session.start, link: 0 });

    while let Some(Entry { position: current, link }) = frontier.pop() {
        session.popped(current, &frontier);

        if current == session.goal {
            return session.trail.path(link);
        }

        session.deliberate(current, &frontier);

        for next in current.neighbors() {
            if !session.grid.contains(next) {
                trace!("{next} is out of bounds");
                continue;
            }
            if session.visited.contains(&next) {
                trace!("{next} already visited");
                continue;
            }
            let Some(cost) = session.entry_cost(next) else {
                continue;
            };

            session.visited.insert(next);
            let next_link = session.trail.extend(link, next);
            frontier.push(Entry { position: next, link: next_link });
            session.expanded(current, next, cost, &frontier);
        }
    }

    Vec::new()
}


#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::driver::{NoopObserver, StepLog};
    use crate::terrain::{AgentKind, CostTable, TerrainCategory};

    pub(crate) fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    /// Parse rows of single-digit terrain codes
    pub(crate) fn grid(rows: &[&str]) -> Grid {
        let codes: Vec<Vec<u8>> = rows
            .iter()
            .map(|row| row.bytes().map(|b| b - b'0').collect())
            .collect();
        Grid::from_codes(&codes).unwrap()
    }

    pub(crate) fn run(grid: &Grid, start: Position, goal: Position, agent: AgentKind, strategy: Strategy) -> SearchOutcome {
        search(grid, start, goal, &agent, strategy, StepMode::StepByStep, &mut NoopObserver).unwrap()
    }

    pub(crate) const ALL_STRATEGIES: [Strategy; 3] = [Strategy::BreadthFirst, Strategy::DepthFirst, Strategy::AStar];

    #[test]
    fn test_open_grid_all_strategies() {
        let g = Grid::filled(3, 3, TerrainCategory::Earth);
        for strategy in ALL_STRATEGIES {
            let outcome = run(&g, p(0, 0), p(2, 2), AgentKind::Human, strategy);
            assert_eq!(outcome.path.len(), 5, "{strategy}");
            assert_eq!(outcome.path.first(), Some(&p(0, 0)));
            assert_eq!(outcome.path.last(), Some(&p(2, 2)));
            assert!(outcome.path.windows(2).all(|w| w[0].is_adjacent(&w[1])));
        }
    }

    #[test]
    fn test_mountain_wall_blocks_everything() {
        let g = grid(&["101", "101", "101"]);
        for strategy in ALL_STRATEGIES {
            let outcome = run(&g, p(0, 0), p(2, 0), AgentKind::Human, strategy);
            assert!(!outcome.is_found(), "{strategy}");
            // partial tree covers the reachable left column only
            assert_eq!(outcome.tree.len(), 3, "{strategy}");
            assert!(outcome.tree.positions().all(|pos| pos.x == 0));
        }
    }

    #[test]
    fn test_water_channel_depends_on_agent() {
        let g = grid(&["121", "121", "121"]);
        for strategy in ALL_STRATEGIES {
            assert!(run(&g, p(0, 1), p(2, 1), AgentKind::Human, strategy).is_found(), "{strategy}");
            assert!(!run(&g, p(0, 1), p(2, 1), AgentKind::Sasquatch, strategy).is_found(), "{strategy}");
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let g = Grid::filled(2, 2, TerrainCategory::Earth);
        for strategy in ALL_STRATEGIES {
            let outcome = run(&g, p(1, 1), p(1, 1), AgentKind::Human, strategy);
            assert_eq!(outcome.path, vec![p(1, 1)]);
            assert_eq!(outcome.tree.len(), 1);
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints_rejected() {
        let g = Grid::filled(2, 2, TerrainCategory::Earth);
        let err = search(&g, p(0, 0), p(2, 0), &AgentKind::Human, Strategy::AStar, StepMode::StepByStep, &mut NoopObserver)
            .unwrap_err();
        assert_eq!(err, SearchError::OutOfBounds { role: "goal", position: p(2, 0), width: 2, height: 2 });
        assert_eq!(err.to_string(), "goal position (2, 0) is outside the 2x2 grid");

        let err = search(&g, p(-1, 0), p(1, 1), &AgentKind::Human, Strategy::BreadthFirst, StepMode::StepByStep, &mut NoopObserver)
            .unwrap_err();
        assert!(matches!(err, SearchError::OutOfBounds { role: "start", .. }));
    }

    #[test]
    fn test_impassable_start_cell_still_expands() {
        // the start cell's own terrain is never queried
        let g = grid(&["01", "11"]);
        let outcome = run(&g, p(0, 0), p(1, 1), AgentKind::Human, Strategy::BreadthFirst);
        assert_eq!(outcome.path.len(), 3);
    }

    #[test]
    fn test_path_cost() {
        let g = grid(&["151", "111"]);
        let model = AgentKind::Human;
        assert_eq!(path_cost(&g, &model, &[p(0, 0), p(1, 0), p(2, 0)]), Some(6));
        assert_eq!(path_cost(&g, &model, &[p(0, 0)]), Some(0));
        assert_eq!(path_cost(&g, &CostTable::uniform(2), &[p(0, 0), p(0, 1), p(1, 1)]), Some(4));
        assert_eq!(path_cost(&g, &model, &[p(0, 0), p(0, 2)]), None);
    }

    #[test]
    fn test_tree_nodes_match_expansions() {
        let g = grid(&["1151", "2141", "1111"]);
        for strategy in ALL_STRATEGIES {
            let mut log = StepLog::default();
            let outcome = search(&g, p(0, 0), p(3, 0), &AgentKind::Human, strategy, StepMode::StepByStep, &mut log).unwrap();
            let targets: FxHashSet<Position> = log.expansions().map(|(_, to)| to).collect();
            assert!(!targets.contains(&p(0, 0)), "{strategy}");
            assert_eq!(outcome.tree.len(), targets.len() + 1, "{strategy}");
        }
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!("BFS".parse::<Strategy>(), Ok(Strategy::BreadthFirst));
        assert_eq!("a*".parse::<Strategy>(), Ok(Strategy::AStar));
        assert_eq!("astar".parse::<Strategy>(), Ok(Strategy::AStar));
        assert!("dijkstra".parse::<Strategy>().is_err());
        assert_eq!(Strategy::AStar.to_string(), "a*");
    }
}
