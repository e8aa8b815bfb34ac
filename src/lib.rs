//! Grid pathfinding over weighted terrain
//!
//! An agent crosses a terrain grid with breadth-first, depth-first or A* search. Every run
//! returns the path found (empty when the goal is unreachable) together with a
//! [`DecisionTree`] mirroring the order in which the strategy explored the grid. Runs can
//! be watched step by step through a [`StepObserver`], which is how a renderer stays in
//! lockstep with the search.
//!
//! ```
//! use gridwalk::{AgentKind, Grid, Position, StepLog, StepMode, Strategy, search};
//!
//! let grid = Grid::from_codes(&[[1u8, 1, 1], [1, 0, 1], [1, 1, 1]]).unwrap();
//! let mut log = StepLog::default();
//! let outcome = search(
//!     &grid,
//!     Position::new(0, 0),
//!     Position::new(2, 2),
//!     &AgentKind::Human,
//!     Strategy::AStar,
//!     StepMode::DecisionPoints,
//!     &mut log,
//! ).unwrap();
//!
//! assert_eq!(outcome.path.len(), 5);
//! print!("{}", outcome.tree);
//! ```

pub mod config;
pub mod decision_tree;
pub mod driver;
pub mod errors;
pub mod geometry;
pub mod graph_algos;
pub mod grid;
pub mod terrain;
mod collections;

pub use config::SearchConfig;
pub use decision_tree::DecisionTree;
pub use driver::{NoopObserver, SearchView, StepEvent, StepLog, StepMode, StepObserver};
pub use errors::{GridError, ParseError, SearchError};
pub use geometry::{Direction, Position};
pub use graph_algos::{SearchOutcome, Strategy, a_star::a_star, bfs::bfs, dfs::dfs, path_cost, search};
pub use grid::Grid;
pub use terrain::{AgentKind, CostModel, CostTable, MovementCost, TerrainCategory};
