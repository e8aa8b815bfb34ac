use crate::driver::{StepMode, StepObserver};
use crate::errors::SearchError;
use crate::geometry::Position;
use crate::graph_algos::{SearchOutcome, Strategy, search};
use crate::grid::Grid;
use crate::terrain::AgentKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Everything a caller picks before a run
/// Defaults to a step-by-step breadth-first search for a human
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SearchConfig {
    pub strategy: Strategy,
    pub mode: StepMode,
    pub agent: AgentKind,
}

impl SearchConfig {

    pub fn new(strategy: Strategy, mode: StepMode, agent: AgentKind) -> Self {
        Self { strategy, mode, agent }
    }

    /// Search with this agent's cost table
    pub fn run<O>(&self, grid: &Grid, start: Position, goal: Position, observer: &mut O) -> Result<SearchOutcome, SearchError>
    where
        O: StepObserver + ?Sized,
    {
        search(grid, start, goal, self.agent.cost_table(), self.strategy, self.mode, observer)
    }
}
