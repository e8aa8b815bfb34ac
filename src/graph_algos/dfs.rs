use super::{Entry, Frontier, SearchOutcome, Strategy, search};
use crate::driver::{FrontierView, NoopObserver, StepMode};
use crate::errors::SearchError;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::terrain::CostModel;


/// Depth-first search
/// https://en.wikipedia.org/wiki/Depth-first_search
/// Finds a path if one exists, with no guarantee on length or cost.
/// Cells are marked visited when pushed, so the last neighbor pushed is explored first
pub fn dfs<M>(grid: &Grid, start: Position, goal: Position, model: &M) -> Result<SearchOutcome, SearchError>
where
    M: CostModel + ?Sized,
{
    search(grid, start, goal, model, Strategy::DepthFirst, StepMode::StepByStep, &mut NoopObserver)
}


/// LIFO frontier
#[derive(Debug, Default)]
pub(crate) struct Stack(Vec<Entry>);

impl Frontier for Stack {
    fn push(&mut self, entry: Entry) {
        self.0.push(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop()
    }
}

impl FrontierView for Stack {
    fn positions(&self) -> Vec<Position> {
        self.0.iter().map(|e| e.position).collect()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
