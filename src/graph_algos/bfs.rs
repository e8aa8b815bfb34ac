use super::{Entry, Frontier, SearchOutcome, Strategy, search};
use crate::driver::{FrontierView, NoopObserver, StepMode};
use crate::errors::SearchError;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::terrain::CostModel;

use std::collections::VecDeque;


/// Breadth-first search
/// https://en.wikipedia.org/wiki/Breadth-first_search
/// Paths are shortest by hop count. Terrain cost only decides passability,
/// so a cheaper detour is never preferred over a shorter expensive route
pub fn bfs<M>(grid: &Grid, start: Position, goal: Position, model: &M) -> Result<SearchOutcome, SearchError>
where
    M: CostModel + ?Sized,
{
    search(grid, start, goal, model, Strategy::BreadthFirst, StepMode::StepByStep, &mut NoopObserver)
}


/// FIFO frontier
#[derive(Debug, Default)]
pub(crate) struct Queue(VecDeque<Entry>);

impl Frontier for Queue {
    fn push(&mut self, entry: Entry) {
        self.0.push_back(entry);
    }

    fn pop(&mut self) -> Option<Entry> {
        self.0.pop_front()
    }
}

impl FrontierView for Queue {
    fn positions(&self) -> Vec<Position> {
        self.0.iter().map(|e| e.position).collect()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}
