use super::{Session, SearchOutcome, Strategy, search};
use crate::driver::{FrontierView, NoopObserver, StepMode, StepObserver};
use crate::errors::SearchError;
use crate::geometry::Position;
use crate::grid::Grid;
use crate::terrain::CostModel;

use std::{
    collections::{BinaryHeap, hash_map::Entry::{Occupied, Vacant}},
    cmp::Ordering,
};
use log::trace;



/// Node on the A* open list
#[derive(Debug)]
struct Node {
    f_cost: u32, // accumulated cost + heuristic
    position: Position,
    link: usize, // trail link, also the insertion order
}

// BinaryHeap is a max-heap: invert so the smallest f_cost pops first,
// ties go to the smaller position, then to the earlier insertion
impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost.cmp(&self.f_cost)
            .then_with(|| other.position.cmp(&self.position))
            .then_with(|| other.link.cmp(&self.link))
    }
}
impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Node {}


/// Open list
#[derive(Debug, Default)]
struct OpenList(BinaryHeap<Node>);

impl FrontierView for OpenList {
    fn positions(&self) -> Vec<Position> {
        self.0.iter().map(|n| n.position).collect()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// Accumulated cost comes from the cost model, the heuristic is the unscaled Manhattan distance to the goal.
/// That estimate only stays admissible while every passable terrain costs at least 1.
/// Tables with cheaper terrain can make A* settle for a costlier path
pub fn a_star<M>(grid: &Grid, start: Position, goal: Position, model: &M) -> Result<SearchOutcome, SearchError>
where
    M: CostModel + ?Sized,
{
    search(grid, start, goal, model, Strategy::AStar, StepMode::StepByStep, &mut NoopObserver)
}


/// Traverses the grid using A*
/// Positions are finalized when popped. A position is pushed again only when a strictly
/// cheaper accumulated cost is found for it
pub(crate) fn explore<M, O>(session: &mut Session<'_, '_, M, O>) -> Vec<Position>
where
    M: CostModel + ?Sized,
    O: StepObserver + ?Sized,
{
    let goal = session.goal;

    // best known accumulated cost per position, only ever lowered
    session.costs.insert(session.start, 0);

    let mut open_list = OpenList::default();
    open_list.0.push(Node {
        f_cost: 0,
        position: session.start,
        link: 0,
    });

    while let Some(Node { position: current, link, .. }) = open_list.0.pop() {
        session.popped(current, &open_list);

        if current == goal {
            return session.trail.path(link);
        }

        // stale entry for an already finalized position
        if !session.visited.insert(current) {
            continue;
        }

        session.deliberate(current, &open_list);

        let Some(&cost) = session.costs.get(&current) else {
            continue;
        };

        for neighbor in current.neighbors() {
            let Some(edge_cost) = session.entry_cost(neighbor) else {
                continue;
            };

            // new cost to reach this neighbor, confirmed cost, not heuristic
            let new_cost = cost.saturating_add(edge_cost);

            match session.costs.entry(neighbor) {
                Vacant(e) => {
                    // This is the first time we're seeing this neighbor
                    e.insert(new_cost);
                }
                Occupied(mut e) => {
                    if *e.get() > new_cost {
                        // We've found a better path to this neighbor
                        e.insert(new_cost);
                    } else {
                        // The existing path is at least as good, do nothing
                        trace!("{neighbor} already reached for {}", e.get());
                        continue;
                    }
                }
            }

            let h_cost = neighbor.manhattan(&goal);
            let neighbor_link = session.trail.extend(link, neighbor);
            open_list.0.push(Node {
                f_cost: new_cost.saturating_add(h_cost),
                position: neighbor,
                link: neighbor_link,
            });
            session.expanded(current, neighbor, edge_cost, &open_list);
        }
    }

    Vec::new()
}
