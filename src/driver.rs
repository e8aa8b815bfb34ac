//! Lockstep hooks between a running search and whatever is drawing it
//!
//! The engine calls [`StepObserver::on_step`] synchronously and waits for it to return,
//! so a renderer can redraw, sleep, or block on input between steps. [`StepMode`] decides
//! which points in the search yield control.

use crate::collections::{FxHashMap, FxHashSet};
use crate::decision_tree::DecisionTree;
use crate::errors::ParseError;
use crate::geometry::Position;

use log::trace;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// When the search hands control to the observer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum StepMode {
    /// Every pop and every accepted move
    #[default]
    StepByStep,
    /// The start, every genuine branch point, and every accepted move
    DecisionPoints,
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepMode::StepByStep => f.write_str("step"),
            StepMode::DecisionPoints => f.write_str("decision"),
        }
    }
}

impl FromStr for StepMode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "step" | "step_by_step" => Ok(StepMode::StepByStep),
            "decision" | "decision_points" => Ok(StepMode::DecisionPoints),
            _ => Err(ParseError::new("step mode", s)),
        }
    }
}


/// What just happened inside the search
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepEvent {
    /// A frontier entry was taken, before the goal check
    Popped { position: Position },
    /// The start, or a cell with more than one open neighbor
    DecisionPoint { position: Position, options: usize },
    /// `to` was accepted from `from`: it is in the tree and on the frontier
    Expanded { from: Position, to: Position, cost: u32 },
}


/// Read-only snapshot of search state handed to observers
pub struct SearchView<'a> {
    pub(crate) visited: &'a FxHashSet<Position>,
    pub(crate) frontier: &'a dyn FrontierView,
    pub(crate) tree: &'a DecisionTree,
    pub(crate) costs: Option<&'a FxHashMap<Position, u32>>,
}

impl SearchView<'_> {

    /// Enqueued positions for BFS and DFS, finalized ones for A*
    pub fn is_visited(&self, position: Position) -> bool {
        self.visited.contains(&position)
    }

    pub fn visited(&self) -> impl Iterator<Item = Position> + '_ {
        self.visited.iter().copied()
    }

    /// Positions waiting on the frontier, in storage order
    pub fn frontier(&self) -> Vec<Position> {
        self.frontier.positions()
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn tree(&self) -> &DecisionTree {
        self.tree
    }

    /// Best known accumulated cost, only tracked by A*
    pub fn accumulated_cost(&self, position: Position) -> Option<u32> {
        self.costs?.get(&position).copied()
    }
}


/// Frontier contents as seen by observers
pub(crate) trait FrontierView {
    fn positions(&self) -> Vec<Position>;
    fn len(&self) -> usize;
}


/// Receives step signals, synchronously
pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent, view: &SearchView<'_>);
}

impl<F> StepObserver for F
where
    F: FnMut(&StepEvent, &SearchView<'_>),
{
    fn on_step(&mut self, event: &StepEvent, view: &SearchView<'_>) {
        self(event, view)
    }
}

/// Ignores every signal
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _event: &StepEvent, _view: &SearchView<'_>) {}
}

/// Records every signal in order
#[derive(Clone, Debug, Default)]
pub struct StepLog {
    pub events: Vec<StepEvent>,
}

impl StepLog {

    /// Accepted moves, in order
    pub fn expansions(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.events.iter().filter_map(|e| match *e {
            StepEvent::Expanded { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }
}

impl StepObserver for StepLog {
    fn on_step(&mut self, event: &StepEvent, _view: &SearchView<'_>) {
        self.events.push(*event);
    }
}


/// Decides which search points reach the observer
pub(crate) struct Driver<'o, O: ?Sized> {
    mode: StepMode,
    observer: &'o mut O,
}

impl<'o, O: StepObserver + ?Sized> Driver<'o, O> {

    pub(crate) fn new(mode: StepMode, observer: &'o mut O) -> Self {
        Self { mode, observer }
    }

    pub(crate) fn mode(&self) -> StepMode {
        self.mode
    }

    pub(crate) fn signal(&mut self, event: StepEvent, view: &SearchView<'_>) {
        trace!("step {event:?}");
        self.observer.on_step(&event, view);
    }
}
