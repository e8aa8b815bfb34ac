//! Terrain categories and per-agent movement costs
//!
//! A grid cell stores a small integer code that resolves to a [`TerrainCategory`].
//! What it costs to enter that cell depends on who is moving: every [`AgentKind`]
//! carries its own [`CostTable`], and the engine only ever talks to the [`CostModel`] trait.

use crate::errors::ParseError;
use std::{fmt, str::FromStr};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};


/// Terrain kinds, discriminants are the codes stored in a grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
#[repr(u8)]
pub enum TerrainCategory {
    Mountain = 0,
    Earth = 1,
    Water = 2,
    Sand = 3,
    Forest = 4,
    Swamp = 5,
    Snow = 6,
    City = 7,
    Meadow = 8,
    Desert = 9,
}

impl TerrainCategory {

    /// All categories, indexed by code
    pub const ALL: [TerrainCategory; 10] = [
        TerrainCategory::Mountain,
        TerrainCategory::Earth,
        TerrainCategory::Water,
        TerrainCategory::Sand,
        TerrainCategory::Forest,
        TerrainCategory::Swamp,
        TerrainCategory::Snow,
        TerrainCategory::City,
        TerrainCategory::Meadow,
        TerrainCategory::Desert,
    ];

    /// Resolve a grid code, `None` for codes outside the table
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            TerrainCategory::Mountain => "mountain",
            TerrainCategory::Earth => "earth",
            TerrainCategory::Water => "water",
            TerrainCategory::Sand => "sand",
            TerrainCategory::Forest => "forest",
            TerrainCategory::Swamp => "swamp",
            TerrainCategory::Snow => "snow",
            TerrainCategory::City => "city",
            TerrainCategory::Meadow => "meadow",
            TerrainCategory::Desert => "desert",
        }
    }
}

impl fmt::Display for TerrainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TerrainCategory {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::new("terrain", s))
    }
}


/// Cost of entering a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum MovementCost {
    Passable(u32),
    Impassable,
}

impl MovementCost {

    pub const fn value(self) -> Option<u32> {
        match self {
            MovementCost::Passable(cost) => Some(cost),
            MovementCost::Impassable => None,
        }
    }

    pub const fn is_passable(self) -> bool {
        matches!(self, MovementCost::Passable(_))
    }
}


/// Maps terrain to a movement cost for one kind of mover
/// Must be pure: the engine queries it once per candidate neighbor and never caches the answer
pub trait CostModel {
    fn movement_cost(&self, terrain: TerrainCategory) -> MovementCost;
}

impl<M: CostModel + ?Sized> CostModel for &M {
    fn movement_cost(&self, terrain: TerrainCategory) -> MovementCost {
        (**self).movement_cost(terrain)
    }
}


/// Fixed cost per terrain category
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CostTable {
    costs: [MovementCost; 10], // indexed by terrain code
}

impl CostTable {

    pub const fn new(costs: [MovementCost; 10]) -> Self {
        Self { costs }
    }

    /// Every terrain passable at the same cost
    pub const fn uniform(cost: u32) -> Self {
        Self::new([MovementCost::Passable(cost); 10])
    }

    /// Override a single terrain
    pub const fn with(mut self, terrain: TerrainCategory, cost: MovementCost) -> Self {
        self.costs[terrain as usize] = cost;
        self
    }
}

impl CostModel for CostTable {
    fn movement_cost(&self, terrain: TerrainCategory) -> MovementCost {
        self.costs[terrain as usize]
    }
}


const X: MovementCost = MovementCost::Impassable;

const fn p(cost: u32) -> MovementCost {
    MovementCost::Passable(cost)
}

// codes: mountain, earth, water, sand, forest, swamp, snow, city, meadow, desert
static HUMAN: CostTable = CostTable::new([X, p(1), p(2), p(3), p(4), p(5), p(5), p(1), p(1), p(4)]);
static MONKEY: CostTable = CostTable::new([X, p(2), p(4), p(3), p(1), p(5), X, p(3), p(2), p(5)]);
static OCTOPUS: CostTable = CostTable::new([X, p(2), p(1), X, p(3), p(2), X, p(4), p(3), X]);
static SASQUATCH: CostTable = CostTable::new([p(15), p(4), X, X, p(4), p(5), p(3), p(6), p(2), p(8)]);


/// Kinds of agent, each with its own passability rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "lowercase"))]
pub enum AgentKind {
    #[default]
    Human,
    Monkey,
    Octopus,
    Sasquatch,
}

impl AgentKind {

    pub const ALL: [AgentKind; 4] = [AgentKind::Human, AgentKind::Monkey, AgentKind::Octopus, AgentKind::Sasquatch];

    pub fn cost_table(self) -> &'static CostTable {
        match self {
            AgentKind::Human => &HUMAN,
            AgentKind::Monkey => &MONKEY,
            AgentKind::Octopus => &OCTOPUS,
            AgentKind::Sasquatch => &SASQUATCH,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            AgentKind::Human => "human",
            AgentKind::Monkey => "monkey",
            AgentKind::Octopus => "octopus",
            AgentKind::Sasquatch => "sasquatch",
        }
    }
}

impl CostModel for AgentKind {
    fn movement_cost(&self, terrain: TerrainCategory) -> MovementCost {
        self.cost_table().movement_cost(terrain)
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AgentKind {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseError::new("agent", s))
    }
}
