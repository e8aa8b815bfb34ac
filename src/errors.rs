use crate::geometry::Position;


/// Failures while building or editing a grid
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no cells")]
    Empty,
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
    #[error("unknown terrain code {code} at {position}")]
    UnknownTerrainCode { code: u8, position: Position },
    #[error("{0} is outside the grid")]
    OutOfBounds(Position),
}

/// Failures raised before a search starts
/// An unreachable goal is not one of them: it yields an empty path
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("{role} position {position} is outside the {width}x{height} grid")]
    OutOfBounds {
        role: &'static str,
        position: Position,
        width: usize,
        height: usize,
    },
}

/// A selector string did not name a known variant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct ParseError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self { kind, value: value.to_string() }
    }
}
