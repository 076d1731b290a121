//! Level grid validation errors.

use codehero_types::Position;
use thiserror::Error;

/// Errors raised while building a [`GridWorld`](crate::GridWorld).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The layout has no rows or no columns.
    #[error("grid layout is empty")]
    EmptyLayout,

    /// A row's length differs from the first row's.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// The layout exceeds the addressable size.
    #[error("grid of {width}x{height} cells is too large")]
    TooLarge { width: usize, height: usize },

    /// A declared `grid_size` disagrees with the layout.
    #[error("declared grid size {declared} does not match {width}x{height} layout")]
    SizeMismatch {
        declared: usize,
        width: usize,
        height: usize,
    },

    /// The start position lies outside the grid.
    #[error("start position {start} is outside the {width}x{height} grid")]
    StartOutOfBounds {
        start: Position,
        width: u32,
        height: u32,
    },

    /// The start position is a wall.
    #[error("start position {0} is a wall")]
    StartOnWall(Position),

    /// An ASCII level contains a character with no cell meaning.
    #[error("unknown cell symbol '{symbol}' at row {row}, column {column}")]
    UnknownSymbol {
        symbol: char,
        row: usize,
        column: usize,
    },

    /// An ASCII level marks more than one start cell.
    #[error("more than one start cell ('S') in level")]
    MultipleStarts,
}
