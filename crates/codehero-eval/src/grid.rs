//! The level grid: an immutable map of cell kinds plus a start position.

use crate::error::GridError;
use codehero_types::Position;
use serde::{Deserialize, Serialize};

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellKind {
    Empty,
    Wall,
    /// Marks the level's start cell; otherwise behaves like `Empty`.
    Start,
    Goal,
    Coin,
    Obstacle,
}

impl CellKind {
    /// Symbol used by the ASCII level format.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '.' | '_' => Some(Self::Empty),
            'W' => Some(Self::Wall),
            'S' => Some(Self::Start),
            'G' => Some(Self::Goal),
            'C' => Some(Self::Coin),
            'O' => Some(Self::Obstacle),
            _ => None,
        }
    }
}

/// Level grid as supplied by the level definition.
///
/// `layout` is indexed `[y][x]`. `grid_size`, when present, must equal both
/// dimensions of a square layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDescriptor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_size: Option<usize>,
    pub layout: Vec<Vec<CellKind>>,
    pub start: Position,
}

/// A validated, immutable level grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GridDescriptor", into = "GridDescriptor")]
pub struct GridWorld {
    cells: Vec<Vec<CellKind>>,
    width: u32,
    height: u32,
    start: Position,
    coin_count: usize,
}

impl GridWorld {
    /// Build a grid from rows of cells (`layout[y][x]`) and a start position.
    pub fn new(layout: Vec<Vec<CellKind>>, start: Position) -> Result<Self, GridError> {
        let height = layout.len();
        let width = layout.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyLayout);
        }
        if let Some((row, cells)) = layout.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::RaggedRow {
                row,
                expected: width,
                found: cells.len(),
            });
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(GridError::TooLarge { width, height });
        };

        let coin_count = layout
            .iter()
            .flatten()
            .filter(|&&cell| cell == CellKind::Coin)
            .count();
        let grid = Self {
            cells: layout,
            width: w,
            height: h,
            start,
            coin_count,
        };
        grid.check_start(start)?;
        Ok(grid)
    }

    /// Parse the ASCII level format: one row per line, one symbol per cell
    /// (see [`CellKind::from_symbol`]). Surrounding whitespace and blank
    /// lines are ignored. An `S` cell sets the start; without one the start
    /// is `(0, 0)`.
    pub fn from_ascii(text: &str) -> Result<Self, GridError> {
        let mut start = None;
        let mut layout = Vec::new();
        for (y, row) in text.lines().map(str::trim).filter(|r| !r.is_empty()).enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (x, symbol) in row.chars().enumerate() {
                let cell = CellKind::from_symbol(symbol).ok_or(GridError::UnknownSymbol {
                    symbol,
                    row: y,
                    column: x,
                })?;
                if cell == CellKind::Start {
                    if start.is_some() {
                        return Err(GridError::MultipleStarts);
                    }
                    start = Some((x, y));
                }
                cells.push(cell);
            }
            layout.push(cells);
        }
        // Oversized layouts are rejected by `new` before the start is used.
        let (x, y) = start.unwrap_or((0, 0));
        let start = Position::new(x as u32, y as u32);
        Self::new(layout, start)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Number of `COIN` cells anywhere in the grid.
    pub fn coin_count(&self) -> usize {
        self.coin_count
    }

    /// The cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: Position) -> Option<CellKind> {
        self.cells
            .get(pos.y as usize)
            .and_then(|row| row.get(pos.x as usize))
            .copied()
    }

    /// Whether the hero may step onto `pos`: inside the grid and not a wall.
    pub fn is_open(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell != CellKind::Wall)
    }

    /// Check that `start` is a legal place to begin a run.
    pub fn check_start(&self, start: Position) -> Result<(), GridError> {
        match self.cell(start) {
            None => Err(GridError::StartOutOfBounds {
                start,
                width: self.width,
                height: self.height,
            }),
            Some(CellKind::Wall) => Err(GridError::StartOnWall(start)),
            Some(_) => Ok(()),
        }
    }
}

impl TryFrom<GridDescriptor> for GridWorld {
    type Error = GridError;

    fn try_from(desc: GridDescriptor) -> Result<Self, Self::Error> {
        if let Some(declared) = desc.grid_size {
            let height = desc.layout.len();
            let width = desc.layout.first().map_or(0, Vec::len);
            if declared != width || declared != height {
                return Err(GridError::SizeMismatch {
                    declared,
                    width,
                    height,
                });
            }
        }
        GridWorld::new(desc.layout, desc.start)
    }
}

impl From<GridWorld> for GridDescriptor {
    fn from(grid: GridWorld) -> Self {
        GridDescriptor {
            grid_size: None,
            layout: grid.cells,
            start: grid.start,
        }
    }
}
