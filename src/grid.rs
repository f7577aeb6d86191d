//! Fixed-size cell grid shared by the truth and view sides of a board.

use alloc::vec::Vec;
use core::fmt;

use crate::common::{Coord, Direction, GameError, ShipId};

/// State of a single grid cell.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    /// Undamaged segment of a live ship. Never present in a view grid.
    Occupied(ShipId),
    /// Damaged segment of a ship that is still afloat.
    Hit,
    /// Segment of a sunk ship. Terminal.
    Sunk,
    Miss,
}

impl CellState {
    /// Whether a shot has already landed on this cell.
    pub fn is_fired(self) -> bool {
        matches!(self, CellState::Hit | CellState::Sunk | CellState::Miss)
    }

    fn glyph(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Occupied(_) => 'S',
            CellState::Hit => 'X',
            CellState::Sunk => '#',
            CellState::Miss => 'o',
        }
    }
}

/// `width` x `height` array of cells stored row-major.
#[derive(Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellState>,
}

impl Grid {
    /// Create a grid with every cell `Empty`.
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        if width == 0 || height == 0 {
            return Err(GameError::InvalidDimensions { width, height });
        }
        let mut cells = Vec::new();
        cells.resize(width * height, CellState::Empty);
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if `coord` lies inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.height && coord.col < self.width
    }

    fn index(&self, coord: Coord) -> Result<usize, GameError> {
        if !self.contains(coord) {
            return Err(GameError::OutOfBounds {
                coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok(coord.row * self.width + coord.col)
    }

    /// State of the cell at `coord`.
    pub fn cell_at(&self, coord: Coord) -> Result<CellState, GameError> {
        let idx = self.index(coord)?;
        Ok(self.cells[idx])
    }

    /// Overwrite the cell at `coord`. Only bounds are validated; keeping the
    /// truth and view grids consistent is up to the caller.
    pub fn set_cell(&mut self, coord: Coord, state: CellState) -> Result<(), GameError> {
        let idx = self.index(coord)?;
        self.cells[idx] = state;
        Ok(())
    }

    /// In-bounds orthogonal neighbour of `coord`.
    pub fn neighbour(&self, coord: Coord, dir: Direction) -> Option<Coord> {
        coord.step(dir).filter(|c| self.contains(*c))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Coord, CellState)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &state)| (Coord::new(i / width, i % width), state))
    }

    /// Number of cells whose state satisfies `pred`.
    pub fn count<F: Fn(CellState) -> bool>(&self, pred: F) -> usize {
        self.cells.iter().filter(|&&s| pred(s)).count()
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid {}x{} {{", self.width, self.height)?;
        for row in self.cells.chunks(self.width) {
            f.write_str("  ")?;
            for cell in row {
                write!(f, "{}", cell.glyph())?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}
