//! Common types for Battleship: coordinates, shot outcomes and errors.

use alloc::string::String;
use core::fmt;

/// Zero-based cell coordinate. `row` indexes the height, `col` the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Orthogonal neighbour in `dir`, or `None` when it would underflow.
    /// Upper bounds are the grid's business, see [`crate::Grid::neighbour`].
    pub fn step(self, dir: Direction) -> Option<Coord> {
        let (row, col) = match dir {
            Direction::Up => (self.row.checked_sub(1)?, self.col),
            Direction::Down => (self.row + 1, self.col),
            Direction::Left => (self.row, self.col.checked_sub(1)?),
            Direction::Right => (self.row, self.col + 1),
        };
        Some(Coord { row, col })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Coord { row, col }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The four orthogonal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
    pub const HORIZONTAL: [Direction; 2] = [Direction::Left, Direction::Right];
    pub const VERTICAL: [Direction; 2] = [Direction::Up, Direction::Down];
}

/// Identity of one placed ship instance, unique within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipId(pub u32);

impl fmt::Display for ShipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Result of firing at a coordinate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum ShotOutcome {
    /// The shot struck a ship segment. `sunk` is set on the hit that
    /// finished the ship off, and only on that one.
    Hit {
        ship: ShipId,
        name: String,
        sunk: bool,
    },
    /// The shot landed in open water.
    Miss,
    /// The cell was fired upon before; nothing changed.
    AlreadyTargeted,
}

impl ShotOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotOutcome::Hit { .. })
    }

    pub fn is_sunk(&self) -> bool {
        matches!(self, ShotOutcome::Hit { sunk: true, .. })
    }
}

/// Errors returned by grid, placement and match operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Grids need at least one row and one column.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Coordinate outside `[0, height) x [0, width)`.
    #[error("coordinate {coord} is outside the {width}x{height} grid")]
    OutOfBounds {
        coord: Coord,
        width: usize,
        height: usize,
    },
    /// No legal run left for a ship during deployment.
    #[error("no legal position left for {ship} (length {length})")]
    PlacementInfeasible { ship: String, length: usize },
    /// Explicit placement collides with a ship already on the grid.
    #[error("{ship} would overlap another ship at {coord}")]
    ShipOverlaps { ship: String, coord: Coord },
    /// Fleet entry that can never be placed or conflicts with the registry.
    #[error("invalid fleet entry {ship}: {reason}")]
    InvalidFleet { ship: String, reason: &'static str },
    /// A turn was requested after the match ended.
    #[error("the match is already over")]
    MatchFinished,
    /// Bookkeeping between grids, registry and targeting state diverged.
    #[error("bookkeeping invariant violated: {0}")]
    InvariantViolation(&'static str),
}
