//! Ship instances and their geometry.

use alloc::string::String;
use alloc::vec::Vec;

use crate::common::{Coord, ShipId};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
    /// Length-1 ships have no direction.
    Single,
}

impl Orientation {
    /// `(width, height)` covered by a ship of `length` in this orientation.
    pub fn footprint(self, length: usize) -> (usize, usize) {
        match self {
            _ if length == 1 => (1, 1),
            Orientation::Horizontal => (length, 1),
            Orientation::Vertical => (1, length),
            Orientation::Single => (1, 1),
        }
    }

    /// Cells covered by a ship of `length` starting at `origin`.
    pub fn cells_from(self, origin: Coord, length: usize) -> impl Iterator<Item = Coord> {
        let (width, height) = self.footprint(length);
        let horizontal = width > 1;
        (0..width.max(height)).map(move |i| {
            if horizontal {
                Coord::new(origin.row, origin.col + i)
            } else {
                Coord::new(origin.row + i, origin.col)
            }
        })
    }
}

/// A ship placed on the grid, tracking damage per segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipInstance {
    id: ShipId,
    name: String,
    cells: Vec<Coord>,
    damaged: Vec<bool>,
}

impl ShipInstance {
    pub(crate) fn new(id: ShipId, name: String, cells: Vec<Coord>) -> Self {
        let damaged = cells.iter().map(|_| false).collect();
        Self {
            id,
            name,
            cells,
            damaged,
        }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Occupied cells, bow to stern.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Orientation derived from the cell sequence.
    pub fn orientation(&self) -> Orientation {
        match self.cells.as_slice() {
            [first, second, ..] if first.row == second.row => Orientation::Horizontal,
            [_, _, ..] => Orientation::Vertical,
            _ => Orientation::Single,
        }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn is_damaged(&self, coord: Coord) -> bool {
        self.cells
            .iter()
            .position(|&c| c == coord)
            .map_or(false, |i| self.damaged[i])
    }

    /// Mark the segment at `coord` damaged. Returns `false` if the ship does
    /// not occupy `coord`.
    pub fn register_hit(&mut self, coord: Coord) -> bool {
        match self.cells.iter().position(|&c| c == coord) {
            Some(i) => {
                self.damaged[i] = true;
                true
            }
            None => false,
        }
    }

    /// Check if the ship is sunk (all segments hit).
    pub fn is_sunk(&self) -> bool {
        self.damaged.iter().all(|&d| d)
    }
}
