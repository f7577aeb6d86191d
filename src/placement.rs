//! Placement search: run and block finding over a grid, and random fleet
//! deployment on top of it.

use alloc::borrow::ToOwned;
use alloc::vec::Vec;

use crate::chooser::{pick_one, Chooser};
use crate::common::{Coord, GameError, ShipId};
use crate::config::FleetConfig;
use crate::fleet::FleetRegistry;
use crate::grid::{CellState, Grid};
use crate::ship::Orientation;

/// Origins (top-left cells) of every `width` x `height` block whose cells all
/// satisfy `accept`, in row-major order.
///
/// Runs in O(grid cells): each cell first records how many accepting cells end
/// at it along its row, then each column counts consecutive rows whose run is
/// wide enough.
pub fn find_blocks<F>(grid: &Grid, width: usize, height: usize, accept: F) -> Vec<Coord>
where
    F: Fn(CellState) -> bool,
{
    let (gw, gh) = (grid.width(), grid.height());
    if width == 0 || height == 0 || width > gw || height > gh {
        return Vec::new();
    }

    let mut run = Vec::with_capacity(gw * gh);
    for (coord, state) in grid.cells() {
        let len = if !accept(state) {
            0
        } else if coord.col == 0 {
            1
        } else {
            run[coord.row * gw + coord.col - 1] + 1
        };
        run.push(len);
    }

    let mut origins = Vec::new();
    for col in width - 1..gw {
        let mut streak = 0;
        for row in 0..gh {
            if run[row * gw + col] >= width {
                streak += 1;
            } else {
                streak = 0;
            }
            if streak >= height {
                origins.push(Coord::new(row + 1 - height, col + 1 - width));
            }
        }
    }
    origins.sort_unstable();
    origins
}

/// Every origin where a ship of `length` fits over `Empty` cells in
/// `orientation`. An empty result means no run fits.
pub fn find_runs(grid: &Grid, length: usize, orientation: Orientation) -> Vec<Coord> {
    let (width, height) = orientation.footprint(length);
    find_blocks(grid, width, height, |cell| cell == CellState::Empty)
}

/// Place a ship explicitly, writing its cells into `grid` and registering it.
pub fn place_ship(
    grid: &mut Grid,
    registry: &mut FleetRegistry,
    name: &str,
    length: usize,
    origin: Coord,
    orientation: Orientation,
) -> Result<ShipId, GameError> {
    if length == 0 || (length > 1 && orientation == Orientation::Single) {
        return Err(GameError::InvalidFleet {
            ship: name.to_owned(),
            reason: "length does not match the orientation",
        });
    }
    let cells: Vec<Coord> = orientation.cells_from(origin, length).collect();
    for &coord in &cells {
        if grid.cell_at(coord)? != CellState::Empty {
            return Err(GameError::ShipOverlaps {
                ship: name.to_owned(),
                coord,
            });
        }
    }
    let id = registry.register(name, length, cells.clone())?;
    for coord in cells {
        grid.set_cell(coord, CellState::Occupied(id))?;
    }
    log::debug!("placed {} {} at {} ({:?})", name, id, origin, orientation);
    Ok(id)
}

/// Deploy a whole fleet at random onto `grid`.
///
/// Ships are placed in configuration order. For each unit the orientation is
/// chosen uniformly; if no run fits that way the other orientation is tried.
/// The origin is then chosen uniformly among all fitting runs. On error the
/// grid is left untouched.
pub fn deploy_fleet<C: Chooser + ?Sized>(
    grid: &mut Grid,
    fleet: &FleetConfig,
    chooser: &mut C,
) -> Result<FleetRegistry, GameError> {
    fleet.validate(grid.width(), grid.height())?;

    let mut staged = grid.clone();
    let mut registry = FleetRegistry::new();
    for spec in fleet.ships() {
        for _ in 0..spec.quantity() {
            let (orientation, origins) = candidate_runs(&staged, spec.length(), chooser);
            let origin = *pick_one(chooser, &origins).ok_or_else(|| {
                log::debug!("no run of length {} left for {}", spec.length(), spec.name());
                GameError::PlacementInfeasible {
                    ship: spec.name().to_owned(),
                    length: spec.length(),
                }
            })?;
            place_ship(
                &mut staged,
                &mut registry,
                spec.name(),
                spec.length(),
                origin,
                orientation,
            )?;
        }
    }
    *grid = staged;
    Ok(registry)
}

fn candidate_runs<C: Chooser + ?Sized>(
    grid: &Grid,
    length: usize,
    chooser: &mut C,
) -> (Orientation, Vec<Coord>) {
    if length == 1 {
        return (Orientation::Single, find_runs(grid, 1, Orientation::Single));
    }
    let order = [Orientation::Horizontal, Orientation::Vertical];
    let first = *pick_one(chooser, &order).unwrap_or(&Orientation::Horizontal);
    let second = if first == Orientation::Horizontal {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    };
    let runs = find_runs(grid, length, first);
    if !runs.is_empty() {
        return (first, runs);
    }
    (second, find_runs(grid, length, second))
}
