//! Shot resolution against a truth grid, its view grid and the fleet registry.

use alloc::borrow::ToOwned;
use alloc::vec::Vec;

use crate::common::{Coord, GameError, ShotOutcome};
use crate::fleet::FleetRegistry;
use crate::grid::{CellState, Grid};

/// Resolve one shot at `coord`.
///
/// Bounds are checked before anything is written. A cell already fired upon is
/// reported as [`ShotOutcome::AlreadyTargeted`] with no state change. A hit
/// that completes a ship turns all its cells `Sunk` in both grids and removes
/// the instance from `registry`.
pub fn resolve_shot(
    coord: Coord,
    truth: &mut Grid,
    view: &mut Grid,
    registry: &mut FleetRegistry,
) -> Result<ShotOutcome, GameError> {
    if truth.width() != view.width() || truth.height() != view.height() {
        return Err(GameError::InvariantViolation(
            "truth and view grids have different dimensions",
        ));
    }
    if view.cell_at(coord)?.is_fired() {
        return Ok(ShotOutcome::AlreadyTargeted);
    }

    match truth.cell_at(coord)? {
        CellState::Occupied(id) => {
            let ship = registry.instance_mut(id).ok_or(GameError::InvariantViolation(
                "occupied cell refers to an unregistered ship",
            ))?;
            if !ship.register_hit(coord) {
                return Err(GameError::InvariantViolation(
                    "occupied cell is not part of its ship",
                ));
            }
            truth.set_cell(coord, CellState::Hit)?;
            view.set_cell(coord, CellState::Hit)?;

            if !ship.is_sunk() {
                return Ok(ShotOutcome::Hit {
                    ship: id,
                    name: ship.name().to_owned(),
                    sunk: false,
                });
            }
            let name = ship.name().to_owned();
            let cells: Vec<Coord> = ship.cells().to_vec();
            for cell in cells {
                truth.set_cell(cell, CellState::Sunk)?;
                view.set_cell(cell, CellState::Sunk)?;
            }
            registry.remove(id).ok_or(GameError::InvariantViolation(
                "sunk ship could not be removed from the registry",
            ))?;
            log::debug!("{} {} sunk by the shot at {}", name, id, coord);
            Ok(ShotOutcome::Hit {
                ship: id,
                name,
                sunk: true,
            })
        }
        CellState::Empty => {
            truth.set_cell(coord, CellState::Miss)?;
            view.set_cell(coord, CellState::Miss)?;
            Ok(ShotOutcome::Miss)
        }
        CellState::Hit | CellState::Sunk | CellState::Miss => Err(GameError::InvariantViolation(
            "truth grid records a shot the view grid does not",
        )),
    }
}
