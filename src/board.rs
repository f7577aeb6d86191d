//! One side of a match: ship layout, what the opponent has seen of it, and
//! the live fleet.

use crate::chooser::Chooser;
use crate::common::{Coord, GameError, ShipId, ShotOutcome};
use crate::config::FleetConfig;
use crate::fleet::FleetRegistry;
use crate::grid::{CellState, Grid};
use crate::placement::{deploy_fleet, place_ship};
use crate::ship::Orientation;
use crate::shot::resolve_shot;

/// Truth grid, view grid and fleet registry of one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    truth: Grid,
    view: Grid,
    registry: FleetRegistry,
}

impl Board {
    /// Create an empty board (no ships placed).
    pub fn new(width: usize, height: usize) -> Result<Self, GameError> {
        Ok(Board {
            truth: Grid::new(width, height)?,
            view: Grid::new(width, height)?,
            registry: FleetRegistry::new(),
        })
    }

    /// Create a board with `fleet` deployed at random.
    pub fn deploy<C: Chooser + ?Sized>(
        width: usize,
        height: usize,
        fleet: &FleetConfig,
        chooser: &mut C,
    ) -> Result<Self, GameError> {
        let mut truth = Grid::new(width, height)?;
        let registry = deploy_fleet(&mut truth, fleet, chooser)?;
        Ok(Board {
            truth,
            view: Grid::new(width, height)?,
            registry,
        })
    }

    /// Place a single ship at `origin`.
    pub fn place_ship(
        &mut self,
        name: &str,
        length: usize,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<ShipId, GameError> {
        place_ship(
            &mut self.truth,
            &mut self.registry,
            name,
            length,
            origin,
            orientation,
        )
    }

    /// Process a shot at `coord`, marking hits/misses and reporting the result.
    pub fn fire_at(&mut self, coord: Coord) -> Result<ShotOutcome, GameError> {
        resolve_shot(coord, &mut self.truth, &mut self.view, &mut self.registry)
    }

    /// Returns `true` when all ships are sunk.
    pub fn is_defeated(&self) -> bool {
        self.registry.is_defeated()
    }

    pub fn truth(&self) -> &Grid {
        &self.truth
    }

    /// The grid as the opposing shooter sees it.
    pub fn view(&self) -> &Grid {
        &self.view
    }

    pub fn registry(&self) -> &FleetRegistry {
        &self.registry
    }

    pub fn width(&self) -> usize {
        self.truth.width()
    }

    pub fn height(&self) -> usize {
        self.truth.height()
    }

    /// Cross-check grids and registry: the view never leaks `Occupied`, every
    /// fired view cell agrees with the truth grid, and every live ship's cells
    /// read `Occupied(id)` or `Hit` in agreement with its damage record.
    pub fn check_consistency(&self) -> Result<(), GameError> {
        self.registry.check_invariants()?;
        for ((coord, seen), (_, actual)) in self.view.cells().zip(self.truth.cells()) {
            match seen {
                CellState::Occupied(_) => {
                    return Err(GameError::InvariantViolation(
                        "view grid exposes an undamaged ship cell",
                    ))
                }
                CellState::Empty => {
                    if actual.is_fired() {
                        return Err(GameError::InvariantViolation(
                            "truth grid records a shot the view grid does not",
                        ));
                    }
                }
                fired => {
                    if fired != actual {
                        return Err(GameError::InvariantViolation(
                            "view grid disagrees with the truth grid",
                        ));
                    }
                }
            }
            if let CellState::Occupied(id) = actual {
                let live = self
                    .registry
                    .instance(id)
                    .map_or(false, |ship| ship.contains(coord) && !ship.is_damaged(coord));
                if !live {
                    return Err(GameError::InvariantViolation(
                        "occupied cell does not match an undamaged live segment",
                    ));
                }
            }
        }
        for ship in self.registry.instances() {
            for &cell in ship.cells() {
                let expected = if ship.is_damaged(cell) {
                    CellState::Hit
                } else {
                    CellState::Occupied(ship.id())
                };
                if self.truth.cell_at(cell)? != expected {
                    return Err(GameError::InvariantViolation(
                        "ship segment disagrees with the truth grid",
                    ));
                }
            }
        }
        Ok(())
    }
}
