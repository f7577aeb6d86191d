use alloc::borrow::ToOwned;
use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::common::GameError;

pub const DEFAULT_WIDTH: usize = 10;
pub const DEFAULT_HEIGHT: usize = 10;

/// One entry of a fleet: ship type name, length and how many to deploy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipSpec {
    name: String,
    length: usize,
    quantity: usize,
}

impl ShipSpec {
    pub fn new(name: impl Into<String>, length: usize, quantity: usize) -> Self {
        Self {
            name: name.into(),
            length,
            quantity,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn quantity(&self) -> usize {
        self.quantity
    }
}

/// Ordered fleet configuration supplied at match start.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FleetConfig {
    ships: Vec<ShipSpec>,
}

impl FleetConfig {
    pub fn new(ships: Vec<ShipSpec>) -> Self {
        Self { ships }
    }

    /// Carrier, Battleship, Cruiser, Submarine and Destroyer, one of each.
    pub fn standard() -> Self {
        Self::new(alloc::vec![
            ShipSpec::new("Carrier", 5, 1),
            ShipSpec::new("Battleship", 4, 1),
            ShipSpec::new("Cruiser", 3, 1),
            ShipSpec::new("Submarine", 3, 1),
            ShipSpec::new("Destroyer", 2, 1),
        ])
    }

    /// The larger nine-ship fleet: 30 cells on a 10x10 grid.
    pub fn classic() -> Self {
        Self::new(alloc::vec![
            ShipSpec::new("Aircraft Carrier", 5, 1),
            ShipSpec::new("Battleship", 4, 2),
            ShipSpec::new("Cruiser", 3, 3),
            ShipSpec::new("Submarine", 3, 2),
            ShipSpec::new("Destroyer", 2, 1),
        ])
    }

    pub fn with_ship(mut self, spec: ShipSpec) -> Self {
        self.ships.push(spec);
        self
    }

    pub fn ships(&self) -> &[ShipSpec] {
        &self.ships
    }

    /// Sum of `length * quantity` over the fleet.
    pub fn total_cells(&self) -> usize {
        self.ships.iter().map(|s| s.length * s.quantity).sum()
    }

    pub fn largest_length(&self) -> Option<usize> {
        self.ships
            .iter()
            .filter(|s| s.quantity > 0)
            .map(|s| s.length)
            .max()
    }

    /// Necessary (not sufficient) feasibility check: enough cells overall and
    /// every ship fits along at least one axis.
    pub fn fits(&self, width: usize, height: usize) -> bool {
        self.total_cells() <= width * height
            && self
                .ships
                .iter()
                .all(|s| s.quantity == 0 || s.length <= width.max(height))
    }

    /// Reject entries that can never be placed on a `width` x `height` grid.
    pub fn validate(&self, width: usize, height: usize) -> Result<(), GameError> {
        for spec in &self.ships {
            if spec.length == 0 {
                return Err(GameError::InvalidFleet {
                    ship: spec.name.clone(),
                    reason: "ship length must be positive",
                });
            }
            if spec.length > width.max(height) {
                return Err(GameError::InvalidFleet {
                    ship: spec.name.clone(),
                    reason: "ship is longer than both grid dimensions",
                });
            }
        }
        Ok(())
    }
}

impl FromStr for FleetConfig {
    type Err = GameError;

    /// Parse `Name:length[:quantity]` entries separated by commas, e.g.
    /// `Carrier:5,Destroyer:2:2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut ships = Vec::new();
        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let mut parts = entry.split(':').map(str::trim);
            let name = parts.next().unwrap_or_default();
            let invalid = |reason: &'static str| GameError::InvalidFleet {
                ship: entry.to_owned(),
                reason,
            };
            if name.is_empty() {
                return Err(invalid("missing ship name"));
            }
            let length = parts
                .next()
                .ok_or_else(|| invalid("missing ship length"))?
                .parse::<usize>()
                .map_err(|_| invalid("ship length is not a number"))?;
            let quantity = match parts.next() {
                Some(q) => q
                    .parse::<usize>()
                    .map_err(|_| invalid("ship quantity is not a number"))?,
                None => 1,
            };
            if parts.next().is_some() {
                return Err(invalid("expected Name:length[:quantity]"));
            }
            ships.push(ShipSpec::new(name, length, quantity));
        }
        if ships.is_empty() {
            return Err(GameError::InvalidFleet {
                ship: s.to_owned(),
                reason: "fleet has no ships",
            });
        }
        Ok(FleetConfig::new(ships))
    }
}

/// Everything needed to set up a self-play match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchConfig {
    pub width: usize,
    pub height: usize,
    pub fleet: FleetConfig,
    /// Maximum number of turns (both sides combined). `None` means
    /// `2 * width * height`, enough for each side to fire at every cell.
    pub turn_limit: Option<usize>,
}

impl MatchConfig {
    pub fn effective_turn_limit(&self) -> usize {
        self.turn_limit.unwrap_or(2 * self.width * self.height)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fleet: FleetConfig::standard(),
            turn_limit: None,
        }
    }
}
