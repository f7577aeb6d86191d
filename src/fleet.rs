//! Fleet registry: live ship instances grouped by ship type.

use alloc::borrow::ToOwned;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::common::{Coord, GameError, ShipId};
use crate::ship::ShipInstance;

/// One ship type in the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipClass {
    length: usize,
    quantity: usize,
    instances: Vec<ShipInstance>,
}

impl ShipClass {
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of live instances of this type.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    pub fn instances(&self) -> &[ShipInstance] {
        &self.instances
    }
}

/// Map from ship-type name to its live instances.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FleetRegistry {
    classes: BTreeMap<String, ShipClass>,
    next_id: u32,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a placed ship. Its cells must already be validated against the grid.
    pub(crate) fn register(
        &mut self,
        name: &str,
        length: usize,
        cells: Vec<Coord>,
    ) -> Result<ShipId, GameError> {
        if let Some(class) = self.classes.get(name) {
            if class.length != length {
                return Err(GameError::InvalidFleet {
                    ship: name.to_owned(),
                    reason: "length differs from the registered ship type",
                });
            }
        }
        let id = ShipId(self.next_id);
        self.next_id += 1;
        let class = self
            .classes
            .entry(name.to_owned())
            .or_insert_with(|| ShipClass {
                length,
                quantity: 0,
                instances: Vec::new(),
            });
        class.instances.push(ShipInstance::new(id, name.to_owned(), cells));
        class.quantity += 1;
        Ok(id)
    }

    /// Returns `true` once every ship type has been removed.
    pub fn is_defeated(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn class(&self, name: &str) -> Option<&ShipClass> {
        self.classes.get(name)
    }

    /// Ship types in name order.
    pub fn classes(&self) -> impl Iterator<Item = (&str, &ShipClass)> {
        self.classes.iter().map(|(name, class)| (name.as_str(), class))
    }

    pub fn instances(&self) -> impl Iterator<Item = &ShipInstance> {
        self.classes.values().flat_map(|class| class.instances.iter())
    }

    pub fn instance(&self, id: ShipId) -> Option<&ShipInstance> {
        self.instances().find(|ship| ship.id() == id)
    }

    pub(crate) fn instance_mut(&mut self, id: ShipId) -> Option<&mut ShipInstance> {
        self.classes
            .values_mut()
            .flat_map(|class| class.instances.iter_mut())
            .find(|ship| ship.id() == id)
    }

    /// Remove a sunk instance, dropping its ship type when none remain.
    pub(crate) fn remove(&mut self, id: ShipId) -> Option<ShipInstance> {
        let name = self.instance(id)?.name().to_owned();
        let class = self.classes.get_mut(&name)?;
        let pos = class.instances.iter().position(|ship| ship.id() == id)?;
        let removed = class.instances.remove(pos);
        class.quantity -= 1;
        if class.quantity == 0 {
            self.classes.remove(&name);
        }
        Some(removed)
    }

    /// Total number of live ships.
    pub fn ship_count(&self) -> usize {
        self.classes.values().map(|class| class.quantity).sum()
    }

    /// Lengths of every live ship, one entry per instance.
    pub fn live_lengths(&self) -> Vec<usize> {
        self.instances().map(ShipInstance::len).collect()
    }

    /// Length of the biggest ship still afloat.
    pub fn largest_live_length(&self) -> Option<usize> {
        self.classes.values().map(|class| class.length).max()
    }

    /// Verify `quantity == live instances` and that no sunk ship lingers.
    pub fn check_invariants(&self) -> Result<(), GameError> {
        for class in self.classes.values() {
            if class.quantity != class.instances.len() {
                return Err(GameError::InvariantViolation(
                    "ship type quantity does not match its live instances",
                ));
            }
            if class.quantity == 0 {
                return Err(GameError::InvariantViolation(
                    "ship type with no live instances left in the registry",
                ));
            }
            if class.instances.iter().any(ShipInstance::is_sunk) {
                return Err(GameError::InvariantViolation(
                    "sunk ship still registered as live",
                ));
            }
        }
        Ok(())
    }
}

/// Returns `true` when the registry holds no ships.
pub fn is_fleet_defeated(registry: &FleetRegistry) -> bool {
    registry.is_defeated()
}
