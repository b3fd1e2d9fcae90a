//! The shared ship registry.
//!
//! Other parts of the galaxy (notably contexts) refer to ships by
//! [`ShipId`] and resolve them here, so a ship's lifetime is owned by the
//! registry alone.

use std::collections::BTreeMap;

use starmap_types::ShipId;

use crate::error::FleetError;
use crate::ship::Ship;

/// All live ships, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ShipRegistry {
    ships: BTreeMap<ShipId, Ship>,
}

impl ShipRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            ships: BTreeMap::new(),
        }
    }

    /// Register a ship.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::DuplicateShip`] if a ship with the same name is
    /// already registered.
    pub fn register(&mut self, ship: Ship) -> Result<(), FleetError> {
        let id = ship.id().clone();
        if self.ships.contains_key(&id) {
            return Err(FleetError::DuplicateShip(id));
        }
        tracing::debug!(ship = %id, class = %ship.class, "ship registered");
        self.ships.insert(id, ship);
        Ok(())
    }

    /// Remove a ship, returning it if it was registered.
    pub fn remove(&mut self, id: &ShipId) -> Option<Ship> {
        let removed = self.ships.remove(id);
        if removed.is_some() {
            tracing::debug!(ship = %id, "ship deregistered");
        }
        removed
    }

    /// Look up a ship.
    pub fn get(&self, id: &ShipId) -> Option<&Ship> {
        self.ships.get(id)
    }

    /// Look up a ship for modification.
    pub fn get_mut(&mut self, id: &ShipId) -> Option<&mut Ship> {
        self.ships.get_mut(id)
    }

    /// Whether a ship with this name is registered.
    pub fn contains(&self, id: &ShipId) -> bool {
        self.ships.contains_key(id)
    }

    /// Number of registered ships.
    pub fn len(&self) -> usize {
        self.ships.len()
    }

    /// Whether no ships are registered.
    pub fn is_empty(&self) -> bool {
        self.ships.is_empty()
    }

    /// Iterate over ships in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&ShipId, &Ship)> {
        self.ships.iter()
    }
}
