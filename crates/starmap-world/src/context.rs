//! Situational contexts.
//!
//! A [`Context`] describes the situation at one place: which system and
//! planet, the local environment, who is in charge, and which ships are
//! present. It holds only ids. The planet is resolved against a [`Galaxy`]
//! and the ships against a [`ShipRegistry`] when needed, so a context never
//! keeps either alive and tolerates them disappearing.
//!
//! The context's owner is independent of the planet's faction control. A
//! faction can own a context while holding no share of the planet.

use std::collections::BTreeSet;

use starmap_fleet::{Ship, ShipRegistry};
use starmap_types::{ContextSnapshot, FactionId, PlanetId, ShipId, SystemEnvironment};

use crate::error::GalaxyError;
use crate::galaxy::Galaxy;
use crate::planet::PlanetNode;

/// Snapshot of a system, its planet, environment, owner, and present ships.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Context {
    system: String,
    planet: PlanetId,
    environment: SystemEnvironment,
    owner: FactionId,
    ships: BTreeSet<ShipId>,
}

impl Context {
    /// Create a disputed context with no ships.
    pub fn new(
        system: impl Into<String>,
        planet: impl Into<PlanetId>,
        environment: SystemEnvironment,
    ) -> Self {
        Self::with_owner(system, planet, environment, FactionId::disputed())
    }

    /// Create a context owned by `owner`, with no ships.
    pub fn with_owner(
        system: impl Into<String>,
        planet: impl Into<PlanetId>,
        environment: SystemEnvironment,
        owner: FactionId,
    ) -> Self {
        Self {
            system: system.into(),
            planet: planet.into(),
            environment,
            owner,
            ships: BTreeSet::new(),
        }
    }

    /// Create a context for a planet in `galaxy`.
    ///
    /// The owner is the faction holding a strict majority of the planet, or
    /// the disputed sentinel if none does.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`] if the planet does not exist.
    pub fn observe(
        galaxy: &Galaxy,
        system: impl Into<String>,
        planet: &str,
        environment: SystemEnvironment,
    ) -> Result<Self, GalaxyError> {
        let node = galaxy
            .planet(planet)
            .ok_or_else(|| GalaxyError::PlanetNotFound(PlanetId::from(planet)))?;
        let owner = node
            .control
            .controlling_faction()
            .cloned()
            .unwrap_or_else(FactionId::disputed);
        Ok(Self::with_owner(system, node.id().clone(), environment, owner))
    }

    /// Mark a ship as present. Returns `false` if it already was.
    pub fn add_ship(&mut self, ship: ShipId) -> bool {
        self.ships.insert(ship)
    }

    /// Mark a ship as gone. Returns `false` if it was not present.
    pub fn remove_ship(&mut self, ship: &ShipId) -> bool {
        self.ships.remove(ship)
    }

    /// Hand the context to a new owner. Returns `false` if it already owns it.
    pub fn change_owner(&mut self, owner: FactionId) -> bool {
        if self.owner == owner {
            return false;
        }
        tracing::debug!(system = %self.system, from = %self.owner, to = %owner, "context owner changed");
        self.owner = owner;
        true
    }

    /// System name.
    pub fn system(&self) -> &str {
        &self.system
    }

    /// Planet this context refers to.
    pub const fn planet_id(&self) -> &PlanetId {
        &self.planet
    }

    /// Local environment.
    pub const fn environment(&self) -> SystemEnvironment {
        self.environment
    }

    /// Change the local environment.
    pub const fn set_environment(&mut self, environment: SystemEnvironment) {
        self.environment = environment;
    }

    /// Current owner, possibly the disputed sentinel.
    pub const fn owner(&self) -> &FactionId {
        &self.owner
    }

    /// Whether no faction owns the context.
    pub fn is_disputed(&self) -> bool {
        self.owner.is_disputed()
    }

    /// Ships present, in name order.
    pub fn ships(&self) -> impl Iterator<Item = &ShipId> + Clone {
        self.ships.iter()
    }

    /// Whether a ship is present.
    pub fn contains_ship(&self, ship: &ShipId) -> bool {
        self.ships.contains(ship)
    }

    /// Number of ships present.
    pub fn ship_count(&self) -> usize {
        self.ships.len()
    }

    /// Resolve the planet, or `None` if it no longer exists.
    pub fn planet<'g>(&self, galaxy: &'g Galaxy) -> Option<&'g PlanetNode> {
        galaxy.planet(self.planet.as_str())
    }

    /// Resolve the present ships that are still registered.
    pub fn present_ships<'r>(&self, registry: &'r ShipRegistry) -> Vec<&'r Ship> {
        self.ships.iter().filter_map(|id| registry.get(id)).collect()
    }

    /// Copy the context into snapshot form.
    pub fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            system: self.system.clone(),
            planet: self.planet.clone(),
            environment: self.environment,
            owner: self.owner.clone(),
            ships: self.ships.iter().cloned().collect(),
        }
    }
}
