//! Planet nodes in the galaxy graph.
//!
//! A [`PlanetNode`] owns its two ledgers and the set of neighboring planet
//! ids. Adjacency is only mutated through [`Galaxy`](crate::Galaxy), which
//! updates both endpoints together; the node itself exposes neighbors
//! read-only.

use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};

use serde::Serialize;
use starmap_types::{PlanetEnvironment, PlanetId, PlanetSnapshot};

use crate::faction::FactionControl;
use crate::resource::ResourceLedger;

/// One planet: identity, environment, ledgers, and adjacency.
///
/// Equality and hashing use the planet id only. Nodes are not deserialized
/// on their own; a stored galaxy reloads them through [`Galaxy`](crate::Galaxy),
/// which checks every lane against both endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct PlanetNode {
    id: PlanetId,
    environment: PlanetEnvironment,
    /// Resource stocks on this planet.
    pub resources: ResourceLedger,
    /// Faction control on this planet.
    pub control: FactionControl,
    neighbors: BTreeSet<PlanetId>,
}

impl PlanetNode {
    /// Create a planet with empty ledgers and no neighbors.
    pub fn new(id: impl Into<PlanetId>, environment: PlanetEnvironment) -> Self {
        Self {
            id: id.into(),
            environment,
            resources: ResourceLedger::new(),
            control: FactionControl::new(),
            neighbors: BTreeSet::new(),
        }
    }

    /// Replace the resource ledger.
    #[must_use]
    pub fn with_resources(mut self, resources: ResourceLedger) -> Self {
        self.resources = resources;
        self
    }

    /// Replace the faction control table.
    #[must_use]
    pub fn with_control(mut self, control: FactionControl) -> Self {
        self.control = control;
        self
    }

    /// The planet's id.
    pub const fn id(&self) -> &PlanetId {
        &self.id
    }

    /// The planet's environment tag.
    pub const fn environment(&self) -> PlanetEnvironment {
        self.environment
    }

    /// Change the environment tag.
    pub const fn set_environment(&mut self, environment: PlanetEnvironment) {
        self.environment = environment;
    }

    /// Adjacent planet ids. The iterator can be cloned to restart it.
    pub fn neighbors(&self) -> impl Iterator<Item = &PlanetId> + Clone {
        self.neighbors.iter()
    }

    /// Whether `other` is adjacent to this planet.
    pub fn is_adjacent(&self, other: &str) -> bool {
        self.neighbors.contains(other)
    }

    /// Number of adjacent planets.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    pub(crate) fn link(&mut self, other: PlanetId) -> bool {
        self.neighbors.insert(other)
    }

    pub(crate) fn unlink(&mut self, other: &PlanetId) -> bool {
        self.neighbors.remove(other)
    }

    pub(crate) fn take_links(&mut self) -> BTreeSet<PlanetId> {
        std::mem::take(&mut self.neighbors)
    }

    /// Copy the planet into snapshot form.
    pub fn snapshot(&self) -> PlanetSnapshot {
        PlanetSnapshot {
            id: self.id.clone(),
            environment: self.environment,
            neighbors: self.neighbors.iter().cloned().collect(),
            factions: self.control.shares(),
            resources: self.resources.stocks(),
        }
    }
}

impl PartialEq for PlanetNode {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PlanetNode {}

impl Hash for PlanetNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
