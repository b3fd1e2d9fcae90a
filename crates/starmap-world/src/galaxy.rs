//! Galaxy graph: planets as nodes, lanes as undirected unweighted edges.
//!
//! The [`Galaxy`] is an arena of [`PlanetNode`]s keyed by [`PlanetId`].
//! Each node stores the ids of its neighbors, so the cyclic lane graph never
//! needs shared ownership. Lanes are only added and removed here, and every
//! change touches both endpoints, so adjacency stays symmetric.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rust_decimal::Decimal;
use starmap_types::{FactionId, GalaxySnapshot, PlanetEnvironment, PlanetId, ResourceId};

use crate::config::GalaxyConfig;
use crate::error::GalaxyError;
use crate::faction::FactionControl;
use crate::planet::PlanetNode;
use crate::resource::{MissingResourcePolicy, ResourceLedger};
use crate::route::{self, Route, SearchBudget};

/// The galaxy graph holding all planets and lanes.
///
/// A deserialized galaxy is rebuilt planet by planet and lane by lane, so
/// stored documents obey the same rules as live mutations.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "GalaxyRecord")]
pub struct Galaxy {
    /// All planets indexed by name.
    planets: BTreeMap<PlanetId, PlanetNode>,
    /// How resource removals treat unstocked resources.
    missing_resource: MissingResourcePolicy,
    /// Default limit for route searches.
    search_budget: Option<SearchBudget>,
}

/// Wire form of a [`Galaxy`], validated before use.
#[derive(serde::Deserialize)]
struct GalaxyRecord {
    planets: BTreeMap<PlanetId, PlanetRecord>,
    #[serde(default)]
    missing_resource: MissingResourcePolicy,
    #[serde(default)]
    search_budget: Option<SearchBudget>,
}

/// Wire form of a [`PlanetNode`] inside a stored galaxy.
#[derive(serde::Deserialize)]
struct PlanetRecord {
    id: PlanetId,
    environment: PlanetEnvironment,
    #[serde(default)]
    resources: ResourceLedger,
    #[serde(default)]
    control: FactionControl,
    #[serde(default)]
    neighbors: BTreeSet<PlanetId>,
}

impl TryFrom<GalaxyRecord> for Galaxy {
    type Error = GalaxyError;

    fn try_from(record: GalaxyRecord) -> Result<Self, Self::Error> {
        let mut galaxy = Self::new();
        galaxy.missing_resource = record.missing_resource;
        galaxy.search_budget = record.search_budget;

        let mut lanes = BTreeSet::new();
        for (key, planet) in record.planets {
            if key != planet.id {
                return Err(GalaxyError::PlanetKeyMismatch { key, id: planet.id });
            }
            for neighbor in planet.neighbors {
                lanes.insert((planet.id.clone(), neighbor));
            }
            galaxy.add_planet(
                PlanetNode::new(planet.id, planet.environment)
                    .with_resources(planet.resources)
                    .with_control(planet.control),
            )?;
        }

        for (from, to) in &lanes {
            if !galaxy.contains(to.as_str()) {
                return Err(GalaxyError::PlanetNotFound(to.clone()));
            }
            if !lanes.contains(&(to.clone(), from.clone())) {
                return Err(GalaxyError::AsymmetricLane {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            galaxy.add_neighbor(from.as_str(), to.as_str())?;
        }
        Ok(galaxy)
    }
}

impl Galaxy {
    /// Create an empty galaxy with default policies.
    pub const fn new() -> Self {
        Self {
            planets: BTreeMap::new(),
            missing_resource: MissingResourcePolicy::Ignore,
            search_budget: None,
        }
    }

    /// Build a galaxy from configuration.
    ///
    /// # Errors
    ///
    /// Returns any error raised while adding the configured planets, lanes,
    /// resources, or faction shares.
    pub fn from_config(config: &GalaxyConfig) -> Result<Self, GalaxyError> {
        config.build()
    }

    // -------------------------------------------------------------------
    // Policies
    // -------------------------------------------------------------------

    /// How removals of unstocked resources are treated.
    pub const fn missing_resource_policy(&self) -> MissingResourcePolicy {
        self.missing_resource
    }

    /// Change how removals of unstocked resources are treated.
    pub const fn set_missing_resource_policy(&mut self, policy: MissingResourcePolicy) {
        self.missing_resource = policy;
    }

    /// Default limit applied by [`find_route`](Self::find_route).
    pub const fn search_budget(&self) -> Option<SearchBudget> {
        self.search_budget
    }

    /// Change the default route search limit. `None` means unbounded.
    pub const fn set_search_budget(&mut self, budget: Option<SearchBudget>) {
        self.search_budget = budget;
    }

    // -------------------------------------------------------------------
    // Planet operations
    // -------------------------------------------------------------------

    /// Add a planet.
    ///
    /// Any neighbors the node already lists (for example when copied from
    /// another galaxy) are linked symmetrically.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::DuplicatePlanet`] if a planet with the same name
    /// exists, or the errors of [`add_planet_linked`](Self::add_planet_linked).
    pub fn add_planet(&mut self, node: PlanetNode) -> Result<(), GalaxyError> {
        self.add_planet_linked(node, &[])
    }

    /// Add a planet and link it to existing planets in one step.
    ///
    /// Nothing is changed if any step would fail.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::DuplicatePlanet`] if the name is taken,
    /// [`GalaxyError::SelfAdjacency`] if the planet lists itself, or
    /// [`GalaxyError::PlanetNotFound`] if a neighbor does not exist.
    pub fn add_planet_linked(
        &mut self,
        mut node: PlanetNode,
        neighbors: &[&str],
    ) -> Result<(), GalaxyError> {
        let id = node.id().clone();
        if self.planets.contains_key(&id) {
            return Err(GalaxyError::DuplicatePlanet(id));
        }

        let mut links: BTreeSet<PlanetId> = node.take_links();
        links.extend(neighbors.iter().map(|n| PlanetId::from(*n)));
        for neighbor in &links {
            if *neighbor == id {
                return Err(GalaxyError::SelfAdjacency(id));
            }
            if !self.planets.contains_key(neighbor) {
                return Err(GalaxyError::PlanetNotFound(neighbor.clone()));
            }
        }

        tracing::debug!(planet = %id, environment = ?node.environment(), lanes = links.len(), "planet added");
        self.planets.insert(id.clone(), node);
        for neighbor in links {
            self.link(&id, &neighbor)?;
        }
        Ok(())
    }

    /// Remove a planet and every lane touching it.
    ///
    /// Returns the detached node (with no neighbors), or `None` if absent.
    pub fn remove_planet(&mut self, id: &str) -> Option<PlanetNode> {
        let mut node = self.planets.remove(id)?;
        for neighbor in node.take_links() {
            if let Some(other) = self.planets.get_mut(&neighbor) {
                other.unlink(node.id());
            }
        }
        tracing::debug!(planet = %node.id(), "planet removed");
        Some(node)
    }

    /// Get an immutable reference to a planet.
    pub fn planet(&self, id: &str) -> Option<&PlanetNode> {
        self.planets.get(id)
    }

    /// Get a mutable reference to a planet's ledgers and environment.
    pub fn planet_mut(&mut self, id: &str) -> Option<&mut PlanetNode> {
        self.planets.get_mut(id)
    }

    /// Whether a planet with this name exists.
    pub fn contains(&self, id: &str) -> bool {
        self.planets.contains_key(id)
    }

    /// Return the number of planets.
    pub fn planet_count(&self) -> usize {
        self.planets.len()
    }

    /// Return the number of undirected lanes.
    pub fn lane_count(&self) -> usize {
        self.planets
            .values()
            .fold(0_usize, |acc, p| acc.saturating_add(p.degree()))
            .checked_div(2)
            .unwrap_or(0)
    }

    /// Return all planet ids in name order.
    pub fn planet_ids(&self) -> Vec<PlanetId> {
        self.planets.keys().cloned().collect()
    }

    /// Iterate over all planets in name order.
    pub fn planets(&self) -> impl Iterator<Item = (&PlanetId, &PlanetNode)> {
        self.planets.iter()
    }

    // -------------------------------------------------------------------
    // Lane operations
    // -------------------------------------------------------------------

    /// Connect two planets with a lane.
    ///
    /// Returns `Ok(false)` if they were already adjacent.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::SelfAdjacency`] if `a == b`, or
    /// [`GalaxyError::PlanetNotFound`] if either planet is missing.
    pub fn add_neighbor(&mut self, a: &str, b: &str) -> Result<bool, GalaxyError> {
        let (a, b) = self.endpoints(a, b)?;
        if a == b {
            return Err(GalaxyError::SelfAdjacency(a));
        }
        let added = self.link(&a, &b)?;
        if added {
            tracing::debug!(a = %a, b = %b, "lane added");
        }
        Ok(added)
    }

    /// Remove the lane between two planets.
    ///
    /// Returns `Ok(false)` if they were not adjacent.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`] if either planet is missing.
    pub fn remove_neighbor(&mut self, a: &str, b: &str) -> Result<bool, GalaxyError> {
        let (a, b) = self.endpoints(a, b)?;
        let removed_ab = self.planets.get_mut(&a).is_some_and(|p| p.unlink(&b));
        let removed_ba = self.planets.get_mut(&b).is_some_and(|p| p.unlink(&a));
        let removed = removed_ab || removed_ba;
        if removed {
            tracing::debug!(a = %a, b = %b, "lane removed");
        }
        Ok(removed)
    }

    /// Neighbors of a planet. The iterator can be cloned to restart it.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`] if the planet is missing.
    pub fn neighbors(
        &self,
        id: &str,
    ) -> Result<impl Iterator<Item = &PlanetId> + Clone, GalaxyError> {
        self.planets
            .get(id)
            .map(PlanetNode::neighbors)
            .ok_or_else(|| GalaxyError::PlanetNotFound(PlanetId::from(id)))
    }

    /// Whether two planets share a lane. Unknown planets are never adjacent.
    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        self.planets.get(a).is_some_and(|p| p.is_adjacent(b))
    }

    /// Check whether every planet is reachable from every other planet.
    ///
    /// An empty galaxy counts as connected.
    pub fn is_connected(&self) -> bool {
        let Some(start) = self.planets.keys().next() else {
            return true;
        };

        let mut visited = BTreeSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            let Some(node) = self.planets.get(current) else {
                continue;
            };
            for neighbor in node.neighbors() {
                if visited.insert(neighbor) {
                    queue.push_back(neighbor);
                }
            }
        }

        visited.len() == self.planets.len()
    }

    // -------------------------------------------------------------------
    // Routing
    // -------------------------------------------------------------------

    /// Find a route with the fewest hops, using the galaxy's default budget.
    ///
    /// # Errors
    ///
    /// See [`route::shortest_route`].
    pub fn find_route(&self, from: &str, to: &str) -> Result<Route, GalaxyError> {
        route::shortest_route(self, from, to, self.search_budget)
    }

    /// Find a route with the fewest hops under an explicit budget.
    ///
    /// # Errors
    ///
    /// See [`route::shortest_route`].
    pub fn find_route_within(
        &self,
        from: &str,
        to: &str,
        budget: Option<SearchBudget>,
    ) -> Result<Route, GalaxyError> {
        route::shortest_route(self, from, to, budget)
    }

    // -------------------------------------------------------------------
    // Ledger operations
    // -------------------------------------------------------------------

    /// Add a resource to a planet's ledger. Returns the new quantity.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`] or
    /// [`GalaxyError::InvalidAmount`].
    pub fn add_resource(
        &mut self,
        planet: &str,
        resource: impl Into<ResourceId>,
        amount: f64,
    ) -> Result<f64, GalaxyError> {
        let resource = resource.into();
        let node = self.planet_mut_or_err(planet)?;
        let updated = node.resources.add_resource(resource.clone(), amount)?;
        tracing::debug!(planet, resource = %resource, amount, updated, "resource added");
        Ok(updated)
    }

    /// Remove a resource from a planet's ledger.
    ///
    /// Returns the remaining quantity, or `None` if the resource was not
    /// stocked and the galaxy ignores such removals.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`], [`GalaxyError::InvalidAmount`],
    /// or [`GalaxyError::ResourceNotPresent`] under
    /// [`MissingResourcePolicy::Reject`].
    pub fn remove_resource(
        &mut self,
        planet: &str,
        resource: &str,
        amount: f64,
    ) -> Result<Option<f64>, GalaxyError> {
        let policy = self.missing_resource;
        let node = self.planet_mut_or_err(planet)?;
        match node.resources.remove_resource(resource, amount) {
            Ok(Some(remaining)) => {
                tracing::debug!(planet, resource, amount, remaining, "resource removed");
                Ok(Some(remaining))
            }
            Ok(None) => match policy {
                MissingResourcePolicy::Ignore => Ok(None),
                MissingResourcePolicy::Reject => {
                    tracing::warn!(planet, resource, amount, "removal of unstocked resource rejected");
                    Err(GalaxyError::ResourceNotPresent(ResourceId::from(resource)))
                }
            },
            Err(e) => {
                tracing::warn!(planet, resource, amount, error = %e, "resource removal rejected");
                Err(e)
            }
        }
    }

    /// Give a faction a share of a planet.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`] or the errors of
    /// [`FactionControl::add_faction`](crate::FactionControl::add_faction).
    pub fn add_faction(
        &mut self,
        planet: &str,
        faction: impl Into<FactionId>,
        fraction: Decimal,
    ) -> Result<bool, GalaxyError> {
        let faction = faction.into();
        let node = self.planet_mut_or_err(planet)?;
        let added = node.control.add_faction(faction.clone(), fraction)?;
        if added {
            tracing::debug!(planet, faction = %faction, %fraction, "faction added");
        }
        Ok(added)
    }

    /// Remove a faction's share of a planet.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`].
    pub fn remove_faction(&mut self, planet: &str, faction: &str) -> Result<bool, GalaxyError> {
        let node = self.planet_mut_or_err(planet)?;
        let removed = node.control.remove_faction(faction);
        if removed {
            tracing::debug!(planet, faction, "faction removed");
        }
        Ok(removed)
    }

    /// Move control of a planet from one faction to another.
    ///
    /// # Errors
    ///
    /// Returns [`GalaxyError::PlanetNotFound`] or the errors of
    /// [`FactionControl::transfer_control`](crate::FactionControl::transfer_control).
    pub fn transfer_control(
        &mut self,
        planet: &str,
        from: &FactionId,
        to: impl Into<FactionId>,
        amount: Decimal,
    ) -> Result<(), GalaxyError> {
        let to = to.into();
        let node = self.planet_mut_or_err(planet)?;
        node.control.transfer_control(from, to.clone(), amount)?;
        tracing::debug!(planet, from = %from, to = %to, %amount, "control transferred");
        Ok(())
    }

    /// Copy the whole galaxy into snapshot form.
    pub fn snapshot(&self) -> GalaxySnapshot {
        GalaxySnapshot {
            planets: self.planets.values().map(PlanetNode::snapshot).collect(),
            lane_count: self.lane_count(),
        }
    }

    // -------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------

    fn planet_mut_or_err(&mut self, id: &str) -> Result<&mut PlanetNode, GalaxyError> {
        self.planets
            .get_mut(id)
            .ok_or_else(|| GalaxyError::PlanetNotFound(PlanetId::from(id)))
    }

    fn endpoints(&self, a: &str, b: &str) -> Result<(PlanetId, PlanetId), GalaxyError> {
        let a = self
            .planet(a)
            .map(|p| p.id().clone())
            .ok_or_else(|| GalaxyError::PlanetNotFound(PlanetId::from(a)))?;
        let b = self
            .planet(b)
            .map(|p| p.id().clone())
            .ok_or_else(|| GalaxyError::PlanetNotFound(PlanetId::from(b)))?;
        Ok((a, b))
    }

    fn link(&mut self, a: &PlanetId, b: &PlanetId) -> Result<bool, GalaxyError> {
        let added_ab = self
            .planets
            .get_mut(a)
            .ok_or_else(|| GalaxyError::PlanetNotFound(a.clone()))?
            .link(b.clone());
        let added_ba = self
            .planets
            .get_mut(b)
            .ok_or_else(|| GalaxyError::PlanetNotFound(b.clone()))?
            .link(a.clone());
        Ok(added_ab || added_ba)
    }
}
