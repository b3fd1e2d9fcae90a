//! Shortest-route search over the lane graph.
//!
//! Lanes are unweighted, so a breadth-first search gives the route with the
//! fewest hops. Among equal-length routes the one found first wins; callers
//! must not rely on a particular choice.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use serde::{Deserialize, Serialize};
use starmap_types::PlanetId;

use crate::error::GalaxyError;
use crate::galaxy::Galaxy;

/// Upper bound on how many planets a single search may expand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchBudget {
    /// Maximum number of planets dequeued before the search gives up.
    pub max_expansions: usize,
}

impl SearchBudget {
    /// Create a budget of `max_expansions` planet expansions.
    pub const fn new(max_expansions: usize) -> Self {
        Self { max_expansions }
    }
}

/// An ordered list of planets from an origin to a destination, inclusive.
///
/// Consecutive planets are adjacent. A route from a planet to itself holds
/// just that planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    origin: PlanetId,
    hops: Vec<PlanetId>,
}

impl Route {
    /// A zero-hop route that stays at `origin`.
    pub const fn stay(origin: PlanetId) -> Self {
        Self {
            origin,
            hops: Vec::new(),
        }
    }

    /// Where the route starts.
    pub const fn origin(&self) -> &PlanetId {
        &self.origin
    }

    /// Where the route ends.
    pub fn destination(&self) -> &PlanetId {
        self.hops.last().unwrap_or(&self.origin)
    }

    /// Number of lanes travelled.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }

    /// Number of planets on the route, origin included.
    pub fn len(&self) -> usize {
        self.hops.len().saturating_add(1)
    }

    /// Always `false`; every route contains at least its origin.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Planets in travel order, origin first.
    pub fn planets(&self) -> impl Iterator<Item = &PlanetId> + Clone {
        std::iter::once(&self.origin).chain(self.hops.iter())
    }

    /// Whether the route passes through `planet`.
    pub fn contains(&self, planet: &str) -> bool {
        self.planets().any(|p| p.as_str() == planet)
    }

    /// Copy the planets into a vector, origin first.
    pub fn to_vec(&self) -> Vec<PlanetId> {
        self.planets().cloned().collect()
    }

    /// The same route travelled backwards.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut planets = self.to_vec();
        planets.reverse();
        let mut iter = planets.into_iter();
        match iter.next() {
            Some(origin) => Self {
                origin,
                hops: iter.collect(),
            },
            None => self.clone(),
        }
    }
}

/// Find a route with the fewest hops from `from` to `to`.
///
/// # Errors
///
/// Returns [`GalaxyError::PlanetNotFound`] if `from` is not in the galaxy,
/// [`GalaxyError::NoRouteFound`] if `to` is unknown or unreachable, or
/// [`GalaxyError::SearchBudgetExhausted`] if `budget` runs out first.
pub fn shortest_route(
    galaxy: &Galaxy,
    from: &str,
    to: &str,
    budget: Option<SearchBudget>,
) -> Result<Route, GalaxyError> {
    let origin = galaxy
        .planet(from)
        .map(|p| p.id().clone())
        .ok_or_else(|| GalaxyError::PlanetNotFound(PlanetId::from(from)))?;
    let goal = PlanetId::from(to);

    if origin == goal {
        return Ok(Route::stay(origin));
    }
    let no_route = || GalaxyError::NoRouteFound {
        from: origin.clone(),
        to: goal.clone(),
    };
    if !galaxy.contains(to) {
        return Err(no_route());
    }

    // Predecessor map for path reconstruction.
    let mut prev: BTreeMap<&PlanetId, &PlanetId> = BTreeMap::new();
    let mut visited: BTreeSet<&PlanetId> = BTreeSet::new();
    let mut queue: VecDeque<&PlanetId> = VecDeque::new();
    let mut expansions: usize = 0;

    visited.insert(&origin);
    queue.push_back(&origin);

    let mut found = false;
    while let Some(current) = queue.pop_front() {
        if *current == goal {
            found = true;
            break;
        }
        if let Some(limit) = budget.filter(|b| expansions >= b.max_expansions) {
            tracing::debug!(from = %origin, to = %goal, expansions, "route search budget exhausted");
            return Err(GalaxyError::SearchBudgetExhausted {
                from: origin.clone(),
                to: goal.clone(),
                max_expansions: limit.max_expansions,
            });
        }
        expansions = expansions.saturating_add(1);

        let Some(node) = galaxy.planet(current.as_str()) else {
            continue;
        };
        for neighbor in node.neighbors() {
            if visited.insert(neighbor) {
                prev.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    if !found {
        tracing::debug!(from = %origin, to = %goal, expansions, "no route");
        return Err(no_route());
    }

    let mut hops = VecDeque::new();
    let mut current = &goal;
    while *current != origin {
        hops.push_front(current.clone());
        let Some(&predecessor) = prev.get(current) else {
            return Err(no_route());
        };
        current = predecessor;
    }

    tracing::debug!(from = %origin, to = %goal, hops = hops.len(), expansions, "route found");
    Ok(Route {
        origin: origin.clone(),
        hops: hops.into_iter().collect(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use starmap_types::PlanetEnvironment;

    use super::*;

    fn chain(names: &[&str]) -> Galaxy {
        let mut galaxy = Galaxy::new();
        for name in names {
            galaxy
                .add_planet(crate::PlanetNode::new(*name, PlanetEnvironment::Barren))
                .unwrap();
        }
        for pair in names.windows(2) {
            if let [a, b] = pair {
                galaxy.add_neighbor(a, b).unwrap();
            }
        }
        galaxy
    }

    fn names(route: &Route) -> Vec<&str> {
        route.planets().map(PlanetId::as_str).collect()
    }

    #[test]
    fn self_route_is_single_planet() {
        let galaxy = chain(&["A", "B"]);
        let route = shortest_route(&galaxy, "A", "A", None).ok();
        assert_eq!(route.as_ref().map(names), Some(vec!["A"]));
        assert_eq!(route.map(|r| r.hop_count()), Some(0));
    }

    #[test]
    fn follows_chain_beyond_first_hop() {
        let galaxy = chain(&["A", "B", "C", "D", "E"]);
        let route = shortest_route(&galaxy, "A", "E", None).ok();
        assert_eq!(route.as_ref().map(names), Some(vec!["A", "B", "C", "D", "E"]));
    }

    #[test]
    fn unknown_origin_is_not_found() {
        let galaxy = chain(&["A"]);
        assert!(matches!(
            shortest_route(&galaxy, "Z", "A", None),
            Err(GalaxyError::PlanetNotFound(_))
        ));
    }

    #[test]
    fn unknown_destination_has_no_route() {
        let galaxy = chain(&["A", "B"]);
        assert!(matches!(
            shortest_route(&galaxy, "A", "Z", None),
            Err(GalaxyError::NoRouteFound { .. })
        ));
    }

    #[test]
    fn budget_limits_expansions() {
        let galaxy = chain(&["A", "B", "C", "D", "E"]);
        assert!(matches!(
            shortest_route(&galaxy, "A", "E", Some(SearchBudget::new(2))),
            Err(GalaxyError::SearchBudgetExhausted { max_expansions: 2, .. })
        ));
        assert!(shortest_route(&galaxy, "A", "E", Some(SearchBudget::new(4))).is_ok());
    }

    #[test]
    fn route_accessors() {
        let galaxy = chain(&["A", "B", "C"]);
        let route = shortest_route(&galaxy, "A", "C", None).unwrap();
        assert_eq!(route.origin().as_str(), "A");
        assert_eq!(route.destination().as_str(), "C");
        assert_eq!(route.len(), 3);
        assert!(route.contains("B"));
        assert!(!route.contains("D"));
        assert_eq!(names(&route.reversed()), vec!["C", "B", "A"]);
    }
}
