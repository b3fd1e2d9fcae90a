//! Property-style integration tests for the galaxy core.
//!
//! Covers lane symmetry, ledger invariants under arbitrary call sequences,
//! route correctness against an all-pairs reference, and contexts resolving
//! ships through the fleet registry.

// Integration tests use unwrap/indexing for clarity -- panicking on failure
// is the correct behavior in test code.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::float_cmp,
    clippy::cast_precision_loss
)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal_macros::dec;
use starmap_fleet::{CrewRole, Mission, Ship, ShipComponent, ShipRegistry};
use starmap_types::{FactionId, PlanetEnvironment, PlanetId, ShipId, SystemEnvironment};
use starmap_world::{
    Context, Galaxy, GalaxyError, PlanetNode, SearchBudget, SharedGalaxy, create_sol_galaxy, sol,
};

fn galaxy_of(names: &[&str], lanes: &[(&str, &str)]) -> Galaxy {
    let mut galaxy = Galaxy::new();
    for name in names {
        galaxy
            .add_planet(PlanetNode::new(*name, PlanetEnvironment::Barren))
            .unwrap();
    }
    for (a, b) in lanes {
        galaxy.add_neighbor(a, b).unwrap();
    }
    galaxy
}

fn route_names(galaxy: &Galaxy, from: &str, to: &str) -> Vec<String> {
    galaxy
        .find_route(from, to)
        .unwrap()
        .planets()
        .map(|p| p.as_str().to_owned())
        .collect()
}

// -----------------------------------------------------------------------
// Adjacency
// -----------------------------------------------------------------------

#[test]
fn adjacency_is_symmetric_after_random_edits() {
    let names = ["P0", "P1", "P2", "P3", "P4", "P5", "P6", "P7"];
    let mut galaxy = galaxy_of(&names, &[]);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..500 {
        let a = names[rng.random_range(0..names.len())];
        let b = names[rng.random_range(0..names.len())];
        if a == b {
            continue;
        }
        if rng.random_bool(0.6) {
            galaxy.add_neighbor(a, b).unwrap();
        } else {
            galaxy.remove_neighbor(a, b).unwrap();
        }
    }

    for (id, node) in galaxy.planets() {
        for neighbor in node.neighbors() {
            let other = galaxy.planet(neighbor.as_str()).unwrap();
            assert!(other.is_adjacent(id.as_str()), "{neighbor} missing back-link to {id}");
        }
    }
}

#[test]
fn add_then_remove_neighbor_clears_both_sides() {
    let mut galaxy = galaxy_of(&["A", "B"], &[]);
    assert!(galaxy.add_neighbor("A", "B").unwrap());
    assert!(galaxy.neighbors("B").unwrap().any(|p| p.as_str() == "A"));
    assert!(galaxy.remove_neighbor("B", "A").unwrap());
    assert_eq!(galaxy.neighbors("A").unwrap().count(), 0);
    assert_eq!(galaxy.neighbors("B").unwrap().count(), 0);
}

// -----------------------------------------------------------------------
// Ledgers
// -----------------------------------------------------------------------

#[test]
fn resources_never_go_negative() {
    let mut galaxy = galaxy_of(&["Depot"], &[]);
    let mut rng = StdRng::seed_from_u64(42);
    let resources = ["ore", "fuel", "water"];

    for _ in 0..2_000 {
        let resource = resources[rng.random_range(0..resources.len())];
        let amount = rng.random_range(0.0..50.0);
        let before = galaxy
            .planet("Depot")
            .unwrap()
            .resources
            .quantity(resource);

        if rng.random_bool(0.5) {
            galaxy.add_resource("Depot", resource, amount).unwrap();
        } else {
            match galaxy.remove_resource("Depot", resource, amount) {
                Ok(_) => {}
                Err(GalaxyError::InvalidAmount { .. }) => {
                    let after = galaxy
                        .planet("Depot")
                        .unwrap()
                        .resources
                        .quantity(resource);
                    assert_eq!(before, after, "rejected removal changed the ledger");
                }
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        for (_, qty) in galaxy.planet("Depot").unwrap().resources.iter() {
            assert!(qty >= 0.0 && qty.is_finite());
        }
    }
}

#[test]
fn repeated_faction_add_is_a_no_op() {
    let mut galaxy = galaxy_of(&["Mars"], &[]);
    assert!(galaxy.add_faction("Mars", "Martian Republic", dec!(0.4)).unwrap());
    let before = galaxy.planet("Mars").unwrap().control.clone();
    assert!(!galaxy.add_faction("Mars", "Martian Republic", dec!(0.4)).unwrap());
    assert_eq!(galaxy.planet("Mars").unwrap().control, before);
}

#[test]
fn renormalize_after_removal_restores_full_control() {
    let mut galaxy = create_sol_galaxy().unwrap();
    galaxy.remove_faction(sol::CERES, sol::TERRAN_UNION).unwrap();

    let control = &mut galaxy.planet_mut(sol::CERES).unwrap().control;
    assert_eq!(control.unclaimed(), dec!(0.2));
    assert!(control.renormalize());
    assert!(control.is_fully_apportioned());
    assert!(control.fraction(sol::BELT_SYNDICATE).unwrap() > dec!(0.55));
}

// -----------------------------------------------------------------------
// Routing
// -----------------------------------------------------------------------

#[test]
fn shortcut_beats_chain() {
    let galaxy = galaxy_of(
        &["A", "B", "C", "D"],
        &[("A", "B"), ("B", "C"), ("C", "D"), ("A", "D")],
    );
    assert_eq!(route_names(&galaxy, "A", "D"), vec!["A", "D"]);
}

#[test]
fn disconnected_planets_have_no_route() {
    let galaxy = galaxy_of(&["A", "B", "X", "Y"], &[("A", "B"), ("X", "Y")]);
    let err = galaxy.find_route("A", "Y").unwrap_err();
    match err {
        GalaxyError::NoRouteFound { from, to } => {
            assert_eq!(from, PlanetId::new("A"));
            assert_eq!(to, PlanetId::new("Y"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn self_route_is_single_planet() {
    let galaxy = galaxy_of(&["Solo"], &[]);
    assert_eq!(route_names(&galaxy, "Solo", "Solo"), vec!["Solo"]);
}

#[test]
fn earth_mars_jupiter_end_to_end() {
    let galaxy = galaxy_of(
        &["Earth", "Mars", "Jupiter"],
        &[("Earth", "Mars"), ("Mars", "Jupiter")],
    );
    assert_eq!(
        route_names(&galaxy, "Earth", "Jupiter"),
        vec!["Earth", "Mars", "Jupiter"]
    );
    assert_eq!(
        route_names(&galaxy, "Jupiter", "Earth"),
        vec!["Jupiter", "Mars", "Earth"]
    );
}

/// All-pairs hop distances by Floyd-Warshall.
fn all_pairs(n: usize, edges: &[(usize, usize)]) -> Vec<Vec<Option<usize>>> {
    let mut dist = vec![vec![None; n]; n];
    for (i, row) in dist.iter_mut().enumerate() {
        row[i] = Some(0);
    }
    for &(a, b) in edges {
        dist[a][b] = Some(1);
        dist[b][a] = Some(1);
    }
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                if let (Some(ik), Some(kj)) = (dist[i][k], dist[k][j]) {
                    let via = ik + kj;
                    if dist[i][j].is_none_or(|d| via < d) {
                        dist[i][j] = Some(via);
                    }
                }
            }
        }
    }
    dist
}

#[test]
fn routes_match_all_pairs_reference() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..25 {
        let n = rng.random_range(2..12_usize);
        let names: Vec<String> = (0..n).map(|i| format!("N{i}")).collect();
        let mut edges = Vec::new();
        for a in 0..n {
            for b in (a + 1)..n {
                if rng.random_bool(0.25) {
                    edges.push((a, b));
                }
            }
        }

        let mut galaxy = Galaxy::new();
        for name in &names {
            galaxy
                .add_planet(PlanetNode::new(name.as_str(), PlanetEnvironment::Barren))
                .unwrap();
        }
        for &(a, b) in &edges {
            galaxy.add_neighbor(&names[a], &names[b]).unwrap();
        }

        let dist = all_pairs(n, &edges);
        for i in 0..n {
            for j in 0..n {
                let result = galaxy.find_route(&names[i], &names[j]);
                match dist[i][j] {
                    Some(hops) => {
                        let route = result.unwrap();
                        assert_eq!(route.hop_count(), hops);
                        assert_eq!(route.origin().as_str(), names[i]);
                        assert_eq!(route.destination().as_str(), names[j]);
                        let planets = route.to_vec();
                        for pair in planets.windows(2) {
                            assert!(galaxy.are_adjacent(pair[0].as_str(), pair[1].as_str()));
                        }
                    }
                    None => assert!(matches!(result, Err(GalaxyError::NoRouteFound { .. }))),
                }
            }
        }
    }
}

#[test]
fn budget_is_enforced_on_long_chains() {
    let names: Vec<String> = (0..20).map(|i| format!("C{i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let lanes: Vec<(&str, &str)> = refs.windows(2).map(|w| (w[0], w[1])).collect();
    let galaxy = galaxy_of(&refs, &lanes);

    assert!(matches!(
        galaxy.find_route_within("C0", "C19", Some(SearchBudget::new(5))),
        Err(GalaxyError::SearchBudgetExhausted { .. })
    ));
    assert_eq!(
        galaxy.find_route_within("C0", "C19", Some(SearchBudget::new(19))).unwrap().hop_count(),
        19
    );
}

#[test]
fn shared_galaxy_routes_under_read_lock() {
    let shared = SharedGalaxy::new(create_sol_galaxy().unwrap());
    let route = shared.find_route(sol::MERCURY, sol::NEPTUNE).unwrap();
    assert_eq!(route.origin().as_str(), sol::MERCURY);
    assert_eq!(route.destination().as_str(), sol::NEPTUNE);
    assert!(route.contains(sol::JUPITER));
}

// -----------------------------------------------------------------------
// Contexts and fleet
// -----------------------------------------------------------------------

fn corvette(name: &str) -> Ship {
    let mut ship = Ship::new(
        ShipId::new(name),
        "corvette",
        3,
        vec![
            ShipComponent::pristine("main_engine", 400),
            ShipComponent::pristine("pd_turret", 120),
        ],
    )
    .unwrap();
    ship.add_crew("Holden", CrewRole::Captain).unwrap();
    ship
}

#[test]
fn context_ship_set_semantics() {
    let mut ctx = Context::new("Sol", "Earth", SystemEnvironment::Calm);
    let ship = ShipId::new("Rocinante");
    assert!(ctx.add_ship(ship.clone()));
    assert!(!ctx.add_ship(ship.clone()));
    assert!(!ctx.remove_ship(&ShipId::new("Donnager")));
    assert!(ctx.remove_ship(&ship));
}

#[test]
fn context_resolves_ships_and_planet() {
    let galaxy = create_sol_galaxy().unwrap();
    let mut registry = ShipRegistry::new();
    registry.register(corvette("Rocinante")).unwrap();
    registry.register(corvette("Tachi")).unwrap();

    let mut ctx =
        Context::observe(&galaxy, "Sol", sol::MARS, SystemEnvironment::Warzone).unwrap();
    assert_eq!(ctx.owner(), &FactionId::new(sol::MARTIAN_REPUBLIC));

    ctx.add_ship(ShipId::new("Rocinante"));
    ctx.add_ship(ShipId::new("Tachi"));
    registry.remove(&ShipId::new("Tachi"));

    let present = ctx.present_ships(&registry);
    assert_eq!(present.len(), 1);
    assert_eq!(present[0].id().as_str(), "Rocinante");
    assert_eq!(ctx.planet(&galaxy).unwrap().environment(), PlanetEnvironment::Arid);
}

#[test]
fn mission_waypoints_follow_a_route() {
    let galaxy = create_sol_galaxy().unwrap();
    let route = galaxy.find_route(sol::EARTH, sol::SATURN).unwrap();

    let mut ship = corvette("Canterbury");
    assert!(ship.mission().is_none());
    ship.set_mission(Mission::new("ice run", route.to_vec()));
    assert_eq!(
        ship.mission().destination().map(PlanetId::as_str),
        Some(sol::SATURN)
    );
}
