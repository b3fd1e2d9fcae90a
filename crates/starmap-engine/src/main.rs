//! Starmap engine binary.
//!
//! Loads the galaxy configuration, builds the galaxy, and answers one route
//! query, logging the result together with the situational context at the
//! origin.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `STARMAP_CONFIG` or `starmap-config.yaml`
//! 3. Build the galaxy from config, or the Sol galaxy if none is configured
//! 4. Register a patrol ship and route it between the requested planets
//! 5. Observe the context at the origin
//! 6. Log a serialized snapshot of the galaxy
//!
//! Usage: `starmap-engine [FROM TO]`. Without arguments the route runs from
//! the first planet to the last in name order.

mod error;

use std::path::{Path, PathBuf};

use starmap_fleet::{CrewRole, Mission, Ship, ShipComponent, ShipRegistry};
use starmap_types::{PlanetId, ShipId, SystemEnvironment};
use starmap_world::{Context, Galaxy, GalaxyConfig, GalaxyError, SharedGalaxy, create_sol_galaxy};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Default configuration file, relative to the working directory.
const DEFAULT_CONFIG: &str = "starmap-config.yaml";

/// Name of the star system reported in contexts.
const SYSTEM_NAME: &str = "Sol";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, galaxy construction, or the route
/// query fails for a reason other than the planets being disconnected.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("starmap-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        planets = config.planets.len(),
        lanes = config.lanes.len(),
        missing_resource = ?config.ledger.missing_resource,
        max_expansions = ?config.routing.max_expansions,
        "Configuration loaded"
    );

    // 3. Build the galaxy.
    let galaxy = build_galaxy(&config)?;
    info!(
        planets = galaxy.planet_count(),
        lanes = galaxy.lane_count(),
        connected = galaxy.is_connected(),
        "Galaxy ready"
    );
    let shared = SharedGalaxy::new(galaxy);

    // 4. Route a patrol ship.
    let (from, to) = route_endpoints(&shared)?;
    let mut registry = ShipRegistry::new();
    let patrol_id = ShipId::new("Patrol-1");
    registry.register(patrol_ship(patrol_id.clone())?)?;

    match shared.find_route(&from, &to) {
        Ok(route) => {
            let path: Vec<&str> = route.planets().map(PlanetId::as_str).collect();
            info!(from = %from, to = %to, hops = route.hop_count(), route = %path.join(" -> "), "Route found");
            if let Some(ship) = registry.get_mut(&patrol_id) {
                ship.set_mission(Mission::new("patrol", route.to_vec()));
            }
        }
        Err(GalaxyError::NoRouteFound { .. }) => {
            warn!(from = %from, to = %to, "No route between planets, ship stranded");
        }
        Err(e) => return Err(EngineError::from(e).into()),
    }

    // 5. Observe the context at the origin.
    let mut context =
        shared.read(|g| Context::observe(g, SYSTEM_NAME, &from, SystemEnvironment::Calm))??;
    context.add_ship(patrol_id);
    for ship in context.present_ships(&registry) {
        info!(
            ship = %ship.id(),
            health = %ship.health(),
            mission = %ship.mission().name,
            "Ship present"
        );
    }
    info!(
        system = context.system(),
        planet = %context.planet_id(),
        owner = %context.owner(),
        disputed = context.is_disputed(),
        ships = context.ship_count(),
        "Context observed"
    );

    // 6. Serialize a snapshot for display code.
    let snapshot = shared.snapshot()?;
    let json = serde_json::to_string(&snapshot).map_err(EngineError::from)?;
    info!(bytes = json.len(), planets = snapshot.planets.len(), "Galaxy snapshot serialized");

    info!("starmap-engine finished");
    Ok(())
}

/// Load configuration from `STARMAP_CONFIG` or `starmap-config.yaml`.
///
/// Falls back to defaults if the file does not exist.
fn load_config() -> Result<GalaxyConfig, EngineError> {
    let config_path = std::env::var("STARMAP_CONFIG")
        .map_or_else(|_| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    if Path::new(&config_path).exists() {
        let config = GalaxyConfig::from_file(&config_path)?;
        Ok(config)
    } else {
        info!(path = %config_path.display(), "Config file not found, using defaults");
        let mut config = GalaxyConfig::default();
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }
}

/// Build the configured galaxy, or Sol if the config lists no planets.
///
/// Policies from the config apply either way.
fn build_galaxy(config: &GalaxyConfig) -> Result<Galaxy, EngineError> {
    if !config.planets.is_empty() {
        return Ok(Galaxy::from_config(config)?);
    }
    info!("No planets configured, using the Sol starting galaxy");
    let mut galaxy = create_sol_galaxy()?;
    galaxy.set_missing_resource_policy(config.ledger.missing_resource);
    galaxy.set_search_budget(config.routing.budget());
    Ok(galaxy)
}

/// Pick the route endpoints from the command line or the galaxy itself.
fn route_endpoints(shared: &SharedGalaxy) -> Result<(String, String), EngineError> {
    let mut args = std::env::args().skip(1);
    if let (Some(from), Some(to)) = (args.next(), args.next()) {
        return Ok((from, to));
    }
    let ids = shared.read(Galaxy::planet_ids)?;
    match (ids.first(), ids.last()) {
        (Some(first), Some(last)) => Ok((first.as_str().to_owned(), last.as_str().to_owned())),
        _ => Err(EngineError::EmptyGalaxy),
    }
}

/// A small crewed patrol ship.
fn patrol_ship(id: ShipId) -> Result<Ship, EngineError> {
    let mut ship = Ship::new(
        id,
        "corvette",
        2,
        [
            ShipComponent::pristine("main_engine", 400),
            ShipComponent::pristine("fusion_reactor", 250),
            ShipComponent::pristine("pd_turret", 120),
        ],
    )?;
    ship.add_crew("Pilot", CrewRole::Pilot)?;
    ship.add_crew("Gunner", CrewRole::WeaponsOfficer)?;
    Ok(ship)
}
