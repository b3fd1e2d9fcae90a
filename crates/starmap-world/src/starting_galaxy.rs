//! Default starting galaxy: the Sol system.
//!
//! Ten bodies from Mercury out to Neptune, with Luna and Ceres as waypoints.
//! The main lane chain follows orbital order; Luna gives a second path from
//! Earth to Mars, and a direct Mars-Jupiter lane skips the Belt.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use starmap_types::{FactionId, PlanetEnvironment, ResourceId};

use crate::error::GalaxyError;
use crate::faction::FactionControl;
use crate::galaxy::Galaxy;
use crate::planet::PlanetNode;
use crate::resource::ResourceLedger;

/// Planet and faction names used by the Sol galaxy.
pub mod sol {
    /// Mercury.
    pub const MERCURY: &str = "Mercury";
    /// Venus.
    pub const VENUS: &str = "Venus";
    /// Earth.
    pub const EARTH: &str = "Earth";
    /// Earth's moon.
    pub const LUNA: &str = "Luna";
    /// Mars.
    pub const MARS: &str = "Mars";
    /// The largest body in the asteroid belt.
    pub const CERES: &str = "Ceres";
    /// Jupiter.
    pub const JUPITER: &str = "Jupiter";
    /// Saturn.
    pub const SATURN: &str = "Saturn";
    /// Uranus.
    pub const URANUS: &str = "Uranus";
    /// Neptune.
    pub const NEPTUNE: &str = "Neptune";

    /// Earth-based government.
    pub const TERRAN_UNION: &str = "Terran Union";
    /// Mars-based government.
    pub const MARTIAN_REPUBLIC: &str = "Martian Republic";
    /// Asteroid belt miners.
    pub const BELT_SYNDICATE: &str = "Belt Syndicate";
    /// Gas giant harvesters.
    pub const JOVIAN_COMBINE: &str = "Jovian Combine";
}

/// Helper to build a planet with ledgers.
fn planet(
    name: &str,
    environment: PlanetEnvironment,
    resources: &[(&str, f64)],
    factions: &[(&str, Decimal)],
) -> Result<PlanetNode, GalaxyError> {
    let resources = ResourceLedger::from_stocks(
        resources
            .iter()
            .map(|(resource, qty)| (ResourceId::from(*resource), *qty)),
    )?;
    let control = FactionControl::from_shares(
        factions
            .iter()
            .map(|(faction, fraction)| (FactionId::from(*faction), *fraction)),
    )?;
    Ok(PlanetNode::new(name, environment)
        .with_resources(resources)
        .with_control(control))
}

/// Lanes between Sol bodies.
const LANES: [(&str, &str); 11] = [
    (sol::MERCURY, sol::VENUS),
    (sol::VENUS, sol::EARTH),
    (sol::EARTH, sol::MARS),
    (sol::EARTH, sol::LUNA),
    (sol::LUNA, sol::MARS),
    (sol::MARS, sol::CERES),
    (sol::CERES, sol::JUPITER),
    (sol::MARS, sol::JUPITER),
    (sol::JUPITER, sol::SATURN),
    (sol::SATURN, sol::URANUS),
    (sol::URANUS, sol::NEPTUNE),
];

/// Create the Sol starting galaxy.
///
/// # Errors
///
/// Returns [`GalaxyError`] if the hardcoded data is inconsistent, which
/// would be a bug.
pub fn create_sol_galaxy() -> Result<Galaxy, GalaxyError> {
    use sol::{BELT_SYNDICATE, JOVIAN_COMBINE, MARTIAN_REPUBLIC, TERRAN_UNION};

    let mut galaxy = Galaxy::new();

    galaxy.add_planet(planet(
        sol::MERCURY,
        PlanetEnvironment::Volcanic,
        &[("iron", 8_000.0), ("solar_flux", 12_000.0)],
        &[(TERRAN_UNION, dec!(0.6))],
    )?)?;
    galaxy.add_planet(planet(
        sol::VENUS,
        PlanetEnvironment::Toxic,
        &[("sulfur", 5_000.0), ("carbon", 3_500.0)],
        &[],
    )?)?;
    galaxy.add_planet(planet(
        sol::EARTH,
        PlanetEnvironment::Temperate,
        &[("water", 50_000.0), ("food", 20_000.0), ("iron", 4_000.0)],
        &[(TERRAN_UNION, Decimal::ONE)],
    )?)?;
    galaxy.add_planet(planet(
        sol::LUNA,
        PlanetEnvironment::Barren,
        &[("helium-3", 900.0), ("regolith", 15_000.0)],
        &[(TERRAN_UNION, dec!(0.7)), (MARTIAN_REPUBLIC, dec!(0.3))],
    )?)?;
    galaxy.add_planet(planet(
        sol::MARS,
        PlanetEnvironment::Arid,
        &[("iron", 12_000.0), ("water", 2_500.0)],
        &[(MARTIAN_REPUBLIC, dec!(0.9)), (TERRAN_UNION, dec!(0.1))],
    )?)?;
    galaxy.add_planet(planet(
        sol::CERES,
        PlanetEnvironment::Frozen,
        &[("water", 30_000.0), ("nickel", 6_000.0)],
        &[
            (BELT_SYNDICATE, dec!(0.55)),
            (MARTIAN_REPUBLIC, dec!(0.25)),
            (TERRAN_UNION, dec!(0.2)),
        ],
    )?)?;
    galaxy.add_planet(planet(
        sol::JUPITER,
        PlanetEnvironment::GasGiant,
        &[("hydrogen", 100_000.0), ("helium-3", 4_000.0)],
        &[(JOVIAN_COMBINE, dec!(0.6)), (BELT_SYNDICATE, dec!(0.4))],
    )?)?;
    galaxy.add_planet(planet(
        sol::SATURN,
        PlanetEnvironment::GasGiant,
        &[("hydrogen", 80_000.0), ("ice", 25_000.0)],
        &[(JOVIAN_COMBINE, dec!(0.5)), (BELT_SYNDICATE, dec!(0.3))],
    )?)?;
    galaxy.add_planet(planet(
        sol::URANUS,
        PlanetEnvironment::GasGiant,
        &[("methane", 40_000.0)],
        &[],
    )?)?;
    galaxy.add_planet(planet(
        sol::NEPTUNE,
        PlanetEnvironment::GasGiant,
        &[("methane", 35_000.0), ("deuterium", 1_200.0)],
        &[],
    )?)?;

    for (a, b) in LANES {
        galaxy.add_neighbor(a, b)?;
    }

    Ok(galaxy)
}
