//! Environment taxonomies.
//!
//! These are opaque tags as far as the galaxy core is concerned: they are
//! stored, snapshotted, and configured, but no graph or ledger operation
//! branches on them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Planetary environment
// ---------------------------------------------------------------------------

/// The dominant environment of a whole planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum PlanetEnvironment {
    /// Breathable atmosphere, moderate temperatures.
    Temperate,
    /// Dry desert world.
    Arid,
    /// Ice-covered surface.
    Frozen,
    /// Surface dominated by liquid water.
    Oceanic,
    /// Active volcanism and molten surface regions.
    Volcanic,
    /// Poisonous or corrosive atmosphere.
    Toxic,
    /// Airless rock.
    Barren,
    /// No solid surface; mined from orbit.
    GasGiant,
}

// ---------------------------------------------------------------------------
// System environment
// ---------------------------------------------------------------------------

/// The situational environment of a system or engagement area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum SystemEnvironment {
    /// Nothing unusual.
    #[default]
    Calm,
    /// Elevated stellar radiation.
    SolarStorm,
    /// Wreckage and debris in the approach lanes.
    DebrisField,
    /// Dense asteroid belt.
    AsteroidField,
    /// Sensor-obscuring gas cloud.
    Nebula,
    /// Active hostilities.
    Warzone,
}
