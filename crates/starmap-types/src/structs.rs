//! Read-only snapshot structs handed to the presentation layer.
//!
//! Snapshots are plain copies: mutating the galaxy after taking one does not
//! change it, and nothing in a snapshot can be used to mutate the galaxy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{PlanetEnvironment, SystemEnvironment};
use crate::ids::{FactionId, PlanetId, ResourceId, ShipId};

/// One faction's share of control over a planet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct FactionShare {
    /// The controlling faction.
    pub faction: FactionId,
    /// Control fraction in `[0, 1]`.
    #[ts(as = "String")]
    pub fraction: Decimal,
}

/// Quantity of one resource stocked on a planet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ResourceStock {
    /// The resource.
    pub resource: ResourceId,
    /// Non-negative quantity, in the resource's own unit.
    pub quantity: f64,
}

/// Everything known about one planet at the moment of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PlanetSnapshot {
    /// Planet identity.
    pub id: PlanetId,
    /// Planetary environment tag.
    pub environment: PlanetEnvironment,
    /// Adjacent planets, in name order.
    pub neighbors: Vec<PlanetId>,
    /// Faction control shares, in faction name order.
    pub factions: Vec<FactionShare>,
    /// Resource stocks, in resource name order.
    pub resources: Vec<ResourceStock>,
}

/// Snapshot of a whole galaxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct GalaxySnapshot {
    /// All planets, in name order.
    pub planets: Vec<PlanetSnapshot>,
    /// Number of undirected lanes between planets.
    pub lane_count: usize,
}

/// Snapshot of a situational context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ContextSnapshot {
    /// Name of the system the context describes.
    pub system: String,
    /// Nearest or current planet.
    pub planet: PlanetId,
    /// Situational environment.
    pub environment: SystemEnvironment,
    /// Controlling faction, or the "Disputed" sentinel.
    pub owner: FactionId,
    /// Ships present, in name order.
    pub ships: Vec<ShipId>,
}
