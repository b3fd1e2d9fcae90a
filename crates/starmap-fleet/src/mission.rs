//! Mission records: a name and the planets a ship should visit.

use serde::{Deserialize, Serialize};
use starmap_types::PlanetId;

/// A task assigned to a ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    /// Mission name. `"None"` marks an idle ship.
    pub name: String,
    /// Planets to visit, in order.
    pub waypoints: Vec<PlanetId>,
}

impl Mission {
    /// Name of the placeholder mission reported for idle ships.
    pub const NONE: &'static str = "None";

    /// Create a mission.
    pub fn new(name: impl Into<String>, waypoints: Vec<PlanetId>) -> Self {
        Self {
            name: name.into(),
            waypoints,
        }
    }

    /// The placeholder mission for a ship without a task.
    pub fn none() -> Self {
        Self::new(Self::NONE, Vec::new())
    }

    /// Whether this is the placeholder mission.
    pub fn is_none(&self) -> bool {
        self.name == Self::NONE && self.waypoints.is_empty()
    }

    /// Final waypoint, if any.
    pub fn destination(&self) -> Option<&PlanetId> {
        self.waypoints.last()
    }
}
