//! Crew stations.
//!
//! A crew member operates one station. Each station takes control of the
//! ship components that fall under its duties, identified by keywords in the
//! component name. Stations never mutate the ship themselves; they report
//! which components they act on and the caller applies the changes.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The station a crew member operates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrewRole {
    /// Flies the ship: propulsion and navigation.
    Pilot,
    /// Keeps the ship running: power, life support, structure.
    Engineer,
    /// Runs offensive and defensive systems.
    WeaponsOfficer,
    /// Has authority over every component.
    Captain,
}

impl CrewRole {
    /// Keywords matched (case-insensitively) against component names.
    ///
    /// The captain has no keyword list; it controls everything.
    const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Pilot => &["engine", "thruster", "navigation", "helm"],
            Self::Engineer => &["reactor", "power", "life_support", "hull"],
            Self::WeaponsOfficer => &["weapon", "turret", "shield", "missile"],
            Self::Captain => &[],
        }
    }

    /// Return the subset of `components` this station takes control of.
    pub fn edit_components(self, components: &BTreeSet<String>) -> BTreeSet<String> {
        if self == Self::Captain {
            return components.clone();
        }
        let keywords = self.keywords();
        components
            .iter()
            .filter(|name| {
                let lower = name.to_lowercase();
                keywords.iter().any(|k| lower.contains(k))
            })
            .cloned()
            .collect()
    }
}

/// A named crew member and their station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrewMember {
    /// Name, unique within a ship.
    pub name: String,
    /// Operated station.
    pub role: CrewRole,
}
