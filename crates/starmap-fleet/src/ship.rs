//! Ships: an aggregate of components, crew, and an optional mission.
//!
//! Health and mass are derived from the components on every call, so they
//! always reflect the current loadout.

use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use starmap_types::ShipId;

use crate::component::ShipComponent;
use crate::crew::{CrewMember, CrewRole};
use crate::error::FleetError;
use crate::mission::Mission;

/// A vehicle or structure that moves between planets.
///
/// Identity is the [`ShipId`]: two ships with the same name compare equal
/// regardless of their loadout.
///
/// Deserialized ships are rebuilt through [`Ship::new`] and
/// [`Ship::add_crew`], so stored crews respect capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "ShipRecord")]
pub struct Ship {
    id: ShipId,
    /// Free-form hull class (e.g. `"frigate"`, `"ice hauler"`).
    pub class: String,
    /// Crew seats for a crewed ship, or population for an automated one.
    pub capacity: u32,
    crew: BTreeMap<String, CrewRole>,
    components: BTreeMap<String, ShipComponent>,
    mission: Option<Mission>,
}

/// Wire form of a [`Ship`], validated before use.
#[derive(Deserialize)]
struct ShipRecord {
    id: ShipId,
    class: String,
    capacity: u32,
    #[serde(default)]
    crew: BTreeMap<String, CrewRole>,
    #[serde(default)]
    components: BTreeMap<String, ShipComponent>,
    #[serde(default)]
    mission: Option<Mission>,
}

impl TryFrom<ShipRecord> for Ship {
    type Error = FleetError;

    fn try_from(record: ShipRecord) -> Result<Self, Self::Error> {
        let mut ship = Self::new(
            record.id,
            record.class,
            record.capacity,
            record.components.into_values(),
        )?;
        for (name, role) in record.crew {
            ship.add_crew(name, role)?;
        }
        ship.mission = record.mission;
        Ok(ship)
    }
}

impl Ship {
    /// Create a ship with the given components and no crew or mission.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::DuplicateComponent`] if two components share a name.
    pub fn new(
        id: ShipId,
        class: impl Into<String>,
        capacity: u32,
        components: impl IntoIterator<Item = ShipComponent>,
    ) -> Result<Self, FleetError> {
        let mut by_name = BTreeMap::new();
        for component in components {
            if by_name.contains_key(&component.name) {
                return Err(FleetError::DuplicateComponent(component.name));
            }
            by_name.insert(component.name.clone(), component);
        }
        Ok(Self {
            id,
            class: class.into(),
            capacity,
            crew: BTreeMap::new(),
            components: by_name,
            mission: None,
        })
    }

    /// The ship's identity.
    pub const fn id(&self) -> &ShipId {
        &self.id
    }

    // -------------------------------------------------------------------
    // Components
    // -------------------------------------------------------------------

    /// Mean health of all components, or zero for a ship with none.
    pub fn health(&self) -> Decimal {
        let count = Decimal::from(self.components.len());
        if count.is_zero() {
            return Decimal::ZERO;
        }
        let total: Decimal = self.components.values().map(ShipComponent::health).sum();
        total.checked_div(count).unwrap_or(Decimal::ZERO)
    }

    /// Total mass of all components.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::ArithmeticOverflow`] if the sum exceeds `u32`.
    pub fn mass(&self) -> Result<u32, FleetError> {
        self.components.values().try_fold(0_u32, |acc, c| {
            acc.checked_add(c.mass).ok_or(FleetError::ArithmeticOverflow)
        })
    }

    /// Add a component. Returns `false` if one with the same name is present.
    pub fn add_component(&mut self, component: ShipComponent) -> bool {
        if self.components.contains_key(&component.name) {
            return false;
        }
        self.components.insert(component.name.clone(), component);
        true
    }

    /// Remove a component by name. Returns `false` if it was not present.
    pub fn remove_component(&mut self, name: &str) -> bool {
        self.components.remove(name).is_some()
    }

    /// Look up a component by name.
    pub fn component(&self, name: &str) -> Option<&ShipComponent> {
        self.components.get(name)
    }

    /// Look up a component by name for modification.
    pub fn component_mut(&mut self, name: &str) -> Option<&mut ShipComponent> {
        self.components.get_mut(name)
    }

    /// Iterate over components in name order.
    pub fn components(&self) -> impl Iterator<Item = &ShipComponent> {
        self.components.values()
    }

    /// Names of all components.
    pub fn component_names(&self) -> BTreeSet<String> {
        self.components.keys().cloned().collect()
    }

    // -------------------------------------------------------------------
    // Crew
    // -------------------------------------------------------------------

    /// Seat a crew member.
    ///
    /// Returns `Ok(false)` if someone with that name is already aboard.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::CrewAtCapacity`] if every seat is taken.
    pub fn add_crew(&mut self, name: impl Into<String>, role: CrewRole) -> Result<bool, FleetError> {
        let name = name.into();
        if self.crew.contains_key(&name) {
            return Ok(false);
        }
        let seated = u32::try_from(self.crew.len()).unwrap_or(u32::MAX);
        if seated >= self.capacity {
            return Err(FleetError::CrewAtCapacity {
                ship: self.id.clone(),
                capacity: self.capacity,
            });
        }
        self.crew.insert(name, role);
        Ok(true)
    }

    /// Unseat a crew member. Returns `false` if they were not aboard.
    pub fn remove_crew(&mut self, name: &str) -> bool {
        self.crew.remove(name).is_some()
    }

    /// Crew aboard, in name order. Empty for an automated ship.
    pub fn crew(&self) -> impl Iterator<Item = CrewMember> + '_ {
        self.crew.iter().map(|(name, role)| CrewMember {
            name: name.clone(),
            role: *role,
        })
    }

    /// Components the named crew member controls, or `None` if they are not aboard.
    pub fn controlled_by(&self, crew_name: &str) -> Option<BTreeSet<String>> {
        let role = self.crew.get(crew_name)?;
        Some(role.edit_components(&self.component_names()))
    }

    // -------------------------------------------------------------------
    // Mission
    // -------------------------------------------------------------------

    /// Current mission, or the placeholder [`Mission::none`] when idle.
    pub fn mission(&self) -> Mission {
        self.mission.clone().unwrap_or_else(Mission::none)
    }

    /// Assign a mission, replacing any current one.
    pub fn set_mission(&mut self, mission: Mission) {
        self.mission = Some(mission);
    }

    /// Drop the current mission, returning it if there was one.
    pub const fn clear_mission(&mut self) -> Option<Mission> {
        self.mission.take()
    }
}

impl PartialEq for Ship {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Ship {}

impl Hash for Ship {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;
    use starmap_types::PlanetId;

    use super::*;

    fn corvette() -> Ship {
        let parts = vec![
            ShipComponent::new("engine", 200, dec!(1)).unwrap(),
            ShipComponent::new("hull", 500, dec!(0.5)).unwrap(),
            ShipComponent::new("turret", 100, dec!(0.75)).unwrap(),
        ];
        Ship::new(ShipId::new("Tachi"), "corvette", 2, parts).unwrap()
    }

    #[test]
    fn health_is_component_mean() {
        let ship = corvette();
        assert_eq!(ship.health(), dec!(0.75));
    }

    #[test]
    fn health_tracks_component_changes() {
        let mut ship = corvette();
        assert!(ship.remove_component("hull"));
        assert_eq!(ship.health(), dec!(0.875));
        ship.component_mut("turret").unwrap().set_health(dec!(0)).unwrap();
        assert_eq!(ship.health(), dec!(0.5));
    }

    #[test]
    fn empty_ship_has_zero_health_and_mass() {
        let ship = Ship::new(ShipId::new("Drone"), "probe", 0, Vec::new()).unwrap();
        assert_eq!(ship.health(), Decimal::ZERO);
        assert_eq!(ship.mass().unwrap(), 0);
    }

    #[test]
    fn mass_is_sum_and_overflow_is_error() {
        let mut ship = corvette();
        assert_eq!(ship.mass().ok(), Some(800));
        assert!(ship.add_component(ShipComponent::pristine("ballast", u32::MAX)));
        assert!(ship.mass().is_err());
    }

    #[test]
    fn duplicate_components_rejected() {
        let parts = vec![
            ShipComponent::pristine("engine", 1),
            ShipComponent::pristine("engine", 2),
        ];
        assert!(Ship::new(ShipId::new("X"), "test", 1, parts).is_err());

        let mut ship = corvette();
        assert!(!ship.add_component(ShipComponent::pristine("engine", 10)));
        assert!(!ship.remove_component("warp_core"));
    }

    #[test]
    fn crew_capacity_enforced() {
        let mut ship = corvette();
        assert_eq!(ship.add_crew("Alex", CrewRole::Pilot).ok(), Some(true));
        assert_eq!(ship.add_crew("Alex", CrewRole::Captain).ok(), Some(false));
        assert_eq!(ship.add_crew("Naomi", CrewRole::Engineer).ok(), Some(true));
        assert!(ship.add_crew("Amos", CrewRole::Engineer).is_err());
        assert!(ship.remove_crew("Alex"));
        assert!(!ship.remove_crew("Alex"));
        assert_eq!(ship.crew().count(), 1);
    }

    #[test]
    fn controlled_components_follow_role() {
        let mut ship = corvette();
        assert!(ship.add_crew("Alex", CrewRole::Pilot).unwrap());
        let controlled = ship.controlled_by("Alex").unwrap();
        assert_eq!(controlled.len(), 1);
        assert!(controlled.contains("engine"));
        assert!(ship.controlled_by("Nobody").is_none());
    }

    #[test]
    fn mission_defaults_to_none() {
        let mut ship = corvette();
        assert!(ship.mission().is_none());
        ship.set_mission(Mission::new("Patrol", vec![PlanetId::new("Ceres")]));
        assert_eq!(ship.mission().name, "Patrol");
        assert!(ship.clear_mission().is_some());
        assert!(ship.mission().is_none());
    }

    #[test]
    fn identity_is_name_based() {
        let a = corvette();
        let b = Ship::new(ShipId::new("Tachi"), "shuttle", 9, Vec::new());
        assert!(b.as_ref().is_ok_and(|b| *b == a));
    }

    #[test]
    fn stored_ship_reloads_and_respects_capacity() {
        let mut ship = corvette();
        ship.add_crew("Alex", CrewRole::Pilot).unwrap();
        ship.set_mission(Mission::new("Patrol", vec![PlanetId::new("Ceres")]));
        let reloaded: Ship = serde_json::from_str(&serde_json::to_string(&ship).unwrap()).unwrap();
        assert_eq!(reloaded.health(), dec!(0.75));
        assert_eq!(reloaded.crew().count(), 1);
        assert_eq!(reloaded.mission().name, "Patrol");

        let overcrewed = serde_json::from_str::<Ship>(
            r#"{"id":"Tachi","class":"corvette","capacity":1,"crew":{"Alex":"pilot","Naomi":"engineer"},"components":{},"mission":null}"#,
        );
        assert!(overcrewed.is_err());

        let damaged = serde_json::from_str::<Ship>(
            r#"{"id":"Tachi","class":"corvette","capacity":1,"components":{"hull":{"name":"hull","mass":500,"health":"-1"}}}"#,
        );
        assert!(damaged.is_err());
    }
}
