//! Ship components: named parts with a mass and a health fraction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FleetError;

/// A single named part of a ship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ComponentRecord")]
pub struct ShipComponent {
    /// Component name, unique within a ship.
    pub name: String,
    /// Mass in tonnes.
    pub mass: u32,
    /// Health as a fraction (`0` destroyed, `1` pristine).
    health: Decimal,
}

/// Wire form of a [`ShipComponent`], validated before use.
#[derive(Deserialize)]
struct ComponentRecord {
    name: String,
    mass: u32,
    health: Decimal,
}

impl TryFrom<ComponentRecord> for ShipComponent {
    type Error = FleetError;

    fn try_from(record: ComponentRecord) -> Result<Self, Self::Error> {
        Self::new(record.name, record.mass, record.health)
    }
}

impl ShipComponent {
    /// Create a component.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::InvalidHealth`] if `health` is outside `[0, 1]`.
    pub fn new(name: impl Into<String>, mass: u32, health: Decimal) -> Result<Self, FleetError> {
        let name = name.into();
        validate_health(&name, health)?;
        Ok(Self { name, mass, health })
    }

    /// Create a component at full health.
    pub fn pristine(name: impl Into<String>, mass: u32) -> Self {
        Self {
            name: name.into(),
            mass,
            health: Decimal::ONE,
        }
    }

    /// Current health fraction.
    pub const fn health(&self) -> Decimal {
        self.health
    }

    /// Replace the health fraction.
    ///
    /// # Errors
    ///
    /// Returns [`FleetError::InvalidHealth`] if `health` is outside `[0, 1]`;
    /// the component is left unchanged.
    pub fn set_health(&mut self, health: Decimal) -> Result<(), FleetError> {
        validate_health(&self.name, health)?;
        self.health = health;
        Ok(())
    }

    /// Whether the component has been reduced to zero health.
    pub fn is_destroyed(&self) -> bool {
        self.health.is_zero()
    }
}

fn validate_health(name: &str, health: Decimal) -> Result<(), FleetError> {
    if health < Decimal::ZERO || health > Decimal::ONE {
        return Err(FleetError::InvalidHealth {
            component: name.to_owned(),
            health,
        });
    }
    Ok(())
}
