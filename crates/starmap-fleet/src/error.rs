//! Error types for the `starmap-fleet` crate.

use rust_decimal::Decimal;
use starmap_types::ShipId;

/// Errors that can occur during ship and registry operations.
#[derive(Debug, thiserror::Error)]
pub enum FleetError {
    /// A component health value was outside `[0, 1]`.
    #[error("component {component} has invalid health {health} (expected 0 to 1)")]
    InvalidHealth {
        /// The component name.
        component: String,
        /// The rejected health value.
        health: Decimal,
    },

    /// Two components with the same name were supplied at construction.
    #[error("duplicate component: {0}")]
    DuplicateComponent(String),

    /// The ship's crew is already at capacity.
    #[error("ship {ship} is at crew capacity ({capacity})")]
    CrewAtCapacity {
        /// The full ship.
        ship: ShipId,
        /// Maximum crew.
        capacity: u32,
    },

    /// A ship with this name is already registered.
    #[error("duplicate ship: {0}")]
    DuplicateShip(ShipId),

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in fleet calculation")]
    ArithmeticOverflow,
}
