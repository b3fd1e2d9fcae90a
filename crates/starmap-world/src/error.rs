//! Error types for the `starmap-world` crate.
//!
//! All fallible graph and ledger operations return [`GalaxyError`]. Adding
//! something already present or removing something absent is not an error;
//! those operations report `false` instead.

use rust_decimal::Decimal;
use starmap_types::{FactionId, PlanetId, ResourceId};

/// Errors that can occur during galaxy operations.
#[derive(Debug, thiserror::Error)]
pub enum GalaxyError {
    /// A planet was not found in the galaxy.
    #[error("planet not found: {0}")]
    PlanetNotFound(PlanetId),

    /// A planet with the same name already exists.
    #[error("duplicate planet: {0}")]
    DuplicatePlanet(PlanetId),

    /// A stored planet was filed under a key other than its own name.
    #[error("planet {id} stored under key {key}")]
    PlanetKeyMismatch {
        /// The map key the planet appeared under.
        key: PlanetId,
        /// The planet's own id.
        id: PlanetId,
    },

    /// A stored lane was listed by one endpoint but not the other.
    #[error("lane from {from} to {to} has no return lane")]
    AsymmetricLane {
        /// The planet listing the lane.
        from: PlanetId,
        /// The planet missing the return lane.
        to: PlanetId,
    },

    /// A planet cannot be its own neighbor.
    #[error("planet {0} cannot be adjacent to itself")]
    SelfAdjacency(PlanetId),

    /// The destination is not reachable from the origin.
    #[error("no route from {from} to {to}")]
    NoRouteFound {
        /// Origin planet.
        from: PlanetId,
        /// Destination planet.
        to: PlanetId,
    },

    /// The route search gave up before reaching the destination.
    #[error("route search from {from} to {to} exceeded {max_expansions} expansions")]
    SearchBudgetExhausted {
        /// Origin planet.
        from: PlanetId,
        /// Destination planet.
        to: PlanetId,
        /// The expansion limit that was hit.
        max_expansions: usize,
    },

    /// A resource amount was not finite, was negative, or exceeded the stock.
    #[error("invalid amount {amount} of {resource} (available: {available})")]
    InvalidAmount {
        /// The resource being changed.
        resource: ResourceId,
        /// The rejected amount.
        amount: f64,
        /// Quantity on hand when the change was attempted.
        available: f64,
    },

    /// A resource removal targeted a resource the planet does not stock.
    #[error("resource not present: {0}")]
    ResourceNotPresent(ResourceId),

    /// A control fraction was outside `[0, 1]`.
    #[error("invalid control fraction {fraction} for faction {faction}")]
    InvalidFraction {
        /// The faction the fraction was meant for.
        faction: FactionId,
        /// The rejected fraction.
        fraction: Decimal,
    },

    /// Adding a faction would push total control above 1.
    #[error("adding faction {faction} would raise total control to {total}")]
    ControlOverflow {
        /// The faction being added.
        faction: FactionId,
        /// The total that would have resulted.
        total: Decimal,
    },

    /// The same faction appeared twice in an initial control table.
    #[error("duplicate faction: {0}")]
    DuplicateFaction(FactionId),

    /// A control transfer named a faction with no control on the planet.
    #[error("faction {0} holds no control here")]
    UnknownFaction(FactionId),

    /// A control transfer asked for more than the faction holds.
    #[error("faction {faction} holds {held}, cannot transfer {requested}")]
    InsufficientControl {
        /// The giving faction.
        faction: FactionId,
        /// Amount asked for.
        requested: Decimal,
        /// Amount actually held.
        held: Decimal,
    },

    /// Arithmetic overflow during a checked operation.
    #[error("arithmetic overflow in galaxy calculation")]
    ArithmeticOverflow,

    /// A shared galaxy lock was poisoned by a panicking writer.
    #[error("galaxy lock poisoned: {0}")]
    LockPoisoned(String),
}
