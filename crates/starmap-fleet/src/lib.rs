//! Ships, crew, and missions for the Starmap galaxy.
//!
//! Everything here sits outside the galaxy core: ships aggregate component
//! health and mass, crew stations decide which components they act on, and
//! the [`ShipRegistry`] owns ship lifetimes so other code can hold plain
//! [`ShipId`](starmap_types::ShipId) handles.
//!
//! # Modules
//!
//! - [`component`] -- Named ship parts with mass and health.
//! - [`crew`] -- Crew stations and their component authority.
//! - [`error`] -- Error types for fleet operations.
//! - [`mission`] -- Mission records with planet waypoints.
//! - [`registry`] -- The shared ship registry.
//! - [`ship`] -- The ship aggregate.

pub mod component;
pub mod crew;
pub mod error;
pub mod mission;
pub mod registry;
pub mod ship;

// Re-export primary types at crate root.
pub use component::ShipComponent;
pub use crew::{CrewMember, CrewRole};
pub use error::FleetError;
pub use mission::Mission;
pub use registry::ShipRegistry;
pub use ship::Ship;
