//! Shared type definitions for the Starmap galaxy.
//!
//! This crate holds the identifiers, environment tags, and snapshot structs
//! used across the workspace. Types flow downstream to `TypeScript` via
//! `ts-rs` for display code.
//!
//! # Modules
//!
//! - [`ids`] -- Name-based identifier newtypes (planets, factions, ships, resources)
//! - [`enums`] -- Planetary and system environment taxonomies
//! - [`structs`] -- Read-only snapshots of planets, galaxies, and contexts

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{PlanetEnvironment, SystemEnvironment};
pub use ids::{FactionId, PlanetId, ResourceId, ShipId};
pub use structs::{ContextSnapshot, FactionShare, GalaxySnapshot, PlanetSnapshot, ResourceStock};
