//! Planet graph, ledgers, and routing for the Starmap galaxy.
//!
//! This crate is the galaxy core: planets as nodes in an undirected lane
//! graph, each with a resource ledger and a faction-control table, plus a
//! breadth-first route finder and situational contexts that refer to planets
//! and ships by id.
//!
//! # Modules
//!
//! - [`config`] -- YAML configuration with environment overrides.
//! - [`context`] -- [`Context`] binds a system, planet, environment, owner,
//!   and present ships.
//! - [`error`] -- Error types for galaxy operations.
//! - [`faction`] -- [`FactionControl`] tables with exact decimal fractions.
//! - [`galaxy`] -- The [`Galaxy`] arena: planets, symmetric lanes, ledger
//!   operations by planet, and connectivity.
//! - [`planet`] -- [`PlanetNode`] with its ledgers and neighbor ids.
//! - [`resource`] -- [`ResourceLedger`] stocks that never go negative.
//! - [`route`] -- Fewest-hop route search with an optional expansion budget.
//! - [`shared`] -- [`SharedGalaxy`], a lock-protected handle for threads.
//! - [`starting_galaxy`] -- Default Sol galaxy.

pub mod config;
pub mod context;
pub mod error;
pub mod faction;
pub mod galaxy;
pub mod planet;
pub mod resource;
pub mod route;
pub mod shared;
pub mod starting_galaxy;

// Re-export primary types at crate root.
pub use config::{ConfigError, GalaxyConfig};
pub use context::Context;
pub use error::GalaxyError;
pub use faction::FactionControl;
pub use galaxy::Galaxy;
pub use planet::PlanetNode;
pub use resource::{MissingResourcePolicy, ResourceLedger};
pub use route::{Route, SearchBudget, shortest_route};
pub use shared::SharedGalaxy;
pub use starting_galaxy::{create_sol_galaxy, sol};
