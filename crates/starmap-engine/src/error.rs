//! Error types for the Starmap engine binary.
//!
//! [`EngineError`] wraps every failure mode during startup and query
//! handling so `main` can propagate with `?`.

/// Top-level error for the engine binary.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: starmap_world::ConfigError,
    },

    /// Galaxy construction or a galaxy query failed.
    #[error("galaxy error: {source}")]
    Galaxy {
        /// The underlying galaxy error.
        #[from]
        source: starmap_world::GalaxyError,
    },

    /// Fleet setup failed.
    #[error("fleet error: {source}")]
    Fleet {
        /// The underlying fleet error.
        #[from]
        source: starmap_fleet::FleetError,
    },

    /// Snapshot serialization failed.
    #[error("serialization error: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The galaxy has no planets to route between.
    #[error("galaxy is empty")]
    EmptyGalaxy,
}
