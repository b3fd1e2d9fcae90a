//! Configuration loading and typed config structures for a galaxy.
//!
//! A galaxy can be described in `starmap-config.yaml`: ledger and routing
//! policies plus an optional list of planets and lanes. Every section has
//! defaults, so an empty file is valid and yields an empty galaxy with
//! default policies.
//!
//! Control fractions should be quoted in YAML (`"0.25"`) so they are read as
//! exact decimals.

use std::collections::BTreeMap;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use starmap_types::{FactionId, PlanetEnvironment, ResourceId};

use crate::error::GalaxyError;
use crate::faction::FactionControl;
use crate::galaxy::Galaxy;
use crate::planet::PlanetNode;
use crate::resource::{MissingResourcePolicy, ResourceLedger};
use crate::route::SearchBudget;

/// Environment variable overriding `routing.max_expansions`.
pub const MAX_EXPANSIONS_ENV: &str = "STARMAP_MAX_EXPANSIONS";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held a value that could not be parsed.
    #[error("invalid value {value:?} for environment variable {name}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// The rejected value.
        value: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level galaxy configuration.
///
/// Mirrors the structure of `starmap-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GalaxyConfig {
    /// Ledger policies.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Route search settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Planets to create, in order.
    #[serde(default)]
    pub planets: Vec<PlanetConfig>,

    /// Lanes to create after all planets exist.
    #[serde(default)]
    pub lanes: Vec<LaneConfig>,
}

impl GalaxyConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `STARMAP_MAX_EXPANSIONS` overrides `routing.max_expansions`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if the override is not a number.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string, applying environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::InvalidEnv`] if the override is not a number.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Apply overrides looked up through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnv`] if an override cannot be parsed.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = lookup(MAX_EXPANSIONS_ENV) {
            let parsed = value
                .trim()
                .parse::<usize>()
                .map_err(|_parse| ConfigError::InvalidEnv {
                    name: MAX_EXPANSIONS_ENV,
                    value: value.clone(),
                })?;
            self.routing.max_expansions = Some(parsed);
        }
        Ok(())
    }

    /// Build a galaxy from this configuration.
    ///
    /// Planets are added first, then lanes.
    ///
    /// # Errors
    ///
    /// Returns the first [`GalaxyError`] raised while adding planets, their
    /// ledgers, or lanes.
    pub fn build(&self) -> Result<Galaxy, GalaxyError> {
        let mut galaxy = Galaxy::new();
        galaxy.set_missing_resource_policy(self.ledger.missing_resource);
        galaxy.set_search_budget(self.routing.budget());

        for planet in &self.planets {
            galaxy.add_planet(planet.to_node()?)?;
        }
        for lane in &self.lanes {
            galaxy.add_neighbor(&lane.from, &lane.to)?;
        }

        tracing::debug!(
            planets = galaxy.planet_count(),
            lanes = galaxy.lane_count(),
            "galaxy built from config"
        );
        Ok(galaxy)
    }
}

/// Ledger policy configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// How removals of unstocked resources are treated.
    #[serde(default)]
    pub missing_resource: MissingResourcePolicy,
}

/// Route search configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct RoutingConfig {
    /// Maximum planets a search may expand. Absent means unbounded.
    #[serde(default)]
    pub max_expansions: Option<usize>,
}

impl RoutingConfig {
    /// The configured search budget, if any.
    pub fn budget(self) -> Option<SearchBudget> {
        self.max_expansions.map(SearchBudget::new)
    }
}

/// One planet in the configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlanetConfig {
    /// Planet name.
    pub name: String,

    /// Planetary environment.
    #[serde(default = "default_environment")]
    pub environment: PlanetEnvironment,

    /// Initial resource stocks.
    #[serde(default)]
    pub resources: BTreeMap<String, f64>,

    /// Initial faction control fractions.
    #[serde(default)]
    pub factions: BTreeMap<String, Decimal>,
}

impl PlanetConfig {
    /// Convert into a planet node with validated ledgers.
    ///
    /// # Errors
    ///
    /// Returns the ledger errors for invalid quantities or fractions.
    pub fn to_node(&self) -> Result<PlanetNode, GalaxyError> {
        let resources = ResourceLedger::from_stocks(
            self.resources
                .iter()
                .map(|(name, qty)| (ResourceId::from(name.as_str()), *qty)),
        )?;
        let control = FactionControl::from_shares(
            self.factions
                .iter()
                .map(|(name, fraction)| (FactionId::from(name.as_str()), *fraction)),
        )?;
        Ok(PlanetNode::new(self.name.as_str(), self.environment)
            .with_resources(resources)
            .with_control(control))
    }
}

/// One undirected lane in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LaneConfig {
    /// One endpoint.
    pub from: String,
    /// The other endpoint.
    pub to: String,
}

const fn default_environment() -> PlanetEnvironment {
    PlanetEnvironment::Barren
}
