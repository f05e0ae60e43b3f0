//! Configuration system for CrewForge.
//!
//! Load assignment and solver configuration from TOML or YAML to change crew
//! sizes, objective weights and the solve budget without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use crewforge_config::CrewForgeConfig;
//! use std::time::Duration;
//!
//! let config = CrewForgeConfig::from_toml_str(r#"
//!     [assignment]
//!     min_crew_size = 4
//!     max_crew_size = 8
//!
//!     [assignment.weights]
//!     friend = 4.0
//!
//!     [solver.termination]
//!     seconds_spent_limit = 30
//! "#).unwrap();
//!
//! assert_eq!(config.assignment.max_crew_size, 8);
//! assert_eq!(config.assignment.weights.friend, 4.0);
//! assert_eq!(config.assignment.weights.gender, 1.0);
//! assert_eq!(config.solver.time_limit(), Some(Duration::from_secs(30)));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use crewforge_config::CrewForgeConfig;
//!
//! let config = CrewForgeConfig::load("crewforge.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! ```

use std::path::Path;
use std::time::Duration;

use crewforge_core::CrewForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for CrewForgeError {
    fn from(err: ConfigError) -> Self {
        CrewForgeError::Config(err.to_string())
    }
}

/// Top-level configuration file layout.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CrewForgeConfig {
    /// Crew sizes and objective weights.
    #[serde(default)]
    pub assignment: AssignmentConfig,

    /// Engine budget.
    #[serde(default)]
    pub solver: SolverConfig,
}

impl CrewForgeConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = Self::from_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Replaces the assignment section.
    pub fn with_assignment(mut self, assignment: AssignmentConfig) -> Self {
        self.assignment = assignment;
        self
    }

    /// Replaces the solver section.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Checks every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.assignment.validate()
    }
}

/// Crew size defaults and objective weights.
///
/// Passed by value into the model builder and objective composer; there is
/// no global configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct AssignmentConfig {
    /// Minimum crew occupancy for crews without an override.
    pub min_crew_size: u32,

    /// Maximum crew occupancy for crews without an override.
    pub max_crew_size: u32,

    /// Weights of the four objective terms.
    pub weights: ObjectiveWeights,

    /// Requires every youth with a resolved friend choice to share a center
    /// with at least one of the people they chose.
    pub require_friend_center: bool,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            min_crew_size: 5,
            max_crew_size: 7,
            weights: ObjectiveWeights::default(),
            require_friend_center: false,
        }
    }
}

impl AssignmentConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset that favors keeping friends together.
    pub fn with_high_friend_weight() -> Self {
        Self {
            weights: ObjectiveWeights::new(4.0, 1.0, 1.0, 1.0),
            ..Self::default()
        }
    }

    /// Preset that favors balanced crews.
    pub fn with_high_diversity() -> Self {
        Self {
            weights: ObjectiveWeights::new(1.0, 2.0, 2.0, 2.0),
            ..Self::default()
        }
    }

    /// Sets the default crew size bounds.
    pub fn with_crew_size(mut self, min: u32, max: u32) -> Self {
        self.min_crew_size = min;
        self.max_crew_size = max;
        self
    }

    /// Sets the objective weights.
    pub fn with_weights(mut self, weights: ObjectiveWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Turns the friend-center requirement on or off.
    pub fn with_friend_center_required(mut self, required: bool) -> Self {
        self.require_friend_center = required;
        self
    }

    /// Checks the size bounds and weights.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `min_crew_size` is zero,
    /// `max_crew_size` is below it, or a weight is negative or not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_crew_size == 0 {
            return Err(ConfigError::Invalid(
                "min_crew_size must be at least 1".to_string(),
            ));
        }
        if self.max_crew_size < self.min_crew_size {
            return Err(ConfigError::Invalid(format!(
                "max_crew_size {} is below min_crew_size {}",
                self.max_crew_size, self.min_crew_size
            )));
        }
        self.weights.validate()
    }
}

/// Weights of the objective terms.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ObjectiveWeights {
    pub friend: f64,
    pub gender: f64,
    pub year: f64,
    pub history: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        Self::new(2.0, 1.0, 1.0, 1.0)
    }
}

impl ObjectiveWeights {
    pub const fn new(friend: f64, gender: f64, year: f64, history: f64) -> Self {
        Self {
            friend,
            gender,
            year,
            history,
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("friend", self.friend),
            ("gender", self.gender),
            ("year", self.year),
            ("history", self.history),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} weight must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Time budget of [`SolverConfig::default`], in seconds.
pub const DEFAULT_SECONDS_SPENT_LIMIT: u64 = 60;

/// Engine configuration.
///
/// The default stops the search after [`DEFAULT_SECONDS_SPENT_LIMIT`]
/// seconds and keeps the best assignment found so far.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverConfig {
    /// Termination configuration. Without one the engine runs to proof of
    /// optimality or infeasibility.
    pub termination: Option<TerminationConfig>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            termination: Some(TerminationConfig {
                seconds_spent_limit: Some(DEFAULT_SECONDS_SPENT_LIMIT),
                ..TerminationConfig::default()
            }),
        }
    }
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration without any limit: the engine runs until
    /// optimality or infeasibility is proven.
    pub fn unlimited() -> Self {
        Self { termination: None }
    }

    /// Replaces the time limit with `seconds`.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            millis_spent_limit: None,
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Replaces the time limit with `millis` milliseconds.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: None,
            millis_spent_limit: Some(millis),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the maximum number of search nodes.
    pub fn with_node_count_limit(mut self, nodes: u64) -> Self {
        self.termination = Some(TerminationConfig {
            node_count_limit: Some(nodes),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// Convenience method that delegates to `termination.time_limit()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use crewforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::new().with_termination_millis(250);
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the node limit, if configured.
    pub fn node_count_limit(&self) -> Option<u64> {
        self.termination.as_ref().and_then(|t| t.node_count_limit)
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Additional milliseconds to spend solving.
    pub millis_spent_limit: Option<u64>,

    /// Maximum number of search nodes.
    pub node_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let millis = self
            .seconds_spent_limit
            .unwrap_or(0)
            .saturating_mul(1000)
            .saturating_add(self.millis_spent_limit.unwrap_or(0));
        if millis > 0 {
            Some(Duration::from_millis(millis))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests;
