//! Configuration system for OracleForge.
//!
//! Load oracle configuration from TOML or YAML to tune thresholds, search
//! bounds and assertion levels without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use oracleforge_config::{EnvironmentMode, OracleConfig};
//!
//! let config = OracleConfig::from_toml_str(r#"
//!     environment_mode = "full_assert"
//!
//!     [control]
//!     majority_threshold = 66
//!
//!     [learning]
//!     parity_warn_inputs = 12
//! "#).unwrap();
//!
//! assert_eq!(config.environment_mode, EnvironmentMode::FullAssert);
//! assert_eq!(config.control.majority_threshold, 66);
//! assert_eq!(config.control.scaled_majority_threshold, 5_000_000);
//! assert!(config.learning.enabled);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use oracleforge_config::OracleConfig;
//!
//! let config = OracleConfig::load("oracles.toml").unwrap_or_default();
//! assert!(config.files.cache);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest `enumeration.max_undefined`; completions are counted in a `u64`
/// mask and stay practical well below that.
pub const MAX_ENUMERATED_UNDEFINED: usize = 30;

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

/// Main oracle configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OracleConfig {
    /// Assertion level applied after each evaluation.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Majority thresholds of the control oracles.
    #[serde(default)]
    pub control: ControlConfig,

    /// Subset-sum feasibility bounds.
    #[serde(default)]
    pub subset_sum: SubsetSumConfig,

    /// Completion enumeration bounds.
    #[serde(default)]
    pub enumeration: EnumerationConfig,

    /// Nogood learning switches.
    #[serde(default)]
    pub learning: LearningConfig,

    /// Formula file handling.
    #[serde(default)]
    pub files: FilesConfig,
}

impl OracleConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or
    /// fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control.majority_threshold < 0 {
            return Err(ConfigError::Invalid(
                "control.majority_threshold must be non-negative".into(),
            ));
        }
        if self.control.scaled_majority_threshold < 0 {
            return Err(ConfigError::Invalid(
                "control.scaled_majority_threshold must be non-negative".into(),
            ));
        }
        if self.subset_sum.max_table_size == 0 {
            return Err(ConfigError::Invalid(
                "subset_sum.max_table_size must be positive".into(),
            ));
        }
        if self.enumeration.max_undefined > MAX_ENUMERATED_UNDEFINED {
            return Err(ConfigError::Invalid(format!(
                "enumeration.max_undefined = {} exceeds {MAX_ENUMERATED_UNDEFINED}",
                self.enumeration.max_undefined
            )));
        }
        Ok(())
    }

    /// Sets the environment mode.
    pub fn with_environment_mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment_mode = mode;
        self
    }

    /// Sets the majority threshold used by `controls` and `controlsMajority`.
    pub fn with_majority_threshold(mut self, threshold: i64) -> Self {
        self.control.majority_threshold = threshold;
        self
    }

    /// Sets the largest number of Undefined facts enumerated exactly,
    /// clamped to [`MAX_ENUMERATED_UNDEFINED`].
    pub fn with_max_undefined(mut self, max: usize) -> Self {
        self.enumeration.max_undefined = max.min(MAX_ENUMERATED_UNDEFINED);
        self
    }

    /// Enables or disables nogood learning globally.
    pub fn with_learning(mut self, enabled: bool) -> Self {
        self.learning.enabled = enabled;
        self
    }

    /// Sets the directory relative file paths resolve against.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.files.base_dir = Some(dir.into());
        self
    }

    /// Resolves a file name passed as an oracle input.
    ///
    /// # Examples
    ///
    /// ```
    /// use oracleforge_config::OracleConfig;
    /// use std::path::Path;
    ///
    /// let config = OracleConfig::new().with_base_dir("/data");
    /// assert_eq!(config.resolve_path("f.cnf"), Path::new("/data/f.cnf"));
    /// assert_eq!(config.resolve_path("/tmp/f.cnf"), Path::new("/tmp/f.cnf"));
    /// ```
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        match &self.files.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// Environment mode affecting assertion overhead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// No checks beyond input validation.
    #[default]
    Production,

    /// Checks answer invariants after each call.
    FastAssert,

    /// Also probes declared monotonicity after each call.
    FullAssert,
}

impl EnvironmentMode {
    pub fn is_asserted(&self) -> bool {
        !matches!(self, EnvironmentMode::Production)
    }

    pub fn is_fully_asserted(&self) -> bool {
        matches!(self, EnvironmentMode::FullAssert)
    }
}

/// Control oracle thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ControlConfig {
    /// Percentage a controller must exceed.
    pub majority_threshold: i64,

    /// Threshold for shares given in millionths.
    pub scaled_majority_threshold: i64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            majority_threshold: 50,
            scaled_majority_threshold: 5_000_000,
        }
    }
}

/// Subset-sum configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SubsetSumConfig {
    /// Largest residual target checked with an exact reachability table.
    /// Above it only interval bounds are used.
    pub max_table_size: u64,
}

impl Default for SubsetSumConfig {
    fn default() -> Self {
        Self {
            max_table_size: 1 << 20,
        }
    }
}

/// Completion enumeration configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EnumerationConfig {
    /// Oracles that enumerate completions give up and answer Possible
    /// beyond this many Undefined facts.
    pub max_undefined: usize,
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self { max_undefined: 16 }
    }
}

/// Learning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct LearningConfig {
    /// Master switch; when off, learning requests are ignored.
    pub enabled: bool,

    /// Parity learning logs a warning above this many input facts.
    pub parity_warn_inputs: usize,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            parity_warn_inputs: 16,
        }
    }
}

/// File handling configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct FilesConfig {
    /// Cache parsed files by content digest.
    pub cache: bool,

    /// Directory relative paths resolve against.
    pub base_dir: Option<PathBuf>,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            cache: true,
            base_dir: None,
        }
    }
}
