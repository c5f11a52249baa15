//! core::config
//!
//! Versioning configuration.
//!
//! # Overview
//!
//! [`VersionConfig`] is the immutable value object the engine is constructed
//! with: which revision to version, the base branch to measure against, and
//! the tunable constants of the time-component formula. It is validated at
//! construction; an engine never sees an invalid configuration.
//!
//! # Precedence
//!
//! Values are resolved in this order (later overrides earlier):
//! 1. Built-in defaults
//! 2. `revline.toml` at the repository work-tree root
//! 3. CLI flags (not handled here)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// File name of the optional repository-level configuration.
pub const CONFIG_FILE_NAME: &str = "revline.toml";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Immutable versioning configuration.
///
/// Two configurations are equal iff all six fields are equal; engines
/// constructed from equal configurations over identical repository state
/// produce identical results.
///
/// # Example
///
/// ```
/// use revline::core::config::VersionConfig;
///
/// let config = VersionConfig::default();
/// assert_eq!(config.rev, "HEAD");
/// assert_eq!(config.base_branch, "master");
/// assert_eq!(config.year_factor, 1000);
/// assert_eq!(config.stop_debounce, 48);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionConfig {
    /// The long-lived branch feature work is measured against.
    pub base_branch: String,
    /// Repository path; empty means the current directory.
    pub repo_path: PathBuf,
    /// Revision units representing one year of continuous work.
    pub year_factor: u32,
    /// Minimum gap (hours) between commits for the gap to be excluded
    /// from time accounting.
    pub stop_debounce: u32,
    /// Optional override for the name segment of the version string.
    pub name: Option<String>,
    /// The revision expression to version ("HEAD", a branch, or a sha).
    pub rev: String,
}

impl VersionConfig {
    /// Default base branch.
    pub const DEFAULT_BASE_BRANCH: &'static str = "master";
    /// Default revision units per year of continuous work.
    pub const DEFAULT_YEAR_FACTOR: u32 = 1000;
    /// Default debounce threshold in hours.
    pub const DEFAULT_STOP_DEBOUNCE: u32 = 48;

    /// Create a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `rev` or `base_branch` is
    /// empty, or if `name` is present but empty.
    pub fn new(
        rev: impl Into<String>,
        base_branch: impl Into<String>,
        repo_path: impl Into<PathBuf>,
        year_factor: u32,
        stop_debounce: u32,
        name: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            base_branch: base_branch.into(),
            repo_path: repo_path.into(),
            year_factor,
            stop_debounce,
            name,
            rev: rev.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rev.is_empty() {
            return Err(ConfigError::InvalidValue("rev cannot be empty".into()));
        }
        if self.base_branch.is_empty() {
            return Err(ConfigError::InvalidValue(
                "base branch cannot be empty".into(),
            ));
        }
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "name override cannot be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        Self {
            base_branch: Self::DEFAULT_BASE_BRANCH.to_string(),
            repo_path: PathBuf::new(),
            year_factor: Self::DEFAULT_YEAR_FACTOR,
            stop_debounce: Self::DEFAULT_STOP_DEBOUNCE,
            name: None,
            rev: "HEAD".to_string(),
        }
    }
}

/// Repository-level configuration file (`revline.toml`).
///
/// All fields are optional; absent fields fall back to built-in defaults
/// and CLI flags always take precedence.
///
/// # Example
///
/// ```toml
/// base_branch = "develop"
/// year_factor = 1200
/// stop_debounce = 72
/// name = "nightly"
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Base branch override.
    pub base_branch: Option<String>,
    /// Year factor override.
    pub year_factor: Option<u32>,
    /// Debounce threshold override (hours).
    pub stop_debounce: Option<u32>,
    /// Version-string name segment override.
    pub name: Option<String>,
}

impl FileConfig {
    /// Load the configuration file from a work-tree root, if present.
    ///
    /// A missing file is not an error. A malformed or unreadable file is.
    pub fn load(work_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let path = work_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let config: FileConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                message: e.to_string(),
            })?;

        config.validate()?;
        Ok(Some(config))
    }

    /// Validate the parsed values.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(branch) = &self.base_branch {
            if branch.is_empty() {
                return Err(ConfigError::InvalidValue(
                    "base_branch cannot be empty".into(),
                ));
            }
        }
        if let Some(name) = &self.name {
            if name.is_empty() {
                return Err(ConfigError::InvalidValue("name cannot be empty".into()));
            }
        }
        Ok(())
    }
}
