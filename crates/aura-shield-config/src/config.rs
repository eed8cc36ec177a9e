// crates/aura-shield-config/src/config.rs
// ============================================================================
// Module: Aura Shield Configuration
// Description: Configuration loading and validation for Aura Shield.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: aura-shield-core, aura-shield-store-sqlite, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! Config inputs are untrusted; missing or invalid configuration fails closed
//! rather than degrading to a permissive policy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use aura_shield_core::DefaultPolicy;
use aura_shield_core::MAX_ACTIVE_CATEGORIES;
use aura_shield_core::ShieldLevel;
use aura_shield_core::TagId;
use aura_shield_core::TagRegistry;
use aura_shield_store_sqlite::SqliteStoreConfig;
use aura_shield_store_sqlite::SqliteStoreMode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "aura-shield.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "AURA_SHIELD_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum number of configured profiles.
pub(crate) const MAX_PROFILES: usize = 64;
/// Maximum length of a profile identifier.
pub(crate) const MAX_PROFILE_ID_LENGTH: usize = 128;
/// Default store busy timeout in milliseconds.
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Default store database filename.
const DEFAULT_STORE_PATH: &str = "aura-shield.db";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Aura Shield configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShieldConfig {
    /// Rule store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Default policy applied to unconfigured apps.
    #[serde(default)]
    pub default_policy: DefaultPolicyConfig,
    /// Known profile identifiers.
    #[serde(default)]
    pub profiles: Vec<String>,
}

impl ShieldConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// Resolution order: explicit path, `AURA_SHIELD_CONFIG`, then
    /// `aura-shield.toml` in the working directory. A missing file at the
    /// default location yields the builtin defaults; an explicit path that
    /// does not exist is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.is_some() || env::var(CONFIG_ENV_VAR).is_ok();
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        if !explicit && !resolved.exists() {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.store.validate()?;
        self.default_policy.validate()?;
        self.validate_profiles()?;
        Ok(())
    }

    /// Materializes the configured default policy.
    #[must_use]
    pub fn default_policy(&self) -> DefaultPolicy {
        DefaultPolicy {
            shield_level: self.default_policy.shield_level,
            active_categories: self
                .default_policy
                .active_categories
                .iter()
                .map(|tag| TagId::new(tag.as_str()))
                .collect(),
        }
    }

    /// Materializes the store configuration.
    #[must_use]
    pub fn store_config(&self) -> SqliteStoreConfig {
        SqliteStoreConfig {
            path: self.store.path.clone(),
            busy_timeout_ms: self.store.busy_timeout_ms,
            journal_mode: self.store.journal_mode,
        }
    }

    /// Validates configured profile identifiers.
    fn validate_profiles(&self) -> Result<(), ConfigError> {
        if self.profiles.len() > MAX_PROFILES {
            return Err(ConfigError::Invalid("too many profiles configured".to_string()));
        }
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for profile in &self.profiles {
            let trimmed = profile.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Invalid("profile id must be non-empty".to_string()));
            }
            if trimmed.len() > MAX_PROFILE_ID_LENGTH {
                return Err(ConfigError::Invalid(format!(
                    "profile id exceeds {MAX_PROFILE_ID_LENGTH} bytes"
                )));
            }
            if !seen.insert(profile.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate profile id: {profile}")));
            }
        }
        Ok(())
    }
}

/// Rule store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the `SQLite` rule database.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_STORE_PATH),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
        }
    }
}

impl StoreConfig {
    /// Validates store configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        validate_path_string("store.path", &self.path.to_string_lossy())?;
        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid("store.busy_timeout_ms must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Returns the default store busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Default policy configuration for unconfigured apps.
#[derive(Debug, Clone, Deserialize)]
pub struct DefaultPolicyConfig {
    /// Shield level applied when no rule exists.
    #[serde(default = "default_shield_level")]
    pub shield_level: ShieldLevel,
    /// Category tags allowed through when no rule exists.
    #[serde(default = "default_active_categories")]
    pub active_categories: Vec<String>,
}

impl Default for DefaultPolicyConfig {
    fn default() -> Self {
        Self {
            shield_level: default_shield_level(),
            active_categories: default_active_categories(),
        }
    }
}

impl DefaultPolicyConfig {
    /// Validates default policy configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.shield_level == ShieldLevel::Smart && self.active_categories.is_empty() {
            return Err(ConfigError::Invalid(
                "default_policy must select at least one category under smart".to_string(),
            ));
        }
        if self.active_categories.len() > MAX_ACTIVE_CATEGORIES {
            return Err(ConfigError::Invalid("default_policy has too many categories".to_string()));
        }
        let registry = TagRegistry::builtin();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        for category in &self.active_categories {
            if category.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "default_policy category must be non-empty".to_string(),
                ));
            }
            if !registry.contains(&TagId::new(category.as_str())) {
                return Err(ConfigError::Invalid(format!(
                    "default_policy references unknown category: {category}"
                )));
            }
            if !seen.insert(category.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "default_policy duplicates category: {category}"
                )));
            }
        }
        Ok(())
    }
}

/// Returns the default shield level for unconfigured apps.
const fn default_shield_level() -> ShieldLevel {
    ShieldLevel::Smart
}

/// Returns the default category set for unconfigured apps.
fn default_active_categories() -> Vec<String> {
    vec![aura_shield_core::DEFAULT_POLICY_TAG.to_string()]
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against security limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
