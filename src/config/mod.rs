//! Configuration loading.
//!
//! This module provides:
//! - `GminConfig`: Settings from `config.toml` plus environment overrides
//! - `RetryConfig` / `PacingRule`: The tunable parts of dispatch
//! - `GminConfig::load`: Lookup by flag, `$GMIN_CONFIG`, then the user config dir
//!
//! A missing default file yields defaults; a missing file that was named
//! explicitly is a `FatalError::ConfigMissing`.

mod settings;

pub use settings::{GminConfig, PacingRule, RetryConfig};

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::error::FatalError;

pub const CONFIG_ENV: &str = "GMIN_CONFIG";
pub const CUSTOMER_ID_ENV: &str = "GMIN_CUSTOMER_ID";
pub const ACCESS_TOKEN_ENV: &str = "GMIN_ACCESS_TOKEN";
pub const LOG_LEVEL_ENV: &str = "GMIN_LOG_LEVEL";

/// `<config_dir>/gmin/config.toml`, where the platform has a config dir.
#[cfg(feature = "cli")]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gmin").join("config.toml"))
}

#[cfg(not(feature = "cli"))]
pub fn default_config_path() -> Option<PathBuf> {
    None
}

impl GminConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, FatalError> {
        trace!(configuration_file_path = %path.display(), "Loading configuration file");
        let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FatalError::ConfigMissing(path.to_path_buf()),
            _ => FatalError::ConfigInvalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;
        Self::from_toml(&text).map_err(|message| FatalError::ConfigInvalid {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, String> {
        toml::from_str(text).map_err(|e| e.to_string())
    }

    /// Load using the standard lookup order and apply environment overrides.
    pub fn load(explicit: Option<&Path>) -> Result<Self, FatalError> {
        Self::load_with(explicit, |key| std::env::var(key).ok(), default_config_path())
    }

    /// `load` with the environment and default path supplied by the caller.
    pub fn load_with(
        explicit: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
        default_path: Option<PathBuf>,
    ) -> Result<Self, FatalError> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env(CONFIG_ENV).filter(|p| !p.is_empty()).map(PathBuf::from));

        let config = match named {
            Some(path) => Self::from_file(&path)?,
            None => match default_path {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("no configuration file found, using defaults");
                    Self::default()
                }
            },
        };

        config.with_env(env)
    }

    /// Apply `GMIN_*` overrides and validate the result.
    pub fn with_env(mut self, env: impl Fn(&str) -> Option<String>) -> Result<Self, FatalError> {
        if let Some(customer_id) = env(CUSTOMER_ID_ENV).filter(|v| !v.is_empty()) {
            self.customer_id = customer_id;
        }
        if let Some(token) = env(ACCESS_TOKEN_ENV).filter(|v| !v.is_empty()) {
            self.access_token = Some(token);
        }
        if let Some(level) = env(LOG_LEVEL_ENV).filter(|v| !v.is_empty()) {
            self.log_level = level;
        }

        if let Err(rule) = self.pacing() {
            return Err(FatalError::ConfigInvalid {
                path: PathBuf::from("<pacing>"),
                message: format!(
                    "unknown object '{}' or call '{}' in pacing rule",
                    rule.object, rule.call
                ),
            });
        }
        Ok(self)
    }

    /// The access token, or `CredentialsMissing`.
    pub fn require_token(&self) -> Result<&str, FatalError> {
        self.access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(FatalError::CredentialsMissing)
    }
}
