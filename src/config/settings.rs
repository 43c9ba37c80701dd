//! Configuration file schema.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::dispatch::{DEFAULT_CONCURRENCY, Pacing};
use crate::retry::RetryPolicy;

fn default_customer_id() -> String {
    "my_customer".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

/// Settings read from `config.toml`, then overridden from the environment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GminConfig {
    #[serde(default = "default_customer_id")]
    pub customer_id: String,
    /// OAuth bearer token for the Google APIs
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Write structured logs to this file instead of stderr
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    /// Worker pool size
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Overrides of the pre-submit delay table
    #[serde(default)]
    pub pacing: Vec<PacingRule>,
    #[serde(default)]
    pub directory_base_url: Option<String>,
    #[serde(default)]
    pub groups_settings_base_url: Option<String>,
    #[serde(default)]
    pub sheets_base_url: Option<String>,
}

impl Default for GminConfig {
    fn default() -> Self {
        Self {
            customer_id: default_customer_id(),
            access_token: None,
            log_level: default_log_level(),
            log_path: None,
            concurrency: default_concurrency(),
            retry: RetryConfig::default(),
            pacing: Vec::new(),
            directory_base_url: None,
            groups_settings_base_url: None,
            sheets_base_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig {
    pub initial_interval_ms: u64,
    pub multiplier: f64,
    pub max_interval_ms: u64,
    pub max_elapsed_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_interval_ms: 500,
            multiplier: 2.0,
            max_interval_ms: 16_000,
            max_elapsed_secs: 32,
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new()
            .with_initial_interval(Duration::from_millis(self.initial_interval_ms))
            .with_multiplier(self.multiplier)
            .with_max_interval(Duration::from_millis(self.max_interval_ms))
            .with_max_elapsed(Duration::from_secs(self.max_elapsed_secs))
    }
}

/// One `[[pacing]]` entry, e.g. `{ object = "orgunit", call = "create", delay_ms = 3000 }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacingRule {
    pub object: String,
    pub call: String,
    pub delay_ms: u64,
}

impl GminConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.policy()
    }

    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }

    /// Default pacing with the configured overrides applied.
    ///
    /// Returns the first rule naming an unknown object or call type.
    pub fn pacing(&self) -> Result<Pacing, PacingRule> {
        self.pacing.iter().try_fold(Pacing::default(), |pacing, rule| {
            let object = crate::model::ObjectType::from_str(&rule.object);
            let call = crate::model::CallType::from_str(&rule.call);
            match (object, call) {
                (Some(object), Some(call)) => {
                    Ok(pacing.with_delay(object, call, Duration::from_millis(rule.delay_ms)))
                }
                _ => Err(rule.clone()),
            }
        })
    }
}
