//! Startup configuration resolved from environment variables.
//!
//! # Responsibility
//! - Resolve database path, logging options and the category rule.
//! - Keep lookups injectable so resolution is testable without touching
//!   the process environment.
//!
//! # Invariants
//! - Values are trimmed; blank values count as absent.
//! - Unknown category rule names are rejected, never defaulted.

use crate::logging::default_log_level;
use crate::model::category::CategoryRule;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "ROSTER_DB_PATH";
pub const ENV_LOG_DIR: &str = "ROSTER_LOG_DIR";
pub const ENV_LOG_LEVEL: &str = "ROSTER_LOG_LEVEL";
pub const ENV_CATEGORY_RULE: &str = "ROSTER_CATEGORY_RULE";

const DEFAULT_DB_FILE_NAME: &str = "roster.sqlite3";

/// Configuration resolution error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownCategoryRule(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCategoryRule(name) => write!(
                f,
                "unknown category rule `{name}`; expected contact|class|kindergarten"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: PathBuf,
    /// Logging stays off when no directory is configured.
    pub log_dir: Option<String>,
    pub log_level: String,
    pub category_rule: CategoryRule,
}

impl AppConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let category_rule = match read(ENV_CATEGORY_RULE) {
            Some(name) => CategoryRule::from_name(&name)
                .ok_or(ConfigError::UnknownCategoryRule(name))?,
            None => CategoryRule::default(),
        };

        Ok(Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_dir: read(ENV_LOG_DIR),
            log_level: read(ENV_LOG_LEVEL).unwrap_or_else(|| default_log_level().to_string()),
            category_rule,
        })
    }
}
