//! Job service connection settings.

use crate::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Environment variable holding the job service base URI.
pub const BASE_URI_ENV: &str = "GATEWAY_JOB_BASE_URI";

/// Base URI used when nothing else is configured.
pub const DEFAULT_BASE_URI: &str = "http://localhost:9082";

fn default_base_uri() -> String {
    String::from(DEFAULT_BASE_URI)
}

/// Where the job service lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobClientConfig {
    /// Root address of the job service. `jobs` is appended to its path.
    #[serde(default = "default_base_uri")]
    pub base_uri: String,
}

impl Default for JobClientConfig {
    fn default() -> Self {
        Self {
            base_uri: default_base_uri(),
        }
    }
}

impl JobClientConfig {
    pub fn new(base_uri: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to the default base
    /// URI when the variable is unset or empty.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URI_ENV).filter(|value| !value.is_empty()) {
            Some(base_uri) => {
                debug!("Using {BASE_URI_ENV}={base_uri}");
                Self::new(base_uri)
            }
            None => Self::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(file_path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(file_path)?;
        Self::from_toml(&contents)
    }

    /// Parse configuration from TOML string.
    pub fn from_toml(value: &str) -> Result<Self> {
        Ok(toml::from_str(value)?)
    }
}
