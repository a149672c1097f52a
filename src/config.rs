//! Run configuration.
//!
//! Everything a run needs is resolved once at startup into an immutable
//! [`ExtractorConfig`]. Schema constants and the call-site marker may come from
//! an optional JSON profile; CLI flags take precedence over the profile.
use crate::literal::DEFAULT_MARKER;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "generated_literals.sql";

/// Fixed fields of the localization schema written into every statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct SqlSchema {
    pub database: String,
    pub app_id: u32,
    pub status_id: u32,
    pub business_id: u32,
    pub language_id: u32,
}

impl Default for SqlSchema {
    fn default() -> Self {
        Self {
            database: "repo_literals".to_string(),
            app_id: 2,
            status_id: 2,
            business_id: 2,
            language_id: 47,
        }
    }
}

/// Optional JSON profile (`--config`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,
    #[serde(default)]
    pub schema: SqlSchema,
}

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub page_id: i64,
    pub output: PathBuf,
    pub reference: Option<PathBuf>,
    pub interactive: bool,
    pub marker: String,
    pub schema: SqlSchema,
}

impl ExtractorConfig {
    /// Configuration with profile defaults for `page_id`.
    pub fn new(page_id: i64) -> Self {
        Self {
            page_id,
            output: PathBuf::from(DEFAULT_OUTPUT),
            reference: None,
            interactive: false,
            marker: DEFAULT_MARKER.to_string(),
            schema: SqlSchema::default(),
        }
    }

    /// Apply a loaded profile on top of the defaults.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        if let Some(marker) = profile.marker {
            self.marker = marker;
        }
        self.schema = profile.schema;
        self
    }
}

pub fn load_profile(path: &Path) -> Result<Profile> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let profile: Profile = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    Ok(profile)
}

/// Reject values that would produce broken statements or an empty grammar.
pub fn validate_config(config: &ExtractorConfig) -> Result<()> {
    if config.marker.trim().is_empty() {
        return Err(anyhow!("call-site marker must not be empty"));
    }
    let database = &config.schema.database;
    if database.trim().is_empty() {
        return Err(anyhow!("schema database name must not be empty"));
    }
    if database.contains('`') {
        return Err(anyhow!(
            "schema database name must not contain backticks: {database}"
        ));
    }
    if config.output.as_os_str().is_empty() {
        return Err(anyhow!("output path must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
