//! Configuration schema definitions.
//!
//! This module defines the tool configuration structure.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stanza::parser::ParseOptions;

/// Root configuration for the stanza tools.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Where the stanza file lives.
    pub source: SourceConfig,

    /// Parser error policies.
    pub parser: ParseOptions,

    /// Listing and search settings.
    pub search: SearchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Stanza file location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base directory of the proxy installation.
    pub base_dir: PathBuf,

    /// Stanza file, relative to `base_dir` unless absolute.
    pub stanza_file: PathBuf,
}

impl SourceConfig {
    /// Full path of the stanza file.
    pub fn stanza_path(&self) -> PathBuf {
        self.base_dir.join(&self.stanza_file)
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            stanza_file: PathBuf::from("config/databases.conf"),
        }
    }
}

/// Search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Compare name prefixes case-insensitively in listings.
    pub ignore_case: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { ignore_case: true }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
