//! Configuration schema definitions.
//!
//! This module defines the settings file for the route table tool.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::routing::{MatchOptions, TargetDefaults};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Where the route table lives and how it is matched.
    pub routes: RoutesConfig,

    /// Fallback controller/action for targets that leave them out.
    pub defaults: DefaultsConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// File watching settings.
    pub watch: WatchConfig,
}

impl AppConfig {
    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            case_sensitive: self.routes.case_sensitive,
        }
    }

    pub fn target_defaults(&self) -> TargetDefaults {
        TargetDefaults {
            controller: self.defaults.controller.clone(),
            action: self.defaults.action.clone(),
        }
    }
}

/// Route file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path to the route file.
    pub path: PathBuf,

    /// Compare literal path segments case-sensitively.
    pub case_sensitive: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("routes.conf"),
            case_sensitive: true,
        }
    }
}

/// Default target resolution.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Controller used when a route has no `_controller`.
    pub controller: String,

    /// Action used when a route has no `_action`.
    pub action: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let defaults = TargetDefaults::default();
        Self {
            controller: defaults.controller,
            action: defaults.action,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval for watchers without native file events, in seconds.
    pub poll_interval_secs: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 2,
        }
    }
}
