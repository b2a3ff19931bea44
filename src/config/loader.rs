//! Configuration loading from disk.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::AppConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::parser::{parse_declarations, ParseError};
use crate::routing::router::RouteTable;

/// Error type for configuration and route table loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("syntax error in route file: {0}")]
    Syntax(#[from] ParseError),

    #[error("validation failed: {}", ValidationErrors(.0))]
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// Individual validation errors, if this is a validation failure.
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            ConfigError::Validation(errors) => errors,
            _ => &[],
        }
    }
}

struct ValidationErrors<'a>(&'a [ValidationError]);

impl fmt::Display for ValidationErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate settings from a TOML file.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = read(path)?;
    let config: AppConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    tracing::debug!(path = %path.display(), "Settings loaded");
    Ok(config)
}

/// Parse, validate and compile route file text.
pub fn parse_routes(source: &str, config: &AppConfig) -> Result<RouteTable, ConfigError> {
    let declarations = parse_declarations(source)?;
    RouteTable::compile(declarations, config.match_options()).map_err(ConfigError::Validation)
}

/// Load the route file at `path` into a compiled table.
pub fn load_routes(path: &Path, config: &AppConfig) -> Result<RouteTable, ConfigError> {
    let source = read(path)?;
    let table = parse_routes(&source, config)?;
    tracing::info!(path = %path.display(), routes = table.len(), "Route table loaded");
    Ok(table)
}
