//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! settings file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! route file
//!     → loader.rs (read, parse declarations)
//!     → validation.rs (structural checks)
//!     → RouteTable (compiled, immutable)
//!
//! On change (watch mode):
//!     watcher.rs detects change
//!     → loader.rs loads new table
//!     → validation.rs validates
//!     → valid: published as a new table
//!     → invalid: logged, current table kept
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once loaded; changes require full reload
//! - All settings have defaults to allow minimal configs
//! - Validation separates syntactic (serde, parser) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_routes, parse_routes, ConfigError};
pub use schema::{AppConfig, LogFormat, ObservabilityConfig};
pub use validation::ValidationError;
pub use watcher::{RouteUpdate, RouteWatcher};
