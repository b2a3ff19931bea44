//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!
//! Consumers:
//!     → stderr (pretty for terminals, JSON for aggregation)
//! ```

pub mod logging;

pub use logging::init_logging;
