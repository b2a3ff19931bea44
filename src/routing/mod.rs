//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route file text
//!     → parser.rs (declarations, in source order)
//!     → config/validation.rs (structural checks, all errors)
//!     → router.rs (compile patterns into matchers)
//!     → Freeze as immutable RouteTable
//!
//! Lookup:
//!     (method, raw path)
//!     → matcher.rs (normalize, evaluate conditions)
//!     → router.rs (first match in declaration order)
//!     → Return: RouteMatch (route + params) or None
//! ```
//!
//! # Design Decisions
//! - Routes compiled at load time, immutable afterwards
//! - No regex in the hot path
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order, no priority sorting)

pub mod handle;
pub mod matcher;
pub mod method;
pub mod parser;
pub mod pattern;
pub mod router;
pub mod target;

pub use handle::SharedRouteTable;
pub use matcher::RequestTarget;
pub use method::Method;
pub use parser::{parse_declarations, RouteDeclaration};
pub use pattern::{MatchOptions, Params, PathPattern, Segment};
pub use router::{Route, RouteMatch, RouteTable};
pub use target::{ResolvedTarget, Target, TargetDefaults};
