//! Declarative route tables.
//!
//! Loads a route file that maps HTTP methods and path patterns to
//! controller/action targets, validates it as a whole and compiles it into
//! an immutable, first-match-wins lookup table.
//!
//! ```
//! use route_table::config::{parse_routes, AppConfig};
//! use route_table::routing::Method;
//!
//! let table = parse_routes(
//!     "get '/blog/{{__id}}', { _controller: 'blog', _action: 'show' }\n\
//!      get '/', {}",
//!     &AppConfig::default(),
//! )
//! .unwrap();
//!
//! let found = table.resolve(Method::Get, "/blog/123").unwrap();
//! assert_eq!(found.route.target.controller.as_deref(), Some("blog"));
//! assert_eq!(found.params.get("__id"), Some("123"));
//! ```

pub mod config;
pub mod observability;
pub mod report;
pub mod routing;

pub use config::AppConfig;
pub use routing::{RouteTable, SharedRouteTable};
