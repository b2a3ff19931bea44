//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation of the settings file (serde handles syntactic)
//! - Structural validation of the route table:
//!   well-formed patterns, catch-all last, no duplicate routes,
//!   no empty target values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Route validation compiles each pattern once and hands the compiled
//!   patterns back, so the router does not parse them again
//! - Runs before a table is accepted into the system

use crate::config::schema::AppConfig;
use crate::routing::method::Method;
use crate::routing::parser::{RouteDeclaration, ACTION_KEY, CONTROLLER_KEY};
use crate::routing::pattern::{MatchOptions, PathPattern, PatternError, Segment};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("{field}: invalid value '{value}' ({reason})")]
    InvalidValue {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("line {line}: invalid pattern '{pattern}': {source}")]
    Pattern {
        line: usize,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("line {line}: catch-all route '{method} /' must be declared last (shadows lines {})", join_lines(.shadowed))]
    CatchAllNotLast {
        line: usize,
        method: Method,
        shadowed: Vec<usize>,
    },

    #[error("line {line}: '{method} {pattern}' duplicates the route on line {first_line}")]
    DuplicateRoute {
        line: usize,
        first_line: usize,
        method: Method,
        pattern: String,
    },

    #[error("line {line}: {key} must not be empty")]
    EmptyTargetValue { line: usize, key: &'static str },
}

fn join_lines(lines: &[usize]) -> String {
    lines
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate the settings file.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.routes.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyField {
            field: "routes.path",
        });
    }
    if config.defaults.controller.trim().is_empty() {
        errors.push(ValidationError::EmptyField {
            field: "defaults.controller",
        });
    }
    if config.defaults.action.trim().is_empty() {
        errors.push(ValidationError::EmptyField {
            field: "defaults.action",
        });
    }
    if !LOG_LEVELS.contains(&config.observability.log_level.to_ascii_lowercase().as_str()) {
        errors.push(ValidationError::InvalidValue {
            field: "observability.log_level",
            value: config.observability.log_level.clone(),
            reason: "expected trace, debug, info, warn or error",
        });
    }
    if config.watch.poll_interval_secs == 0 {
        errors.push(ValidationError::InvalidValue {
            field: "watch.poll_interval_secs",
            value: "0".to_string(),
            reason: "must be greater than zero",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate route declarations as a table.
///
/// On success returns the compiled pattern of every declaration, in order.
pub fn validate_routes(
    declarations: &[RouteDeclaration],
    options: &MatchOptions,
) -> Result<Vec<PathPattern>, Vec<ValidationError>> {
    let mut errors = Vec::new();

    // Compiled patterns, `None` where the pattern itself is broken.
    let patterns: Vec<Option<PathPattern>> = declarations
        .iter()
        .map(|decl| match PathPattern::parse(&decl.path) {
            Ok(pattern) => Some(pattern),
            Err(source) => {
                errors.push(ValidationError::Pattern {
                    line: decl.line,
                    pattern: decl.path.clone(),
                    source,
                });
                None
            }
        })
        .collect();

    for (decl, key, value) in declarations.iter().flat_map(|decl| {
        [
            (decl, CONTROLLER_KEY, decl.target.controller.as_deref()),
            (decl, ACTION_KEY, decl.target.action.as_deref()),
        ]
    }) {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            errors.push(ValidationError::EmptyTargetValue {
                line: decl.line,
                key,
            });
        }
    }

    // Catch-all routes shadow every later route whose method overlaps.
    for (i, decl) in declarations.iter().enumerate() {
        if !matches!(&patterns[i], Some(p) if p.is_catch_all()) {
            continue;
        }
        let shadowed: Vec<usize> = declarations[i + 1..]
            .iter()
            .filter(|later| decl.method.overlaps(later.method))
            .map(|later| later.line)
            .collect();
        if !shadowed.is_empty() {
            errors.push(ValidationError::CatchAllNotLast {
                line: decl.line,
                method: decl.method,
                shadowed,
            });
        }
    }

    // Same pattern shape under a method that already covers this one: the
    // later route is unreachable.
    let mut seen: Vec<(Method, Vec<String>, usize)> = Vec::new();
    for (decl, pattern) in declarations.iter().zip(&patterns) {
        let Some(pattern) = pattern else { continue };
        if pattern.is_catch_all() {
            continue;
        }
        let shape = pattern_shape(pattern, options);
        let earlier = seen
            .iter()
            .find(|(method, seen_shape, _)| *seen_shape == shape && method.covers(decl.method));
        match earlier {
            Some(&(_, _, first_line)) => errors.push(ValidationError::DuplicateRoute {
                line: decl.line,
                first_line,
                method: decl.method,
                pattern: decl.path.clone(),
            }),
            None => seen.push((decl.method, shape, decl.line)),
        }
    }

    if errors.is_empty() {
        Ok(patterns.into_iter().flatten().collect())
    } else {
        tracing::debug!(errors = errors.len(), "Route table failed validation");
        Err(errors)
    }
}

/// Pattern with placeholder names erased; two patterns with the same shape
/// match exactly the same paths.
fn pattern_shape(pattern: &PathPattern, options: &MatchOptions) -> Vec<String> {
    pattern
        .segments()
        .iter()
        .map(|segment| match segment {
            Segment::Placeholder(_) => "{{}}".to_string(),
            Segment::Literal(l) if options.case_sensitive => l.clone(),
            Segment::Literal(l) => l.to_ascii_lowercase(),
        })
        .collect()
}
