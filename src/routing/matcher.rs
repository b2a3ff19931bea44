//! Route matching logic.
//!
//! # Responsibilities
//! - Normalize the incoming request path
//! - Match the request method against the declared method
//! - Match the path against the compiled pattern
//! - Combine conditions with AND semantics, collecting captured parameters
//!
//! # Design Decisions
//! - Query strings and fragments never take part in matching
//! - Path matching is case-sensitive unless the table says otherwise
//! - No regex to guarantee O(n) matching

use std::borrow::Cow;

use crate::routing::method::Method;
use crate::routing::pattern::{MatchOptions, Params, PathPattern};

/// The parts of a request that routing looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTarget {
    pub method: Method,
    /// Normalized path, always starting with `/`.
    pub path: String,
}

impl RequestTarget {
    /// Build a target from a raw request path such as `/blog/123/?page=2`.
    pub fn new(method: Method, raw_path: &str) -> Self {
        let without_query = raw_path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        Self {
            method,
            path: normalize_path(without_query).into_owned(),
        }
    }
}

/// Normalize a request path to canonical form.
///
/// Backslashes become `/`, repeated slashes collapse, the trailing slash is
/// dropped and a missing leading slash is added. Already-canonical paths are
/// borrowed.
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    let canonical = path.starts_with('/')
        && !path.contains("//")
        && !path.contains('\\')
        && (path == "/" || !path.ends_with('/'));
    if canonical {
        return Cow::Borrowed(path);
    }

    let joined = path
        .replace('\\', "/")
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");
    Cow::Owned(format!("/{}", joined))
}

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns the captured parameters if the request matches this condition.
    /// Conditions that capture nothing return empty params on success.
    fn matches(&self, req: &RequestTarget) -> Option<Params>;
}

/// Matches the request method.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    declared: Method,
}

impl MethodMatcher {
    pub fn new(declared: Method) -> Self {
        Self { declared }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, req: &RequestTarget) -> Option<Params> {
        self.declared.accepts(req.method).then(Params::default)
    }
}

/// Matches the request path against a compiled pattern.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    pattern: PathPattern,
    options: MatchOptions,
}

impl PatternMatcher {
    pub fn new(pattern: PathPattern, options: MatchOptions) -> Self {
        Self { pattern, options }
    }
}

impl Matcher for PatternMatcher {
    fn matches(&self, req: &RequestTarget) -> Option<Params> {
        self.pattern.matches(&req.path, &self.options)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, req: &RequestTarget) -> Option<Params> {
        // All matchers must pass (AND); captures are concatenated in order.
        let mut params = Params::default();
        for matcher in &self.matchers {
            params.extend(matcher.matches(req)?);
        }
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert!(matches!(normalize_path("/about"), Cow::Borrowed("/about")));
        assert!(matches!(normalize_path("/"), Cow::Borrowed("/")));
        assert_eq!(normalize_path("/about/"), "/about");
        assert_eq!(normalize_path("/blog//123"), "/blog/123");
        assert_eq!(normalize_path("\\blog\\123"), "/blog/123");
        assert_eq!(normalize_path("about"), "/about");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("///"), "/");
    }

    #[test]
    fn test_request_target_strips_query() {
        let req = RequestTarget::new(Method::Get, "/blog/123/?page=2#top");
        assert_eq!(req.path, "/blog/123");

        let req = RequestTarget::new(Method::Get, "?only=query");
        assert_eq!(req.path, "/");
    }

    #[test]
    fn test_method_matcher() {
        let matcher = MethodMatcher::new(Method::Get);
        assert!(matcher.matches(&RequestTarget::new(Method::Get, "/")).is_some());
        assert!(matcher.matches(&RequestTarget::new(Method::Head, "/")).is_some());
        assert!(matcher.matches(&RequestTarget::new(Method::Post, "/")).is_none());
    }

    #[test]
    fn test_pattern_matcher() {
        let pattern = PathPattern::parse("/blog/{{__id}}").unwrap();
        let matcher = PatternMatcher::new(pattern, MatchOptions::default());

        let params = matcher
            .matches(&RequestTarget::new(Method::Get, "/blog/123/"))
            .unwrap();
        assert_eq!(params.get("__id"), Some("123"));
        assert!(matcher.matches(&RequestTarget::new(Method::Get, "/blog")).is_none());
    }

    #[test]
    fn test_and_matcher() {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new(Method::Post)),
            Box::new(PatternMatcher::new(
                PathPattern::parse("/comments").unwrap(),
                MatchOptions::default(),
            )),
        ]);

        assert!(matcher.matches(&RequestTarget::new(Method::Post, "/comments")).is_some());
        assert!(matcher.matches(&RequestTarget::new(Method::Get, "/comments")).is_none());
        assert!(matcher.matches(&RequestTarget::new(Method::Post, "/other")).is_none());
    }
}
