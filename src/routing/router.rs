//! Route lookup.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the matching route for a request
//! - Return matched route or explicit no-match
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; the first match wins
//! - Explicit `None` rather than a silent default

use crate::config::validation::{validate_routes, ValidationError};
use crate::routing::matcher::{AndMatcher, Matcher, MethodMatcher, PatternMatcher, RequestTarget};
use crate::routing::method::Method;
use crate::routing::parser::RouteDeclaration;
use crate::routing::pattern::{MatchOptions, Params, PathPattern};
use crate::routing::target::Target;

/// A compiled route.
#[derive(Debug)]
pub struct Route {
    /// Position in the table, starting at 0.
    pub index: usize,
    /// Source line of the declaration.
    pub line: usize,
    pub method: Method,
    pub pattern: PathPattern,
    pub target: Target,
    matcher: AndMatcher,
}

impl Route {
    fn compile(
        index: usize,
        declaration: RouteDeclaration,
        pattern: PathPattern,
        options: MatchOptions,
    ) -> Self {
        let matcher = AndMatcher::new(vec![
            Box::new(MethodMatcher::new(declaration.method)),
            Box::new(PatternMatcher::new(pattern.clone(), options)),
        ]);

        Self {
            index,
            line: declaration.line,
            method: declaration.method,
            pattern,
            target: declaration.target,
            matcher,
        }
    }

    /// `controller.action` label for logs.
    pub fn name(&self) -> String {
        self.target.label()
    }
}

/// A successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub params: Params,
}

/// Ordered, immutable route table.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
    options: MatchOptions,
}

impl RouteTable {
    /// Validate and compile declarations into a table.
    ///
    /// Every validation problem is reported, not just the first.
    pub fn compile(
        declarations: Vec<RouteDeclaration>,
        options: MatchOptions,
    ) -> Result<Self, Vec<ValidationError>> {
        let patterns = validate_routes(&declarations, &options)?;

        let routes: Vec<Route> = declarations
            .into_iter()
            .zip(patterns)
            .enumerate()
            .map(|(index, (declaration, pattern))| Route::compile(index, declaration, pattern, options))
            .collect();

        tracing::info!(
            routes = routes.len(),
            case_sensitive = options.case_sensitive,
            "Route table compiled"
        );

        Ok(Self { routes, options })
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> impl ExactSizeIterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    /// Find the first route matching the request.
    pub fn match_request(&self, req: &RequestTarget) -> Option<RouteMatch<'_>> {
        let found = self.candidates(req).next();
        match &found {
            Some(m) => tracing::debug!(
                method = %req.method,
                path = %req.path,
                line = m.route.line,
                route = %m.route.name(),
                "Route matched"
            ),
            None => tracing::debug!(method = %req.method, path = %req.path, "No route matched"),
        }
        found
    }

    /// Convenience wrapper around [`RouteTable::match_request`] for a raw path.
    pub fn resolve(&self, method: Method, raw_path: &str) -> Option<RouteMatch<'_>> {
        self.match_request(&RequestTarget::new(method, raw_path))
    }

    /// Every route matching the request, in declaration order.
    ///
    /// The first item is the route [`RouteTable::match_request`] returns; the
    /// rest are shadowed by it.
    pub fn candidates<'a, 'r>(
        &'a self,
        req: &'r RequestTarget,
    ) -> impl Iterator<Item = RouteMatch<'a>> + 'r
    where
        'a: 'r,
    {
        self.routes.iter().filter_map(move |route| {
            route
                .matcher
                .matches(req)
                .map(|params| RouteMatch { route, params })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::parser::parse_declarations;

    fn table(source: &str) -> RouteTable {
        RouteTable::compile(parse_declarations(source).unwrap(), MatchOptions::default()).unwrap()
    }

    const SITE: &str = "\
get '/blog/{{__id}}', { _controller: 'blog', _action: 'show' }
get '/about', { _action: 'about' }
get '/', {}
";

    #[test]
    fn test_routes_keep_declaration_order() {
        let table = table(SITE);
        let patterns: Vec<_> = table.routes().map(|r| r.pattern.as_str()).collect();
        assert_eq!(patterns, vec!["/blog/{{__id}}", "/about", "/"]);
        let indices: Vec<_> = table.routes().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn test_placeholder_route_wins_over_catch_all() {
        let table = table(SITE);
        let m = table.resolve(Method::Get, "/blog/123").unwrap();
        assert_eq!(m.route.target, Target::new(Some("blog"), Some("show")));
        assert_eq!(m.params.get("__id"), Some("123"));
    }

    #[test]
    fn test_action_only_route() {
        let table = table(SITE);
        let m = table.resolve(Method::Get, "/about").unwrap();
        assert_eq!(m.route.target.action.as_deref(), Some("about"));
        assert_eq!(m.route.target.controller, None);
    }

    #[test]
    fn test_catch_all_takes_the_rest() {
        let table = table(SITE);
        let m = table.resolve(Method::Get, "/blog").unwrap();
        assert!(m.route.pattern.is_catch_all());
        assert!(m.params.is_empty());
    }

    #[test]
    fn test_method_mismatch() {
        let table = table(SITE);
        assert!(table.resolve(Method::Post, "/about").is_none());
        assert!(table.resolve(Method::Head, "/about").is_some());
    }

    #[test]
    fn test_first_match_wins() {
        let table = table(
            "get '/users/new', { _controller: 'users', _action: 'new' }\n\
             get '/users/{{id}}', { _controller: 'users', _action: 'show' }",
        );
        let m = table.resolve(Method::Get, "/users/new").unwrap();
        assert_eq!(m.route.target.action.as_deref(), Some("new"));

        let req = RequestTarget::new(Method::Get, "/users/new");
        let lines: Vec<_> = table.candidates(&req).map(|m| m.route.line).collect();
        assert_eq!(lines, vec![1, 2]);
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = table("# nothing yet\n");
        assert!(table.is_empty());
        assert!(table.resolve(Method::Get, "/").is_none());
    }

    #[test]
    fn test_case_insensitive_table() {
        let declarations = parse_declarations("get '/about', { _action: 'about' }").unwrap();
        let table = RouteTable::compile(
            declarations,
            MatchOptions {
                case_sensitive: false,
            },
        )
        .unwrap();
        assert!(table.resolve(Method::Get, "/ABOUT").is_some());
    }

    #[test]
    fn test_compile_rejects_invalid_table() {
        let declarations = parse_declarations("get '/', {}\nget '/x/{{}}', {}").unwrap();
        let errors = RouteTable::compile(declarations, MatchOptions::default()).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
