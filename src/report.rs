//! Printable views of routes and lookups.
//!
//! Each view serializes to JSON for `--json` output and renders as plain
//! text otherwise.

use std::fmt;

use serde::Serialize;

use crate::config::ValidationError;
use crate::routing::{Method, Params, ResolvedTarget, Route, RouteMatch, Target, TargetDefaults};

/// One row of `list` output.
#[derive(Debug, Serialize)]
pub struct RouteView<'a> {
    pub index: usize,
    pub line: usize,
    pub method: Method,
    pub pattern: &'a str,
    pub catch_all: bool,
    pub target: &'a Target,
}

impl<'a> From<&'a Route> for RouteView<'a> {
    fn from(route: &'a Route) -> Self {
        Self {
            index: route.index,
            line: route.line,
            method: route.method,
            pattern: route.pattern.as_str(),
            catch_all: route.pattern.is_catch_all(),
            target: &route.target,
        }
    }
}

impl fmt::Display for RouteView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>4}  {:<7} {:<32} {}",
            self.line,
            self.method.as_str(),
            self.pattern,
            self.target.label()
        )?;
        if self.catch_all {
            write!(f, "  (catch-all)")?;
        }
        Ok(())
    }
}

/// Result of `resolve`.
#[derive(Debug, Serialize)]
pub struct MatchView<'a> {
    pub route: RouteView<'a>,
    pub params: &'a Params,
    pub resolved: ResolvedTarget,
    /// Lines of later routes that would also have matched.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub shadowed: Vec<usize>,
}

impl<'a> MatchView<'a> {
    pub fn new(found: &'a RouteMatch<'a>, defaults: &TargetDefaults, shadowed: Vec<usize>) -> Self {
        Self {
            route: RouteView::from(found.route),
            params: &found.params,
            resolved: found.route.target.resolve(defaults),
            shadowed,
        }
    }
}

impl fmt::Display for MatchView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "matched line {}: {} {}",
            self.route.line,
            self.route.method.as_str(),
            self.route.pattern
        )?;
        write!(
            f,
            "target: {}.{}",
            self.resolved.controller, self.resolved.action
        )?;
        if self.route.target.controller.is_none() || self.route.target.action.is_none() {
            write!(f, " (declared {})", self.route.target.label())?;
        }
        for (name, value) in self.params.iter() {
            write!(f, "\nparam {} = {}", name, value)?;
        }
        for (name, value) in &self.route.target.defaults {
            write!(f, "\ndefault {} = {}", name, value)?;
        }
        if !self.shadowed.is_empty() {
            let lines: Vec<_> = self.shadowed.iter().map(|l| l.to_string()).collect();
            write!(f, "\nalso matches lines {}", lines.join(", "))?;
        }
        Ok(())
    }
}

/// A route table that loaded cleanly, as reported by `check` and `watch`.
#[derive(Debug, Serialize)]
pub struct LoadedView {
    pub ok: bool,
    pub routes: usize,
}

impl LoadedView {
    pub fn new(routes: usize) -> Self {
        Self { ok: true, routes }
    }
}

impl fmt::Display for LoadedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ok: {} routes", self.routes)
    }
}

/// `check` failure output.
#[derive(Debug, Serialize)]
pub struct ErrorView {
    pub errors: Vec<String>,
}

impl ErrorView {
    pub fn from_validation(errors: &[ValidationError]) -> Self {
        Self {
            errors: errors.iter().map(ToString::to_string).collect(),
        }
    }
}
