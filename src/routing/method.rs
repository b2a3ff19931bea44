//! HTTP methods named by route declarations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Method a route is declared for.
///
/// The declaration keyword is lower-case (`get`, `post`, ...). `any` declares
/// a route that accepts every request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Any,
}

impl Method {
    /// Every concrete request method (everything except `Any`).
    pub const REQUEST_METHODS: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];

    /// Map a declaration keyword to a method.
    ///
    /// Keywords are matched exactly; `GET` is not a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "get" => Some(Method::Get),
            "post" => Some(Method::Post),
            "put" => Some(Method::Put),
            "patch" => Some(Method::Patch),
            "delete" => Some(Method::Delete),
            "head" => Some(Method::Head),
            "options" => Some(Method::Options),
            "any" => Some(Method::Any),
            _ => None,
        }
    }

    /// Returns true if a route declared with `self` accepts a request made
    /// with `request`.
    ///
    /// `get` routes also serve `HEAD` requests.
    pub fn accepts(self, request: Method) -> bool {
        match (self, request) {
            (Method::Any, _) => true,
            (Method::Get, Method::Head) => true,
            (declared, request) => declared == request,
        }
    }

    /// Returns true if some request method is accepted by both `self` and
    /// `other`.
    pub fn overlaps(self, other: Method) -> bool {
        Method::REQUEST_METHODS
            .iter()
            .any(|&m| self.accepts(m) && other.accepts(m))
    }

    /// Returns true if every request method `other` accepts is also accepted
    /// by `self`, so a route declared with `other` after one declared with
    /// `self` on the same path can never be reached.
    pub fn covers(self, other: Method) -> bool {
        Method::REQUEST_METHODS
            .iter()
            .all(|&m| !other.accepts(m) || self.accepts(m))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Any => "ANY",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an HTTP method token that is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown HTTP method: {0}")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    /// Parse an HTTP method token, case-insensitively.
    ///
    /// `ANY` is a declaration keyword, not a request method, and is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Method::from_keyword(&s.to_ascii_lowercase()) {
            Some(Method::Any) | None => Err(UnknownMethod(s.to_string())),
            Some(method) => Ok(method),
        }
    }
}
