//! Path patterns.
//!
//! # Syntax
//! - `/` alone is the catch-all pattern and matches every path
//! - Literal segments match byte-for-byte (or ASCII case-insensitively)
//! - `{{name}}` is a placeholder and captures exactly one non-empty segment
//!
//! # Design Decisions
//! - A placeholder occupies a whole segment (`/post-{{id}}` is rejected)
//! - Placeholder names follow identifier rules: `[A-Za-z_][A-Za-z0-9_]*`
//! - No regex: matching is a single pass over the segments

use std::fmt;

use serde::Serialize;

/// Errors raised while compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("pattern must start with '/'")]
    MissingLeadingSlash,

    #[error("pattern contains an empty segment")]
    EmptySegment,

    #[error("placeholder in segment '{0}' has no name")]
    EmptyPlaceholder(String),

    #[error("invalid placeholder name '{0}'")]
    InvalidPlaceholderName(String),

    #[error("placeholder '{0}' is declared more than once")]
    DuplicatePlaceholder(String),

    #[error("unbalanced braces in segment '{0}'")]
    UnbalancedBraces(String),
}

/// One compiled segment of a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// Matching switches applied to every pattern of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    /// Compare literal segments case-sensitively.
    pub case_sensitive: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: true,
        }
    }
}

/// Values captured by placeholders, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn extend(&mut self, other: Params) {
        self.0.extend(other.0);
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    source: String,
    segments: Vec<Segment>,
    catch_all: bool,
}

impl PathPattern {
    /// Compile a pattern string.
    pub fn parse(source: &str) -> Result<Self, PatternError> {
        let rest = source
            .strip_prefix('/')
            .ok_or(PatternError::MissingLeadingSlash)?;

        if rest.is_empty() {
            return Ok(Self {
                source: source.to_string(),
                segments: Vec::new(),
                catch_all: true,
            });
        }

        // A single trailing slash is tolerated: `/about/` compiles like `/about`.
        let rest = rest.strip_suffix('/').unwrap_or(rest);

        let mut segments = Vec::new();
        for raw in rest.split('/') {
            let segment = classify_segment(raw)?;
            if let Segment::Placeholder(name) = &segment {
                let seen = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Placeholder(n) if n == name));
                if seen {
                    return Err(PatternError::DuplicatePlaceholder(name.clone()));
                }
            }
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
            catch_all: false,
        })
    }

    /// Match a normalized request path against this pattern.
    ///
    /// Returns the captured placeholder values when the path matches.
    pub fn matches(&self, path: &str, options: &MatchOptions) -> Option<Params> {
        if self.catch_all {
            return Some(Params::default());
        }

        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let mut captured = Vec::new();

        for segment in &self.segments {
            let part = parts.next()?;
            match segment {
                Segment::Literal(literal) => {
                    let equal = if options.case_sensitive {
                        literal == part
                    } else {
                        literal.eq_ignore_ascii_case(part)
                    };
                    if !equal {
                        return None;
                    }
                }
                Segment::Placeholder(name) => captured.push((name.clone(), part.to_string())),
            }
        }

        // Leftover path segments mean the path is longer than the pattern.
        if parts.next().is_some() {
            return None;
        }

        Some(Params(captured))
    }

    /// Returns true for the catch-all pattern `/`.
    pub fn is_catch_all(&self) -> bool {
        self.catch_all
    }

    /// Placeholder names in pattern order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The pattern exactly as declared.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Classify one raw segment of a pattern.
fn classify_segment(raw: &str) -> Result<Segment, PatternError> {
    if raw.is_empty() {
        return Err(PatternError::EmptySegment);
    }

    if let Some(inner) = raw.strip_prefix("{{").and_then(|s| s.strip_suffix("}}")) {
        let name = inner.trim();
        if name.is_empty() {
            return Err(PatternError::EmptyPlaceholder(raw.to_string()));
        }
        if name.contains('{') || name.contains('}') {
            return Err(PatternError::UnbalancedBraces(raw.to_string()));
        }
        if !is_identifier(name) {
            return Err(PatternError::InvalidPlaceholderName(name.to_string()));
        }
        return Ok(Segment::Placeholder(name.to_string()));
    }

    if raw.contains("{{") || raw.contains("}}") {
        return Err(PatternError::UnbalancedBraces(raw.to_string()));
    }

    Ok(Segment::Literal(raw.to_string()))
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> MatchOptions {
        MatchOptions::default()
    }

    #[test]
    fn test_root_is_catch_all() {
        let pattern = PathPattern::parse("/").unwrap();
        assert!(pattern.is_catch_all());
        assert!(pattern.matches("/", &opts()).is_some());
        assert!(pattern.matches("/anything/at/all", &opts()).is_some());
    }

    #[test]
    fn test_literal_segments() {
        let pattern = PathPattern::parse("/about").unwrap();
        assert!(!pattern.is_catch_all());
        assert_eq!(pattern.segments(), &[Segment::Literal("about".into())]);
        assert!(pattern.matches("/about", &opts()).is_some());
        assert!(pattern.matches("/about/team", &opts()).is_none());
        assert!(pattern.matches("/", &opts()).is_none());
        assert!(pattern.matches("/About", &opts()).is_none());
    }

    #[test]
    fn test_case_insensitive_literals() {
        let pattern = PathPattern::parse("/about").unwrap();
        let options = MatchOptions {
            case_sensitive: false,
        };
        assert!(pattern.matches("/ABOUT", &options).is_some());
    }

    #[test]
    fn test_placeholder_capture() {
        let pattern = PathPattern::parse("/blog/{{__id}}").unwrap();
        assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec!["__id"]);

        let params = pattern.matches("/blog/123", &opts()).unwrap();
        assert_eq!(params.get("__id"), Some("123"));
        assert_eq!(params.len(), 1);

        assert!(pattern.matches("/blog", &opts()).is_none());
        assert!(pattern.matches("/blog/123/comments", &opts()).is_none());
    }

    #[test]
    fn test_params_keep_pattern_order() {
        let pattern = PathPattern::parse("/users/{{user}}/posts/{{post}}").unwrap();
        let params = pattern.matches("/users/7/posts/42", &opts()).unwrap();
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("user", "7"), ("post", "42")]);
    }

    #[test]
    fn test_placeholder_whitespace_is_trimmed() {
        let pattern = PathPattern::parse("/blog/{{ slug }}").unwrap();
        assert_eq!(pattern.placeholders().collect::<Vec<_>>(), vec!["slug"]);
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        let pattern = PathPattern::parse("/about/").unwrap();
        assert!(pattern.matches("/about", &opts()).is_some());
        assert_eq!(pattern.as_str(), "/about/");
    }

    #[test]
    fn test_rejects_malformed_patterns() {
        assert_eq!(
            PathPattern::parse("about"),
            Err(PatternError::MissingLeadingSlash)
        );
        assert_eq!(
            PathPattern::parse("/blog//x"),
            Err(PatternError::EmptySegment)
        );
        assert_eq!(
            PathPattern::parse("/blog/{{}}"),
            Err(PatternError::EmptyPlaceholder("{{}}".into()))
        );
        assert_eq!(
            PathPattern::parse("/blog/{{1id}}"),
            Err(PatternError::InvalidPlaceholderName("1id".into()))
        );
        assert_eq!(
            PathPattern::parse("/blog/{{id}"),
            Err(PatternError::UnbalancedBraces("{{id}".into()))
        );
        assert_eq!(
            PathPattern::parse("/post-{{id}}"),
            Err(PatternError::UnbalancedBraces("post-{{id}}".into()))
        );
        assert_eq!(
            PathPattern::parse("/{{id}}/{{id}}"),
            Err(PatternError::DuplicatePlaceholder("id".into()))
        );
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("__id"));
        assert!(is_identifier("slug2"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("2slug"));
        assert!(!is_identifier("my-slug"));
    }
}
