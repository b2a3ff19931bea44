//! Route declaration parser.
//!
//! Turns route file text into an ordered list of [`RouteDeclaration`]s.
//!
//! ```text
//! # comments start with '#' or '//'
//! get '/blog/{{__id}}', { _controller: 'blog', _action: 'show' }
//! get '/about', { _action: 'about' }
//! get '/', {}
//! ```
//!
//! # Design Decisions
//! - One declaration per line; declaration order is kept exactly
//! - The mapping braces are optional (`get '/about', _action: 'about'`)
//! - Keys other than `_controller` / `_action` become target defaults;
//!   any other `_`-prefixed key is reserved and rejected
//! - Only syntax is checked here; patterns are compiled by the router

use crate::routing::method::Method;
use crate::routing::target::Target;

pub const CONTROLLER_KEY: &str = "_controller";
pub const ACTION_KEY: &str = "_action";

/// A single route as written in the route file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDeclaration {
    /// 1-based line number in the source.
    pub line: usize,
    pub method: Method,
    /// Pattern text, uncompiled.
    pub path: String,
    pub target: Target,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error("expected an HTTP method keyword")]
    ExpectedMethod,
    #[error("unknown method keyword '{0}'")]
    UnknownMethod(String),
    #[error("expected a quoted string")]
    ExpectedString,
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("expected an attribute name")]
    ExpectedKey,
    #[error("expected '{0}'")]
    Expected(char),
    #[error("mapping is missing its closing '}}'")]
    UnterminatedMapping,
    #[error("attribute '{0}' given more than once")]
    DuplicateKey(String),
    #[error("unknown reserved attribute '{0}'")]
    UnknownReservedKey(String),
    #[error("unexpected input '{0}'")]
    TrailingInput(String),
}

/// Syntax error in a route file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub kind: ParseErrorKind,
}

/// Parse a whole route file.
///
/// Stops at the first syntax error.
pub fn parse_declarations(source: &str) -> Result<Vec<RouteDeclaration>, ParseError> {
    let mut declarations = Vec::new();
    for (index, text) in source.lines().enumerate() {
        let mut cursor = Cursor::new(index + 1, text);
        if let Some(declaration) = parse_line(&mut cursor)? {
            declarations.push(declaration);
        }
    }
    tracing::debug!(routes = declarations.len(), "Parsed route declarations");
    Ok(declarations)
}

fn parse_line(cursor: &mut Cursor<'_>) -> Result<Option<RouteDeclaration>, ParseError> {
    cursor.skip_ws();
    if cursor.at_line_end() {
        return Ok(None);
    }

    let method_column = cursor.column();
    let keyword = cursor.ident();
    if keyword.is_empty() {
        return Err(cursor.error(ParseErrorKind::ExpectedMethod));
    }
    let method = Method::from_keyword(keyword).ok_or_else(|| ParseError {
        line: cursor.line,
        column: method_column,
        kind: ParseErrorKind::UnknownMethod(keyword.to_string()),
    })?;

    cursor.skip_ws();
    let path = cursor.string()?;

    cursor.skip_ws();
    if cursor.peek() == Some(',') {
        cursor.bump();
        cursor.skip_ws();
    }

    let mut target = Target::default();
    match cursor.peek() {
        Some('{') => {
            cursor.bump();
            parse_pairs(cursor, true, &mut target)?;
        }
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            parse_pairs(cursor, false, &mut target)?;
        }
        _ => {}
    }

    cursor.skip_ws();
    if cursor.peek() == Some(';') {
        cursor.bump();
        cursor.skip_ws();
    }
    if !cursor.at_line_end() {
        let rest = cursor.rest().to_string();
        return Err(cursor.error(ParseErrorKind::TrailingInput(rest)));
    }

    Ok(Some(RouteDeclaration {
        line: cursor.line,
        method,
        path,
        target,
    }))
}

/// Parse `key: 'value'` pairs, either inside braces or bare to line end.
fn parse_pairs(cursor: &mut Cursor<'_>, braced: bool, target: &mut Target) -> Result<(), ParseError> {
    loop {
        cursor.skip_ws();
        if braced {
            match cursor.peek() {
                Some('}') => {
                    cursor.bump();
                    return Ok(());
                }
                None => return Err(cursor.error(ParseErrorKind::UnterminatedMapping)),
                _ => {}
            }
        } else if cursor.at_line_end() || cursor.peek() == Some(';') {
            return Ok(());
        }

        let key_column = cursor.column();
        let key = cursor.ident();
        if key.is_empty() {
            return Err(cursor.error(ParseErrorKind::ExpectedKey));
        }
        cursor.skip_ws();
        cursor.expect(':')?;
        cursor.skip_ws();
        let value = cursor.string()?;

        insert_attribute(target, key, value).map_err(|kind| ParseError {
            line: cursor.line,
            column: key_column,
            kind,
        })?;

        cursor.skip_ws();
        match cursor.peek() {
            Some(',') => cursor.bump(),
            Some('}') if braced => {}
            None if braced => return Err(cursor.error(ParseErrorKind::UnterminatedMapping)),
            _ if braced => return Err(cursor.error(ParseErrorKind::Expected('}'))),
            _ => return Ok(()),
        }
    }
}

fn insert_attribute(target: &mut Target, key: &str, value: String) -> Result<(), ParseErrorKind> {
    let slot = match key {
        CONTROLLER_KEY => &mut target.controller,
        ACTION_KEY => &mut target.action,
        _ if key.starts_with('_') => {
            return Err(ParseErrorKind::UnknownReservedKey(key.to_string()));
        }
        _ => {
            if target.defaults.contains_key(key) {
                return Err(ParseErrorKind::DuplicateKey(key.to_string()));
            }
            target.defaults.insert(key.to_string(), value);
            return Ok(());
        }
    };

    if slot.is_some() {
        return Err(ParseErrorKind::DuplicateKey(key.to_string()));
    }
    *slot = Some(value);
    Ok(())
}

/// Character cursor over a single line.
struct Cursor<'a> {
    line: usize,
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: usize, src: &'a str) -> Self {
        Self { line, src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += c.len_utf8();
        }
    }

    fn column(&self) -> usize {
        self.src[..self.pos].chars().count() + 1
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    /// End of line, or the start of a trailing comment.
    fn at_line_end(&self) -> bool {
        let rest = self.rest().trim_start();
        rest.is_empty() || rest.starts_with('#') || rest.starts_with("//")
    }

    fn ident(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn expect(&mut self, expected: char) -> Result<(), ParseError> {
        if self.peek() == Some(expected) {
            self.bump();
            Ok(())
        } else {
            Err(self.error(ParseErrorKind::Expected(expected)))
        }
    }

    /// Single- or double-quoted literal. A backslash escapes the next character.
    fn string(&mut self) -> Result<String, ParseError> {
        let quote = match self.peek() {
            Some(q @ ('\'' | '"')) => q,
            _ => return Err(self.error(ParseErrorKind::ExpectedString)),
        };
        let start_column = self.column();
        self.bump();

        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError {
                        line: self.line,
                        column: start_column,
                        kind: ParseErrorKind::UnterminatedString,
                    })
                }
                Some('\\') => {
                    self.bump();
                    if let Some(escaped) = self.peek() {
                        value.push(escaped);
                        self.bump();
                    }
                }
                Some(c) if c == quote => {
                    self.bump();
                    return Ok(value);
                }
                Some(c) => {
                    value.push(c);
                    self.bump();
                }
            }
        }
    }

    fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError {
            line: self.line,
            column: self.column(),
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_braced_mapping() {
        let decls = parse_declarations("get '/blog/{{__id}}', { _controller: 'blog', _action: 'show' }").unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].line, 1);
        assert_eq!(decls[0].method, Method::Get);
        assert_eq!(decls[0].path, "/blog/{{__id}}");
        assert_eq!(decls[0].target, Target::new(Some("blog"), Some("show")));
    }

    #[test]
    fn test_parse_empty_mapping_and_bare_pairs() {
        let source = "get '/about', _action: 'about'\nget \"/\", {}\nget '/contact'";
        let decls = parse_declarations(source).unwrap();
        assert_eq!(decls.len(), 3);
        assert_eq!(decls[0].target, Target::new(None, Some("about")));
        assert_eq!(decls[1].target, Target::default());
        assert_eq!(decls[2].target, Target::default());
        assert_eq!(decls[2].line, 3);
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let source = "# site routes\n\n  // legacy\nget '/a', {} # trailing\npost '/b', { _action: 'b' };\n";
        let decls = parse_declarations(source).unwrap();
        assert_eq!(decls.len(), 2);
        assert_eq!(decls[0].line, 4);
        assert_eq!(decls[1].method, Method::Post);
        assert_eq!(decls[1].line, 5);
    }

    #[test]
    fn test_extra_attributes_become_defaults() {
        let decls = parse_declarations("get '/feed', { _action: 'feed', format: 'rss' }").unwrap();
        assert_eq!(decls[0].target.defaults.get("format").map(String::as_str), Some("rss"));
    }

    #[test]
    fn test_escaped_quotes() {
        let decls = parse_declarations(r"get '/it\'s', {}").unwrap();
        assert_eq!(decls[0].path, "/it's");
    }

    #[test]
    fn test_unknown_method() {
        let err = parse_declarations("\nfetch '/x', {}").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 1);
        assert_eq!(err.kind, ParseErrorKind::UnknownMethod("fetch".into()));
    }

    #[test]
    fn test_missing_string() {
        let err = parse_declarations("get /about").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ExpectedString);
        assert_eq!(err.column, 5);
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse_declarations("get '/about, {}").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedString);
        assert_eq!(err.column, 5);
    }

    #[test]
    fn test_unterminated_mapping() {
        let err = parse_declarations("get '/about', { _action: 'about'").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedMapping);
        assert_eq!(err.kind.to_string(), "mapping is missing its closing '}'");
    }

    #[test]
    fn test_duplicate_and_reserved_keys() {
        let err = parse_declarations("get '/a', { _action: 'x', _action: 'y' }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::DuplicateKey("_action".into()));

        let err = parse_declarations("get '/a', { _format: 'json' }").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownReservedKey("_format".into()));
        assert_eq!(err.kind.to_string(), "unknown reserved attribute '_format'");
    }

    #[test]
    fn test_trailing_input() {
        let err = parse_declarations("get '/a', {} extra").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::TrailingInput("extra".into()));
    }

    #[test]
    fn test_error_message_names_line() {
        let err = parse_declarations("get '/a', { _action 'x' }").unwrap_err();
        assert_eq!(err.to_string(), "line 1, column 21: expected ':'");
    }
}
