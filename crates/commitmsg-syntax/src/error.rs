use crate::ast::NodeKind;
use serde::Serialize;
use std::fmt;

/// Half-open `[start, end)` byte range into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {} past end {}", start, end);
        Self { start, end }
    }

    /// Zero-length span at `offset`.
    pub fn at(offset: usize) -> Self {
        Self { start: offset, end: offset }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// 1-based line and column of the span start.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let before = &source[..self.start.min(source.len())];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let col = before[line_start..].chars().count() + 1;
        (line, col)
    }
}

/// A required literal or character class did not match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What the grammar required at `position`.
    pub expected: String,
    /// Offset at which matching failed.
    pub position: usize,
    /// The text consumed before `position`.
    pub context: String,
}

impl ParseError {
    pub fn new(expected: impl Into<String>, position: usize, source: &str) -> Self {
        Self {
            expected: expected.into(),
            position,
            context: source[..position].to_string(),
        }
    }

    /// Attaches the grammar rule that was being attempted.
    pub fn in_rule(self, kind: NodeKind) -> ContextParseError {
        ContextParseError { error: self, kind }
    }

    pub fn span(&self) -> Span {
        Span::at(self.position)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Expected: '{}' while parsing: '{}'",
            self.expected.replace('\n', "\\n"),
            self.context
        )
    }
}

impl std::error::Error for ParseError {}

/// A [`ParseError`] tagged with the grammar rule active when it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextParseError {
    pub error: ParseError,
    pub kind: NodeKind,
}

impl ContextParseError {
    pub fn expected(&self) -> &str {
        &self.error.expected
    }

    pub fn position(&self) -> usize {
        self.error.position
    }

    pub fn context(&self) -> &str {
        &self.error.context
    }

    pub fn span(&self) -> Span {
        self.error.span()
    }
}

impl fmt::Display for ContextParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.error)
    }
}

impl std::error::Error for ContextParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_rendering() {
        let err = ParseError::new(": ", 3, "fix parser").in_rule(NodeKind::TagLine);
        assert_eq!(err.to_string(), "TagLine Expected: ': ' while parsing: 'fix'");
    }

    #[test]
    fn test_newline_is_escaped() {
        let err = ParseError::new("\n", 0, "");
        assert_eq!(err.to_string(), "Expected: '\\n' while parsing: ''");
    }

    #[test]
    fn test_line_col() {
        let source = "feat: a.\n\nbody";
        assert_eq!(Span::at(0).line_col(source), (1, 1));
        assert_eq!(Span::at(6).line_col(source), (1, 7));
        assert_eq!(Span::at(10).line_col(source), (3, 1));
    }
}
