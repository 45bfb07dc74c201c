mod message;
mod tag_line;

use crate::ast::{Node, NodeKind, SyntaxTree};
use crate::cursor::Cursor;
use crate::error::{ContextParseError, ParseError, Span};
use std::fmt;
use tracing::{debug, trace};

/// Switches for grammar extensions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Attempt the body and footer after the tag line.
    pub full_grammar: bool,
}

impl ParseOptions {
    pub fn full() -> Self {
        Self { full_grammar: true }
    }
}

/// Recursive-descent parser with backtracking over a commit message.
///
/// Every grammar rule either returns its finished [`Node`] or restores the
/// cursor to where the rule started and returns the error. Optionality and
/// repetition are expressed only through [`Parser::optional`],
/// [`Parser::many0`] and [`Parser::many1`], which are the only places a
/// failure is absorbed.
pub struct Parser<'src> {
    pub(super) cursor: Cursor<'src>,
    pub(super) options: ParseOptions,
}

#[inline]
pub(super) fn is_word_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

#[inline]
pub(super) fn is_inline_space(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            options,
        }
    }

    #[inline]
    pub(super) fn error(&self, expected: &str, position: usize) -> ParseError {
        ParseError::new(expected, position, self.cursor.source())
    }

    /// Runs `body` as the production of `kind`. On success the node spans
    /// everything `body` consumed; on failure the cursor goes back to the
    /// rule start.
    pub(super) fn rule(
        &mut self,
        kind: NodeKind,
        body: impl FnOnce(&mut Self) -> Result<Vec<Node>, ContextParseError>,
    ) -> Result<Node, ContextParseError> {
        let start = self.cursor.mark();
        match body(self) {
            Ok(children) => Ok(Node::new(kind, Span::new(start, self.cursor.position()), children)),
            Err(err) => {
                self.cursor.restore(start);
                Err(err)
            }
        }
    }

    /// Matches `literal` character by character. The cursor is left at the
    /// first mismatch; the error cites the offset before the attempt.
    pub(super) fn gobble_string(&mut self, literal: &str) -> Result<(), ParseError> {
        let start = self.cursor.mark();
        for expected in literal.chars() {
            if self.cursor.current() != Some(expected) {
                return Err(self.error(literal, start));
            }
            self.cursor.advance();
        }
        Ok(())
    }

    /// Maximal run of `[a-zA-Z0-9]`, at least one character.
    pub(super) fn gobble_word(&mut self) -> Result<Span, ParseError> {
        let start = self.cursor.mark();
        if self.cursor.eat_while(is_word_char) == 0 {
            return Err(self.error("word", start));
        }
        Ok(Span::new(start, self.cursor.position()))
    }

    /// A word, then the maximal run of words and inline whitespace, then `.`.
    /// Without the terminating `.` nothing is consumed.
    pub(super) fn gobble_sentence(&mut self) -> Result<Span, ParseError> {
        let start = self.cursor.mark();
        self.gobble_word()?;
        self.cursor.eat_while(|c| is_word_char(c) || is_inline_space(c));
        if let Err(err) = self.gobble_string(".") {
            self.cursor.restore(start);
            return Err(err);
        }
        Ok(Span::new(start, self.cursor.position()))
    }

    pub(super) fn expect_end(&self) -> Result<(), ParseError> {
        if self.cursor.is_at_end() {
            Ok(())
        } else {
            Err(self.error("end of input", self.cursor.position()))
        }
    }

    /// Applies `rule`; on failure rolls back and reports absence.
    pub(super) fn optional<T, E: fmt::Display>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Option<T> {
        let mark = self.cursor.mark();
        match rule(self) {
            Ok(value) => Some(value),
            Err(err) => {
                trace!(from = self.cursor.position(), to = mark, %err, "backtracking");
                self.cursor.restore(mark);
                None
            }
        }
    }

    /// Zero or more applications of `rule`, stopping at the first failure.
    pub(super) fn many0<T, E: fmt::Display>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> Result<T, E>,
    ) -> Vec<T> {
        let mut items = Vec::new();
        loop {
            let before = self.cursor.mark();
            match self.optional(&mut rule) {
                Some(item) => items.push(item),
                None => break,
            }
            if self.cursor.position() == before {
                break;
            }
        }
        items
    }

    /// One or more applications of `rule`; fails with the first attempt's error.
    pub(super) fn many1<T, E: fmt::Display>(
        &mut self,
        mut rule: impl FnMut(&mut Self) -> Result<T, E>,
    ) -> Result<Vec<T>, E> {
        let mark = self.cursor.mark();
        let first = match rule(self) {
            Ok(first) => first,
            Err(err) => {
                self.cursor.restore(mark);
                return Err(err);
            }
        };
        let mut items = vec![first];
        if self.cursor.position() != mark {
            items.extend(self.many0(rule));
        }
        Ok(items)
    }
}

/// Parses a commit message tag line into a [`SyntaxTree`].
///
/// Body and footer are not attempted; see [`parse_with`].
pub fn parse(source: &str) -> Result<SyntaxTree<'_>, ContextParseError> {
    parse_with(source, ParseOptions::default())
}

/// Parses `source` with the given options. Either the whole input matches
/// or the first failure is returned; no partial tree is produced.
pub fn parse_with(source: &str, options: ParseOptions) -> Result<SyntaxTree<'_>, ContextParseError> {
    debug!(len = source.len(), full_grammar = options.full_grammar, "parsing commit message");
    let mut parser = Parser::new(source, options);
    let root = parser
        .parse_commit_message()
        .inspect_err(|err| debug!(position = err.position(), kind = %err.kind, "parse failed"))?;
    debug!(nodes = root.descendants().count(), "parsed commit message");
    Ok(SyntaxTree::new(source, root))
}
