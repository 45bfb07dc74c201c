use super::{Parser, is_inline_space};
use crate::ast::{Node, NodeKind};
use crate::error::{ContextParseError, ParseError};

const BREAKING_CHANGE_TAG: &str = "BREAKING CHANGE: ";

impl<'src> Parser<'src> {
    /// `CommitMessage := TagLine [ "\n" Body ] [ "\n" Footer ]`, followed by
    /// the end of input. Body and footer are only tried with
    /// [`ParseOptions::full_grammar`](super::ParseOptions).
    pub(super) fn parse_commit_message(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::CommitMessage, |p| {
            let tag_line = p.parse_tag_line()?;
            let mut children = vec![tag_line];

            if p.options.full_grammar {
                let body = p.optional(|p| {
                    p.gobble_string("\n")
                        .map_err(|e| e.in_rule(NodeKind::CommitMessage))?;
                    p.parse_body()
                });
                let footer = p.optional(|p| {
                    p.gobble_string("\n")
                        .map_err(|e| e.in_rule(NodeKind::CommitMessage))?;
                    p.parse_footer()
                });
                children.extend(body);
                children.extend(footer);
            }

            p.expect_end().map_err(|e| e.in_rule(NodeKind::CommitMessage))?;
            Ok(children)
        })
    }

    /// `Body := "\n" Paragraph { "\n\n" Paragraph }`
    pub(super) fn parse_body(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Body, |p| {
            p.gobble_string("\n").map_err(|e| e.in_rule(NodeKind::Body))?;
            let mut paragraphs = vec![p.parse_paragraph()?];
            paragraphs.extend(p.many0(|p| {
                p.gobble_string("\n\n").map_err(|e| e.in_rule(NodeKind::Body))?;
                p.parse_paragraph()
            }));
            Ok(paragraphs)
        })
    }

    /// `Paragraph := Sentence { (" " | "\n") Sentence }`
    pub(super) fn parse_paragraph(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Paragraph, |p| {
            let mut first = true;
            p.many1(|p| {
                if !first {
                    p.gobble_sentence_separator()
                        .map_err(|e| e.in_rule(NodeKind::Paragraph))?;
                }
                let sentence = p.parse_sentence(NodeKind::Paragraph)?;
                first = false;
                Ok::<_, ContextParseError>(sentence)
            })
        })
    }

    /// `Footer := "\n" BreakingChangeTag Paragraph { "\n\n" [ BreakingChangeTag ] Paragraph }`
    ///
    /// The leading tag keeps a footer distinguishable from a body paragraph.
    pub(super) fn parse_footer(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Footer, |p| {
            p.gobble_string("\n").map_err(|e| e.in_rule(NodeKind::Footer))?;
            let mut children = vec![p.parse_breaking_change_tag()?, p.parse_paragraph()?];
            for entry in p.many0(|p| {
                p.gobble_string("\n\n").map_err(|e| e.in_rule(NodeKind::Footer))?;
                let tag = p.optional(Self::parse_breaking_change_tag);
                let paragraph = p.parse_paragraph()?;
                Ok::<_, ContextParseError>((tag, paragraph))
            }) {
                let (tag, paragraph) = entry;
                children.extend(tag);
                children.push(paragraph);
            }
            Ok(children)
        })
    }

    fn parse_breaking_change_tag(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::BreakingChangeMarker, |p| {
            p.gobble_string(BREAKING_CHANGE_TAG)
                .map_err(|e| e.in_rule(NodeKind::BreakingChangeMarker))?;
            Ok(Vec::new())
        })
    }

    /// A single newline or a run of inline whitespace between sentences.
    fn gobble_sentence_separator(&mut self) -> Result<(), ParseError> {
        if self.cursor.current() == Some('\n') {
            self.cursor.advance();
            return Ok(());
        }
        if self.cursor.eat_while(is_inline_space) == 0 {
            return Err(self.error(" ", self.cursor.position()));
        }
        Ok(())
    }
}
