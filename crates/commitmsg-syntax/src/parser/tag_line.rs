use super::Parser;
use crate::ast::{Node, NodeKind};
use crate::error::ContextParseError;

impl<'src> Parser<'src> {
    /// `TagLine := Type ": " Description [ " " Ellipsis ]`
    pub(super) fn parse_tag_line(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::TagLine, |p| {
            let ty = p.parse_type()?;
            p.gobble_string(": ").map_err(|e| e.in_rule(NodeKind::TagLine))?;
            let description = p.parse_description()?;
            let ellipsis = p.optional(|p| {
                p.gobble_string(" ").map_err(|e| e.in_rule(NodeKind::TagLine))?;
                p.parse_ellipsis()
            });

            let mut children = vec![ty, description];
            children.extend(ellipsis);
            Ok(children)
        })
    }

    /// `Type := Word [ Scope ] [ BreakingChangeMarker ]`
    ///
    /// Scope is tried before the marker; each is independently optional.
    pub(super) fn parse_type(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Type, |p| {
            let word = p.gobble_word().map_err(|e| e.in_rule(NodeKind::Type))?;
            let scope = p.optional(Self::parse_scope);
            let marker = p.optional(Self::parse_breaking_change_marker);

            let mut children = vec![Node::leaf(NodeKind::RawSpan, word)];
            children.extend(scope);
            children.extend(marker);
            Ok(children)
        })
    }

    /// `Scope := "(" Word ")"`
    pub(super) fn parse_scope(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Scope, |p| {
            p.gobble_string("(").map_err(|e| e.in_rule(NodeKind::Scope))?;
            let name = p.gobble_word().map_err(|e| e.in_rule(NodeKind::Scope))?;
            p.gobble_string(")").map_err(|e| e.in_rule(NodeKind::Scope))?;
            Ok(vec![Node::leaf(NodeKind::RawSpan, name)])
        })
    }

    pub(super) fn parse_breaking_change_marker(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::BreakingChangeMarker, |p| {
            p.gobble_string("!")
                .map_err(|e| e.in_rule(NodeKind::BreakingChangeMarker))?;
            Ok(Vec::new())
        })
    }

    pub(super) fn parse_ellipsis(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Ellipsis, |p| {
            p.gobble_string("...").map_err(|e| e.in_rule(NodeKind::Ellipsis))?;
            Ok(Vec::new())
        })
    }

    /// `Description := Sentence`
    pub(super) fn parse_description(&mut self) -> Result<Node, ContextParseError> {
        self.rule(NodeKind::Description, |p| {
            let sentence = p.parse_sentence(NodeKind::Description)?;
            Ok(vec![sentence])
        })
    }

    /// A sentence leaf; failures are reported against `within`.
    pub(super) fn parse_sentence(&mut self, within: NodeKind) -> Result<Node, ContextParseError> {
        let span = self.gobble_sentence().map_err(|e| e.in_rule(within))?;
        Ok(Node::leaf(NodeKind::RawSpan, span))
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::NodeKind;
    use crate::error::Span;
    use crate::parser::{ParseOptions, Parser};

    #[test]
    fn test_type_with_scope_and_marker() {
        let mut parser = Parser::new("fix(parser)!", ParseOptions::default());
        let ty = parser.parse_type().unwrap();
        let kinds: Vec<NodeKind> = ty.children.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![NodeKind::RawSpan, NodeKind::Scope, NodeKind::BreakingChangeMarker]
        );
        assert_eq!(ty.span, Span::new(0, 12));
    }

    #[test]
    fn test_marker_without_scope() {
        let mut parser = Parser::new("feat!", ParseOptions::default());
        let ty = parser.parse_type().unwrap();
        assert_eq!(ty.children.len(), 2);
        assert_eq!(ty.children[1].kind, NodeKind::BreakingChangeMarker);
        assert_eq!(ty.children[1].span, Span::new(4, 5));
    }

    #[test]
    fn test_unclosed_scope_is_absent() {
        let mut parser = Parser::new("feat(api: x.", ParseOptions::default());
        let ty = parser.parse_type().unwrap();
        assert_eq!(ty.children.len(), 1);
        assert_eq!(parser.cursor.position(), 4);
    }

    #[test]
    fn test_scope_failure_context() {
        let mut parser = Parser::new("(api", ParseOptions::default());
        let err = parser.parse_scope().unwrap_err();
        assert_eq!(err.kind, NodeKind::Scope);
        assert_eq!(err.expected(), ")");
        assert_eq!(err.position(), 4);
        assert_eq!(parser.cursor.position(), 0);
    }

    #[test]
    fn test_tag_line_with_ellipsis() {
        let mut parser = Parser::new("feat: add thing. ...", ParseOptions::default());
        let tag_line = parser.parse_tag_line().unwrap();
        assert_eq!(tag_line.children.len(), 3);
        assert_eq!(tag_line.children[2].kind, NodeKind::Ellipsis);
        assert_eq!(tag_line.children[2].span, Span::new(17, 20));
    }

    #[test]
    fn test_tag_line_partial_ellipsis_is_not_consumed() {
        let mut parser = Parser::new("feat: add thing. ..", ParseOptions::default());
        let tag_line = parser.parse_tag_line().unwrap();
        assert_eq!(tag_line.children.len(), 2);
        assert_eq!(parser.cursor.position(), 16);
    }
}
