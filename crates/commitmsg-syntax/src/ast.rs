use crate::error::Span;
use serde::Serialize;
use smallvec::SmallVec;
use std::fmt;

/// Grammar symbol a [`Node`] was produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeKind {
    CommitMessage,
    TagLine,
    Type,
    Scope,
    Description,
    BreakingChangeMarker,
    Ellipsis,
    /// A bare word or sentence with no further structure.
    RawSpan,
    Body,
    Paragraph,
    Footer,
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::CommitMessage => "CommitMessage",
            NodeKind::TagLine => "TagLine",
            NodeKind::Type => "Type",
            NodeKind::Scope => "Scope",
            NodeKind::Description => "Description",
            NodeKind::BreakingChangeMarker => "BreakingChangeMarker",
            NodeKind::Ellipsis => "Ellipsis",
            NodeKind::RawSpan => "RawSpan",
            NodeKind::Body => "Body",
            NodeKind::Paragraph => "Paragraph",
            NodeKind::Footer => "Footer",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One matched grammar symbol.
///
/// Nodes never hold text. The matched substring is recovered from the
/// source through [`Node::text`], so every node of a tree shares the one
/// input string. Only children that matched are stored; an optional element
/// that did not match leaves no entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind, span: Span, children: Vec<Node>) -> Self {
        Self { kind, span, children }
    }

    pub fn leaf(kind: NodeKind, span: Span) -> Self {
        Self { kind, span, children: Vec::new() }
    }

    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.span.start..self.span.end]
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// First direct child of the given kind.
    pub fn child(&self, kind: NodeKind) -> Option<&Node> {
        self.children.iter().find(|c| c.kind == kind)
    }

    pub fn children_of(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.children.iter().filter(move |c| c.kind == kind)
    }

    /// Pre-order, depth-first iteration over this node and its descendants.
    pub fn descendants(&self) -> Descendants<'_> {
        let mut stack = SmallVec::new();
        stack.push((0, self));
        Descendants { stack }
    }
}

/// Iterator returned by [`Node::descendants`], yielding `(depth, node)`.
pub struct Descendants<'a> {
    stack: SmallVec<[(usize, &'a Node); 8]>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = (usize, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        for child in node.children.iter().rev() {
            self.stack.push((depth + 1, child));
        }
        Some((depth, node))
    }
}

/// A parsed commit message: the root node plus the text it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxTree<'src> {
    pub source: &'src str,
    pub root: Node,
}

impl<'src> SyntaxTree<'src> {
    pub fn new(source: &'src str, root: Node) -> Self {
        Self { source, root }
    }

    pub fn text(&self, node: &Node) -> &'src str {
        node.text(self.source)
    }

    pub fn iter(&self) -> Descendants<'_> {
        self.root.descendants()
    }

    pub fn tag_line(&self) -> Option<&Node> {
        self.root.child(NodeKind::TagLine)
    }

    fn type_node(&self) -> Option<&Node> {
        self.tag_line()?.child(NodeKind::Type)
    }

    /// The commit type word, e.g. `feat`.
    pub fn commit_type(&self) -> Option<&'src str> {
        let word = self.type_node()?.child(NodeKind::RawSpan)?;
        Some(self.text(word))
    }

    /// The scope name without its parentheses.
    pub fn scope(&self) -> Option<&'src str> {
        let name = self.type_node()?.child(NodeKind::Scope)?.child(NodeKind::RawSpan)?;
        Some(self.text(name))
    }

    /// True when the type carries `!` or a footer opens with `BREAKING CHANGE: `.
    pub fn is_breaking(&self) -> bool {
        let marked = self
            .type_node()
            .and_then(|t| t.child(NodeKind::BreakingChangeMarker))
            .is_some();
        let footer = self
            .footer()
            .and_then(|f| f.child(NodeKind::BreakingChangeMarker))
            .is_some();
        marked || footer
    }

    pub fn description(&self) -> Option<&'src str> {
        let description = self.tag_line()?.child(NodeKind::Description)?;
        Some(self.text(description))
    }

    pub fn has_ellipsis(&self) -> bool {
        self.tag_line()
            .and_then(|t| t.child(NodeKind::Ellipsis))
            .is_some()
    }

    pub fn body(&self) -> Option<&Node> {
        self.root.child(NodeKind::Body)
    }

    pub fn footer(&self) -> Option<&Node> {
        self.root.child(NodeKind::Footer)
    }
}
