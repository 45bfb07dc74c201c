//! Traversals over a finished [`SyntaxTree`].
//!
//! All traversals are pre-order and depth-first, visiting children in the
//! order the grammar produced them. None of them mutate the tree.

use crate::ast::{Node, SyntaxTree};
use std::fmt::{self, Write};

/// Returns the text a node matched. Pure function of the source and span.
pub fn content<'src>(source: &'src str, node: &Node) -> &'src str {
    node.text(source)
}

/// Callback invoked once per node by [`walk`].
pub trait Visitor {
    fn visit(&mut self, source: &str, node: &Node, depth: usize);
}

impl<F> Visitor for F
where
    F: FnMut(&Node, usize),
{
    fn visit(&mut self, _source: &str, node: &Node, depth: usize) {
        self(node, depth)
    }
}

/// Calls `visitor` on the root and then on every descendant.
pub fn walk<V: Visitor + ?Sized>(tree: &SyntaxTree<'_>, visitor: &mut V) {
    walk_node(tree.source, &tree.root, 0, visitor);
}

/// Like [`walk`] but starting from an arbitrary node of a tree over `source`.
pub fn walk_node<V: Visitor + ?Sized>(source: &str, node: &Node, depth: usize, visitor: &mut V) {
    visitor.visit(source, node, depth);
    for child in &node.children {
        walk_node(source, child, depth + 1, visitor);
    }
}

/// Renders one line per node as `<tabs>Kind: 'content'`.
pub struct PrettyPrinter<W: Write> {
    out: W,
}

impl<W: Write> PrettyPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn print(&mut self, source: &str, node: &Node, indentation_level: usize) -> fmt::Result {
        writeln!(
            self.out,
            "{}{}: '{}'",
            "\t".repeat(indentation_level),
            node.kind,
            content(source, node)
        )?;
        for child in &node.children {
            self.print(source, child, indentation_level + 1)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Pretty-prints a whole tree into a `String`.
pub fn pretty_print(tree: &SyntaxTree<'_>) -> String {
    let mut printer = PrettyPrinter::new(String::new());
    // Writing into a String cannot fail.
    let _ = printer.print(tree.source, &tree.root, 0);
    printer.into_inner()
}

impl fmt::Display for SyntaxTree<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        PrettyPrinter::new(f).print(self.source, &self.root, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeKind;
    use crate::parser::parse;

    #[test]
    fn test_pretty_print_layout() {
        let tree = parse("feat(api): add endpoint.").unwrap();
        let expected = "\
CommitMessage: 'feat(api): add endpoint.'
\tTagLine: 'feat(api): add endpoint.'
\t\tType: 'feat(api)'
\t\t\tRawSpan: 'feat'
\t\t\tScope: '(api)'
\t\t\t\tRawSpan: 'api'
\t\tDescription: 'add endpoint.'
\t\t\tRawSpan: 'add endpoint.'
";
        assert_eq!(pretty_print(&tree), expected);
        assert_eq!(tree.to_string(), expected);
    }

    #[test]
    fn test_walker_visits_every_node_in_order() {
        let tree = parse("fix!: x.").unwrap();
        let mut seen = Vec::new();
        walk(&tree, &mut |node: &Node, depth: usize| seen.push((depth, node.kind)));
        let from_iter: Vec<(usize, NodeKind)> = tree.iter().map(|(d, n)| (d, n.kind)).collect();
        assert_eq!(seen, from_iter);
        assert_eq!(seen[0], (0, NodeKind::CommitMessage));
        assert_eq!(seen.len(), 7);
    }

    struct Collect(Vec<String>);

    impl Visitor for Collect {
        fn visit(&mut self, source: &str, node: &Node, _depth: usize) {
            if node.kind == NodeKind::RawSpan {
                self.0.push(content(source, node).to_string());
            }
        }
    }

    #[test]
    fn test_custom_visitor_sees_source() {
        let tree = parse("docs(readme): fix typo.").unwrap();
        let mut collect = Collect(Vec::new());
        walk(&tree, &mut collect);
        assert_eq!(collect.0, vec!["docs", "readme", "fix typo."]);
    }
}
