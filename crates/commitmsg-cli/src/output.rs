use crate::config::OutputFormat;
use anyhow::Result;
use colored::*;
use commitmsg::{Node, NodeKind, SyntaxTree, pretty_print};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct JsonNode<'a> {
    kind: NodeKind,
    start: usize,
    end: usize,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<JsonNode<'a>>,
}

impl<'a> JsonNode<'a> {
    fn from_node(source: &'a str, node: &Node) -> Self {
        Self {
            kind: node.kind,
            start: node.span.start,
            end: node.span.end,
            text: node.text(source),
            children: node
                .children
                .iter()
                .map(|child| JsonNode::from_node(source, child))
                .collect(),
        }
    }
}

pub fn render(tree: &SyntaxTree<'_>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Tree => Ok(pretty_print(tree)),
        OutputFormat::Json => {
            let json = JsonNode::from_node(tree.source, &tree.root);
            Ok(serde_json::to_string_pretty(&json)? + "\n")
        }
        OutputFormat::Summary => Ok(render_summary(tree)),
    }
}

fn render_summary(tree: &SyntaxTree<'_>) -> String {
    let field = |name: &str, value: &str| {
        let label = format!("{:<12}", format!("{}:", name));
        format!("{} {}\n", label.cyan(), value)
    };

    let mut out = String::new();
    out.push_str(&field("type", tree.commit_type().unwrap_or("")));
    out.push_str(&field("scope", tree.scope().unwrap_or("-")));
    let breaking = if tree.is_breaking() { "yes".red().bold().to_string() } else { "no".to_string() };
    out.push_str(&field("breaking", &breaking));
    out.push_str(&field("description", tree.description().unwrap_or("")));

    if let Some(body) = tree.body() {
        let count = body.children_of(NodeKind::Paragraph).count();
        out.push_str(&field("body", &format!("{} paragraph(s)", count)));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use commitmsg::{ParseOptions, parse, parse_with};

    #[test]
    fn test_json_shape() {
        let tree = parse("feat(api)!: add endpoint.").unwrap();
        let rendered = render(&tree, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(value["kind"], "CommitMessage");
        assert_eq!(value["end"], 25);
        let ty = &value["children"][0]["children"][0];
        assert_eq!(ty["kind"], "Type");
        assert_eq!(ty["children"][1]["children"][0]["text"], "api");
        assert_eq!(ty["children"][2]["kind"], "BreakingChangeMarker");
        assert!(ty["children"][0].get("children").is_none());
    }

    #[test]
    fn test_tree_format_is_pretty_printer() {
        let tree = parse("fix: x.").unwrap();
        let rendered = render(&tree, OutputFormat::Tree).unwrap();
        assert!(rendered.starts_with("CommitMessage: 'fix: x.'\n\tTagLine: 'fix: x.'\n"));
    }

    #[test]
    fn test_summary_fields() {
        colored::control::set_override(false);
        let source = "docs(readme): fix typo.\n\nLonger text.";
        let tree = parse_with(source, ParseOptions::full()).unwrap();
        let rendered = render(&tree, OutputFormat::Summary).unwrap();

        assert!(rendered.contains("type:        docs\n"));
        assert!(rendered.contains("scope:       readme\n"));
        assert!(rendered.contains("breaking:    no\n"));
        assert!(rendered.contains("description: fix typo.\n"));
        assert!(rendered.contains("body:        1 paragraph(s)\n"));
    }
}
