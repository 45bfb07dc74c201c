pub use commitmsg_syntax::{
    ContextParseError, Node, NodeKind, ParseError, ParseOptions, PrettyPrinter, Span, SyntaxTree,
    Visitor, content, parse, parse_with, pretty_print, walk,
};
pub use commitmsg_syntax;

pub mod prelude {
    pub use crate::{parse, parse_with, pretty_print, walk};
    pub use crate::{ContextParseError, Node, NodeKind, ParseOptions, SyntaxTree, Visitor};
}
