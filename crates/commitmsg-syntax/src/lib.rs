//! # commitmsg-syntax
//!
//! Parser, syntax tree and tree traversals for conventional commit messages.
//!
//! ## Architecture
//!
//! ```text
//! Message text
//!     ↓
//! Cursor (position, lookahead, rollback)
//!     ↓
//! Grammar rules (recursive descent, backtracking)
//!     ↓
//! SyntaxTree
//!     ↓
//! Visitors (content, pretty printer, walker)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use commitmsg_syntax::{parse, pretty_print};
//!
//! let tree = parse("fix(parser)!: handle trailing dot.").expect("valid message");
//!
//! assert_eq!(tree.commit_type(), Some("fix"));
//! assert_eq!(tree.scope(), Some("parser"));
//! assert!(tree.is_breaking());
//! print!("{}", pretty_print(&tree));
//! ```
//!
//! ## Grammar
//!
//! ```text
//! CommitMessage := TagLine [ "\n" Body ] [ "\n" Footer ]
//! TagLine       := Type ": " Description [ " " Ellipsis ]
//! Type          := Word [ Scope ] [ BreakingChangeMarker ]
//! Scope         := "(" Word ")"
//! BreakingChangeMarker := "!"
//! Ellipsis      := "..."
//! Description   := Sentence
//! Word          := [a-zA-Z0-9]+
//! Sentence      := Word { " " Word } "."
//! ```
//!
//! Body and footer are only attempted with [`ParseOptions::full_grammar`].
//!
//! ## Error Handling
//!
//! ```rust
//! use commitmsg_syntax::{parse, NodeKind};
//!
//! let err = parse("fix parser").unwrap_err();
//! assert_eq!(err.kind, NodeKind::TagLine);
//! assert_eq!(err.position(), 3);
//! assert_eq!(err.to_string(), "TagLine Expected: ': ' while parsing: 'fix'");
//! ```

pub mod ast;
pub mod cursor;
pub mod error;
pub mod parser;
pub mod visitor;

pub use ast::*;
pub use cursor::Cursor;
pub use error::{ContextParseError, ParseError, Span};
pub use parser::{ParseOptions, parse, parse_with};
pub use visitor::{PrettyPrinter, Visitor, content, pretty_print, walk};
