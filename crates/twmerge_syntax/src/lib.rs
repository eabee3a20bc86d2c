//! Lossless parsing of Tailwind configuration modules.
//!
//! A module is lexed with a JavaScript/TypeScript lexer, the configuration
//! object literal is located and parsed, and the result is kept as a tree
//! that prints back to the exact source until it is edited.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod lower;
pub mod parser;
pub mod pretty_print;
pub mod source;
pub mod tree;

pub use ast::Quote;
pub use diagnostics::ParseError;
pub use pretty_print::PrettyPrint;
pub use source::ScriptKind;
pub use source::SourceTree;
pub use source::parse_expression;
pub use tree::*;
