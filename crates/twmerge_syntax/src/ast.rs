//! Spanned AST produced by the token-level parser.
//!
//! The AST only records the shapes the merge engine edits: object and array
//! literals, their members, and scalar literals. Everything else is an opaque
//! [`Expr::Raw`] whose text is recovered from its span.

use chumsky::span::SimpleSpan;
use strum::Display;

/// A node with its byte span in the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: SimpleSpan,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: SimpleSpan) -> Self {
        Self { node, span }
    }
}

/// Quote character of a string literal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display)]
pub enum Quote {
    #[default]
    #[strum(serialize = "\"")]
    Double,
    #[strum(serialize = "'")]
    Single,
}

impl Quote {
    pub fn as_char(self) -> char {
        match self {
            Quote::Double => '"',
            Quote::Single => '\'',
        }
    }
}

/// Expressions in value position.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Object(Delimited<Member>),
    Array(Delimited<Element>),
    Str { value: String, quote: Quote },
    Number(String),
    Bool(bool),
    Null,
    /// Any other expression, kept as source text.
    Raw,
}

/// A bracketed, comma separated list.
#[derive(Debug, Clone, PartialEq)]
pub struct Delimited<T> {
    pub open: SimpleSpan,
    pub entries: Vec<Entry<T>>,
    pub close: SimpleSpan,
}

/// One list entry and the comma that follows it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub item: Spanned<T>,
    pub comma: Option<SimpleSpan>,
}

/// Object literal member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// `key: value`
    Property {
        key: Spanned<Key>,
        value: Spanned<Expr>,
    },
    /// `...expr`, with the span of `expr`
    Spread { expr: SimpleSpan },
    /// Shorthand properties, methods and accessors.
    Other,
}

/// Property name.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Ident(String),
    Str { value: String, quote: Quote },
    Number(String),
    /// `[expr]`
    Computed,
}

/// Array literal element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Value(Spanned<Expr>),
    /// `...expr`, with the span of `expr`
    Spread { expr: SimpleSpan },
    /// An elided element, as in `[a, , b]`.
    Hole,
}
