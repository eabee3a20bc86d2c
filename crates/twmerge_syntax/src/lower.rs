//! Lowering from the spanned AST to the lossless tree.
//!
//! The AST only knows token spans; trivia is whatever source text lies
//! between them.

use chumsky::span::SimpleSpan;

use crate::ast;
use crate::ast::Delimited;
use crate::ast::Spanned;
use crate::tree::Element;
use crate::tree::Item;
use crate::tree::Key;
use crate::tree::List;
use crate::tree::Member;
use crate::tree::Node;
use crate::tree::Property;
use crate::tree::StrLit;

/// Lower a parsed expression, reading verbatim text from `src`.
pub fn lower(expr: &Spanned<ast::Expr>, src: &str) -> Node {
    match &expr.node {
        ast::Expr::Object(list) => Node::Object(lower_list(list, src)),
        ast::Expr::Array(list) => Node::Array(lower_list(list, src)),
        ast::Expr::Str { value, quote } => {
            Node::Str(StrLit::with_source(value.clone(), *quote, text(src, expr.span)))
        }
        ast::Expr::Number(raw) => Node::Number(raw.clone()),
        ast::Expr::Bool(b) => Node::Bool(*b),
        ast::Expr::Null => Node::Null,
        ast::Expr::Raw => Node::Expr(text(src, expr.span).to_string()),
    }
}

fn text(src: &str, span: SimpleSpan) -> &str {
    &src[span.start..span.end]
}

trait Lower: Sized {
    type Output;

    fn lower(item: &Spanned<Self>, src: &str) -> Self::Output;

    fn is_hole(&self) -> bool {
        false
    }
}

impl Lower for ast::Member {
    type Output = Member;

    fn lower(item: &Spanned<Self>, src: &str) -> Member {
        match &item.node {
            ast::Member::Property { key, value } => Member::Property(Property {
                key: lower_key(key, src),
                separator: src[key.span.end..value.span.start].to_string(),
                value: lower(value, src),
            }),
            ast::Member::Spread { expr } => Member::Spread(spread_target(item.span, *expr, src)),
            ast::Member::Other => Member::Other(text(src, item.span).to_string()),
        }
    }
}

impl Lower for ast::Element {
    type Output = Element;

    fn lower(item: &Spanned<Self>, src: &str) -> Element {
        match &item.node {
            ast::Element::Value(value) => Element::Value(lower(value, src)),
            ast::Element::Spread { expr } => Element::Spread(spread_target(item.span, *expr, src)),
            ast::Element::Hole => Element::Hole,
        }
    }

    fn is_hole(&self) -> bool {
        matches!(self, ast::Element::Hole)
    }
}

/// Source after the `...` of a spread, keeping any space before the target.
fn spread_target(spread: SimpleSpan, expr: SimpleSpan, src: &str) -> String {
    src[spread.start + "...".len()..expr.end].to_string()
}

fn lower_key(key: &Spanned<ast::Key>, src: &str) -> Key {
    match &key.node {
        ast::Key::Ident(name) => Key::Ident(name.clone()),
        ast::Key::Str { value, quote } => {
            Key::Str(StrLit::with_source(value.clone(), *quote, text(src, key.span)))
        }
        ast::Key::Number(raw) => Key::Number(raw.clone()),
        ast::Key::Computed => Key::Computed(text(src, key.span).to_string()),
    }
}

fn lower_list<T: Lower>(list: &Delimited<T>, src: &str) -> List<T::Output> {
    let mut items = Vec::with_capacity(list.entries.len());
    let mut cursor = list.open.end;
    let mut trailing_comma = false;

    for (idx, entry) in list.entries.iter().enumerate() {
        let is_last = idx + 1 == list.entries.len();
        // A hole has no tokens; it sits right before its comma
        let (start, end) = if entry.item.node.is_hole() {
            let at = entry.comma.map_or(list.close.start, |comma| comma.start);
            (at, at)
        } else {
            (entry.item.span.start, entry.item.span.end)
        };
        let leading = src[cursor..start].to_string();

        let trailing_end = match entry.comma {
            Some(comma) => {
                trailing_comma = is_last;
                cursor = comma.end;
                comma.start
            }
            None if is_last => {
                cursor = list.close.start;
                list.close.start
            }
            None => {
                cursor = end;
                end
            }
        };

        items.push(Item {
            leading,
            node: T::lower(&entry.item, src),
            trailing: src[end..trailing_end].to_string(),
        });
    }

    List {
        items,
        trailing_comma,
        close: src[cursor..list.close.start].to_string(),
    }
}
