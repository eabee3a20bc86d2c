//! Verbose, multi-line pretty-printing for tree nodes.
//!
//! Used by tests to produce unambiguous snapshot output. Trivia is not shown.

use crate::tree::*;

/// Trait for verbose, multi-line tree pretty-printing.
pub trait PrettyPrint {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result;

    fn to_pretty_string(&self) -> String {
        struct Wrapper<'a, T: PrettyPrint + ?Sized>(&'a T);
        impl<T: PrettyPrint + ?Sized> std::fmt::Display for Wrapper<'_, T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.pretty_print(0, f)
            }
        }
        Wrapper(self).to_string()
    }
}

fn write_indent(indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for _ in 0..indent {
        write!(f, "  ")?;
    }
    Ok(())
}

impl PrettyPrint for Node {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_indent(indent, f)?;
        match self {
            Node::Object(obj) => {
                writeln!(f, "Object")?;
                for item in &obj.items {
                    item.node.pretty_print(indent + 1, f)?;
                }
                Ok(())
            }
            Node::Array(arr) => {
                writeln!(f, "Array")?;
                for item in &arr.items {
                    item.node.pretty_print(indent + 1, f)?;
                }
                Ok(())
            }
            Node::Str(lit) => writeln!(f, "Str: {}", lit),
            Node::Number(raw) => writeln!(f, "Number: {}", raw),
            Node::Bool(b) => writeln!(f, "Bool: {}", b),
            Node::Null => writeln!(f, "Null"),
            Node::Expr(raw) => writeln!(f, "Expr: {}", raw),
        }
    }
}

impl PrettyPrint for Member {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write_indent(indent, f)?;
        match self {
            Member::Property(prop) => {
                writeln!(f, "Property: {}", prop.key)?;
                prop.value.pretty_print(indent + 1, f)
            }
            Member::Spread(expr) => writeln!(f, "Spread: {}", expr.trim()),
            Member::Other(text) => writeln!(f, "Other: {}", text),
        }
    }
}

impl PrettyPrint for Element {
    fn pretty_print(&self, indent: usize, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Element::Value(node) => node.pretty_print(indent, f),
            Element::Spread(expr) => {
                write_indent(indent, f)?;
                writeln!(f, "Spread: {}", expr.trim())
            }
            Element::Hole => {
                write_indent(indent, f)?;
                writeln!(f, "Hole")
            }
        }
    }
}
