//! Conversion between tree nodes and plain values.
//!
//! Decoding drops layout; [`rebuild`] puts a value back onto the node it
//! came from, reusing every part of the old node the value did not change.

use std::collections::HashSet;

use indexmap::IndexMap;
use twmerge_syntax::ArrayLit;
use twmerge_syntax::Element;
use twmerge_syntax::Item;
use twmerge_syntax::Key;
use twmerge_syntax::List;
use twmerge_syntax::Member;
use twmerge_syntax::Node;
use twmerge_syntax::ObjectLit;
use twmerge_syntax::Property;
use twmerge_syntax::Quote;
use twmerge_syntax::StrLit;

use crate::nest::placeholder_key;
use crate::nest::placeholder_value;
use crate::value::Value;

/// Layout conventions of the file being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub quote: Quote,
    pub indent_unit: String,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            quote: Quote::Double,
            indent_unit: "  ".to_string(),
        }
    }
}

pub fn decode(node: &Node) -> Value {
    match node {
        Node::Object(obj) => Value::Object(decode_object(obj)),
        Node::Array(arr) => Value::Array(
            arr.items
                .iter()
                .map(|item| match &item.node {
                    Element::Value(node) => decode(node),
                    Element::Spread(expr) => Value::String(placeholder_value(expr.trim())),
                    Element::Hole => Value::Expr(String::new()),
                })
                .collect(),
        ),
        Node::Str(lit) => Value::String(lit.value.clone()),
        Node::Number(raw) => Value::Number(raw.clone()),
        Node::Bool(b) => Value::Bool(*b),
        Node::Null => Value::Null,
        Node::Expr(raw) => Value::Expr(raw.clone()),
    }
}

/// Decode the properties of an object literal. Methods and shorthand
/// properties carry no plain value and are skipped.
pub fn decode_object(obj: &ObjectLit) -> IndexMap<String, Value> {
    let mut map = IndexMap::new();
    for item in &obj.items {
        match &item.node {
            Member::Property(prop) => {
                map.insert(prop.key.name().to_string(), decode(&prop.value));
            }
            Member::Spread(expr) => {
                let expr = expr.trim();
                map.insert(
                    placeholder_key(expr),
                    Value::String(placeholder_value(expr)),
                );
            }
            Member::Other(_) => {}
        }
    }
    map
}

/// Build a fresh node for `value`. `indent` is the indentation of the line
/// the node starts on.
pub fn encode(value: &Value, indent: &str, style: &Style) -> Node {
    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(*b),
        Value::Number(raw) => Node::Number(raw.clone()),
        Value::String(s) => Node::Str(StrLit::new(s.clone(), style.quote)),
        Value::Expr(raw) => Node::Expr(raw.clone()),
        Value::Array(items) => Node::Array(encode_array(items, indent, style)),
        Value::Object(map) => {
            let mut obj = ObjectLit::default();
            append_properties(&mut obj, map.iter(), indent, style);
            Node::Object(obj)
        }
    }
}

/// Turn `value` back into a node, reusing `existing` wherever the value
/// still matches it.
pub fn rebuild(existing: &Node, value: &Value, indent: &str, style: &Style) -> Node {
    if decode(existing) == *value {
        return existing.clone();
    }
    match (existing, value) {
        (Node::Object(obj), Value::Object(map)) => {
            Node::Object(rebuild_object(obj, map, indent, style))
        }
        _ => encode(value, indent, style),
    }
}

fn rebuild_object(
    obj: &ObjectLit,
    map: &IndexMap<String, Value>,
    indent: &str,
    style: &Style,
) -> ObjectLit {
    let mut rebuilt = obj.clone();
    let mut present = HashSet::new();

    for idx in 0..rebuilt.items.len() {
        let item_indent = rebuilt.item_indent(idx, indent).to_string();
        match &mut rebuilt.items[idx].node {
            Member::Property(prop) => {
                let name = prop.key.name().to_string();
                if let Some(value) = map.get(&name) {
                    prop.value = rebuild(&prop.value, value, &item_indent, style);
                }
                present.insert(name);
            }
            Member::Spread(expr) => {
                present.insert(placeholder_key(expr.trim()));
            }
            Member::Other(_) => {}
        }
    }

    let added = map.iter().filter(|(key, _)| !present.contains(key.as_str()));
    append_properties(&mut rebuilt, added, indent, style);
    rebuilt
}

fn append_properties<'a>(
    obj: &mut ObjectLit,
    entries: impl Iterator<Item = (&'a String, &'a Value)>,
    indent: &str,
    style: &Style,
) {
    for (key, value) in entries {
        obj.append_with(indent, &style.indent_unit, |item_indent| {
            Member::Property(Property::new(
                Key::for_name(key, style.quote),
                encode(value, item_indent, style),
            ))
        });
    }
}

/// Arrays of scalars stay on one line; arrays holding objects or arrays get
/// one element per line.
fn encode_array(items: &[Value], indent: &str, style: &Style) -> ArrayLit {
    let nested = items
        .iter()
        .any(|item| matches!(item, Value::Array(_) | Value::Object(_)));
    if !nested {
        return ArrayLit::inline(
            items
                .iter()
                .map(|item| Element::Value(encode(item, indent, style))),
        );
    }

    let child = format!("{indent}{}", style.indent_unit);
    List {
        items: items
            .iter()
            .map(|item| {
                Item::new(
                    format!("\n{child}"),
                    Element::Value(encode(item, &child, style)),
                )
            })
            .collect(),
        trailing_comma: true,
        close: format!("\n{indent}"),
    }
}
