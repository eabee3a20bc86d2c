//! Spread nesting.
//!
//! A deep merge works on plain data and has no notion of `...expr`. Before
//! merging, every spread in an object literal becomes a property
//! `"___expr": "...expr"` and every spread element becomes the string
//! `"...expr"`, in place. Each rewrite is recorded in [`Spreads`], and
//! unnesting turns exactly the recorded placeholders back into spreads with
//! their original text.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::trace;
use twmerge_syntax::ArrayLit;
use twmerge_syntax::Element;
use twmerge_syntax::Key;
use twmerge_syntax::Member;
use twmerge_syntax::Node;
use twmerge_syntax::ObjectLit;
use twmerge_syntax::Property;
use twmerge_syntax::Quote;
use twmerge_syntax::StrLit;

/// Reserved key prefix of a nested object spread.
pub const SPREAD_KEY_PREFIX: &str = "___";

const SPREAD_VALUE_PREFIX: &str = "...";

/// Property name standing in for `...expr`.
pub fn placeholder_key(expr: &str) -> String {
    format!("{SPREAD_KEY_PREFIX}{expr}")
}

/// String value standing in for `...expr`.
pub fn placeholder_value(expr: &str) -> String {
    format!("{SPREAD_VALUE_PREFIX}{expr}")
}

/// The spreads a nest pass replaced, keyed by their trimmed target.
///
/// The value is the target text exactly as written after the `...`,
/// comments and spacing included.
#[derive(Debug, Default, Clone)]
pub struct Spreads {
    originals: HashMap<String, String>,
}

impl Spreads {
    pub fn len(&self) -> usize {
        self.originals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.originals.is_empty()
    }

    /// Record a spread and return the trimmed target its placeholder uses.
    fn record(&mut self, original: &str) -> String {
        let target = original.trim().to_string();
        match self.originals.entry(target.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(original.to_string());
            }
            // Same target written two ways: fall back to the trimmed form
            Entry::Occupied(mut entry) if entry.get().as_str() != original => {
                entry.insert(target.clone());
            }
            Entry::Occupied(_) => {}
        }
        target
    }

    /// The original spread text for a placeholder string, if this pass made it.
    fn restore(&self, node: &Node) -> Option<String> {
        let Node::Str(lit) = node else {
            return None;
        };
        let target = lit.value.strip_prefix(SPREAD_VALUE_PREFIX)?;
        self.originals.get(target).cloned()
    }
}

pub fn nest_object(obj: &mut ObjectLit, spreads: &mut Spreads) {
    for item in &mut obj.items {
        match &mut item.node {
            Member::Spread(original) => {
                let expr = spreads.record(original);
                trace!(%expr, "nesting object spread");
                item.node = Member::Property(Property::new(
                    Key::Str(StrLit::new(placeholder_key(&expr), Quote::Double)),
                    placeholder(&expr),
                ));
            }
            Member::Property(prop) => nest_node(&mut prop.value, spreads),
            Member::Other(_) => {}
        }
    }
}

pub fn nest_array(arr: &mut ArrayLit, spreads: &mut Spreads) {
    for item in &mut arr.items {
        match &mut item.node {
            Element::Spread(original) => {
                let expr = spreads.record(original);
                trace!(%expr, "nesting array spread");
                item.node = Element::Value(placeholder(&expr));
            }
            Element::Value(node) => nest_node(node, spreads),
            Element::Hole => {}
        }
    }
}

pub fn unnest_object(obj: &mut ObjectLit, spreads: &Spreads) {
    for item in &mut obj.items {
        let Member::Property(prop) = &mut item.node else {
            continue;
        };
        match spreads.restore(&prop.value) {
            Some(original) => {
                trace!(expr = %original.trim(), "unnesting object spread");
                item.node = Member::Spread(original);
            }
            None => unnest_node(&mut prop.value, spreads),
        }
    }
}

pub fn unnest_array(arr: &mut ArrayLit, spreads: &Spreads) {
    for item in &mut arr.items {
        let Element::Value(node) = &mut item.node else {
            continue;
        };
        match spreads.restore(node) {
            Some(original) => {
                trace!(expr = %original.trim(), "unnesting array spread");
                item.node = Element::Spread(original);
            }
            None => unnest_node(node, spreads),
        }
    }
}

fn nest_node(node: &mut Node, spreads: &mut Spreads) {
    match node {
        Node::Object(obj) => nest_object(obj, spreads),
        Node::Array(arr) => nest_array(arr, spreads),
        _ => {}
    }
}

fn unnest_node(node: &mut Node, spreads: &Spreads) {
    match node {
        Node::Object(obj) => unnest_object(obj, spreads),
        Node::Array(arr) => unnest_array(arr, spreads),
        _ => {}
    }
}

fn placeholder(expr: &str) -> Node {
    Node::Str(StrLit::new(placeholder_value(expr), Quote::Double))
}

#[cfg(test)]
mod tests;
