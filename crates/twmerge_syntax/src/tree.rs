//! Lossless syntax tree for object and array literals.
//!
//! Each list item owns the whitespace and comments in front of it and
//! between it and its comma, so printing an untouched tree gives back the
//! source byte for byte. Edits replace nodes or append items; they never
//! splice text.

use std::fmt;

use crate::ast::Quote;
use crate::lexer::is_identifier;

/// A value expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Object(ObjectLit),
    Array(ArrayLit),
    Str(StrLit),
    Number(String),
    Bool(bool),
    Null,
    /// Any other expression, verbatim.
    Expr(String),
}

pub type ObjectLit = List<Member>;
pub type ArrayLit = List<Element>;

/// The items of an object or array literal.
#[derive(Debug, Clone, PartialEq)]
pub struct List<T> {
    pub items: Vec<Item<T>>,
    /// Whether the last item is followed by a comma.
    pub trailing_comma: bool,
    /// Trivia before the closing delimiter.
    pub close: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item<T> {
    pub leading: String,
    pub node: T,
    /// Trivia between the node and its comma.
    pub trailing: String,
}

impl<T> Item<T> {
    pub fn new(leading: impl Into<String>, node: T) -> Self {
        Self {
            leading: leading.into(),
            node,
            trailing: String::new(),
        }
    }
}

/// Object literal member.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Property(Property),
    /// `...expr`, holding the source that follows the dots.
    Spread(String),
    /// Shorthand property, method or accessor, verbatim.
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: Key,
    /// Source between the key and the value, including the colon.
    pub separator: String,
    pub value: Node,
}

impl Property {
    pub fn new(key: Key, value: Node) -> Self {
        Self {
            key,
            separator: ": ".to_string(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Ident(String),
    Str(StrLit),
    Number(String),
    /// `[expr]`, verbatim including the brackets.
    Computed(String),
}

impl Key {
    /// The property name this key defines.
    pub fn name(&self) -> &str {
        match self {
            Key::Ident(name) | Key::Number(name) | Key::Computed(name) => name,
            Key::Str(lit) => &lit.value,
        }
    }

    /// The plainest key spelling for `name`.
    pub fn for_name(name: &str, quote: Quote) -> Self {
        if is_identifier(name) {
            Key::Ident(name.to_string())
        } else if is_canonical_index(name) {
            Key::Number(name.to_string())
        } else {
            Key::Str(StrLit::new(name, quote))
        }
    }
}

/// Array literal element.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Value(Node),
    /// `...expr`, holding the source that follows the dots.
    Spread(String),
    Hole,
}

/// A string literal. Literals read from source print their original text.
#[derive(Debug, Clone, PartialEq)]
pub struct StrLit {
    pub value: String,
    pub quote: Quote,
    raw: Option<String>,
}

impl StrLit {
    pub fn new(value: impl Into<String>, quote: Quote) -> Self {
        Self {
            value: value.into(),
            quote,
            raw: None,
        }
    }

    pub(crate) fn with_source(value: String, quote: Quote, raw: &str) -> Self {
        Self {
            value,
            quote,
            raw: Some(raw.to_string()),
        }
    }
}

impl Member {
    /// Name of a property or shorthand property.
    pub fn name(&self) -> Option<&str> {
        match self {
            Member::Property(prop) => Some(prop.key.name()),
            Member::Other(text) if is_identifier(text.trim()) => Some(text.trim()),
            _ => None,
        }
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            trailing_comma: false,
            close: String::new(),
        }
    }
}

impl<T> List<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item laid out like its siblings.
    ///
    /// An empty list is opened up over several lines, one `unit` deeper than
    /// `indent`. `build` receives the line indentation of the new item.
    pub fn append_with(&mut self, indent: &str, unit: &str, build: impl FnOnce(&str) -> T) {
        let leading = match self.items.last() {
            Some(last) => sibling_layout(&last.leading),
            None => {
                let close_indent = match line_indent(&self.close) {
                    Some(ws) => ws.to_string(),
                    None => {
                        self.close = format!("\n{indent}");
                        indent.to_string()
                    }
                };
                self.trailing_comma = true;
                format!("\n{close_indent}{unit}")
            }
        };
        let item_indent = line_indent(&leading).unwrap_or(indent).to_string();
        let node = build(&item_indent);
        self.push_item(Item::new(leading, node));
    }

    /// Append an item laid out like its siblings. The first item of an empty
    /// list takes over the list's inner trivia.
    pub fn append_inline(&mut self, node: T) {
        let leading = match self.items.last() {
            Some(last) => sibling_layout(&last.leading),
            None => std::mem::take(&mut self.close),
        };
        self.push_item(Item::new(leading, node));
    }

    /// Insert an item in front of all others.
    pub fn insert_first(&mut self, node: T) {
        if self.items.is_empty() {
            self.append_inline(node);
            return;
        }
        let first = &mut self.items[0];
        let leading = match first.leading.rfind('\n') {
            Some(pos) => format!("\n{}", whitespace_prefix(&first.leading[pos + 1..])),
            None => {
                let leading = whitespace_prefix(&first.leading).to_string();
                if first.leading.is_empty() {
                    first.leading = " ".to_string();
                }
                leading
            }
        };
        self.items.insert(0, Item::new(leading, node));
    }

    /// Line indentation of the item at `idx`, or `fallback` when the item
    /// shares its line with the previous one.
    pub fn item_indent<'a>(&'a self, idx: usize, fallback: &'a str) -> &'a str {
        self.items
            .get(idx)
            .and_then(|item| line_indent(&item.leading))
            .unwrap_or(fallback)
    }

    fn push_item(&mut self, item: Item<T>) {
        // Without a trailing comma the new comma goes right after the old
        // last node, ahead of any comment that followed it
        if !self.trailing_comma {
            if let Some(last) = self.items.last_mut() {
                let trailing = std::mem::take(&mut last.trailing);
                self.close.insert_str(0, &trailing);
            }
        }
        self.items.push(item);
    }

    fn write(&self, f: &mut fmt::Formatter<'_>, open: char, close: char) -> fmt::Result
    where
        T: fmt::Display,
    {
        write!(f, "{open}")?;
        let last = self.items.len().saturating_sub(1);
        for (idx, item) in self.items.iter().enumerate() {
            write!(f, "{}{}{}", item.leading, item.node, item.trailing)?;
            if idx < last || self.trailing_comma {
                f.write_str(",")?;
            }
        }
        write!(f, "{}{close}", self.close)
    }
}

impl List<Member> {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.node.name() == Some(name))
    }

    /// The `name: value` property, ignoring shorthand members.
    pub fn property(&self, name: &str) -> Option<&Property> {
        self.items.iter().find_map(|item| match &item.node {
            Member::Property(prop) if prop.key.name() == name => Some(prop),
            _ => None,
        })
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.items.iter_mut().find_map(|item| match &mut item.node {
            Member::Property(prop) if prop.key.name() == name => Some(prop),
            _ => None,
        })
    }
}

impl List<Element> {
    /// A single-line array literal.
    pub fn inline(elements: impl IntoIterator<Item = Element>) -> Self {
        let items = elements
            .into_iter()
            .enumerate()
            .map(|(idx, element)| Item::new(if idx == 0 { "" } else { " " }, element))
            .collect();
        Self {
            items,
            ..Self::default()
        }
    }
}

/// Indentation of the last line of some trivia, if it spans lines.
pub fn line_indent(trivia: &str) -> Option<&str> {
    trivia
        .rfind('\n')
        .map(|pos| whitespace_prefix(&trivia[pos + 1..]))
}

fn sibling_layout(leading: &str) -> String {
    match line_indent(leading) {
        Some(indent) => format!("\n{indent}"),
        None => " ".to_string(),
    }
}

fn whitespace_prefix(text: &str) -> &str {
    let end = text
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(text.len());
    &text[..end]
}

fn is_canonical_index(name: &str) -> bool {
    match name.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.len() < 15 && rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Object(obj) => write!(f, "{}", obj),
            Node::Array(arr) => write!(f, "{}", arr),
            Node::Str(lit) => write!(f, "{}", lit),
            Node::Number(raw) => f.write_str(raw),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Null => f.write_str("null"),
            Node::Expr(raw) => f.write_str(raw),
        }
    }
}

impl fmt::Display for List<Member> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, '{', '}')
    }
}

impl fmt::Display for List<Element> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write(f, '[', ']')
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Property(prop) => write!(f, "{}{}{}", prop.key, prop.separator, prop.value),
            Member::Spread(expr) => write!(f, "...{}", expr),
            Member::Other(text) => f.write_str(text),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Value(node) => write!(f, "{}", node),
            Element::Spread(expr) => write!(f, "...{}", expr),
            Element::Hole => Ok(()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Ident(name) | Key::Number(name) | Key::Computed(name) => f.write_str(name),
            Key::Str(lit) => write!(f, "{}", lit),
        }
    }
}

impl fmt::Display for StrLit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(raw) = &self.raw {
            return f.write_str(raw);
        }
        let quote = self.quote.as_char();
        write!(f, "{quote}")?;
        for c in self.value.chars() {
            match c {
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\u{2028}' => f.write_str("\\u2028")?,
                '\u{2029}' => f.write_str("\\u2029")?,
                c if c == quote => write!(f, "\\{c}")?,
                c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                c => write!(f, "{c}")?,
            }
        }
        write!(f, "{quote}")
    }
}
