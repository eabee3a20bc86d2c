//! Locating the Tailwind configuration object inside a module.

use std::fmt;
use std::ops::Range;
use std::path::Path;

use chumsky::span::SimpleSpan;
use strum::Display;
use tracing::debug;
use tracing::trace;

use crate::ast::Quote;
use crate::diagnostics::ParseError;
use crate::lexer::Token;
use crate::lexer::lex;
use crate::lexer::match_delimiters;
use crate::lower::lower;
use crate::parser::parse_object;
use crate::parser::parse_value;
use crate::tree::Node;
use crate::tree::ObjectLit;
use crate::tree::line_indent;

/// The property that marks an object literal as the Tailwind config.
const CONTENT: &str = "content";

const DEFAULT_INDENT_UNIT: &str = "  ";

/// Grammar profile of a module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum ScriptKind {
    #[default]
    #[strum(serialize = "typescript")]
    TypeScript,
    #[strum(serialize = "javascript")]
    JavaScript,
}

impl ScriptKind {
    /// Pick the profile from a file extension. Unknown extensions are
    /// treated as JavaScript.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("ts" | "mts" | "cts" | "tsx") => ScriptKind::TypeScript,
            _ => ScriptKind::JavaScript,
        }
    }
}

/// A module with its configuration object parsed into a lossless tree.
///
/// Text outside the object is kept verbatim; printing the tree with
/// [`fmt::Display`] reassembles the whole module.
#[derive(Debug, Clone)]
pub struct SourceTree {
    text: String,
    span: Range<usize>,
    config: ObjectLit,
    quote: Quote,
    indent: String,
    indent_unit: String,
}

impl SourceTree {
    /// Parse `text` and locate its configuration object: the first object
    /// literal, outermost first, with a `content` property.
    ///
    /// Returns `Ok(None)` when the module has no such object. When an
    /// object literal that declares `content` fails to parse and no later
    /// one qualifies, its error is returned. Text outside object literals
    /// is only lexed and checked for balanced delimiters.
    pub fn parse(text: &str, kind: ScriptKind) -> Result<Option<Self>, ParseError> {
        let tokens = lex(text)?;
        let pairs = match_delimiters(&tokens)?;
        let mut first_error = None;

        for (idx, (tok, open)) in tokens.iter().enumerate() {
            if *tok != Token::LBrace || !starts_expression(&tokens, idx, kind) {
                continue;
            }
            let Some(close) = pairs[idx] else {
                continue;
            };
            let candidate = &tokens[idx..=close];
            let end = tokens[close].1.end;

            let expr = match parse_object(candidate, end) {
                Ok(expr) => expr,
                Err(err) => {
                    trace!(start = open.start, error = %err, "not an object literal");
                    if first_error.is_none() && declares_content(candidate) {
                        first_error = Some(err);
                    }
                    continue;
                }
            };
            let Node::Object(config) = lower(&expr, text) else {
                continue;
            };
            if config.property(CONTENT).is_none() {
                continue;
            }

            let quote = candidate
                .iter()
                .find_map(|(tok, _)| match tok {
                    Token::Str { quote, .. } => Some(*quote),
                    _ => None,
                })
                .unwrap_or_default();
            let indent = indent_of_line(text, open.start);
            let indent_unit = detect_indent_unit(&config, &indent);

            debug!(start = open.start, end, %quote, %kind, "located config object");
            return Ok(Some(Self {
                text: text.to_string(),
                span: open.start..end,
                config,
                quote,
                indent,
                indent_unit,
            }));
        }

        match first_error {
            Some(err) => {
                debug!(%kind, error = %err, "config object does not parse");
                Err(err)
            }
            None => {
                debug!(%kind, "no object literal with a `content` property");
                Ok(None)
            }
        }
    }

    pub fn config(&self) -> &ObjectLit {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ObjectLit {
        &mut self.config
    }

    /// Byte range of the configuration object in the original text.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Quote of the first string literal in the configuration object.
    pub fn quote(&self) -> Quote {
        self.quote
    }

    /// Indentation of the line the configuration object starts on.
    pub fn indent(&self) -> &str {
        &self.indent
    }

    /// One level of indentation as used by the configuration object.
    pub fn indent_unit(&self) -> &str {
        &self.indent_unit
    }
}

impl fmt::Display for SourceTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            &self.text[..self.span.start],
            self.config,
            &self.text[self.span.end..]
        )
    }
}

/// Parse a standalone value expression such as `{ a: [1, ...b] }`.
pub fn parse_expression(text: &str) -> Result<Node, ParseError> {
    let tokens = lex(text)?;
    match_delimiters(&tokens)?;
    let expr = parse_value(&tokens, text.len())?;
    Ok(lower(&expr, text))
}

/// Whether a `{` at `idx` opens an object literal rather than a block,
/// class body or type.
fn starts_expression(tokens: &[(Token, SimpleSpan)], idx: usize, kind: ScriptKind) -> bool {
    let Some(prev) = idx.checked_sub(1) else {
        return true;
    };
    let typed = kind == ScriptKind::TypeScript;

    match &tokens[prev].0 {
        // `type Cfg<T>= {` lexes its `>=` as one operator
        Token::Punct(op) if typed && op.ends_with('=') && is_type_alias(tokens, prev) => false,
        Token::Punct(op) => op != "++" && op != "--",
        Token::Colon => !(typed && is_type_annotation(tokens, prev)),
        Token::LParen | Token::LBracket | Token::Comma | Token::DotDotDot => true,
        Token::Ident(word) => matches!(
            word.as_str(),
            "return" | "default" | "yield" | "await" | "case" | "in" | "of" | "typeof" | "void"
        ),
        _ => false,
    }
}

/// `type Alias = {` or `type Alias<T, U = V> = {`
fn is_type_alias(tokens: &[(Token, SimpleSpan)], eq: usize) -> bool {
    let Token::Punct(op) = &tokens[eq].0 else {
        return false;
    };

    // Walk back over the type parameters
    let mut depth = angle_balance(&op[..op.len() - 1]);
    let mut name_end = eq;
    if depth == 0 {
        if let Some((Token::Punct(close), _)) = tokens[..eq].last() {
            if close.chars().all(|c| c == '>') {
                depth = angle_balance(close);
                name_end = eq - 1;
            }
        }
    }
    while depth > 0 {
        let Some(prev) = name_end.checked_sub(1) else {
            return false;
        };
        name_end = prev;
        if let Token::Punct(op) = &tokens[name_end].0 {
            depth += angle_balance(op);
        }
    }

    matches!(
        &tokens[..name_end],
        [.., (Token::Ident(keyword), _), (Token::Ident(_), _)] if keyword == "type"
    )
}

/// Closing minus opening angle brackets in an operator token.
fn angle_balance(op: &str) -> isize {
    op.chars()
        .map(|c| match c {
            '>' => 1,
            '<' => -1,
            _ => 0,
        })
        .sum()
}

/// `const name: {`, or a parameter `(name: {` / `, name?: {`
fn is_type_annotation(tokens: &[(Token, SimpleSpan)], colon: usize) -> bool {
    let before = &tokens[..colon];
    if matches!(
        before,
        [.., (Token::Ident(keyword), _), (Token::Ident(_), _)]
            if matches!(keyword.as_str(), "const" | "let" | "var")
    ) {
        return true;
    }

    let param = match before {
        [.., (Token::Ident(_), _), (Token::Punct(op), _)] if op == "?" => colon - 2,
        [.., (Token::Ident(_), _)] => colon - 1,
        _ => return false,
    };
    matches!(
        tokens[..param].last(),
        Some((Token::LParen | Token::Comma, _))
    ) && matches!(enclosing_open(tokens, param), Some(Token::LParen))
}

/// The innermost unclosed delimiter before `idx`.
fn enclosing_open(tokens: &[(Token, SimpleSpan)], idx: usize) -> Option<&Token> {
    let mut depth = 0usize;
    for (tok, _) in tokens[..idx].iter().rev() {
        if tok.is_close() {
            depth += 1;
        } else if tok.is_open() {
            match depth.checked_sub(1) {
                Some(outer) => depth = outer,
                None => return Some(tok),
            }
        }
    }
    None
}

/// Whether an object's own members include a `content` property.
fn declares_content(object: &[(Token, SimpleSpan)]) -> bool {
    let mut depth = 0usize;
    for pair in object.windows(2) {
        let [(tok, _), (next, _)] = pair else {
            continue;
        };
        if tok.is_open() {
            depth += 1;
        } else if tok.is_close() {
            depth = depth.saturating_sub(1);
        } else if depth == 1 && *next == Token::Colon {
            let name = match tok {
                Token::Ident(name) => name.as_str(),
                Token::Str { value, .. } => value.as_str(),
                _ => continue,
            };
            if name == CONTENT {
                return true;
            }
        }
    }
    false
}

fn indent_of_line(text: &str, offset: usize) -> String {
    let line_start = text[..offset].rfind('\n').map_or(0, |pos| pos + 1);
    text[line_start..]
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect()
}

fn detect_indent_unit(config: &ObjectLit, indent: &str) -> String {
    config
        .items
        .iter()
        .filter_map(|item| line_indent(&item.leading))
        .find_map(|member| member.strip_prefix(indent).filter(|unit| !unit.is_empty()))
        .unwrap_or(DEFAULT_INDENT_UNIT)
        .to_string()
}
