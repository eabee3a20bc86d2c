//! Lexer and token definitions for JavaScript and TypeScript config modules.
//!
//! Only the token shapes needed to find and edit object literals are told
//! apart. Other operators collapse into [`Token::Punct`]. Whitespace and
//! comments never become tokens: they are recovered as trivia from the gaps
//! between token spans.

use chumsky::input::MapExtra;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::ast::Quote;
use crate::diagnostics::ParseError;

/// A token of a JavaScript or TypeScript module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    // Literals
    Ident(String),
    Str { value: String, quote: Quote },
    Template(String), // Raw source, including backticks
    Number(String),
    Regex(String),

    // Any other operator or punctuation
    Punct(String),

    // Delimiters
    LParen,      // (
    RParen,      // )
    LBrace,      // {
    RBrace,      // }
    LBracket,    // [
    RBracket,    // ]
    Comma,       // ,
    Colon,       // :
    Semicolon,   // ;
    Dot,         // .
    DotDotDot,   // ...
    QuestionDot, // ?.
    Arrow,       // =>
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Ident(s) => write!(f, "{}", s),
            Token::Str { value, quote } => write!(f, "{quote}{value}{quote}"),
            Token::Template(raw) => write!(f, "{}", raw),
            Token::Number(raw) => write!(f, "{}", raw),
            Token::Regex(raw) => write!(f, "{}", raw),
            Token::Punct(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Colon => write!(f, ":"),
            Token::Semicolon => write!(f, ";"),
            Token::Dot => write!(f, "."),
            Token::DotDotDot => write!(f, "..."),
            Token::QuestionDot => write!(f, "?."),
            Token::Arrow => write!(f, "=>"),
        }
    }
}

impl Token {
    pub fn is_open(&self) -> bool {
        matches!(self, Token::LParen | Token::LBrace | Token::LBracket)
    }

    pub fn is_close(&self) -> bool {
        matches!(self, Token::RParen | Token::RBrace | Token::RBracket)
    }

    fn closes(&self, open: &Token) -> bool {
        matches!(
            (open, self),
            (Token::LParen, Token::RParen)
                | (Token::LBrace, Token::RBrace)
                | (Token::LBracket, Token::RBracket)
        )
    }
}

/// Keywords after which a `/` starts a regular expression.
const KEYWORDS_BEFORE_EXPR: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "in",
    "of",
    "new",
    "delete",
    "void",
    "throw",
    "case",
    "do",
    "else",
    "yield",
    "await",
    "default",
];

pub fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

pub fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_alphanumeric() || c == '\u{200c}' || c == '\u{200d}'
}

/// Whether `text` can be written as an identifier property key.
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

/// Lex a whole module.
///
/// `/` is ambiguous in JavaScript, so tokens are produced one at a time and
/// the previous token decides whether a regular expression may start.
pub fn lex(src: &str) -> Result<Vec<(Token, SimpleSpan)>, ParseError> {
    let expr_start = token(true);
    let after_operand = token(false);

    let mut tokens: Vec<(Token, SimpleSpan)> = Vec::new();
    let mut offset = 0;
    loop {
        let rest = &src[offset..];
        let parser = if regex_allowed(tokens.last().map(|(tok, _)| tok)) {
            &expr_start
        } else {
            &after_operand
        };
        let next = parser.parse(rest).into_result().map_err(|errs| {
            errs.first()
                .map(|err| ParseError::from_rich(err, offset))
                .unwrap_or_else(|| ParseError::new("invalid token", offset..src.len()))
        })?;

        let Some((tok, span)) = next else {
            return Ok(tokens);
        };
        let span: SimpleSpan = (offset + span.start..offset + span.end).into();
        offset = span.end;
        tokens.push((tok, span));
    }
}

/// Pair every opening delimiter with its closing delimiter.
///
/// Entry `i` holds the index of the matching token when token `i` is an
/// opening or closing delimiter.
pub fn match_delimiters(tokens: &[(Token, SimpleSpan)]) -> Result<Vec<Option<usize>>, ParseError> {
    let mut pairs = vec![None; tokens.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (idx, (tok, span)) in tokens.iter().enumerate() {
        if tok.is_open() {
            stack.push(idx);
        } else if tok.is_close() {
            let Some(open) = stack.pop() else {
                return Err(ParseError::new(
                    format!("unexpected `{}`", tok),
                    span.start..span.end,
                ));
            };
            if !tok.closes(&tokens[open].0) {
                return Err(ParseError::new(
                    format!("`{}` does not close `{}`", tok, tokens[open].0),
                    span.start..span.end,
                ));
            }
            pairs[open] = Some(idx);
            pairs[idx] = Some(open);
        }
    }

    match stack.pop() {
        Some(open) => {
            let (tok, span) = &tokens[open];
            Err(ParseError::new(
                format!("unclosed `{}`", tok),
                span.start..span.end,
            ))
        }
        None => Ok(pairs),
    }
}

fn regex_allowed(prev: Option<&Token>) -> bool {
    match prev {
        None => true,
        Some(Token::Ident(word)) => KEYWORDS_BEFORE_EXPR.contains(&word.as_str()),
        Some(Token::Str { .. } | Token::Template(_) | Token::Number(_) | Token::Regex(_)) => false,
        Some(Token::Punct(op)) => op != "++" && op != "--",
        Some(tok) => !tok.is_close(),
    }
}

/// Whitespace and comments.
fn trivia<'a>() -> impl Parser<'a, &'a str, (), extra::Err<Rich<'a, char>>> + Clone {
    let line_comment = just("//")
        .then(any().and_is(just('\n').not()).repeated())
        .ignored();
    let block_comment = just("/*")
        .then(any().and_is(just("*/").not()).repeated())
        .then(just("*/"))
        .ignored();

    choice((
        text::whitespace().at_least(1).ignored(),
        line_comment,
        block_comment,
    ))
    .repeated()
    .ignored()
}

/// Skip trivia, then lex one token. `None` at the end of input.
fn token<'a>(
    allow_regex: bool,
) -> impl Parser<'a, &'a str, Option<(Token, SimpleSpan)>, extra::Err<Rich<'a, char>>> {
    let escape = just('\\').then(any()).ignored();

    // A block comment that reaches this point never closed
    let unterminated_comment = just("/*").try_map(|_, span| {
        Err::<Token, _>(Rich::custom(span, "unterminated block comment"))
    });

    let double = just('"')
        .ignore_then(
            choice((escape.clone(), none_of("\\\"\n").ignored()))
                .repeated()
                .to_slice(),
        )
        .then_ignore(just('"'))
        .map(|raw: &str| Token::Str {
            value: unescape(raw),
            quote: Quote::Double,
        })
        .labelled("string");

    let single = just('\'')
        .ignore_then(
            choice((escape.clone(), none_of("\\'\n").ignored()))
                .repeated()
                .to_slice(),
        )
        .then_ignore(just('\''))
        .map(|raw: &str| Token::Str {
            value: unescape(raw),
            quote: Quote::Single,
        })
        .labelled("string");

    // `${ ... }` substitutions may themselves contain braces
    let braced = recursive(|braced| {
        just('{')
            .then(choice((braced, none_of("{}").ignored())).repeated())
            .then(just('}'))
            .ignored()
    });
    let template = just('`')
        .then(
            choice((
                escape.clone(),
                just('$').then(braced).ignored(),
                none_of("`\\").ignored(),
            ))
            .repeated(),
        )
        .then(just('`'))
        .to_slice()
        .map(|raw: &str| Token::Template(raw.to_string()))
        .labelled("template literal");

    let digit = any().filter(|c: &char| c.is_ascii_digit());
    let number = choice((digit.clone().ignored(), just('.').then(digit.clone()).ignored()))
        .then(
            choice((
                one_of("eE").then(one_of("+-")).ignored(),
                any()
                    .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_' || *c == '.')
                    .ignored(),
            ))
            .repeated(),
        )
        .to_slice()
        .map(|raw: &str| Token::Number(raw.to_string()))
        .labelled("number");

    let class = just('[')
        .then(choice((escape.clone(), none_of("]\\\n").ignored())).repeated())
        .then(just(']'))
        .ignored();
    let regex = just('/')
        .filter(move |_: &char| allow_regex)
        .then_ignore(just('*').not())
        .then(
            choice((escape, class, none_of("/\\[\n").ignored()))
                .repeated()
                .at_least(1),
        )
        .then(just('/'))
        .then(any().filter(|c: &char| c.is_ascii_alphabetic()).repeated())
        .to_slice()
        .map(|raw: &str| Token::Regex(raw.to_string()))
        .labelled("regular expression");

    let ident = any()
        .filter(|c: &char| is_ident_start(*c))
        .then(any().filter(|c: &char| is_ident_continue(*c)).repeated())
        .to_slice()
        .map(|name: &str| Token::Ident(name.to_string()))
        .labelled("identifier");

    let punct = choice((
        just("...").to(Token::DotDotDot),
        just("?.")
            .then_ignore(digit.not())
            .to(Token::QuestionDot),
        just("=>").to(Token::Arrow),
        just('(').to(Token::LParen),
        just(')').to(Token::RParen),
        just('{').to(Token::LBrace),
        just('}').to(Token::RBrace),
        just('[').to(Token::LBracket),
        just(']').to(Token::RBracket),
        just(',').to(Token::Comma),
        just(':').to(Token::Colon),
        just(';').to(Token::Semicolon),
        just('.').to(Token::Dot),
        one_of("=!<>+-*%&|^~?")
            .repeated()
            .at_least(1)
            .to_slice()
            .map(|op: &str| Token::Punct(op.to_string())),
        just("/=")
            .or(just("/").then_ignore(just('*').not()))
            .map(|op: &str| Token::Punct(op.to_string())),
        any()
            .filter(|c: &char| !matches!(c, '"' | '\'' | '`' | '/') && !c.is_whitespace())
            .map(|c: char| Token::Punct(c.to_string())),
    ));

    let token = choice((
        unterminated_comment,
        template,
        double,
        single,
        number,
        regex,
        ident,
        punct,
    ));

    trivia()
        .ignore_then(choice((
            end().to(None),
            token.map_with(|tok, e: &mut MapExtra<'a, '_, &'a str, _>| Some((tok, e.span()))),
        )))
        .lazy()
}

/// Resolve the escape sequences of a string literal body.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => {
                let hex: String = chars.by_ref().take(2).collect();
                out.push(decode_hex(&hex));
            }
            Some('u') => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    chars.by_ref().take_while(|c| *c != '}').collect()
                } else {
                    chars.by_ref().take(4).collect()
                };
                out.push(decode_hex(&hex));
            }
            // Line continuation
            Some('\r') => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

fn decode_hex(hex: &str) -> char {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}
