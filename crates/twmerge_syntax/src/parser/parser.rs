//! Token-level parser for object and array literals.
//!
//! The grammar is deliberately loose: anything that is not a literal the
//! merge engine understands is consumed as a balanced run of tokens and kept
//! as [`Expr::Raw`], [`Member::Other`] or a spread span.

use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::ast::*;
use crate::diagnostics::ParseError;
use crate::lexer::Token;

/// Parse the tokens of one object literal, from `{` to its matching `}`.
///
/// `eoi` is the byte offset used for errors at the end of the slice.
pub fn parse_object(tokens: &[(Token, SimpleSpan)], eoi: usize) -> Result<Spanned<Expr>, ParseError> {
    object_parser()
        .then_ignore(end())
        .parse(tokens.map((eoi..eoi).into(), |(t, s)| (t, s)))
        .into_result()
        .map_err(|errs| first_error(&errs, eoi))
}

/// Parse a complete token stream as a single value expression.
pub fn parse_value(tokens: &[(Token, SimpleSpan)], eoi: usize) -> Result<Spanned<Expr>, ParseError> {
    value_parser()
        .then_ignore(end())
        .parse(tokens.map((eoi..eoi).into(), |(t, s)| (t, s)))
        .into_result()
        .map_err(|errs| first_error(&errs, eoi))
}

fn first_error(errs: &[Rich<'_, Token>], eoi: usize) -> ParseError {
    errs.first()
        .map(|err| ParseError::from_rich(err, 0))
        .unwrap_or_else(|| ParseError::new("invalid expression", eoi..eoi))
}

/// Parser for an object literal.
pub(crate) fn object_parser<'tokens, I>()
-> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    object_with(value_parser())
}

/// Parser for a property value or array element.
pub(crate) fn value_parser<'tokens, I>()
-> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    recursive(|value| {
        let scalar = select! {
            Token::Str { value, quote } => Expr::Str { value, quote },
            Token::Number(raw) => Expr::Number(raw),
            Token::Ident(word) if word == "true" => Expr::Bool(true),
            Token::Ident(word) if word == "false" => Expr::Bool(false),
            Token::Ident(word) if word == "null" => Expr::Null,
        }
        .map_with(|expr, e| Spanned::new(expr, e.span()))
        .labelled("literal");

        // A literal only counts when nothing else follows it, so `"a" + b`
        // or `{}.x` stay raw expressions.
        let terminator = choice((
            just(Token::Comma).ignored(),
            just(Token::RBrace).ignored(),
            just(Token::RBracket).ignored(),
            end(),
        ))
        .rewind();

        let literal = choice((object_with(value.clone()), array_with(value), scalar))
            .then_ignore(terminator);

        choice((
            literal,
            raw().map(|span| Spanned::new(Expr::Raw, span)),
        ))
    })
}

fn object_with<'tokens, I, V>(
    value: V,
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
    V: Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, Token>>> + Clone,
{
    let spread = just(Token::DotDotDot)
        .ignore_then(raw())
        .map(|expr| Member::Spread { expr });

    let property = key()
        .then_ignore(just(Token::Colon))
        .then(value)
        .map(|(key, value)| Member::Property { key, value });

    // Shorthand properties, methods, getters and setters
    let other = raw().to(Member::Other);

    let member = choice((spread, property, other))
        .map_with(|member, e| Spanned::new(member, e.span()))
        .labelled("object member");

    delimited(Token::LBrace, Token::RBrace, member)
        .map_with(|list, e| Spanned::new(Expr::Object(list), e.span()))
        .labelled("object literal")
}

fn array_with<'tokens, I, V>(
    value: V,
) -> impl Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
    V: Parser<'tokens, I, Spanned<Expr>, extra::Err<Rich<'tokens, Token>>> + Clone,
{
    let spread = just(Token::DotDotDot)
        .ignore_then(raw())
        .map(|expr| Element::Spread { expr });

    // `[a, , b]`: the hole consumes nothing, its comma ends the entry
    let hole = just(Token::Comma).rewind().to(Element::Hole);

    let element = choice((spread, value.map(Element::Value), hole))
        .map_with(|element, e| Spanned::new(element, e.span()))
        .labelled("array element");

    delimited(Token::LBracket, Token::RBracket, element)
        .map_with(|list, e| Spanned::new(Expr::Array(list), e.span()))
        .labelled("array literal")
}

/// `open item, item, ... close`, keeping every comma span.
fn delimited<'tokens, I, T, P>(
    open: Token,
    close: Token,
    item: P,
) -> impl Parser<'tokens, I, Delimited<T>, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
    P: Parser<'tokens, I, Spanned<T>, extra::Err<Rich<'tokens, Token>>> + Clone,
{
    let comma = just(Token::Comma).map_with(|_, e| e.span());
    let entry = item
        .then(comma.or_not())
        .map(|(item, comma)| Entry { item, comma });

    just(open)
        .map_with(|_, e| e.span())
        .then(entry.repeated().collect::<Vec<_>>())
        .then(just(close).map_with(|_, e| e.span()))
        .map(|((open, entries), close)| Delimited {
            open,
            entries,
            close,
        })
}

/// Property name, including computed `[expr]` keys.
fn key<'tokens, I>() -> impl Parser<'tokens, I, Spanned<Key>, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    let named = select! {
        Token::Ident(name) => Key::Ident(name),
        Token::Str { value, quote } => Key::Str { value, quote },
        Token::Number(raw) => Key::Number(raw),
    };
    let computed = just(Token::LBracket)
        .rewind()
        .ignore_then(group())
        .to(Key::Computed);

    choice((named, computed))
        .map_with(|key, e| Spanned::new(key, e.span()))
        .labelled("property name")
}

/// A run of tokens up to the next top-level `,`, `;` or closing delimiter.
///
/// Two literals back to back (`'a' 'b'`) are a missing comma, not an
/// expression.
fn raw<'tokens, I>() -> impl Parser<'tokens, I, SimpleSpan, extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    choice((
        group().to(Operand::Other),
        none_of([
            Token::Comma,
            Token::Semicolon,
            Token::LParen,
            Token::RParen,
            Token::LBrace,
            Token::RBrace,
            Token::LBracket,
            Token::RBracket,
        ])
        .map(|tok| Operand::of(&tok)),
    ))
    .map_with(|operand, e| (operand, e.span()))
    .repeated()
    .at_least(1)
    .collect::<Vec<_>>()
    .try_map(|pieces, span| {
        let adjacent = pieces.windows(2).find_map(|pair| match pair {
            [(Operand::Literal | Operand::Template, _), (Operand::Literal, second)] => Some(*second),
            _ => None,
        });
        match adjacent {
            Some(second) => Err(Rich::custom(second, "expected `,` before this value")),
            None => Ok(span),
        }
    })
    .labelled("expression")
}

/// What a single token of a raw run contributes as an operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operand {
    /// String, number or regex literal
    Literal,
    /// Template literal, which may itself be tagged
    Template,
    Other,
}

impl Operand {
    fn of(tok: &Token) -> Self {
        match tok {
            Token::Str { .. } | Token::Number(_) | Token::Regex(_) => Operand::Literal,
            Token::Template(_) => Operand::Template,
            _ => Operand::Other,
        }
    }
}

/// A balanced `(...)`, `[...]` or `{...}` group.
fn group<'tokens, I>() -> impl Parser<'tokens, I, (), extra::Err<Rich<'tokens, Token>>> + Clone
where
    I: chumsky::input::ValueInput<'tokens, Token = Token, Span = SimpleSpan>,
{
    recursive(|group| {
        let inner = choice((
            group,
            none_of([
                Token::LParen,
                Token::RParen,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
            ])
            .ignored(),
        ))
        .repeated();

        choice((
            inner
                .clone()
                .delimited_by(just(Token::LParen), just(Token::RParen)),
            inner
                .clone()
                .delimited_by(just(Token::LBrace), just(Token::RBrace)),
            inner.delimited_by(just(Token::LBracket), just(Token::RBracket)),
        ))
    })
}
