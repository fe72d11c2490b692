//! Lexer and token definitions for the Building Description Language.

use chumsky::input::MapExtra;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;


/// A token in BDL source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Free text between delimiters, trailing whitespace trimmed.
    Text(String),

    NameOpen,    // $N(
    ControlOpen, // $C(
    GadgetsOpen, // $G(
    RParen,      // )
    LBrace,      // {
    RBrace,      // }
    LBracket,    // [
    RBracket,    // ]
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Text(s) => write!(f, "text '{}'", s),
            Token::NameOpen => write!(f, "'$N('"),
            Token::ControlOpen => write!(f, "'$C('"),
            Token::GadgetsOpen => write!(f, "'$G('"),
            Token::RParen => write!(f, "')'"),
            Token::LBrace => write!(f, "'{{'"),
            Token::RBrace => write!(f, "'}}'"),
            Token::LBracket => write!(f, "'['"),
            Token::RBracket => write!(f, "']'"),
        }
    }
}

/// Build the lexer for BDL.
///
/// Every input lexes: anything that is not a delimiter or whitespace is text.
/// A lone `$` or `(` is therefore part of the surrounding text.
pub fn lexer<'a>() -> impl Parser<'a, &'a str, Vec<(Token, SimpleSpan)>, extra::Err<Rich<'a, char>>>
{
    // Multi-char openers first
    let delim = choice((
        just("$N(").to(Token::NameOpen),
        just("$C(").to(Token::ControlOpen),
        just("$G(").to(Token::GadgetsOpen),
        just(")").to(Token::RParen),
        just("{").to(Token::LBrace),
        just("}").to(Token::RBrace),
        just("[").to(Token::LBracket),
        just("]").to(Token::RBracket),
    ));

    let delimiter = delim
        .clone()
        .map_with(|tok, e: &mut MapExtra<'a, '_, &'a str, _>| (tok, e.span()))
        .labelled("delimiter");

    // Names may contain inner whitespace ("girls room"), so text runs up to
    // the next delimiter and the span is shrunk to the trimmed text.
    let text = any()
        .and_is(delim.not())
        .repeated()
        .at_least(1)
        .to_slice()
        .map_with(|s: &str, e: &mut MapExtra<'a, '_, &'a str, _>| {
            let span: SimpleSpan = e.span();
            let trimmed = s.trim_end();
            let trimmed_span: SimpleSpan = (span.start..span.start + trimmed.len()).into();
            (Token::Text(trimmed.to_string()), trimmed_span)
        })
        .labelled("text");

    choice((delimiter, text))
        .padded()
        .repeated()
        .collect::<Vec<_>>()
        .padded()
}
