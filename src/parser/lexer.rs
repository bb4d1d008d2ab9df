//! Lexer for binding scripts using logos

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r;]+")]
pub enum Token {
    // Keywords
    #[token("view")]
    View,
    #[token("in")]
    In,
    #[token("myself")]
    Myself,

    // Operators
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equals,

    // Delimiters
    #[token("(")]
    ParenOpen,
    #[token(")")]
    ParenClose,
    #[token(".")]
    Dot,

    // Literals - identifiers must come after keywords
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string(), priority = 1)]
    Ident(String),

    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    // Comments (skip)
    #[regex(r"//[^\n]*", logos::skip)]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/", logos::skip)]
    BlockComment,
}

/// Lex input string into tokens with spans
///
/// Input that matches no token comes back as `Err` with its span.
pub fn lex(input: &str) -> impl Iterator<Item = Result<(Token, Span), Span>> + '_ {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(tok) => Ok((tok, span)),
            Err(()) => Err(span),
        })
}
