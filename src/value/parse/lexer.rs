use logos::{Lexer as LogosLexer, Logos};
use logos_iter::{LogosIter, PeekableLexer};
use std::fmt;

pub type Lexer<'a> = PeekableLexer<'a, LogosLexer<'a, TokenKind>, TokenKind>;

pub fn lexer(s: &str) -> Lexer {
    TokenKind::lexer(s).peekable_lexer()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,
    #[regex(r"([0-9]+\.[0-9]*)|(\.[0-9]+)")]
    Decimal,

    #[token("-")]
    Minus,
    #[token("[")]
    LeftBracket,
    #[token("]")]
    RightBracket,
    #[token("{")]
    LeftBrace,
    #[token("}")]
    RightBrace,
    #[token(",")]
    Comma,

    #[token("!die")]
    DieFunction,

    #[regex(r"[ \t\r\n]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    pub const VALUE_STARTS: &'static [Self] = &[
        Self::Integer,
        Self::Decimal,
        Self::Minus,
        Self::LeftBracket,
        Self::LeftBrace,
    ];

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Decimal => "<decimal>",
            Minus => "'-'",
            LeftBracket => "'['",
            RightBracket => "']'",
            LeftBrace => "'{'",
            RightBrace => "'}'",
            Comma => "','",
            DieFunction => "'!die'",
            Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
