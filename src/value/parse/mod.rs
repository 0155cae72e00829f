mod lexer;
mod parser;

use super::Value;

pub use lexer::TokenKind;
pub use parser::{ParseError, ParseErrorKind};

pub(crate) fn parse(s: &str) -> Result<Value, ParseError> {
    parser::Parser::new(s).parse()
}

/// Parses any number of whitespace-separated values written in canonical form.
pub fn parse_sequence(s: &str) -> Result<Vec<Value>, ParseError> {
    parser::Parser::new(s).parse_sequence()
}
