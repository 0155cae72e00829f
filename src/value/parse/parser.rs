use super::lexer::*;
use logos_iter::LogosIter;
use crate::common::*;
use crate::value::{Die, List, Number, Value};
use std::fmt;
use std::ops::Range;

type PResult<T> = Result<T, ParseError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("error at position {} ({slice:?}): {kind}", .span.start)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Range<usize>,
    pub slice: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorKind {
    UnexpectedToken {
        found: Option<TokenKind>,
        expected: Vec<TokenKind>,
    },
    UnexpectedString {
        expected: Vec<TokenKind>,
    },
    InvalidNumber,
    InvalidDie(String),
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken {
                found: Some(found),
                expected,
            } => {
                write!(f, "unexpected token: found {}, expected ", found)?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedToken {
                found: None,
                expected,
            } => {
                write!(f, "unexpected end of input, expected ")?;
                fmt_expected(expected, f)
            }
            Self::UnexpectedString { expected } => {
                write!(f, "expected ")?;
                fmt_expected(expected, f)
            }
            Self::InvalidNumber => write!(f, "number out of range"),
            Self::InvalidDie(why) => write!(f, "invalid die: {}", why),
        }
    }
}

fn fmt_expected(expected: &[TokenKind], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let len = expected.len();

    if expected.is_empty() {
        f.write_str("end of input")
    } else if len == 1 {
        f.write_str(expected[0].as_str())
    } else if len == 2 {
        write!(f, "{} or {}", expected[0], expected[1])
    } else {
        for exp in &expected[..len - 1] {
            write!(f, "{}, ", exp)?;
        }
        write!(f, "or {}", expected[len - 1])
    }
}

pub struct Parser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> Parser<'a> {
    const NUMBERS: &'static [TokenKind] = &[TokenKind::Integer, TokenKind::Decimal];

    pub fn new(s: &'a str) -> Self {
        Self { lexer: lexer(s) }
    }

    /// Parses exactly one value.
    pub fn parse(mut self) -> PResult<Value> {
        let value = self.parse_value()?;
        if self.lexer.peek().is_some() {
            return self.unexpected_token(vec![]);
        }
        Ok(value)
    }

    /// Parses whitespace-separated values up to the end of input.
    pub fn parse_sequence(mut self) -> PResult<Vec<Value>> {
        let mut values = Vec::new();
        while self.lexer.peek().is_some() {
            values.push(self.parse_value()?);
        }
        Ok(values)
    }

    fn advance(&mut self) -> Option<TokenKind> {
        self.lexer.next()
    }

    fn matches(&mut self, kind: TokenKind) -> bool {
        self.lexer.peek().map_or(false, |&peeked| peeked == kind)
    }

    fn consume(&mut self, expected: TokenKind) -> PResult<()> {
        if self.matches(expected) {
            self.lexer.next();
            Ok(())
        } else {
            self.unexpected_token(vec![expected])
        }
    }

    fn error<T>(&mut self, kind: ParseErrorKind) -> PResult<T> {
        Err(ParseError {
            kind,
            span: self.lexer.span(),
            slice: self.lexer.slice().to_string(),
        })
    }

    fn unexpected_token<T>(&mut self, expected: Vec<TokenKind>) -> PResult<T> {
        let found = self.lexer.next();
        if matches!(found, Some(TokenKind::Error)) {
            self.error(ParseErrorKind::UnexpectedString { expected })
        } else {
            self.error(ParseErrorKind::UnexpectedToken { found, expected })
        }
    }

    fn parse_value(&mut self) -> PResult<Value> {
        match self.lexer.peek() {
            Some(TokenKind::Minus) => {
                self.advance();
                self.parse_number("-").map(Value::Number)
            }
            Some(TokenKind::Integer | TokenKind::Decimal) => {
                self.parse_number("").map(Value::Number)
            }
            Some(TokenKind::LeftBracket) => self.parse_list().map(Value::List),
            Some(TokenKind::LeftBrace) => self.parse_die().map(Value::Die),
            _ => self.unexpected_token(TokenKind::VALUE_STARTS.to_vec()),
        }
    }

    /// Parses a number literal, `sign` being the minus already consumed.
    /// Integers too large for `Int` are read as floats.
    fn parse_number(&mut self, sign: &str) -> PResult<Number> {
        let integral = match self.lexer.peek() {
            Some(TokenKind::Integer) => true,
            Some(TokenKind::Decimal) => false,
            _ => return self.unexpected_token(Self::NUMBERS.to_vec()),
        };
        self.advance();

        let literal = format!("{}{}", sign, self.lexer.slice());
        if integral {
            if let Ok(x) = literal.parse::<Int>() {
                return Ok(Number::Int(x));
            }
        }
        match literal.parse::<Float>() {
            Ok(x) if x.is_finite() => Ok(Number::Float(x)),
            _ => self.error(ParseErrorKind::InvalidNumber),
        }
    }

    fn parse_list(&mut self) -> PResult<List> {
        self.consume(TokenKind::LeftBracket)?;

        let mut items = Vec::new();
        while !self.matches(TokenKind::RightBracket) {
            items.push(self.parse_value()?);
            if self.matches(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        self.consume(TokenKind::RightBracket)?;

        Ok(List::new(items))
    }

    fn parse_die(&mut self) -> PResult<Die> {
        self.consume(TokenKind::LeftBrace)?;
        self.consume(TokenKind::DieFunction)?;
        self.consume(TokenKind::Comma)?;
        let value = self.parse_value()?;
        self.consume(TokenKind::Comma)?;
        let sides = self.parse_value()?;
        self.consume(TokenKind::RightBrace)?;

        match Die::from_operands(&value, &sides) {
            Ok(die) => Ok(die),
            Err(why) => self.error(ParseErrorKind::InvalidDie(why.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Domain;
    use pretty_assertions::assert_eq;

    fn parse(s: &str) -> PResult<Value> {
        Parser::new(s).parse()
    }

    fn list(values: Vec<Value>) -> Value {
        Value::List(List::new(values))
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(Ok(Value::from(12)), parse("12"));
        assert_eq!(Ok(Value::from(-3)), parse("-3"));
        assert_eq!(Ok(Value::from(0.25)), parse(".25"));
        assert_eq!(Ok(Value::from(-2.5)), parse(" -2.5 "));
    }

    #[test]
    fn test_parse_lists() {
        assert_eq!(Ok(list(vec![])), parse("[]"));
        assert_eq!(
            Ok(list(vec![Value::from(1), list(vec![Value::from(2)]), Value::from(-3)])),
            parse("[1, [2], -3,]")
        );
    }

    #[test]
    fn test_parse_die() {
        let sides = Domain::from_value(&Value::from(6)).unwrap();
        let expected = Value::Die(Die::new(4, sides).unwrap());
        let actual = parse("{!die,4,6}").unwrap();
        assert_eq!(expected, actual);
        assert_eq!(Some(&Domain::from_value(&Value::from(6)).unwrap()), actual.domain());
    }

    #[test]
    fn test_parse_die_with_faces() {
        let actual = parse("{!die,5,[1,[2,3]]}").unwrap();
        assert_eq!("{!die,5,[1,[2,3]]}", actual.to_code());
    }

    #[test]
    fn test_parse_sequence() {
        let values = Parser::new("[1,2] 3 {!die,1,1}").parse_sequence().unwrap();
        assert_eq!(3, values.len());
        assert_eq!(Value::from(3), values[1]);
    }

    #[test]
    fn test_err_invalid_die() {
        let err = parse("{!die,7,6}").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidDie(_)));

        let err = parse("{!die,1,0}").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::InvalidDie(_)));
    }

    #[test]
    fn test_err_unexpected() {
        let err = parse("[1 2]").unwrap_err();
        assert_eq!(
            ParseErrorKind::UnexpectedToken {
                found: Some(TokenKind::Integer),
                expected: vec![TokenKind::RightBracket],
            },
            err.kind
        );

        let err = parse("3 4").unwrap_err();
        assert!(err
            .to_string()
            .ends_with("unexpected token: found <integer>, expected end of input"));

        let err = parse("[").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { found: None, .. }));

        let err = parse("x").unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::UnexpectedString { .. }));
    }

    #[test]
    fn test_integer_edges() {
        assert_eq!(Ok(Value::Number(Number::Int(Int::MIN))), parse("-9223372036854775808"));
        assert_eq!(Ok(Value::Number(Number::Int(Int::MAX))), parse("9223372036854775807"));
        assert!(matches!(
            parse("9223372036854776000"),
            Ok(Value::Number(Number::Float(x))) if x == 9.223372036854776e18
        ));
        assert!(matches!(
            parse("-9223372036854775809"),
            Ok(Value::Number(Number::Float(_)))
        ));
    }

    #[test]
    fn test_extreme_dice_round_trip() {
        for face in ["[-9223372036854775807,-1]", "[9223372036854775807,1]"] {
            let sides: Value = format!("[{}]", face).parse().unwrap();
            let domain = Domain::from_value(&sides).unwrap();
            let die = Value::Die(Die::new(domain.face(0), domain).unwrap());
            assert_eq!(Ok(die.clone()), parse(&die.to_code()));
        }
    }

    #[test]
    fn test_err_number_out_of_range() {
        let err = parse(&format!("1{}", "0".repeat(400))).unwrap_err();
        assert_eq!(ParseErrorKind::InvalidNumber, err.kind);
    }
}
