mod die;
mod list;
mod num;
mod parse;
mod stringify;
mod visit;

use crate::common::*;
use std::fmt;
use std::str::FromStr;

pub use die::{Die, Domain, INFERRED_SIDES, MAX_INFERRED_SIDES};
pub use list::List;
pub use num::Number;
pub use parse::{parse_sequence, ParseError, ParseErrorKind, TokenKind};
pub use stringify::{CodeStringifier, SimpleStringifier, Stringify, TreeStringifier};
pub use visit::{AcceptValue, VisitValue};

/// Anything that reduces to a single number.
#[enum_dispatch::enum_dispatch]
pub trait Numeric {
    fn number(&self) -> Number;
}

impl Numeric for Number {
    fn number(&self) -> Number {
        *self
    }
}

#[derive(Debug, Clone)]
#[enum_dispatch::enum_dispatch(Numeric, AcceptValue)]
pub enum Value {
    Number(Number),
    List(List),
    Die(Die),
}

impl Value {
    /// The domain this value was rolled from, if it is a die.
    pub fn domain(&self) -> Option<&Domain> {
        match self {
            Self::Die(die) => Some(die.domain()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    /// Lists are returned as-is; anything else becomes a one-element list.
    pub fn to_list(&self) -> List {
        match self {
            Self::List(list) => list.clone(),
            other => List::new(vec![other.clone()]),
        }
    }

    pub fn to_code(&self) -> String {
        CodeStringifier::new().stringify(self)
    }

    pub fn to_tree(&self) -> String {
        TreeStringifier::new().stringify(self)
    }
}

/// Lists compare element-wise, dice by value and domain, and a die against
/// a plain number by value alone.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => a == b,
            (Self::List(_), _) | (_, Self::List(_)) => false,
            (Self::Die(a), Self::Die(b)) => a == b,
            (a, b) => a.number() == b.number(),
        }
    }
}

impl From<Int> for Value {
    fn from(x: Int) -> Self {
        Self::Number(x.into())
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Self::Number(x.into())
    }
}

impl From<Float> for Value {
    fn from(x: Float) -> Self {
        Self::Number(x.into())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier::new().stringify(self))
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse::parse(s)
    }
}
