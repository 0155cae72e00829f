use super::{List, Number, Numeric, Value};
use crate::common::*;
use crate::{RResult, RollError};
use std::sync::Arc;

/// Side counts tried in order when a plain number has to be rerolled.
///
/// The smallest entry at least as large as the number's magnitude wins; past
/// the end of the table [`MAX_INFERRED_SIDES`] is used.
pub const INFERRED_SIDES: [usize; 10] = [
    6,
    20,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

pub const MAX_INFERRED_SIDES: usize = i32::MAX as usize;

/// The set of outcomes a die is rolled from.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// The integers `1..=n`.
    Sides(Sides),
    /// One of the listed values. Nested lists count as their sum.
    Faces(Arc<NonEmpty<Value>>),
}

impl Domain {
    /// Interprets an operand as a domain: numbers (and dice) give a side
    /// count, lists give their elements as faces.
    pub fn from_value(value: &Value) -> RResult<Self> {
        match value {
            Value::List(list) => NonEmpty::try_from_vec(list.values().to_vec())
                .map(|faces| Self::Faces(Arc::new(faces)))
                .map_err(|_| RollError::invalid("Dice must have at least one side.")),
            other => {
                let sides = other.number().as_int();
                usize::try_from(sides)
                    .ok()
                    .and_then(Sides::new)
                    .map(Self::Sides)
                    .ok_or_else(|| RollError::invalid("Dice must have at least one side."))
            }
        }
    }

    /// The side count used to reroll a value that has no recorded domain.
    pub fn inferred(value: Number) -> Self {
        let magnitude = value.abs();
        let sides = INFERRED_SIDES
            .into_iter()
            .find(|&sides| magnitude <= Number::Int(sides as Int))
            .unwrap_or(MAX_INFERRED_SIDES);
        Self::Sides(Sides::new(sides).unwrap_or(Sides::MIN))
    }

    pub fn side_count(&self) -> Sides {
        match self {
            Self::Sides(n) => *n,
            Self::Faces(faces) => Sides::new(faces.len()).unwrap_or(Sides::MIN),
        }
    }

    /// The numeric outcome at `index`, counting from zero.
    pub fn face(&self, index: usize) -> Number {
        match self {
            Self::Sides(_) => Number::Int(index as Int + 1),
            Self::Faces(faces) => faces[index].number(),
        }
    }

    pub fn contains(&self, value: Number) -> bool {
        match self {
            Self::Sides(n) => {
                value.is_integral()
                    && value >= Number::Int(1)
                    && value <= Number::Int(n.get() as Int)
            }
            Self::Faces(faces) => faces.iter().any(|face| face.number() == value),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Sides(n) => Value::Number(Number::Int(n.get() as Int)),
            Self::Faces(faces) => Value::List(faces.iter().cloned().collect::<List>()),
        }
    }
}

/// A rolled outcome that remembers the domain it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Die {
    value: Number,
    domain: Domain,
}

impl Die {
    /// Builds a die, checking that `value` is one of the outcomes of `domain`.
    pub fn new(value: impl Into<Number>, domain: Domain) -> RResult<Self> {
        let value = value.into();
        if domain.contains(value) {
            Ok(Self { value, domain })
        } else {
            Err(RollError::invalid(format!(
                "{} is not a possible outcome of a die with sides {}",
                value,
                domain.to_value().to_code()
            )))
        }
    }

    /// The `die(value, sides)` constructor function.
    pub fn from_operands(value: &Value, domain: &Value) -> RResult<Self> {
        Self::new(value.number(), Domain::from_value(domain)?)
    }

    pub(crate) fn rolled(domain: &Domain, index: usize) -> Self {
        Self {
            value: domain.face(index),
            domain: domain.clone(),
        }
    }

    pub fn value(&self) -> Number {
        self.value
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }
}

impl Numeric for Die {
    fn number(&self) -> Number {
        self.value
    }
}
