use crate::common::*;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Copy, Clone)]
pub enum Number {
    Int(Int),
    Float(Float),
}

impl Number {
    pub const ZERO: Self = Self::Int(0);

    /// Truncates toward zero.
    pub fn as_int(self) -> Int {
        match self {
            Self::Int(x) => x,
            Self::Float(x) => x as Int,
        }
    }

    pub fn as_float(self) -> Float {
        match self {
            Self::Int(x) => x as Float,
            Self::Float(x) => x,
        }
    }

    pub fn abs(self) -> Self {
        match self {
            Self::Int(x) => x.checked_abs().map_or(Self::Float((x as Float).abs()), Self::Int),
            Self::Float(x) => Self::Float(x.abs()),
        }
    }

    pub fn is_integral(self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Float(x) => x.fract() == 0.0,
        }
    }

    pub(crate) fn is_multiple_of(self, divisor: Self) -> bool {
        match (self, divisor) {
            (_, d) if d == Self::ZERO => false,
            (Self::Int(x), Self::Int(y)) => x.checked_rem(y).map_or(true, |r| r == 0),
            (x, y) => x.as_float() % y.as_float() == 0.0,
        }
    }
}

impl std::ops::Add for Number {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Int(x), Self::Int(y)) => x
                .checked_add(y)
                .map_or(Self::Float(x as Float + y as Float), Self::Int),
            (x, y) => Self::Float(x.as_float() + y.as_float()),
        }
    }
}

impl std::ops::Neg for Number {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            Self::Int(x) => x.checked_neg().map_or(Self::Float(-(x as Float)), Self::Int),
            Self::Float(x) => Self::Float(-x),
        }
    }
}

impl std::iter::Sum for Number {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |a, b| a + b)
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x == y,
            (x, y) => x.as_float() == y.as_float(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(x), Self::Int(y)) => x.partial_cmp(y),
            (x, y) => x.as_float().partial_cmp(&y.as_float()),
        }
    }
}

impl From<Int> for Number {
    fn from(x: Int) -> Self {
        Self::Int(x)
    }
}

impl From<i32> for Number {
    fn from(x: i32) -> Self {
        Self::Int(x.into())
    }
}

impl From<Float> for Number {
    fn from(x: Float) -> Self {
        Self::Float(x)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(x) => fmt::Display::fmt(x, f),
            // never exponent notation
            Self::Float(x) => fmt::Display::fmt(x, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_equality() {
        assert_eq!(Number::Int(3), Number::Float(3.0));
        assert_ne!(Number::Int(3), Number::Float(3.5));
        assert!(Number::Int(3) < Number::Float(3.5));
    }

    #[test]
    fn test_as_int_truncates() {
        assert_eq!(3, Number::Float(3.9).as_int());
        assert_eq!(-3, Number::Float(-3.9).as_int());
    }

    #[test]
    fn test_add_overflow_widens() {
        let sum = Number::Int(Int::MAX) + Number::Int(1);
        assert!(matches!(sum, Number::Float(_)));
    }

    #[test]
    fn test_display() {
        assert_eq!("-4", Number::Int(-4).to_string());
        assert_eq!("2.5", Number::Float(2.5).to_string());
        assert_eq!("100000000000000000000", Number::Float(1e20).to_string());
    }
}
