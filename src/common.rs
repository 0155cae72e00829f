use crate::value::Number;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
pub use vec1::vec1;

pub type Int = i64;

pub type Float = f64;

/// The number of outcomes a die can land on.
pub type Sides = NonZeroUsize;

pub type NonEmpty<T> = vec1::Vec1<T>;

/// A predicate between an element's value (on the left) and a threshold.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// The left value is a multiple of the right one.
    Divisible,
    NotDivisible,
}

impl Comparator {
    pub const ALL: [Self; 8] = [
        Self::Eq,
        Self::Ne,
        Self::Lt,
        Self::Le,
        Self::Gt,
        Self::Ge,
        Self::Divisible,
        Self::NotDivisible,
    ];

    /// The logical negation of this comparator.
    pub const fn opposite(self) -> Self {
        match self {
            Self::Eq => Self::Ne,
            Self::Ne => Self::Eq,
            Self::Lt => Self::Ge,
            Self::Ge => Self::Lt,
            Self::Gt => Self::Le,
            Self::Le => Self::Gt,
            Self::Divisible => Self::NotDivisible,
            Self::NotDivisible => Self::Divisible,
        }
    }

    pub fn compare(self, left: Number, right: Number) -> bool {
        match self {
            Self::Eq => left == right,
            Self::Ne => left != right,
            Self::Lt => left < right,
            Self::Le => left <= right,
            Self::Gt => left > right,
            Self::Ge => left >= right,
            Self::Divisible => left.is_multiple_of(right),
            Self::NotDivisible => !left.is_multiple_of(right),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Divisible => "%",
            Self::NotDivisible => "!%",
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown comparator {0:?}")]
pub struct UnknownComparator(pub String);

impl FromStr for Comparator {
    type Err = UnknownComparator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|cmp| cmp.as_str() == s)
            .ok_or_else(|| UnknownComparator(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_an_involution() {
        for cmp in Comparator::ALL {
            assert_eq!(cmp, cmp.opposite().opposite());
            assert_ne!(cmp, cmp.opposite());
        }
    }

    #[test]
    fn test_opposite_negates() {
        let values = [-3, 0, 2, 3, 5, 6, 9];
        for cmp in Comparator::ALL {
            for &l in &values {
                for &r in &values {
                    let (l, r) = (Number::from(l), Number::from(r));
                    assert_ne!(
                        cmp.compare(l, r),
                        cmp.opposite().compare(l, r),
                        "{} {} {}",
                        l,
                        cmp,
                        r
                    );
                }
            }
        }
    }

    #[test]
    fn test_divisible() {
        assert!(Comparator::Divisible.compare(9.into(), 3.into()));
        assert!(!Comparator::Divisible.compare(7.into(), 3.into()));
        assert!(Comparator::Divisible.compare(4.5.into(), 1.5.into()));
        assert!(!Comparator::Divisible.compare(0.into(), 0.into()));
        assert!(Comparator::NotDivisible.compare(5.into(), 0.into()));
    }

    #[test]
    fn test_parse_round_trips() {
        for cmp in Comparator::ALL {
            assert_eq!(Ok(cmp), cmp.to_string().parse());
        }
        assert_eq!(
            Err(UnknownComparator("=>".to_string())),
            "=>".parse::<Comparator>()
        );
    }
}
