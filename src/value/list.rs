use super::{Number, Numeric, Value};
use std::fmt;

/// An ordered sequence of values. Operators never mutate a list; they build
/// new ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct List(Vec<Value>);

impl List {
    pub fn new(values: Vec<Value>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn values(&self) -> &[Value] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }

    /// Adds every element, summing nested lists recursively.
    pub fn sum(&self) -> Number {
        self.0.iter().map(Numeric::number).sum()
    }
}

impl Numeric for List {
    fn number(&self) -> Number {
        self.sum()
    }
}

impl From<Vec<Value>> for List {
    fn from(values: Vec<Value>) -> Self {
        Self(values)
    }
}

impl FromIterator<Value> for List {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::SimpleStringifier::new().stringify(self))
    }
}
