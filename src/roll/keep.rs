use super::Outcome;
use crate::common::*;
use crate::value::{List, Number, Numeric, Value};
use std::cmp::Ordering;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Action {
    Keep,
    Drop,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Rank {
    Highest,
    Lowest,
}

impl Rank {
    fn order(self, a: Number, b: Number) -> Ordering {
        let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self {
            Self::Highest => ord.reverse(),
            Self::Lowest => ord,
        }
    }
}

/// Splits `list` in input order into the elements `pred` accepts and the rest.
fn split(list: &List, mut pred: impl FnMut(Number) -> bool) -> (List, List) {
    let (yes, no): (Vec<Value>, Vec<Value>) = list
        .iter()
        .cloned()
        .partition(|value| pred(value.number()));
    (yes.into(), no.into())
}

/// Keeps or drops the `count` highest or lowest elements of `list`.
///
/// Elements are ranked by value in tiers of equal values, and a tier is
/// never split: when the last admitted tier overshoots `count`, all of it is
/// admitted. With [`Action::Keep`] the admitted elements are the value and
/// the rest the side result; [`Action::Drop`] swaps them. Both keep the
/// order of the input.
pub fn keep_by_count(list: &List, count: Int, action: Action, rank: Rank) -> Outcome {
    let (admitted, rest) = if count <= 0 {
        (List::default(), list.clone())
    } else if count as u64 >= list.len() as u64 {
        (list.clone(), List::default())
    } else {
        let mut tiers: Vec<Number> = list.iter().map(Numeric::number).collect();
        tiers.sort_by(|&a, &b| rank.order(a, b));
        tiers.dedup();

        let mut found = 0;
        let mut last_tier = None;
        for tier in tiers {
            found += list.iter().filter(|v| v.number() == tier).count();
            last_tier = Some(tier);
            if found as u64 >= count as u64 {
                break;
            }
        }

        match last_tier {
            Some(boundary) => split(list, |x| rank.order(x, boundary) != Ordering::Greater),
            None => (List::default(), list.clone()),
        }
    };

    let (value, side) = match action {
        Action::Keep => (admitted, rest),
        Action::Drop => (rest, admitted),
    };
    Outcome {
        value,
        side: Value::List(side),
    }
}

/// Partitions `list` into the elements satisfying `cmp` against `threshold`
/// (the value) and the rest (the side result).
pub fn partition_by(list: &List, cmp: Comparator, threshold: Number) -> Outcome {
    let (kept, dropped) = split(list, |x| cmp.compare(x, threshold));
    Outcome {
        value: kept,
        side: Value::List(dropped),
    }
}
