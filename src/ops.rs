use crate::common::*;
use crate::roll::{
    keep_by_count, partition_by, Action, Outcome, Rank, RerollOptions, RollContext, Roller,
    LAST_DROPPED, LAST_UNTIL,
};
use crate::value::{Numeric, Value};
use crate::{RResult, RollError};
use std::fmt;
use std::str::FromStr;

/// The dice operators, named by the symbol they are written with.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DiceOperator {
    /// `d`: roll `left` dice with domain `right`.
    Roll,
    /// `u<cmp>`: roll from `left` until a die satisfies the comparison.
    RollUntil(Comparator),
    /// `r`, `rr`, `x` and `xr`, each optionally followed by a comparator.
    Reroll(RerollOptions, Comparator),
    KeepHighest,
    KeepLowest,
    DropHighest,
    DropLowest,
    /// `k<cmp>`
    KeepWhere(Comparator),
    /// `d<cmp>`: drops what `k<cmp>` would keep.
    DropWhere(Comparator),
}

impl DiceOperator {
    /// Applies the operator to already evaluated operands.
    ///
    /// Counts and thresholds given as lists are summed, and a scalar given
    /// where a list is consumed is treated as a one-element list. Keep/drop
    /// operators publish the partition they did not return as `_d`;
    /// roll-until publishes its terminating die as `_u`.
    pub fn apply<R: Roller>(
        self,
        ctx: &mut RollContext<R>,
        left: &Value,
        right: &Value,
    ) -> RResult<Value> {
        tracing::debug!(op = %self, left = %left.to_code(), right = %right.to_code(), "applying");
        let threshold = right.number();
        let outcome = match self {
            Self::Roll => return ctx.roll(left.number(), right).map(Value::List),
            Self::Reroll(options, cmp) => {
                return ctx
                    .reroll(&left.to_list(), cmp, threshold, options)
                    .map(Value::List)
            }
            Self::RollUntil(cmp) => {
                let outcome = ctx.roll_until(left, cmp, threshold)?;
                return Ok(publish(ctx, LAST_UNTIL, outcome));
            }
            Self::KeepHighest => keep(left, right, Action::Keep, Rank::Highest),
            Self::KeepLowest => keep(left, right, Action::Keep, Rank::Lowest),
            Self::DropHighest => keep(left, right, Action::Drop, Rank::Highest),
            Self::DropLowest => keep(left, right, Action::Drop, Rank::Lowest),
            Self::KeepWhere(cmp) => partition_by(&left.to_list(), cmp, threshold),
            Self::DropWhere(cmp) => partition_by(&left.to_list(), cmp.opposite(), threshold),
        };
        Ok(publish(ctx, LAST_DROPPED, outcome))
    }

    /// Applies the one-operand form. Only `d` has one: it rolls a single
    /// die from `operand`.
    pub fn apply_prefix<R: Roller>(
        self,
        ctx: &mut RollContext<R>,
        operand: &Value,
    ) -> RResult<Value> {
        match self {
            Self::Roll => {
                tracing::debug!(operand = %operand.to_code(), "applying prefix roll");
                ctx.roll_one(operand).map(Value::Die)
            }
            other => Err(RollError::invalid(format!("`{}` needs two operands", other))),
        }
    }
}

fn keep(left: &Value, right: &Value, action: Action, rank: Rank) -> Outcome {
    keep_by_count(&left.to_list(), right.number().as_int(), action, rank)
}

fn publish<R: Roller>(ctx: &mut RollContext<R>, slot: &str, outcome: Outcome) -> Value {
    ctx.scope_mut().set(slot, outcome.side);
    Value::List(outcome.value)
}

impl fmt::Display for DiceOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Roll => f.write_str("d"),
            Self::RollUntil(cmp) => write!(f, "u{}", cmp),
            Self::Reroll(options, cmp) => write!(f, "{}{}", options.symbol(), cmp),
            Self::KeepHighest => f.write_str("kh"),
            Self::KeepLowest => f.write_str("kl"),
            Self::DropHighest => f.write_str("dh"),
            Self::DropLowest => f.write_str("dl"),
            Self::KeepWhere(cmp) => write!(f, "k{}", cmp),
            Self::DropWhere(cmp) => write!(f, "d{}", cmp),
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown dice operator {0:?}")]
pub struct UnknownOperator(pub String);

const REROLL_PREFIXES: [(&str, RerollOptions); 4] = [
    ("xr", RerollOptions::EXPLODE_RECURSIVE),
    ("rr", RerollOptions::REROLL_RECURSIVE),
    ("x", RerollOptions::EXPLODE),
    ("r", RerollOptions::REROLL),
];

impl FromStr for DiceOperator {
    type Err = UnknownOperator;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownOperator(s.to_string());
        match s {
            "d" => return Ok(Self::Roll),
            "k" | "kh" => return Ok(Self::KeepHighest),
            "kl" => return Ok(Self::KeepLowest),
            "dh" => return Ok(Self::DropHighest),
            "dl" => return Ok(Self::DropLowest),
            _ => {}
        }

        for (prefix, options) in REROLL_PREFIXES {
            if let Some(rest) = s.strip_prefix(prefix) {
                let cmp = match rest {
                    "" => Comparator::Eq,
                    rest => rest.parse().map_err(|_| unknown())?,
                };
                return Ok(Self::Reroll(options, cmp));
            }
        }

        let (head, rest) = s.split_at(s.chars().next().map_or(0, char::len_utf8));
        let cmp: Comparator = rest.parse().map_err(|_| unknown())?;
        match head {
            "u" => Ok(Self::RollUntil(cmp)),
            "k" => Ok(Self::KeepWhere(cmp)),
            "d" => Ok(Self::DropWhere(cmp)),
            _ => Err(unknown()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::Quota;
    use crate::test_utils::{d10_faces, replay};
    use crate::value::List;
    use pretty_assertions::assert_eq;

    fn op(s: &str) -> DiceOperator {
        s.parse().unwrap()
    }

    fn list(s: &str) -> Value {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        for s in [
            "d", "kh", "kl", "dh", "dl", "u=", "u<=", "r=", "rr>", "x!=", "xr>=", "k%", "d!%",
            "k<", "d>",
        ] {
            assert_eq!(s, op(s).to_string());
        }
        assert_eq!(DiceOperator::KeepHighest, op("k"));
        assert_eq!(DiceOperator::Reroll(RerollOptions::EXPLODE, Comparator::Eq), op("x"));
        assert_eq!(
            DiceOperator::Reroll(RerollOptions::REROLL_RECURSIVE, Comparator::Eq),
            op("rr")
        );
    }

    #[test]
    fn test_parse_unknown() {
        for s in ["", "q", "u", "k=>", "xx", "dd", "ü="] {
            assert_eq!(Err(UnknownOperator(s.to_string())), s.parse::<DiceOperator>());
        }
    }

    #[test]
    fn test_roll_sums_list_count() {
        let mut ctx = replay(&[0]);
        let out = op("d").apply(&mut ctx, &list("[1,2]"), &Value::from(6)).unwrap();
        assert_eq!("[1,1,1]", out.to_string());
    }

    #[test]
    fn test_prefix_roll() {
        let mut ctx = replay(&[19]);
        let out = op("d").apply_prefix(&mut ctx, &Value::from(20)).unwrap();
        assert_eq!("{!die,20,20}", out.to_code());
        assert!(matches!(
            op("kh").apply_prefix(&mut ctx, &Value::from(20)),
            Err(RollError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_until_publishes_terminating_die() {
        let mut ctx = replay(&d10_faces(&[3, 7, 1, 4, 3, 7, 9, 5]));
        let out = op("u=").apply(&mut ctx, &Value::from(10), &Value::from(5)).unwrap();
        assert_eq!("[3,7,1,4,3,7,9]", out.to_string());
        assert_eq!(Some(&Value::from(5)), ctx.scope().get(LAST_UNTIL));
    }

    #[test]
    fn test_until_miss_publishes_zero() {
        let indices = d10_faces(&[3, 7, 1, 4, 3, 7, 9]);
        let mut ctx = replay(&indices).with_quota(Quota::new(7, 1000));
        let out = op("u=").apply(&mut ctx, &Value::from(10), &Value::from(5)).unwrap();
        assert_eq!("[3,7,1,4,3,7,9]", out.to_string());
        assert_eq!(Some(&Value::from(0)), ctx.scope().get(LAST_UNTIL));
    }

    #[test]
    fn test_keep_publishes_dropped() {
        let mut ctx = replay(&[0]);
        let rolls = list("[3,7,1,4,3,7,9]");
        let out = op("kh").apply(&mut ctx, &rolls, &Value::from(4)).unwrap();
        assert_eq!("[7,4,7,9]", out.to_string());
        assert_eq!(Some(&list("[3,1,3]")), ctx.scope().get(LAST_DROPPED));

        let out = op("dl").apply(&mut ctx, &rolls, &Value::from(1)).unwrap();
        assert_eq!("[3,7,4,3,7,9]", out.to_string());
        assert_eq!(Some(&list("[1]")), ctx.scope().get(LAST_DROPPED));
    }

    #[test]
    fn test_keep_and_drop_by_comparison() {
        let mut ctx = replay(&[0]);
        let rolls = list("[3,7,1,4,3,7,9]");
        let out = op("k%").apply(&mut ctx, &rolls, &Value::from(3)).unwrap();
        assert_eq!("[3,3,9]", out.to_string());
        assert_eq!(Some(&list("[7,1,4,7]")), ctx.scope().get(LAST_DROPPED));

        let out = op("d>").apply(&mut ctx, &rolls, &Value::from(4)).unwrap();
        assert_eq!("[3,1,4,3]", out.to_string());
        assert_eq!(Some(&list("[7,7,9]")), ctx.scope().get(LAST_DROPPED));
    }

    #[test]
    fn test_reroll_promotes_scalar() {
        let mut ctx = replay(&[4]);
        let die: Value = "{!die,1,6}".parse().unwrap();
        let out = op("r").apply(&mut ctx, &die, &Value::from(1)).unwrap();
        assert_eq!("[{!die,5,6}]", out.to_code());

        let out = op("x>").apply(&mut ctx, &Value::from(2), &Value::from(9)).unwrap();
        assert_eq!(Value::List(List::new(vec![Value::from(2)])), out);
    }

    #[test]
    fn test_side_channel_survives_repeat() {
        let mut ctx = replay(&[0, 5]);
        ctx.repeat(2.into(), |ctx, _| {
            let dice = op("d").apply(ctx, &Value::from(2), &Value::from(6))?;
            op("kh").apply(ctx, &dice, &Value::from(1))
        })
        .unwrap();
        assert_eq!(Some(&list("[1]")), ctx.scope().get(LAST_DROPPED));
    }
}
