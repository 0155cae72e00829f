//! Evaluation semantics for dice operators: rolling, rerolling and exploding,
//! keeping and dropping, rolling until a condition holds, and repeating a
//! sub-expression, all metered by a per-evaluation draw quota.
//!
//! Operands arrive already resolved to [`Value`]s. Every operation runs
//! against an explicit [`RollContext`] that owns the randomness source, the
//! optional [`Quota`], the roll history and the variable [`Scope`].
//!
//! ```
//! use dice_quota::{keep_by_count, Action, Quota, Rank, RollContext, SequenceRoller, Value};
//!
//! let roller = SequenceRoller::from_slice(&[2, 6, 0, 3]).unwrap();
//! let mut ctx = RollContext::new(roller).with_quota(Quota::new(4, 10));
//!
//! let dice = ctx.roll(4.into(), &Value::from(10)).unwrap();
//! assert_eq!(dice.to_string(), "[3,7,1,4]");
//!
//! let kept = keep_by_count(&dice, 2, Action::Keep, Rank::Highest);
//! assert_eq!(kept.value.to_string(), "[7,4]");
//! assert_eq!(kept.side.to_string(), "[3,1]");
//! ```

mod common;
mod error;
pub mod ops;
pub mod roll;
pub mod value;

pub use common::{Comparator, Float, Int, NonEmpty, Sides, UnknownComparator};
pub use error::RollError;
pub use ops::{DiceOperator, UnknownOperator};
pub use roll::{
    keep_by_count, partition_by, Action, DefaultRoller, HistoryEntry, Outcome, Quota, Rank,
    RerollOptions, RollContext, Roller, Scope, SequenceRoller,
};
pub use value::{Die, Domain, List, Number, Numeric, Value};

/// The result type shared by every fallible operation in this crate.
pub type RResult<T> = Result<T, RollError>;

#[cfg(test)]
pub(crate) mod test_utils {
    use crate::{RollContext, SequenceRoller};

    /// A context replaying `indices` with no quota attached.
    pub fn replay(indices: &[usize]) -> RollContext<SequenceRoller> {
        RollContext::new(SequenceRoller::from_slice(indices).expect("non-empty replay"))
    }

    /// Indices that make a d10 produce `faces` in order.
    pub fn d10_faces(faces: &[usize]) -> Vec<usize> {
        faces.iter().map(|f| f - 1).collect()
    }
}
