mod ctx;
mod dice;
mod keep;
mod quota;
mod repeat;
mod reroll;
mod roller;
mod scope;

use crate::value::{List, Value};

pub use ctx::{DefaultRoller, HistoryEntry, RollContext};
pub use keep::{keep_by_count, partition_by, Action, Rank};
pub use quota::Quota;
pub use reroll::RerollOptions;
pub use roller::{Roller, SequenceRoller};
pub use scope::{Scope, LAST_DROPPED, LAST_UNTIL, LOOP_INDEX};

/// What an operator returns, plus the value it publishes on the side
/// (the dropped partition, or the die that ended a roll-until).
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub value: List,
    pub side: Value,
}
