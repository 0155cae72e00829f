use crate::common::{NonEmpty, Sides};
use rand::Rng;

/// The only source of nondeterminism the engine reads.
pub trait Roller {
    /// Picks an index in `0..sides`.
    fn roll_index(&mut self, sides: Sides) -> usize;
}

impl<R: Rng> Roller for R {
    fn roll_index(&mut self, sides: Sides) -> usize {
        self.gen_range(0..sides.get())
    }
}

/// Replays a fixed list of indices, wrapping around at the end.
///
/// Each index is reduced modulo the side count it is asked for, so one
/// sequence can drive dice of any size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceRoller {
    indices: NonEmpty<usize>,
    position: usize,
}

impl SequenceRoller {
    pub fn new(indices: NonEmpty<usize>) -> Self {
        Self {
            indices,
            position: 0,
        }
    }

    pub fn from_slice(indices: &[usize]) -> Option<Self> {
        NonEmpty::try_from_vec(indices.to_vec()).ok().map(Self::new)
    }

    /// How many indices have been handed out so far.
    pub fn draws(&self) -> usize {
        self.position
    }
}

impl Roller for SequenceRoller {
    fn roll_index(&mut self, sides: Sides) -> usize {
        let raw = self.indices[self.position % self.indices.len()];
        self.position += 1;
        raw % sides.get()
    }
}
