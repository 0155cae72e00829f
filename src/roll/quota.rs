/// A leaky-bucket budget of random draws for one top-level evaluation.
///
/// A call that starts with nothing left fails outright; a call asking for
/// more than is left is silently clamped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Quota {
    /// Most draws any single operator call may make.
    pub per_roll_limit: usize,
    /// Most draws the whole evaluation may make.
    pub per_function_limit: usize,
    pub per_function_used: usize,
}

impl Quota {
    pub const fn new(per_roll_limit: usize, per_function_limit: usize) -> Self {
        Self {
            per_roll_limit,
            per_function_limit,
            per_function_used: 0,
        }
    }

    pub fn available(&self) -> usize {
        let remaining = self
            .per_function_limit
            .saturating_sub(self.per_function_used);
        self.per_roll_limit.min(remaining)
    }

    pub fn charge(&mut self, draws: usize) {
        self.per_function_used = self.per_function_used.saturating_add(draws);
    }

    pub fn reset(&mut self) {
        self.per_function_used = 0;
    }
}

impl Default for Quota {
    fn default() -> Self {
        Self::new(1000, 1000)
    }
}
