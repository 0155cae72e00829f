use super::{scope::LOOP_INDEX, RollContext, Roller};
use crate::common::*;
use crate::value::{List, Number, Value};
use crate::{RResult, RollError};

impl<R: Roller> RollContext<R> {
    /// Evaluates `body` `count` times and collects the results.
    ///
    /// Each iteration gets its own scope frame with `_i` bound to the
    /// iteration index, so nested repeats see their own index and an outer
    /// `_i` is visible again once the loop ends.
    pub fn repeat<F>(&mut self, count: Number, mut body: F) -> RResult<List>
    where
        F: FnMut(&mut Self, Int) -> RResult<Value>,
    {
        let count = count.as_int();
        if count < 0 {
            return Err(RollError::invalid("Cannot repeat a negative number of times."));
        }
        tracing::debug!(count, depth = self.scope().depth(), "repeating");

        let mut results = Vec::new();
        for index in 0..count {
            self.scope_mut().push_frame();
            self.scope_mut().bind(LOOP_INDEX, Value::from(index));
            let result = body(self, index);
            self.scope_mut().pop_frame();
            results.push(result?);
        }
        Ok(List::new(results))
    }
}
