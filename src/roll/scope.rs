use crate::common::*;
use crate::value::Value;
use std::collections::HashMap;

/// Where keep/drop operators publish the partition they did not return.
pub const LAST_DROPPED: &str = "_d";
/// Where roll-until publishes the draw that ended it.
pub const LAST_UNTIL: &str = "_u";
/// The index of the current repeat iteration.
pub const LOOP_INDEX: &str = "_i";

/// Variable bindings, innermost frame last.
#[derive(Debug, Clone)]
pub struct Scope {
    frames: NonEmpty<HashMap<String, Value>>,
}

impl Scope {
    pub fn new() -> Self {
        Self {
            frames: vec1![HashMap::new()],
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    /// Assigns to the innermost frame that already binds `name`, or to the
    /// outermost frame if none does.
    pub fn set(&mut self, name: &str, value: Value) {
        let frame = match self.frames.iter().rposition(|frame| frame.contains_key(name)) {
            Some(i) => &mut self.frames[i],
            None => self.frames.first_mut(),
        };
        frame.insert(name.to_string(), value);
    }

    /// Binds `name` in the innermost frame, shadowing any outer binding.
    pub fn bind(&mut self, name: &str, value: Value) {
        self.frames.last_mut().insert(name.to_string(), value);
    }

    pub fn push_frame(&mut self) {
        self.frames.push(HashMap::new());
    }

    /// Drops the innermost frame. The outermost frame is never popped.
    pub fn pop_frame(&mut self) {
        let _ = self.frames.pop();
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
