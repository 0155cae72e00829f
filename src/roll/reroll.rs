use super::{RollContext, Roller};
use crate::common::*;
use crate::value::{Domain, List, Number, Numeric, Value};
use crate::RResult;

/// How matching elements are replaced.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct RerollOptions {
    /// Keep the matching element in front of its replacement.
    pub keep_original: bool,
    /// Keep drawing while the replacement still matches.
    pub recursive: bool,
}

impl RerollOptions {
    pub const REROLL: Self = Self {
        keep_original: false,
        recursive: false,
    };
    pub const REROLL_RECURSIVE: Self = Self {
        keep_original: false,
        recursive: true,
    };
    pub const EXPLODE: Self = Self {
        keep_original: true,
        recursive: false,
    };
    pub const EXPLODE_RECURSIVE: Self = Self {
        keep_original: true,
        recursive: true,
    };

    pub const fn symbol(self) -> &'static str {
        match (self.keep_original, self.recursive) {
            (false, false) => "r",
            (false, true) => "rr",
            (true, false) => "x",
            (true, true) => "xr",
        }
    }
}

impl<R: Roller> RollContext<R> {
    /// Replaces every element of `input` that satisfies `cmp` against
    /// `threshold` with a fresh die.
    ///
    /// Dice are redrawn from their own domain; plain numbers from
    /// [`Domain::inferred`]. Running out of quota part-way stops drawing
    /// without failing: from then on a matching element is kept once when
    /// exploding and dropped when rerolling, while the rest pass through.
    pub fn reroll(
        &mut self,
        input: &List,
        cmp: Comparator,
        threshold: Number,
        options: RerollOptions,
    ) -> RResult<List> {
        let budget = self.budget()?;
        tracing::debug!(len = input.len(), %cmp, %threshold, ?options, budget, "rerolling");

        let mut output = Vec::with_capacity(input.len());
        let mut used = 0;
        for element in input {
            if !cmp.compare(element.number(), threshold) {
                output.push(element.clone());
                continue;
            }
            if options.keep_original {
                output.push(element.clone());
            }
            if used == budget {
                continue;
            }

            let domain = match element {
                Value::Die(die) => die.domain().clone(),
                other => Domain::inferred(other.number()),
            };

            loop {
                let die = self.draw(&domain);
                used += 1;
                let again = options.recursive && cmp.compare(die.value(), threshold);
                output.push(Value::Die(die));
                if !again {
                    break;
                }
                if used == budget {
                    tracing::debug!(used, "reroll truncated by quota");
                    break;
                }
            }
        }
        self.charge(used);

        let output = List::new(output);
        self.record(
            || {
                format!(
                    "{}{}{}{}",
                    Value::List(input.clone()).to_code(),
                    options.symbol(),
                    cmp,
                    threshold
                )
            },
            &output,
        );
        Ok(output)
    }
}
