use super::{Outcome, RollContext, Roller};
use crate::common::*;
use crate::value::{Die, Domain, List, Number, Value};
use crate::{RResult, RollError};

/// A roll count: truncated toward zero and required to be positive.
fn dice_count(count: Number) -> RResult<usize> {
    usize::try_from(count.as_int())
        .ok()
        .filter(|&n| n > 0)
        .ok_or_else(|| RollError::invalid("The number of dice to roll must be positive."))
}

impl<R: Roller> RollContext<R> {
    /// Rolls `count` dice from `domain`.
    ///
    /// A number domain `n` rolls `1..=n`; a list domain picks one of its
    /// elements. The count is clamped to the remaining quota.
    pub fn roll(&mut self, count: Number, domain: &Value) -> RResult<List> {
        let requested = dice_count(count)?;
        let sides = Domain::from_value(domain)?;

        let budget = self.budget()?;
        let granted = requested.min(budget);
        if granted < requested {
            tracing::debug!(requested, granted, "dice roll truncated by quota");
        }
        tracing::debug!(count = granted, sides = %domain.to_code(), "rolling dice");
        self.charge(granted);

        let dice: List = (0..granted).map(|_| Value::Die(self.draw(&sides))).collect();
        self.record(|| format!("{}d{}", count, domain.to_code()), &dice);
        Ok(dice)
    }

    /// Rolls a single die from `domain` (the prefix form of [`Self::roll`]).
    pub fn roll_one(&mut self, domain: &Value) -> RResult<Die> {
        let sides = Domain::from_value(domain)?;
        self.budget()?;
        self.charge(1);

        let die = self.draw(&sides);
        self.record(
            || format!("1d{}", domain.to_code()),
            &List::new(vec![Value::Die(die.clone())]),
        );
        Ok(die)
    }

    /// Draws from `domain` until a die satisfies `cmp` against `threshold`.
    ///
    /// The misses are returned in draw order. The satisfying die is left out
    /// of that list and returned as the side result instead; if the quota
    /// runs out first the side result is zero.
    pub fn roll_until(
        &mut self,
        domain: &Value,
        cmp: Comparator,
        threshold: Number,
    ) -> RResult<Outcome> {
        let sides = Domain::from_value(domain)?;
        let budget = self.budget()?;
        tracing::debug!(sides = %domain.to_code(), %cmp, %threshold, budget, "rolling until");

        let mut misses = Vec::new();
        let mut hit = None;
        let mut draws = 0;
        while draws < budget {
            let die = self.draw(&sides);
            draws += 1;
            if cmp.compare(die.value(), threshold) {
                hit = Some(die);
                break;
            }
            misses.push(Value::Die(die));
        }
        self.charge(draws);

        let misses = List::new(misses);
        self.record(
            || format!("{}u{}{}", domain.to_code(), cmp, threshold),
            &misses,
        );
        let side = match hit {
            Some(die) => {
                let killed = List::new(vec![Value::Die(die.clone())]);
                self.record(|| "Killed above roll:".to_string(), &killed);
                Value::Die(die)
            }
            None => {
                tracing::debug!(draws, "roll-until ran out of quota");
                Value::Number(Number::ZERO)
            }
        };

        Ok(Outcome {
            value: misses,
            side,
        })
    }
}
