use super::{quota::Quota, roller::Roller, scope::Scope};
use crate::value::{Die, Domain, List};
use crate::{RResult, RollError};

pub type DefaultRoller = rand::rngs::ThreadRng;

/// One line of roll history: what was rolled, and what came out.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub label: String,
    pub result: List,
}

/// Mutable state shared by every operator call within one top-level
/// evaluation. Calls must be made in evaluation order for replays to match.
pub struct RollContext<R = DefaultRoller> {
    roller: R,
    quota: Option<Quota>,
    history: Option<Vec<HistoryEntry>>,
    scope: Scope,
}

impl<R: Roller> RollContext<R> {
    /// A context with no quota (unlimited draws) and no history.
    pub fn new(roller: R) -> Self {
        Self {
            roller,
            quota: None,
            history: None,
            scope: Scope::new(),
        }
    }

    pub fn with_quota(mut self, quota: Quota) -> Self {
        self.quota = Some(quota);
        self
    }

    pub fn with_history(mut self) -> Self {
        self.history = Some(Vec::new());
        self
    }

    pub fn roller(&self) -> &R {
        &self.roller
    }

    pub fn quota(&self) -> Option<&Quota> {
        self.quota.as_ref()
    }

    pub fn quota_mut(&mut self) -> Option<&mut Quota> {
        self.quota.as_mut()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut Scope {
        &mut self.scope
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.as_deref().unwrap_or_default()
    }

    pub fn take_history(&mut self) -> Vec<HistoryEntry> {
        self.history.as_mut().map(std::mem::take).unwrap_or_default()
    }

    /// Draws available to the call that is about to start.
    ///
    /// Fails when a quota is attached and already spent.
    pub(crate) fn budget(&self) -> RResult<usize> {
        match &self.quota {
            None => Ok(usize::MAX),
            Some(quota) => match quota.available() {
                0 => {
                    tracing::debug!(
                        used = quota.per_function_used,
                        limit = quota.per_function_limit,
                        "dice quota exhausted"
                    );
                    Err(RollError::QuotaExhausted)
                }
                n => Ok(n),
            },
        }
    }

    pub(crate) fn charge(&mut self, draws: usize) {
        if let Some(quota) = &mut self.quota {
            quota.charge(draws);
        }
    }

    pub(crate) fn draw(&mut self, domain: &Domain) -> Die {
        let index = self.roller.roll_index(domain.side_count());
        let die = Die::rolled(domain, index);
        tracing::trace!(index, value = %die.value(), "drew die");
        die
    }

    pub(crate) fn record(&mut self, label: impl FnOnce() -> String, result: &List) {
        if let Some(history) = &mut self.history {
            history.push(HistoryEntry {
                label: label(),
                result: result.clone(),
            });
        }
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(rand::thread_rng()).with_quota(Quota::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::replay;
    use crate::value::Value;

    #[test]
    fn test_budget_without_quota_is_unlimited() {
        let ctx = replay(&[0]);
        assert_eq!(Ok(usize::MAX), ctx.budget());
    }

    #[test]
    fn test_budget_hard_stop() {
        let mut ctx = replay(&[0]).with_quota(Quota::new(4, 10));
        assert_eq!(Ok(4), ctx.budget());
        ctx.charge(10);
        assert_eq!(Err(RollError::QuotaExhausted), ctx.budget());
    }

    #[test]
    fn test_history_is_opt_in() {
        let mut ctx = replay(&[0]);
        ctx.roll(1.into(), &Value::from(6)).unwrap();
        assert!(ctx.history().is_empty());

        let mut ctx = replay(&[0]).with_history();
        ctx.roll(1.into(), &Value::from(6)).unwrap();
        assert_eq!(1, ctx.history().len());
        assert_eq!(1, ctx.take_history().len());
        assert!(ctx.history().is_empty());
    }

    #[test]
    fn test_default_context_is_bounded() {
        let ctx = RollContext::default();
        assert_eq!(Some(&Quota::default()), ctx.quota());
    }
}
