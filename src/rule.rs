//! The rule abstraction shared by every check and by chains.
//!
//! A rule is a stateless predicate over a [`CardRecord`]. A passing rule
//! returns `Ok(())`; a failing one returns a [`Rejection`] carrying a
//! human-readable reason. Rejections are ordinary data, not errors: they end
//! up in a [`Verdict`](crate::Verdict), never in a `ServiceError`.

use std::borrow::Cow;
use std::fmt;

use crate::card::CardRecord;

/// Outcome of evaluating one rule.
pub type RuleResult = Result<(), Rejection>;

/// A single validation rule.
///
/// Implementations must not keep per-invocation state; any configuration is
/// fixed at construction. `Send + Sync` lets one chain serve concurrent
/// requests without locking.
pub trait Rule: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &'static str;

    /// Evaluates the rule against a card record.
    fn evaluate(&self, card: &CardRecord) -> RuleResult;
}

impl<R: Rule + ?Sized> Rule for Box<R> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn evaluate(&self, card: &CardRecord) -> RuleResult {
        (**self).evaluate(card)
    }
}

/// Why a rule rejected a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    rule: &'static str,
    reason: Cow<'static, str>,
}

impl Rejection {
    /// Creates a rejection attributed to `rule`.
    pub fn new(rule: &'static str, reason: impl Into<Cow<'static, str>>) -> Self {
        Self {
            rule,
            reason: reason.into(),
        }
    }

    /// Name of the rule that failed.
    #[inline]
    pub fn rule(&self) -> &'static str {
        self.rule
    }

    /// Human-readable failure reason.
    #[inline]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.rule, self.reason)
    }
}
