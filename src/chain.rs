//! Ordered, fail-fast rule chains.
//!
//! A [`RuleChain`] evaluates its rules in insertion order and returns the
//! first rejection without running the rules after it. A chain is itself a
//! [`Rule`], so chains nest.
//!
//! Two chains are pre-built:
//!
//! | Chain | Rules |
//! |-------|-------|
//! | Live  | [`LuhnRule`], [`BrandLengthRule`], [`ExpirationRule`] |
//! | Test  | [`TestCardRule`] (sentinel number, then expiration) |

use std::fmt;

use crate::brand::BrandLengthRule;
use crate::card::CardRecord;
use crate::expiry::{Clock, ExpirationRule, SystemClock};
use crate::luhn::LuhnRule;
use crate::mask::constant_time_eq_str;
use crate::rule::{Rejection, Rule, RuleResult};

/// The only number the test chain accepts.
pub const TEST_CARD_NUMBER: &str = "4242424242424242";

/// Reason reported when the test chain sees any other number.
pub const INVALID_TEST_NUMBER: &str = "Invalid card number. Must be 4242424242424242";

/// An ordered sequence of rules.
#[derive(Default)]
pub struct RuleChain {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleChain {
    /// Creates an empty chain. An empty chain accepts every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rule, builder style.
    #[must_use]
    pub fn with<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.push(rule);
        self
    }

    /// Appends a rule.
    pub fn push<R: Rule + 'static>(&mut self, rule: R) {
        self.rules.push(Box::new(rule));
    }

    /// Number of rules in the chain.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the chain has no rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Live chain reading the system clock.
    pub fn live() -> Self {
        Self::live_with_clock(SystemClock)
    }

    /// Live chain: Luhn checksum, brand length, then expiration.
    pub fn live_with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self::new()
            .with(LuhnRule::new())
            .with(BrandLengthRule::new())
            .with(ExpirationRule::with_clock(clock))
    }

    /// Test chain reading the system clock.
    pub fn test() -> Self {
        Self::test_with_clock(SystemClock)
    }

    /// Test chain: the sentinel number check followed by expiration.
    pub fn test_with_clock<C: Clock + 'static>(clock: C) -> Self {
        Self::new().with(TestCardRule::with_clock(clock))
    }
}

impl Rule for RuleChain {
    fn name(&self) -> &'static str {
        "chain"
    }

    fn evaluate(&self, card: &CardRecord) -> RuleResult {
        for rule in &self.rules {
            rule.evaluate(card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// Accepts only [`TEST_CARD_NUMBER`], then applies an owned expiration rule.
///
/// Intended for integration testing by API consumers; it is not a security
/// boundary.
#[derive(Debug, Clone, Default)]
pub struct TestCardRule<C = SystemClock> {
    expiration: ExpirationRule<C>,
}

impl TestCardRule<SystemClock> {
    /// Creates the rule reading the system clock.
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> TestCardRule<C> {
    /// Creates the rule with an injected clock for the expiration check.
    pub fn with_clock(clock: C) -> Self {
        Self {
            expiration: ExpirationRule::with_clock(clock),
        }
    }
}

impl<C: Clock> Rule for TestCardRule<C> {
    fn name(&self) -> &'static str {
        "test_card"
    }

    fn evaluate(&self, card: &CardRecord) -> RuleResult {
        if !constant_time_eq_str(card.number(), TEST_CARD_NUMBER) {
            return Err(Rejection::new(self.name(), INVALID_TEST_NUMBER));
        }

        self.expiration.evaluate(card)
    }
}
