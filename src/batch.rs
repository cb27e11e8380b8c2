//! Batch validation of many records against one chain.
//!
//! Chains are read-only after construction, so a batch can be spread across
//! threads with the `parallel` feature (rayon) without any locking.
//! Results always come back in input order.

use crate::card::CardRecord;
use crate::rule::{Rejection, Rule};
use crate::service::Verdict;

/// Runs one chain (or any rule) over slices of records.
///
/// # Example
///
/// ```
/// use card_validator::{BatchValidator, CardRecord, RuleChain};
///
/// let chain = RuleChain::live();
/// let batch = BatchValidator::new(&chain);
/// let cards = vec![
///     CardRecord::new("4111111111111111", "12", "2099"),
///     CardRecord::new("4111111111111112", "12", "2099"),
/// ];
///
/// let verdicts = batch.validate_all(&cards);
/// assert!(verdicts[0].is_valid());
/// assert_eq!(verdicts[1].reason(), "Invalid card number");
/// assert_eq!(batch.count_valid(&cards), (1, 1));
/// ```
#[derive(Clone, Copy)]
pub struct BatchValidator<'a> {
    rule: &'a dyn Rule,
}

impl<'a> BatchValidator<'a> {
    /// Creates a batch validator over `rule`, usually a [`RuleChain`](crate::RuleChain).
    #[inline]
    pub fn new(rule: &'a dyn Rule) -> Self {
        Self { rule }
    }

    /// Validates every record, returning one verdict per record.
    pub fn validate_all(&self, cards: &[CardRecord]) -> Vec<Verdict> {
        cards.iter().map(|c| self.rule.evaluate(c).into()).collect()
    }

    /// Returns the indices of the records that passed.
    pub fn validate_valid_only(&self, cards: &[CardRecord]) -> Vec<usize> {
        cards
            .iter()
            .enumerate()
            .filter(|(_, c)| self.rule.evaluate(c).is_ok())
            .map(|(i, _)| i)
            .collect()
    }

    /// Splits a batch into indices of valid records and indexed rejections.
    pub fn validate_partitioned(
        &self,
        cards: &[CardRecord],
    ) -> (Vec<usize>, Vec<(usize, Rejection)>) {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for (i, card) in cards.iter().enumerate() {
            match self.rule.evaluate(card) {
                Ok(()) => valid.push(i),
                Err(rejection) => invalid.push((i, rejection)),
            }
        }

        (valid, invalid)
    }

    /// Counts valid and invalid records without allocating results.
    ///
    /// # Returns
    ///
    /// Tuple of (valid_count, invalid_count)
    pub fn count_valid(&self, cards: &[CardRecord]) -> (usize, usize) {
        let valid = cards
            .iter()
            .filter(|c| self.rule.evaluate(c).is_ok())
            .count();
        (valid, cards.len() - valid)
    }

    /// Validates records in parallel using rayon.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn validate_parallel(&self, cards: &[CardRecord]) -> Vec<Verdict> {
        use rayon::prelude::*;
        let rule = self.rule;
        cards.par_iter().map(|c| rule.evaluate(c).into()).collect()
    }

    /// Counts valid and invalid records in parallel.
    ///
    /// # Feature
    ///
    /// Requires the `parallel` feature to be enabled.
    #[cfg(feature = "parallel")]
    pub fn count_valid_parallel(&self, cards: &[CardRecord]) -> (usize, usize) {
        use rayon::prelude::*;
        let rule = self.rule;
        let valid = cards
            .par_iter()
            .filter(|c| rule.evaluate(c).is_ok())
            .count();
        (valid, cards.len() - valid)
    }
}

impl std::fmt::Debug for BatchValidator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchValidator")
            .field("rule", &self.rule.name())
            .finish()
    }
}
