//! Expiration date rule.
//!
//! The record carries month and year as separate fields: `MM` and `YYYY`.
//! A card is valid through the whole of its expiration month, so the
//! effective boundary is 00:00 UTC on the first day of the following month.
//!
//! The current time is read through a [`Clock`], so the rule can be driven
//! deterministically in tests:
//!
//! ```
//! use card_validator::expiry::{ExpirationRule, FixedClock};
//! use card_validator::{CardRecord, Rule};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2028, 1, 31, 23, 59, 59).unwrap();
//! let rule = ExpirationRule::with_clock(FixedClock::new(now));
//!
//! assert!(rule.evaluate(&CardRecord::new("", "01", "2028")).is_ok());
//! assert!(rule.evaluate(&CardRecord::new("", "12", "2027")).is_err());
//! ```

use chrono::{DateTime, NaiveDate, Utc};

use crate::card::CardRecord;
use crate::rule::{Rejection, Rule, RuleResult};

/// Reason reported for a malformed or out-of-range month.
pub const INVALID_MONTH: &str = "Invalid expiration month";

/// Reason reported for a malformed year.
pub const INVALID_YEAR: &str = "Invalid expiration year";

/// Reason reported when the boundary has already passed.
pub const EXPIRED: &str = "Invalid expiration date. Must be in the future";

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock frozen at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Parses an exactly-two-digit month token (`01`-`12`).
pub fn parse_month(input: &str) -> Option<u32> {
    match input.as_bytes() {
        [a @ b'0'..=b'9', b @ b'0'..=b'9'] => {
            let month = u32::from(a - b'0') * 10 + u32::from(b - b'0');
            (1..=12).contains(&month).then_some(month)
        }
        _ => None,
    }
}

/// Parses an exactly-four-digit year token.
pub fn parse_year(input: &str) -> Option<i32> {
    let bytes = input.as_bytes();
    if bytes.len() != 4 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    Some(bytes.iter().fold(0, |acc, &d| acc * 10 + i32::from(d - b'0')))
}

/// Returns the first instant after a card expiring in `month`/`year` stops
/// being valid: midnight UTC on the first day of the next month.
pub fn expiration_boundary(month: u32, year: i32) -> Option<DateTime<Utc>> {
    let (year, month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Rule that rejects malformed or past expiration dates.
#[derive(Debug, Clone, Default)]
pub struct ExpirationRule<C = SystemClock> {
    clock: C,
}

impl ExpirationRule<SystemClock> {
    /// Creates the rule reading the system clock.
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> ExpirationRule<C> {
    /// Creates the rule with an injected clock.
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Returns the clock this rule reads.
    pub fn clock(&self) -> &C {
        &self.clock
    }
}

impl<C: Clock> Rule for ExpirationRule<C> {
    fn name(&self) -> &'static str {
        "expiration"
    }

    fn evaluate(&self, card: &CardRecord) -> RuleResult {
        let month =
            parse_month(card.exp_month()).ok_or_else(|| Rejection::new(self.name(), INVALID_MONTH))?;
        let year =
            parse_year(card.exp_year()).ok_or_else(|| Rejection::new(self.name(), INVALID_YEAR))?;

        // Four-digit years always have a next month in chrono's range.
        let boundary =
            expiration_boundary(month, year).ok_or_else(|| Rejection::new(self.name(), INVALID_YEAR))?;

        if self.clock.now() >= boundary {
            return Err(Rejection::new(self.name(), EXPIRED));
        }

        Ok(())
    }
}
