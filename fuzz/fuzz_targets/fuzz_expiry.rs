//! Fuzz target for expiry parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input.

#![no_main]

use arbitrary::Arbitrary;
use chrono::{TimeZone, Utc};
use libfuzzer_sys::fuzz_target;
use card_validator::expiry::{self, ExpirationRule, FixedClock};
use card_validator::{CardRecord, Rule};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    exp_month: &'a str,
    exp_year: &'a str,
    now_secs: i32,
}

fuzz_target!(|input: Input<'_>| {
    let month = expiry::parse_month(input.exp_month);
    let year = expiry::parse_year(input.exp_year);

    if let (Some(month), Some(year)) = (month, year) {
        assert!((1..=12).contains(&month));
        assert!((0..=9999).contains(&year));
        assert!(expiry::expiration_boundary(month, year).is_some());
    }

    let Some(now) = Utc.timestamp_opt(i64::from(input.now_secs), 0).single() else {
        return;
    };
    let rule = ExpirationRule::with_clock(FixedClock::new(now));
    let _ = rule.evaluate(&CardRecord::new("", input.exp_month, input.exp_year));
});
