//! Integration tests for card_validator.
//!
//! These tests drive the public API end to end: service, factory, chains
//! and individual rules, with a fixed clock so expiry results are stable.

use card_validator::{
    BatchValidator, Brand, BrandLengthRule, CardRecord, ExpirationRule, FixedClock, LuhnRule,
    Rejection, Rule, RuleChain, RuleResult, ServiceError, TestCardRule, ValidationService,
    ValidatorFactory, ValidatorType, TEST_CARD_NUMBER,
};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// =============================================================================
// FIXTURES
// =============================================================================

mod test_cards {
    pub const VISA_16: &str = "4111111111111111";
    pub const VISA_13: &str = "4222222222222";
    pub const VISA_SENTINEL: &str = "4242424242424242";
    pub const VISA_BAD_CHECKSUM: &str = "4242424242424241";
    pub const VISA_15: &str = "424242424242424";
    pub const MC_16: &str = "5555555555554444";
    pub const MC_2: &str = "5105105105105100";
    pub const AMEX: &str = "378282246310005";
    pub const DINERS: &str = "30569309025904";
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 14, 9, 30, 0).unwrap()
}

fn service() -> ValidationService {
    ValidationService::with_clock(FixedClock::new(now()))
}

fn live(number: &str, month: &str, year: &str) -> card_validator::Verdict {
    service()
        .validate_card(&CardRecord::new(number, month, year), ValidatorType::Live)
        .unwrap()
}

fn test_mode(number: &str, month: &str, year: &str) -> card_validator::Verdict {
    service()
        .validate_card(&CardRecord::new(number, month, year), ValidatorType::Test)
        .unwrap()
}

// =============================================================================
// LIVE CHAIN
// =============================================================================

#[test]
fn test_live_accepts_known_good_cards() {
    for number in [
        test_cards::VISA_16,
        test_cards::VISA_13,
        test_cards::VISA_SENTINEL,
        test_cards::MC_16,
        test_cards::MC_2,
        test_cards::AMEX,
        test_cards::DINERS,
    ] {
        let verdict = live(number, "01", "2028");
        assert!(verdict.is_valid(), "{} should be valid: {:?}", number, verdict);
    }
}

#[test]
fn test_live_checksum_fails_regardless_of_other_fields() {
    for (month, year) in [("", ""), ("01", "2028"), ("13", "year")] {
        let verdict = live(test_cards::VISA_BAD_CHECKSUM, month, year);
        assert!(!verdict.is_valid());
        assert_eq!(verdict.reason(), "Invalid card number");
    }
}

#[test]
fn test_live_length_failure() {
    let verdict = live(test_cards::VISA_15, "01", "2028");
    assert!(!verdict.is_valid());
    assert_eq!(verdict.reason(), "Invalid card number length. Must be 13 or 16");
}

#[test]
fn test_live_expiration_failure() {
    let verdict = live(test_cards::VISA_SENTINEL, "01", "2020");
    assert!(!verdict.is_valid());
    assert_eq!(verdict.reason(), "Invalid expiration date. Must be in the future");
}

#[test]
fn test_live_rejects_separators_instead_of_stripping() {
    for number in ["4111-1111-1111-1111", "4111 1111 1111 1111", " 4111111111111111"] {
        assert_eq!(live(number, "01", "2028").reason(), "invalid digit");
    }
}

#[test]
fn test_live_empty_number_is_judged_by_expiry() {
    // Empty sums to zero and has no brand, so only expiry can reject it.
    assert!(live("", "01", "2028").is_valid());
    assert_eq!(live("", "", "").reason(), "Invalid expiration month");
}

#[test]
fn test_live_mastercard_length() {
    // 15-digit number with a 5 prefix that passes Luhn
    let number = "500000000000005";
    assert!(card_validator::passes_luhn(number));
    assert_eq!(
        live(number, "01", "2028").reason(),
        "Invalid card number length. Must be 16"
    );
}

// =============================================================================
// TEST CHAIN
// =============================================================================

#[test]
fn test_test_chain_accepts_only_sentinel() {
    assert!(test_mode(TEST_CARD_NUMBER, "01", "2028").is_valid());

    for number in [test_cards::VISA_16, test_cards::VISA_BAD_CHECKSUM, "", "42424242424242420"] {
        let verdict = test_mode(number, "01", "2028");
        assert_eq!(verdict.reason(), "Invalid card number. Must be 4242424242424242");
    }
}

#[test]
fn test_test_chain_number_message_wins_over_bad_expiry() {
    let verdict = test_mode(test_cards::VISA_16, "01", "2020");
    assert_eq!(verdict.reason(), "Invalid card number. Must be 4242424242424242");
}

#[test]
fn test_test_chain_still_checks_expiry() {
    assert_eq!(
        test_mode(TEST_CARD_NUMBER, "01", "2020").reason(),
        "Invalid expiration date. Must be in the future"
    );
    assert_eq!(
        test_mode(TEST_CARD_NUMBER, "January", "2028").reason(),
        "Invalid expiration month"
    );
    assert_eq!(
        test_mode(TEST_CARD_NUMBER, "01", "28").reason(),
        "Invalid expiration year"
    );
}

// =============================================================================
// EXPIRATION BOUNDARIES
// =============================================================================

#[test]
fn test_expiry_boundary_is_end_of_month_inclusive() {
    let last_moment = Utc.with_ymd_and_hms(2028, 1, 31, 23, 59, 59).unwrap();
    let first_of_next = Utc.with_ymd_and_hms(2028, 2, 1, 0, 0, 0).unwrap();
    let card = CardRecord::new("", "01", "2028");

    assert!(ExpirationRule::with_clock(FixedClock::new(last_moment))
        .evaluate(&card)
        .is_ok());
    assert!(ExpirationRule::with_clock(FixedClock::new(first_of_next))
        .evaluate(&card)
        .is_err());
}

#[test]
fn test_expiry_current_month_passes() {
    assert!(live(test_cards::VISA_16, "10", "2026").is_valid());
    assert!(!live(test_cards::VISA_16, "09", "2026").is_valid());
}

#[test]
fn test_expiry_malformed_fields() {
    let rule = ExpirationRule::with_clock(FixedClock::new(now()));
    let reason = |month: &str, year: &str| {
        rule.evaluate(&CardRecord::new("", month, year))
            .unwrap_err()
            .reason()
            .to_string()
    };

    assert_eq!(reason("13", "2028"), "Invalid expiration month");
    assert_eq!(reason("January", "2028"), "Invalid expiration month");
    assert_eq!(reason("01", "-190"), "Invalid expiration year");
    assert_eq!(reason("01", "year"), "Invalid expiration year");
}

// =============================================================================
// INDIVIDUAL RULES
// =============================================================================

#[test]
fn test_luhn_rule_examples() {
    let rule = LuhnRule::new();
    assert!(rule.evaluate(&CardRecord::with_number("4111111111111111")).is_ok());
    assert!(rule.evaluate(&CardRecord::with_number("4242424242424242")).is_ok());
    assert!(rule.evaluate(&CardRecord::with_number("4242424242424241")).is_err());
}

#[test]
fn test_brand_length_rule_examples() {
    let rule = BrandLengthRule::new();
    let ok = |n: &str| rule.evaluate(&CardRecord::with_number(n)).is_ok();

    assert!(ok("4000000000000000"));
    assert!(ok("4000000000000"));
    assert!(!ok("40000000000000"));
    assert!(!ok("400000000000000"));
    assert!(ok("5000000000000000"));
    assert!(!ok("500000000000000"));
    assert!(ok("6"));
    assert_eq!(Brand::detect("5"), Brand::Mastercard);
}

// =============================================================================
// SELECTOR AND SERVICE ERRORS
// =============================================================================

#[test]
fn test_unknown_validator_name_is_an_error_not_a_verdict() {
    let result = service().validate_card_named(&CardRecord::with_number(TEST_CARD_NUMBER), "prod");
    assert_eq!(
        result,
        Err(ServiceError::UnknownValidatorType("prod".to_string()))
    );
}

#[test]
fn test_factory_without_chain_reports_error() {
    let factory = ValidatorFactory::empty().with_chain(
        ValidatorType::Live,
        RuleChain::live_with_clock(FixedClock::new(now())),
    );
    let service = ValidationService::with_factory(factory);

    assert!(service
        .validate_card(&CardRecord::with_number(TEST_CARD_NUMBER), ValidatorType::Live)
        .is_ok());
    assert!(matches!(
        service.validate_card(&CardRecord::with_number(TEST_CARD_NUMBER), ValidatorType::Test),
        Err(ServiceError::UnknownValidatorType(_))
    ));
}

// =============================================================================
// COMPOSITION
// =============================================================================

struct Counting {
    calls: Arc<AtomicUsize>,
    result: fn() -> RuleResult,
}

impl Rule for Counting {
    fn name(&self) -> &'static str {
        "counting"
    }

    fn evaluate(&self, _card: &CardRecord) -> RuleResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.result)()
    }
}

#[test]
fn test_failing_first_rule_skips_the_rest() {
    let first = Arc::new(AtomicUsize::new(0));
    let later = Arc::new(AtomicUsize::new(0));

    let chain = RuleChain::new()
        .with(Counting {
            calls: Arc::clone(&first),
            result: || Err(Rejection::new("counting", "stop")),
        })
        .with(Counting {
            calls: Arc::clone(&later),
            result: || Ok(()),
        })
        .with(LuhnRule::new());

    let err = chain.evaluate(&CardRecord::default()).unwrap_err();
    assert_eq!(err.reason(), "stop");
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(later.load(Ordering::SeqCst), 0);
}

#[test]
fn test_custom_chain_reuses_library_rules() {
    let chain = RuleChain::new()
        .with(TestCardRule::with_clock(FixedClock::new(now())))
        .with(BrandLengthRule::new());

    assert!(chain
        .evaluate(&CardRecord::new(TEST_CARD_NUMBER, "12", "2030"))
        .is_ok());
}

#[test]
fn test_chain_reused_across_threads() {
    let service = Arc::new(service());
    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&service);
            std::thread::spawn(move || {
                let number = if i % 2 == 0 {
                    test_cards::VISA_16
                } else {
                    test_cards::VISA_BAD_CHECKSUM
                };
                service
                    .validate_card(&CardRecord::new(number, "01", "2028"), ValidatorType::Live)
                    .unwrap()
                    .is_valid()
            })
        })
        .collect();

    let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![true, false, true, false, true, false, true, false]);
}

#[test]
fn test_batch_over_live_chain() {
    let chain = RuleChain::live_with_clock(FixedClock::new(now()));
    let cards = vec![
        CardRecord::new(test_cards::VISA_16, "01", "2028"),
        CardRecord::new(test_cards::VISA_15, "01", "2028"),
        CardRecord::new(test_cards::MC_16, "01", "2020"),
    ];

    let (valid, invalid) = BatchValidator::new(&chain).validate_partitioned(&cards);
    assert_eq!(valid, vec![0]);
    assert_eq!(
        invalid.iter().map(|(i, r)| (*i, r.rule())).collect::<Vec<_>>(),
        vec![(1, "brand_length"), (2, "expiration")]
    );
}

// =============================================================================
// SECURITY
// =============================================================================

#[test]
fn test_record_formatting_never_leaks_number() {
    let card = CardRecord::new(test_cards::VISA_16, "01", "2028");
    assert!(!format!("{:?}", card).contains(test_cards::VISA_16));
    assert!(!card.to_string().contains(test_cards::VISA_16));
    assert!(card.masked().ends_with("1111"));
}
