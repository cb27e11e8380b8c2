//! Fuzz target for card validation.
//!
//! Tests that neither chain panics on arbitrary records and that every
//! verdict keeps its reason consistent with validity.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use card_validator::{CardRecord, ValidationService, ValidatorType};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    number: &'a str,
    exp_month: &'a str,
    exp_year: &'a str,
    validator: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let service = ValidationService::new();
    let card = CardRecord::new(input.number, input.exp_month, input.exp_year);

    for kind in ValidatorType::ALL {
        let verdict = service.validate_card(&card, kind).expect("default factory has both chains");
        assert_eq!(verdict.is_valid(), verdict.reason().is_empty());
    }

    // Unknown names are errors, never panics
    let _ = service.validate_card_named(&card, input.validator);

    // Formatting never exposes more than the last four characters
    let _ = card.to_string();
    let _ = format!("{:?}", card);
});
