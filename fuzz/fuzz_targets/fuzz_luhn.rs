//! Fuzz target for Luhn algorithm.
//!
//! Tests that luhn functions never panic and maintain invariants.

#![no_main]

use libfuzzer_sys::fuzz_target;
use card_validator::luhn;

fuzz_target!(|data: &[u8]| {
    // Map bytes onto ASCII digits
    let digits: String = data.iter().map(|&b| char::from(b'0' + b % 10)).collect();

    let sum = luhn::checksum(&digits).expect("digit-only input never fails");
    assert_eq!(luhn::passes_luhn(&digits), sum % 10 == 0);

    // Adding check digit should make it valid
    if digits.len() <= 18 {
        let check = luhn::check_digit(&digits).expect("digit-only input has a check digit");
        assert!(check <= 9, "Check digit should be 0-9");
        assert!(luhn::passes_luhn(&format!("{}{}", digits, check)));
    }

    // Raw input must either validate or point at a non-digit
    if let Ok(raw) = std::str::from_utf8(data) {
        if let Err(err) = luhn::checksum(raw) {
            assert!(!raw.as_bytes()[err.position].is_ascii_digit());
        }
    }
});
