//! Luhn (modulus 10) checksum rule.
//!
//! The checksum is computed over the raw card number string, walking it left
//! to right. Digits whose index has the same parity as the string length are
//! doubled, which is the same as doubling every second digit counted from the
//! check digit on the right.

use std::fmt;

use crate::card::CardRecord;
use crate::rule::{Rejection, Rule, RuleResult};

/// Lookup table for doubled digits: double the value, subtract 9 if >= 10.
/// Index is the digit (0-9), value is the transformed result.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Reason reported for a character outside `0-9`.
pub const INVALID_DIGIT: &str = "invalid digit";

/// Reason reported when the checksum is not a multiple of 10.
pub const INVALID_NUMBER: &str = "Invalid card number";

/// A byte outside `'0'..='9'` was found in the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidDigit {
    /// Byte index of the offending character.
    pub position: usize,
}

impl fmt::Display for InvalidDigit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at position {}", INVALID_DIGIT, self.position)
    }
}

impl std::error::Error for InvalidDigit {}

/// Computes the Luhn sum (not reduced modulo 10) of a digit string.
///
/// An empty string sums to 0.
///
/// # Example
///
/// ```
/// use card_validator::luhn::checksum;
///
/// assert_eq!(checksum("4111111111111111").map(|s| s % 10), Ok(0));
/// assert!(checksum("4111-1111").is_err());
/// ```
#[inline]
pub fn checksum(number: &str) -> Result<u64, InvalidDigit> {
    sum_digits(number.bytes(), number.len())
}

/// Sums `len` bytes. The sum is at most 9 per byte, so a `u64` cannot
/// overflow for any input that fits in memory.
fn sum_digits(bytes: impl Iterator<Item = u8>, len: usize) -> Result<u64, InvalidDigit> {
    let parity = len % 2;
    let mut sum: u64 = 0;

    for (i, b) in bytes.enumerate() {
        if !b.is_ascii_digit() {
            return Err(InvalidDigit { position: i });
        }

        let digit = b - b'0';
        if i % 2 == parity {
            sum += u64::from(DOUBLE_TABLE[digit as usize]);
        } else {
            sum += u64::from(digit);
        }
    }

    Ok(sum)
}

/// Returns true if the number is all digits and its Luhn sum is 0 mod 10.
///
/// ```
/// use card_validator::luhn::passes_luhn;
///
/// assert!(passes_luhn("4242424242424242"));
/// assert!(!passes_luhn("4242424242424241"));
/// ```
#[inline]
pub fn passes_luhn(number: &str) -> bool {
    matches!(checksum(number), Ok(sum) if sum % 10 == 0)
}

/// Computes the check digit that makes `partial` pass when appended.
///
/// Returns `None` if `partial` contains a non-digit.
///
/// ```
/// use card_validator::luhn::check_digit;
///
/// assert_eq!(check_digit("411111111111111"), Some(1));
/// assert_eq!(check_digit("42x"), None);
/// ```
pub fn check_digit(partial: &str) -> Option<u8> {
    // Appending a 0 keeps every existing digit at the position it will have
    // in the full number, and contributes nothing to the sum.
    let mut candidate = String::with_capacity(partial.len() + 1);
    candidate.push_str(partial);
    candidate.push('0');

    let sum = checksum(&candidate).ok()?;
    Some(((10 - (sum % 10)) % 10) as u8)
}

/// Rule that rejects numbers failing the Luhn checksum.
#[derive(Debug, Clone, Copy, Default)]
pub struct LuhnRule;

impl LuhnRule {
    /// Creates the rule.
    pub fn new() -> Self {
        Self
    }
}

impl Rule for LuhnRule {
    fn name(&self) -> &'static str {
        "luhn"
    }

    fn evaluate(&self, card: &CardRecord) -> RuleResult {
        let sum = checksum(card.number()).map_err(|_| Rejection::new(self.name(), INVALID_DIGIT))?;

        if sum % 10 != 0 {
            return Err(Rejection::new(self.name(), INVALID_NUMBER));
        }

        Ok(())
    }
}
