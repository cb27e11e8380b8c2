//! Brand inference and the brand-length rule.
//!
//! Only the leading digit is inspected. This is a heuristic, not a BIN
//! lookup: `4` is treated as Visa, `5` as Mastercard, and everything else as
//! an unknown brand whose length is not checked.

use std::fmt;

use crate::card::CardRecord;
use crate::rule::{Rejection, Rule, RuleResult};

/// Card brand inferred from the leading digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    /// Leading digit 4, lengths 13 or 16
    Visa,
    /// Leading digit 5, length 16
    Mastercard,
    /// Anything else; length is not checked
    Unknown,
}

impl Brand {
    /// Infers the brand from the first character of `number`.
    ///
    /// ```
    /// use card_validator::brand::Brand;
    ///
    /// assert_eq!(Brand::detect("4111111111111111"), Brand::Visa);
    /// assert_eq!(Brand::detect("5500000000000004"), Brand::Mastercard);
    /// assert_eq!(Brand::detect("378282246310005"), Brand::Unknown);
    /// assert_eq!(Brand::detect(""), Brand::Unknown);
    /// ```
    #[inline]
    pub fn detect(number: &str) -> Self {
        match number.as_bytes() {
            [b'4', ..] => Self::Visa,
            [b'5', ..] => Self::Mastercard,
            _ => Self::Unknown,
        }
    }

    /// Returns the accepted lengths, or `None` for unchecked brands.
    #[inline]
    pub const fn valid_lengths(&self) -> Option<&'static [usize]> {
        match self {
            Self::Visa => Some(&[13, 16]),
            Self::Mastercard => Some(&[16]),
            Self::Unknown => None,
        }
    }

    /// Returns true if `length` is acceptable for this brand.
    #[inline]
    pub fn is_valid_length(&self, length: usize) -> bool {
        self.valid_lengths()
            .map_or(true, |lengths| lengths.contains(&length))
    }

    /// Reason reported when the length does not match.
    #[inline]
    pub const fn length_reason(&self) -> &'static str {
        match self {
            Self::Visa => "Invalid card number length. Must be 13 or 16",
            Self::Mastercard => "Invalid card number length. Must be 16",
            Self::Unknown => "",
        }
    }

    /// Returns a human-readable name for the brand.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::Mastercard => "Mastercard",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Brand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Rule that checks the number length against the inferred brand.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrandLengthRule;

impl BrandLengthRule {
    /// Creates the rule.
    pub fn new() -> Self {
        Self
    }
}

impl Rule for BrandLengthRule {
    fn name(&self) -> &'static str {
        "brand_length"
    }

    fn evaluate(&self, card: &CardRecord) -> RuleResult {
        let number = card.number();
        let brand = Brand::detect(number);

        if !brand.is_valid_length(number.len()) {
            return Err(Rejection::new(self.name(), brand.length_reason()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(number: &str) -> RuleResult {
        BrandLengthRule.evaluate(&CardRecord::with_number(number))
    }

    #[test]
    fn test_visa_lengths() {
        assert!(eval("4000000000000000").is_ok());
        assert!(eval("4000000000000").is_ok());

        let err = eval("40000000000000").unwrap_err();
        assert_eq!(err.rule(), "brand_length");
        assert_eq!(err.reason(), "Invalid card number length. Must be 13 or 16");

        assert!(eval("400000000000000").is_err());
        assert!(eval("4000000000000000000").is_err());
    }

    #[test]
    fn test_mastercard_lengths() {
        assert!(eval("5000000000000000").is_ok());

        let err = eval("500000000000000").unwrap_err();
        assert_eq!(err.reason(), "Invalid card number length. Must be 16");

        assert!(eval("5000000000000").is_err());
    }

    #[test]
    fn test_unknown_brand_skips_length() {
        assert!(eval("").is_ok());
        assert!(eval("3").is_ok());
        assert!(eval("378282246310005").is_ok());
        assert!(eval("60111111111111171234567").is_ok());
    }

    #[test]
    fn test_detect() {
        assert_eq!(Brand::detect("4"), Brand::Visa);
        assert_eq!(Brand::detect("5"), Brand::Mastercard);
        assert_eq!(Brand::detect("6011111111111117"), Brand::Unknown);
        assert_eq!(Brand::detect(" 4111"), Brand::Unknown);
    }

    #[test]
    fn test_valid_lengths() {
        assert_eq!(Brand::Visa.valid_lengths(), Some(&[13usize, 16][..]));
        assert_eq!(Brand::Mastercard.valid_lengths(), Some(&[16usize][..]));
        assert_eq!(Brand::Unknown.valid_lengths(), None);
        assert!(Brand::Unknown.is_valid_length(0));
    }

    #[test]
    fn test_brand_display() {
        assert_eq!(Brand::Visa.to_string(), "Visa");
        assert_eq!(Brand::Mastercard.name(), "Mastercard");
    }
}
