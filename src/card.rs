//! The card record under validation.
//!
//! A [`CardRecord`] is built fresh for every request from transport input,
//! evaluated once and dropped. Its fields are kept exactly as received: no
//! whitespace or separator stripping happens before the rules run.

use std::fmt;
use zeroize::Zeroize;

/// A candidate card: number plus two-field expiration.
///
/// # Security
///
/// - `Debug` and `Display` only ever show the last four digits
/// - Field storage is zeroed on drop using the `zeroize` crate
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardRecord {
    #[cfg_attr(feature = "serde", serde(default))]
    number: String,
    #[cfg_attr(feature = "serde", serde(default))]
    exp_month: String,
    #[cfg_attr(feature = "serde", serde(default))]
    exp_year: String,
}

impl CardRecord {
    /// Creates a record from its raw fields.
    pub fn new(
        number: impl Into<String>,
        exp_month: impl Into<String>,
        exp_year: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            exp_month: exp_month.into(),
            exp_year: exp_year.into(),
        }
    }

    /// Creates a record with only a number; both expiry fields are empty.
    pub fn with_number(number: impl Into<String>) -> Self {
        Self::new(number, "", "")
    }

    /// Returns the card number exactly as received.
    ///
    /// # Security Warning
    ///
    /// Never log the result. Use [`CardRecord::masked`] for display.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Returns the expiration month as received (expected `MM`).
    #[inline]
    pub fn exp_month(&self) -> &str {
        &self.exp_month
    }

    /// Returns the expiration year as received (expected `YYYY`).
    #[inline]
    pub fn exp_year(&self) -> &str {
        &self.exp_year
    }

    /// Returns the number masked down to its last four characters.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_number(&self.number)
    }
}

impl fmt::Debug for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardRecord")
            .field("number", &self.masked())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .finish()
    }
}

impl fmt::Display for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}/{}", self.masked(), self.exp_month, self.exp_year)
    }
}

impl Drop for CardRecord {
    fn drop(&mut self) {
        self.number.zeroize();
        self.exp_month.zeroize();
        self.exp_year.zeroize();
    }
}
