//! PCI-DSS style masking and comparison utilities.
//!
//! Card numbers reach this crate unvalidated, so masking works on the raw
//! string: every character except the last four is replaced, whatever it is.
//!
//! Never display or log the full card number.

/// Masks a raw card number, keeping only the last four characters.
///
/// Inputs of four characters or fewer are masked completely.
///
/// # Example
///
/// ```
/// use card_validator::mask::mask_number;
///
/// assert_eq!(mask_number("4111111111111111"), "************1111");
/// assert_eq!(mask_number("4111-1111"), "*****1111");
/// assert_eq!(mask_number("123"), "***");
/// ```
#[inline]
pub fn mask_number(input: &str) -> String {
    let len = input.chars().count();

    if len <= 4 {
        return "*".repeat(len);
    }

    let masked_count = len - 4;
    let mut result = String::with_capacity(input.len());
    for _ in 0..masked_count {
        result.push('*');
    }
    result.extend(input.chars().skip(masked_count));
    result
}

/// Returns the last four characters of a card number, or an empty string
/// when it is shorter than that.
#[inline]
pub fn last_four(input: &str) -> String {
    let len = input.chars().count();
    if len >= 4 {
        input.chars().skip(len - 4).collect()
    } else {
        String::new()
    }
}

/// Constant-time comparison of two byte slices.
///
/// This function takes the same amount of time regardless of where
/// (or if) equal-length slices differ.
///
/// # Example
///
/// ```
/// use card_validator::mask::constant_time_eq;
///
/// let a = b"4242424242424242";
/// let b = b"4242424242424242";
/// let c = b"4242424242424241";
///
/// assert!(constant_time_eq(a, b));
/// assert!(!constant_time_eq(a, c));
/// ```
#[inline]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    // XOR all bytes together, accumulating differences
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }

    diff == 0
}

/// Constant-time comparison of two strings.
#[inline]
pub fn constant_time_eq_str(a: &str, b: &str) -> bool {
    constant_time_eq(a.as_bytes(), b.as_bytes())
}
