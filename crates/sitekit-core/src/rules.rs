//! Per-field validity rules.
//!
//! Every rule is a pure function of the field value. Values are trimmed
//! before the rule applies, so callers may pass raw input.
//!
//! Lengths are counted in UTF-16 code units, the unit a browser reports for
//! a control's value, so a character outside the Basic Multilingual Plane
//! (most emoji) counts twice.

use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum UTF-16 length of a trimmed name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum UTF-16 length of a trimmed message.
pub const MIN_MESSAGE_LEN: usize = 10;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

static PHONE_DIGITS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone digit pattern is valid"));

static PHONE_EXTENDED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9+\-\s]{10,15}$").expect("phone charset pattern is valid"));

static PHONE_SEPARATORS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\s\-]").expect("phone separator pattern is valid"));

fn utf16_len(value: &str) -> usize {
    value.encode_utf16().count()
}

/// A name needs a length of at least [`MIN_NAME_LEN`].
#[must_use]
pub fn is_valid_name(value: &str) -> bool {
    utf16_len(value.trim()) >= MIN_NAME_LEN
}

/// `local@domain.tld`: no whitespace, a single `@`, and a dot after it.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL.is_match(value.trim())
}

/// Accepts either of two formats, both equally valid:
///
/// 1. exactly ten digits once spaces and hyphens are stripped
///    (`123-456-7890`)
/// 2. 10 to 15 characters drawn from digits, `+`, `-` and whitespace
///    (`+1 234 567 8901`)
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let value = value.trim();
    let digits = PHONE_SEPARATORS.replace_all(value, "");
    PHONE_DIGITS.is_match(&digits) || PHONE_EXTENDED.is_match(value)
}

/// Any non-empty selection.
#[must_use]
pub fn is_valid_service(value: &str) -> bool {
    !value.trim().is_empty()
}

/// A message needs a length of at least [`MIN_MESSAGE_LEN`].
#[must_use]
pub fn is_valid_message(value: &str) -> bool {
    utf16_len(value.trim()) >= MIN_MESSAGE_LEN
}
