//! Built-in value formats

use once_cell::sync::Lazy;
use regex::Regex;

// Local part, `@`, letters-only domain, `.`, top-level segment of 2+ letters.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z]+\.[a-zA-Z]{2,}$").expect("email regex compiles")
});

// Exactly ten ASCII digits.
static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex compiles"));

/// Validate email format
///
/// Intentionally strict about the domain: `user@mail.example.com` and
/// `user@sub-domain.io` are both rejected.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Validate a ten digit phone number (no separators, no country code)
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}
