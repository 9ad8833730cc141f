//! Length checks
//!
//! Lengths are counted in UTF-16 code units, the same unit a browser uses
//! for `value.length` and `maxlength`. `"héllo"` has five symbols, while an
//! emoji outside the Basic Multilingual Plane such as `"😀"` has two.

/// Number of symbols in a value.
pub fn symbol_count(value: &str) -> usize {
    value.encode_utf16().count()
}

/// A required value must not be empty.
pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}

/// `true` when the value has at least `min` symbols.
///
/// A threshold of `0` is treated as "no rule" and always passes.
pub fn meets_min_length(value: &str, min: usize) -> bool {
    min == 0 || symbol_count(value) >= min
}

/// `true` when the value has at most `max` symbols.
///
/// A threshold of `0` is treated as "no rule" and always passes.
pub fn meets_max_length(value: &str, max: usize) -> bool {
    max == 0 || symbol_count(value) <= max
}
