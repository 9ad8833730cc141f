//! User supplied patterns
//!
//! A pattern must match the whole value. The source expression is wrapped as
//! `^(?:source)$` when compiled, so `[0-9]+` and `^[0-9]+$` behave the same.

use regex::Regex;
use std::fmt;

/// Error raised when a pattern source does not compile
#[derive(Debug, thiserror::Error)]
#[error("invalid pattern `{source_text}`: {error}")]
pub struct PatternError {
    pub source_text: String,
    #[source]
    pub error: regex::Error,
}

/// A compiled, fully anchored pattern that remembers its source text
#[derive(Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern from its source text
    pub fn new(source: impl Into<String>) -> Result<Self, PatternError> {
        let source = source.into();
        let anchored = format!("^(?:{})$", source);
        match Regex::new(&anchored) {
            Ok(regex) => Ok(Self { source, regex }),
            Err(error) => Err(PatternError {
                source_text: source,
                error,
            }),
        }
    }

    /// The expression as it was written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `true` when the pattern matches the entire value
    pub fn matches(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for Pattern {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_semantics() {
        let digits = Pattern::new("[0-9]+").unwrap();
        assert!(digits.matches("12345"));
        assert!(!digits.matches("123a45"));
        assert!(!digits.matches(""));

        // Already anchored sources are unaffected by the extra anchors
        let anchored = Pattern::new("^[0-9]{10}$").unwrap();
        assert!(anchored.matches("0123456789"));
        assert!(!anchored.matches("12345"));
    }

    #[test]
    fn test_alternation_is_grouped() {
        let pattern = Pattern::new("cat|dog").unwrap();
        assert!(pattern.matches("cat"));
        assert!(pattern.matches("dog"));
        assert!(!pattern.matches("catdog"));
    }

    #[test]
    fn test_invalid_source() {
        let err = Pattern::new("([a-z").unwrap_err();
        assert_eq!(err.source_text, "([a-z");
        assert!(err.to_string().starts_with("invalid pattern `([a-z`"));
    }

    #[test]
    fn test_source_is_preserved() {
        let pattern = Pattern::new(r"\d{3}").unwrap();
        assert_eq!(pattern.as_str(), r"\d{3}");
        assert_eq!(pattern.to_string(), r"\d{3}");
        assert_eq!(pattern, Pattern::new(r"\d{3}").unwrap());
    }
}
