// File: src/rules.rs
// Purpose: Rule descriptors, rule sets and per-value rule evaluation

use indexmap::IndexMap;
use rusty_forms_validation::{self as checks, Pattern, PatternError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::violation::ViolationKind;

/// Errors raised while building rules
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    #[error("unknown field type `{0}` (expected `email` or `phone`)")]
    UnknownType(String),
}

/// Built-in semantic field types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Email,
    Phone,
}

impl FieldType {
    /// `true` when the value has the shape this type requires
    pub fn accepts(self, value: &str) -> bool {
        match self {
            FieldType::Email => checks::is_valid_email(value),
            FieldType::Phone => checks::is_valid_phone(value),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::Email => "email",
            FieldType::Phone => "phone",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(FieldType::Email),
            "phone" => Ok(FieldType::Phone),
            other => Err(RuleError::UnknownType(other.to_string())),
        }
    }
}

/// The checks configured for one field
///
/// `min_length` and `max_length` of `0` mean "not configured": a zero
/// threshold is never enforced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RuleDescriptor {
    #[serde(default)]
    pub required: bool,

    #[serde(default, alias = "min_length")]
    pub min_length: usize,

    #[serde(default, alias = "max_length")]
    pub max_length: usize,

    #[serde(
        default,
        with = "pattern_source",
        skip_serializing_if = "Option::is_none"
    )]
    pub pattern: Option<Pattern>,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
}

impl RuleDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = min;
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    /// Compile and attach a pattern the whole value must match
    pub fn pattern(self, source: &str) -> Result<Self, RuleError> {
        Ok(self.with_pattern(Pattern::new(source)?))
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn field_type(mut self, field_type: FieldType) -> Self {
        self.field_type = Some(field_type);
        self
    }

    /// Number of rules that will actually be evaluated
    pub fn active_rules(&self) -> usize {
        usize::from(self.required)
            + usize::from(self.min_length != 0)
            + usize::from(self.max_length != 0)
            + usize::from(self.pattern.is_some())
            + usize::from(self.field_type.is_some())
    }
}

/// Evaluate every configured rule against a value
///
/// Rules run in the fixed order `required`, `min_length`, `max_length`,
/// `pattern`, `type`. None of them short-circuits another, so an empty value
/// can fail several rules at once.
pub fn check_value(rules: &RuleDescriptor, value: &str) -> Vec<ViolationKind> {
    let mut failures = Vec::new();

    if rules.required && !checks::is_present(value) {
        failures.push(ViolationKind::Required);
    }

    if !checks::meets_min_length(value, rules.min_length) {
        failures.push(ViolationKind::MinLength {
            min: rules.min_length,
        });
    }

    if !checks::meets_max_length(value, rules.max_length) {
        failures.push(ViolationKind::MaxLength {
            max: rules.max_length,
        });
    }

    if let Some(pattern) = &rules.pattern {
        if !pattern.matches(value) {
            failures.push(ViolationKind::Pattern);
        }
    }

    if let Some(field_type) = rules.field_type {
        if !field_type.accepts(value) {
            failures.push(ViolationKind::Type(field_type));
        }
    }

    failures
}

/// Ordered mapping from field identifier to its rules
///
/// Iteration follows insertion order, which is also validation order.
/// Inserting an identifier that is already present replaces its rules in
/// place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    fields: IndexMap<String, RuleDescriptor>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn field(mut self, identifier: impl Into<String>, rules: RuleDescriptor) -> Self {
        self.insert(identifier, rules);
        self
    }

    /// Insert rules for a field, returning the rules it replaced
    pub fn insert(
        &mut self,
        identifier: impl Into<String>,
        rules: RuleDescriptor,
    ) -> Option<RuleDescriptor> {
        self.fields.insert(identifier.into(), rules)
    }

    pub fn get(&self, identifier: &str) -> Option<&RuleDescriptor> {
        self.fields.get(identifier)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleDescriptor)> {
        self.fields.iter().map(|(name, rules)| (name.as_str(), rules))
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RuleDescriptor)> for RuleSet {
    fn from_iter<I: IntoIterator<Item = (K, RuleDescriptor)>>(iter: I) -> Self {
        let mut set = RuleSet::new();
        for (identifier, rules) in iter {
            set.insert(identifier, rules);
        }
        set
    }
}

/// Patterns travel as their source text and are compiled on the way in
mod pattern_source {
    use super::Pattern;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(pattern: &Option<Pattern>, s: S) -> Result<S::Ok, S::Error> {
        match pattern {
            Some(pattern) => s.serialize_some(pattern.as_str()),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Pattern>, D::Error> {
        Option::<String>::deserialize(d)?
            .map(|source| Pattern::new(source).map_err(D::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_required_and_type_both_fail_on_empty() {
        let rules = RuleDescriptor::new().required().field_type(FieldType::Email);
        assert_eq!(
            check_value(&rules, ""),
            vec![
                ViolationKind::Required,
                ViolationKind::Type(FieldType::Email)
            ]
        );
    }

    #[test]
    fn test_zero_thresholds_are_inactive() {
        let rules = RuleDescriptor::new().min_length(0).max_length(0);
        assert!(check_value(&rules, "").is_empty());
        assert!(check_value(&rules, &"x".repeat(10_000)).is_empty());
        assert_eq!(rules.active_rules(), 0);
    }

    #[test]
    fn test_rules_evaluate_in_fixed_order() {
        let rules = RuleDescriptor::new()
            .field_type(FieldType::Phone)
            .pattern("[a-z]+")
            .unwrap()
            .min_length(3)
            .required();

        assert_eq!(
            check_value(&rules, ""),
            vec![
                ViolationKind::Required,
                ViolationKind::MinLength { min: 3 },
                ViolationKind::Pattern,
                ViolationKind::Type(FieldType::Phone),
            ]
        );
    }

    #[test]
    fn test_length_bounds_are_inclusive() {
        let rules = RuleDescriptor::new().min_length(2).max_length(4);
        assert_eq!(check_value(&rules, "a"), vec![ViolationKind::MinLength { min: 2 }]);
        assert!(check_value(&rules, "ab").is_empty());
        assert!(check_value(&rules, "abcd").is_empty());
        assert_eq!(check_value(&rules, "abcde"), vec![ViolationKind::MaxLength { max: 4 }]);
    }

    #[test]
    fn test_required_accepts_whitespace() {
        let rules = RuleDescriptor::new().required();
        assert!(check_value(&rules, " ").is_empty());
    }

    #[test]
    fn test_field_type_from_str() {
        assert_eq!("email".parse::<FieldType>().unwrap(), FieldType::Email);
        assert_eq!("phone".parse::<FieldType>().unwrap(), FieldType::Phone);
        assert!(matches!(
            "url".parse::<FieldType>(),
            Err(RuleError::UnknownType(tag)) if tag == "url"
        ));
    }

    #[test]
    fn test_rule_set_keeps_insertion_order() {
        let mut set = RuleSet::new()
            .field("zeta", RuleDescriptor::new().required())
            .field("alpha", RuleDescriptor::new())
            .field("mid", RuleDescriptor::new());

        let replaced = set.insert("zeta", RuleDescriptor::new().min_length(5));
        assert_eq!(replaced, Some(RuleDescriptor::new().required()));
        assert_eq!(set.field_names(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(set.get("zeta").map(|r| r.min_length), Some(5));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_descriptor_from_json() {
        let rules: RuleDescriptor = serde_json::from_str(
            r#"{ "required": true, "minLength": 2, "pattern": "[0-9]+", "type": "phone" }"#,
        )
        .unwrap();

        assert!(rules.required);
        assert_eq!(rules.min_length, 2);
        assert_eq!(rules.max_length, 0);
        assert_eq!(rules.pattern.as_ref().map(Pattern::as_str), Some("[0-9]+"));
        assert_eq!(rules.field_type, Some(FieldType::Phone));
    }

    #[test]
    fn test_descriptor_rejects_bad_input() {
        let bad_pattern = serde_json::from_str::<RuleDescriptor>(r#"{ "pattern": "(" }"#);
        assert!(bad_pattern.unwrap_err().to_string().contains("invalid pattern"));

        assert!(serde_json::from_str::<RuleDescriptor>(r#"{ "type": "url" }"#).is_err());
        assert!(serde_json::from_str::<RuleDescriptor>(r#"{ "minLenght": 3 }"#).is_err());
    }

    #[test]
    fn test_rule_set_serializes_back_to_source() {
        let set = RuleSet::new().field(
            "phone",
            RuleDescriptor::new().pattern("^[0-9]{10}$").unwrap(),
        );
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "phone": {
                    "required": false,
                    "minLength": 0,
                    "maxLength": 0,
                    "pattern": "^[0-9]{10}$"
                }
            })
        );
    }
}
