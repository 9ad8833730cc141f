// File: src/violation.rs
// Purpose: Rule failures and the messages rendered for them

use serde::Serialize;

use crate::config::ValidatorConfig;
use crate::rules::{FieldType, RuleDescriptor};

/// Which rule a value failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", content = "detail", rename_all = "camelCase")]
pub enum ViolationKind {
    Required,
    MinLength { min: usize },
    MaxLength { max: usize },
    Pattern,
    Type(FieldType),
}

impl ViolationKind {
    /// Human readable message for a failure on `field`
    ///
    /// With `legacy_max_length_message` set, the max length message quotes the
    /// field's `min_length` threshold instead of its own, as older releases did.
    pub fn message(&self, field: &str, rules: &RuleDescriptor, config: &ValidatorConfig) -> String {
        match self {
            ViolationKind::Required => format!("The field \"{}\" is required", field),
            ViolationKind::MinLength { min } => {
                format!("The field \"{}\" must have at least {} symbols", field, min)
            }
            ViolationKind::MaxLength { max } => {
                if config.legacy_max_length_message {
                    format!(
                        "The field \"{}\" must have no more {} symbols",
                        field, rules.min_length
                    )
                } else {
                    format!(
                        "The field \"{}\" must have no more than {} symbols",
                        field, max
                    )
                }
            }
            ViolationKind::Pattern => {
                format!("The field \"{}\" doesn't match the required pattern", field)
            }
            ViolationKind::Type(FieldType::Email) => format!(
                "The field \"{}\" must contain a correct email address",
                field
            ),
            ViolationKind::Type(FieldType::Phone) => format!(
                "The field \"{}\" must contain a correct phone number",
                field
            ),
        }
    }
}

/// One failed rule on one field, with the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}
