// File: src/validator.rs
// Purpose: One validation pass per form submission

use serde::Serialize;

use crate::config::ValidatorConfig;
use crate::document::Document;
use crate::reporter::ErrorReporter;
use crate::rules::{check_value, RuleSet};
use crate::violation::Violation;

/// A submission event the validator can cancel
pub trait SubmitEvent {
    /// Stop the host from performing its native submission
    fn prevent_default(&self);
}

/// How a pass ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum PassStatus {
    /// Every configured field was evaluated
    Completed,
    /// A configured field was not found; later fields were not evaluated
    #[serde(rename_all = "camelCase")]
    Aborted { missing_field: String },
}

/// Result of one validation pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassReport {
    /// Stale error nodes removed before evaluation
    pub cleared: usize,
    /// Rule failures, in the order they were reported
    pub violations: Vec<Violation>,
    #[serde(flatten)]
    pub status: PassStatus,
}

impl PassReport {
    /// `true` when every field was checked and none failed
    pub fn is_valid(&self) -> bool {
        self.status == PassStatus::Completed && self.violations.is_empty()
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self.status, PassStatus::Aborted { .. })
    }

    /// Violations reported for one field
    pub fn violations_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.field == field)
    }
}

/// Evaluates a rule set against a document
///
/// Bound once to its rules; every call to [`run`](Self::run) is one complete,
/// synchronous pass: clear old error nodes, then check each field in rule set
/// order and report every failing rule.
#[derive(Debug, Clone)]
pub struct Validator {
    rules: RuleSet,
    config: ValidatorConfig,
    reporter: ErrorReporter,
}

impl Validator {
    pub fn new(rules: RuleSet) -> Self {
        Self::with_config(rules, ValidatorConfig::default())
    }

    pub fn with_config(rules: RuleSet, config: ValidatorConfig) -> Self {
        let reporter = ErrorReporter::new(config.error_class.as_str());
        Self {
            rules,
            config,
            reporter,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Submission entry point
    ///
    /// Native submission is always cancelled, valid or not; callers wire
    /// their own success path from the returned report.
    pub fn handle_submit<E, D>(&self, event: &E, document: &mut D) -> Result<PassReport, D::Error>
    where
        E: SubmitEvent + ?Sized,
        D: Document,
    {
        event.prevent_default();
        self.run(document)
    }

    /// Run one validation pass
    pub fn run<D: Document>(&self, document: &mut D) -> Result<PassReport, D::Error> {
        let marker_class = self.reporter.marker_class();
        let cleared = document.remove_all(marker_class)?;
        tracing::debug!(
            fields = self.rules.len(),
            cleared,
            marker_class,
            "starting validation pass"
        );

        let mut violations = Vec::new();

        for (name, rules) in self.rules.iter() {
            let Some(field) = document.locate(name) else {
                tracing::warn!(
                    field = name,
                    reported = violations.len(),
                    "field not found in document, aborting validation pass"
                );
                return Ok(PassReport {
                    cleared,
                    violations,
                    status: PassStatus::Aborted {
                        missing_field: name.to_string(),
                    },
                });
            };

            let value = document.current_value(&field);

            for kind in check_value(rules, &value) {
                let message = kind.message(name, rules, &self.config);
                self.reporter.report(document, &field, message.as_str())?;
                violations.push(Violation {
                    field: name.to_string(),
                    kind,
                    message,
                });
            }
        }

        tracing::debug!(violations = violations.len(), "validation pass completed");

        Ok(PassReport {
            cleared,
            violations,
            status: PassStatus::Completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::memory::MemoryDocument;
    use crate::rules::{FieldType, RuleDescriptor};
    use crate::violation::ViolationKind;
    use std::cell::Cell;

    #[derive(Default)]
    struct RecordingEvent {
        prevented: Cell<u32>,
    }

    impl SubmitEvent for RecordingEvent {
        fn prevent_default(&self) {
            self.prevented.set(self.prevented.get() + 1);
        }
    }

    fn email_rules() -> RuleSet {
        RuleSet::new().field(
            "email",
            RuleDescriptor::new().required().field_type(FieldType::Email),
        )
    }

    #[test]
    fn test_submit_always_prevents_default() {
        let validator = Validator::new(email_rules());
        let event = RecordingEvent::default();

        let mut invalid = MemoryDocument::new().with_field("email", "");
        validator.handle_submit(&event, &mut invalid).unwrap();

        let mut valid = MemoryDocument::new().with_field("email", "a@b.co");
        let report = validator.handle_submit(&event, &mut valid).unwrap();

        assert!(report.is_valid());
        assert_eq!(event.prevented.get(), 2);
    }

    #[test]
    fn test_report_tracks_violations() {
        let validator = Validator::new(email_rules());
        let mut doc = MemoryDocument::new().with_field("email", "");

        let report = validator.run(&mut doc).unwrap();

        assert_eq!(report.cleared, 0);
        assert_eq!(report.status, PassStatus::Completed);
        let kinds: Vec<_> = report.violations_for("email").map(|v| v.kind).collect();
        assert_eq!(
            kinds,
            vec![ViolationKind::Required, ViolationKind::Type(FieldType::Email)]
        );
    }

    #[test]
    fn test_marker_class_comes_from_config() {
        let config = ValidatorConfig {
            error_class: "invalid-feedback".to_string(),
            ..ValidatorConfig::default()
        };
        let validator = Validator::with_config(email_rules(), config);
        let mut doc = MemoryDocument::new().with_field("email", "nope");

        validator.run(&mut doc).unwrap();
        assert!(doc.errors().all(|e| e.class == "invalid-feedback"));

        let report = validator.run(&mut doc).unwrap();
        assert_eq!(report.cleared, 1);
        assert_eq!(doc.errors().count(), 1);
    }

    #[test]
    fn test_report_serializes_status_inline() {
        let validator = Validator::new(RuleSet::new().field("gone", RuleDescriptor::new()));
        let report = validator.run(&mut MemoryDocument::new()).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "aborted");
        assert_eq!(json["missingField"], "gone");
        assert_eq!(json["cleared"], 0);
    }
}
