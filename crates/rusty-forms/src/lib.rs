//! # rusty-forms
//!
//! Declarative validation rules attached to a form, evaluated on submission,
//! with one error node rendered next to the field for every failing rule.
//!
//! ## Quick Start
//!
//! ```rust
//! use rusty_forms::{FieldType, MemoryDocument, RuleDescriptor, RuleSet, Validator};
//!
//! let rules = RuleSet::new()
//!     .field("email", RuleDescriptor::new().required().field_type(FieldType::Email))
//!     .field("name", RuleDescriptor::new().min_length(2).max_length(40));
//!
//! let mut document = MemoryDocument::new()
//!     .with_field("email", "")
//!     .with_field("name", "Al");
//!
//! let validator = Validator::new(rules);
//! let report = validator.run(&mut document).unwrap();
//!
//! assert_eq!(report.violations.len(), 2);
//! assert_eq!(document.error_messages().len(), 2);
//! ```
//!
//! The host document is abstracted behind [`Document`]. [`MemoryDocument`]
//! ships for native use and tests; the `rusty-forms-wasm` crate binds the
//! same validator to a browser form.

pub mod config;
pub mod document;
pub mod reporter;
pub mod rules;
pub mod validator;
pub mod violation;

pub use config::{FormConfig, ValidatorConfig, DEFAULT_ERROR_CLASS};
pub use document::memory::{FieldId, MemoryDocument, Node};
pub use document::{Document, ErrorNode};
pub use reporter::ErrorReporter;
pub use rules::{check_value, FieldType, RuleDescriptor, RuleError, RuleSet};
pub use validator::{PassReport, PassStatus, SubmitEvent, Validator};
pub use violation::{Violation, ViolationKind};

pub use rusty_forms_validation::Pattern;
