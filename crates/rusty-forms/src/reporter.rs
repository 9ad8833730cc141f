// File: src/reporter.rs
// Purpose: Render one error message next to one field

use crate::document::{Document, ErrorNode};

/// Creates error nodes carrying a fixed marker class
///
/// The same class is used by the validator to clear nodes at the start of
/// each pass, so both sides are built from one [`ValidatorConfig`](crate::ValidatorConfig).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReporter {
    marker_class: String,
}

impl ErrorReporter {
    pub fn new(marker_class: impl Into<String>) -> Self {
        Self {
            marker_class: marker_class.into(),
        }
    }

    pub fn marker_class(&self) -> &str {
        &self.marker_class
    }

    /// Insert one error node right after `field`
    ///
    /// No deduplication: reporting twice renders two nodes.
    pub fn report<D: Document>(
        &self,
        document: &mut D,
        field: &D::Field,
        message: impl Into<String>,
    ) -> Result<(), D::Error> {
        let node = ErrorNode::new(self.marker_class.as_str(), message);
        document.insert_after(field, node)
    }
}
