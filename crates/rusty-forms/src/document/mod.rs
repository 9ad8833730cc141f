//! Host document abstraction
//!
//! The validator never touches a real DOM. Everything it needs from the page
//! goes through [`Document`]: find a field, read its value, put an error node
//! after it, and sweep error nodes away before the next pass.

pub mod memory;

/// A rendered error annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNode {
    /// Marker class used to find and remove the node on the next pass
    pub class: String,
    pub message: String,
}

impl ErrorNode {
    pub fn new(class: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            message: message.into(),
        }
    }
}

/// Capabilities the validator needs from the host document
pub trait Document {
    /// Handle to a located field
    type Field;

    /// Failure reported by the host while mutating the document
    type Error;

    /// Find the field whose class equals `identifier`
    fn locate(&self, identifier: &str) -> Option<Self::Field>;

    /// Current value of a field
    fn current_value(&self, field: &Self::Field) -> String;

    /// Insert `node` as the field's immediate next sibling
    fn insert_after(&mut self, field: &Self::Field, node: ErrorNode) -> Result<(), Self::Error>;

    /// Remove every node carrying `marker_class`, returning how many went away
    fn remove_all(&mut self, marker_class: &str) -> Result<usize, Self::Error>;
}
