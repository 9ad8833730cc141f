//! In-memory document
//!
//! A flat sibling list of fields and error nodes. Good enough to host the
//! validator outside a browser and to assert on exactly what a pass rendered.

use std::convert::Infallible;

use super::{Document, ErrorNode};

/// Stable handle to a field in a [`MemoryDocument`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

/// A node in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Field {
        id: FieldId,
        class: String,
        value: String,
    },
    Error(ErrorNode),
}

/// In-memory document
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    next_id: usize,
}

impl MemoryDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`add_field`](Self::add_field)
    pub fn with_field(mut self, class: impl Into<String>, value: impl Into<String>) -> Self {
        self.add_field(class, value);
        self
    }

    /// Append a field at the end of the document
    pub fn add_field(&mut self, class: impl Into<String>, value: impl Into<String>) -> FieldId {
        let id = FieldId(self.next_id);
        self.next_id += 1;
        self.nodes.push(Node::Field {
            id,
            class: class.into(),
            value: value.into(),
        });
        id
    }

    /// Change the value of the first field with `class`
    ///
    /// Returns `false` when no such field exists.
    pub fn set_value(&mut self, class: &str, new_value: impl Into<String>) -> bool {
        let found = self.nodes.iter_mut().find_map(|node| match node {
            Node::Field { class: c, value, .. } if c == class => Some(value),
            _ => None,
        });

        match found {
            Some(value) => {
                *value = new_value.into();
                true
            }
            None => false,
        }
    }

    /// All nodes in document order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Error nodes in document order
    pub fn errors(&self) -> impl Iterator<Item = &ErrorNode> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Error(error) => Some(error),
            Node::Field { .. } => None,
        })
    }

    /// Messages of every error node in document order
    pub fn error_messages(&self) -> Vec<&str> {
        self.errors().map(|error| error.message.as_str()).collect()
    }

    /// Messages of the error nodes directly following the field with `class`
    pub fn errors_after(&self, class: &str) -> Vec<&str> {
        let start = self.nodes.iter().position(|node| {
            matches!(node, Node::Field { class: c, .. } if c == class)
        });

        let Some(start) = start else {
            return Vec::new();
        };

        self.nodes[start + 1..]
            .iter()
            .map_while(|node| match node {
                Node::Error(error) => Some(error.message.as_str()),
                Node::Field { .. } => None,
            })
            .collect()
    }

    fn position_of(&self, field: FieldId) -> Option<usize> {
        self.nodes
            .iter()
            .position(|node| matches!(node, Node::Field { id, .. } if *id == field))
    }
}

impl Document for MemoryDocument {
    type Field = FieldId;
    type Error = Infallible;

    fn locate(&self, identifier: &str) -> Option<FieldId> {
        self.nodes.iter().find_map(|node| match node {
            Node::Field { id, class, .. } if class == identifier => Some(*id),
            _ => None,
        })
    }

    fn current_value(&self, field: &FieldId) -> String {
        self.nodes
            .iter()
            .find_map(|node| match node {
                Node::Field { id, value, .. } if id == field => Some(value.clone()),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn insert_after(&mut self, field: &FieldId, node: ErrorNode) -> Result<(), Infallible> {
        // Detached handles append, mirroring a node inserted at the end.
        let at = self
            .position_of(*field)
            .map_or(self.nodes.len(), |position| position + 1);
        self.nodes.insert(at, Node::Error(node));
        Ok(())
    }

    fn remove_all(&mut self, marker_class: &str) -> Result<usize, Infallible> {
        let before = self.nodes.len();
        self.nodes
            .retain(|node| !matches!(node, Node::Error(error) if error.class == marker_class));
        Ok(before - self.nodes.len())
    }
}
