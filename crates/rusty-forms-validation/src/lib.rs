//! Rusty Forms Validation
//!
//! Pure value checks used by the rusty-forms validator. Every function here
//! answers a single question about a single string; messages and reporting
//! live one layer up.

pub mod format;
pub mod pattern;
pub mod string;

pub use format::*;
pub use pattern::*;
pub use string::*;
