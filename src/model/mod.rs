//! Document model types

pub mod document;
pub mod position;

pub use document::{Document, DocumentId, DocumentVersion, TextSource};
pub use position::{Position, Span};
