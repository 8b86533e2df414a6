//! Main module for doccy library functionality

pub mod cursor;
pub mod diagnostics;
pub mod formats;
pub mod loader;
pub mod options;
pub mod parsing;
pub mod prettify;
pub mod testing;
pub mod token;
pub mod transforms;
pub mod tree;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use options::Options;
pub use parsing::parse_document;
pub use tree::{Document, NodeId, NodeKind};
