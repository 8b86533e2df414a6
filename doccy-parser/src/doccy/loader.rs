//! Document loading utilities
//!
//! `DocumentLoader` holds source text read from a file or given as a string and runs
//! transforms on it. Used by the CLI and by tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use doccy_parser::doccy::loader::DocumentLoader;
//!
//! // From file
//! let doc = DocumentLoader::from_path("article.doccy")?.parse();
//!
//! // From string, without prettification
//! let tree = DocumentLoader::from_string("{p: Hello}").tree();
//! ```

use crate::doccy::options::Options;
use crate::doccy::transforms::standard::{pipeline, STRING_TO_DOCUMENT, STRING_TO_TREE};
use crate::doccy::transforms::Transform;
use crate::doccy::tree::Document;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Error that can occur when loading documents
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The source file does not exist
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Any other IO error when reading the file, invalid UTF-8 included
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Document loader with transform shortcuts
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|error| match error.kind() {
            io::ErrorKind::NotFound => LoaderError::NotFound(path.to_path_buf()),
            _ => LoaderError::Io(error),
        })?;
        debug!(path = %path.display(), bytes = source.len(), "loaded source");
        Ok(DocumentLoader { source })
    }

    /// Load from a string
    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Run a custom transform on the source
    ///
    /// This is the generic method all shortcuts use.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> O {
        transform.run(self.source.clone())
    }

    /// Parse and prettify with default options.
    ///
    /// Shortcut for `.with(&STRING_TO_DOCUMENT)`.
    pub fn parse(&self) -> Document {
        self.with(&STRING_TO_DOCUMENT)
    }

    /// Parse and prettify with the given options.
    pub fn parse_with(&self, options: &Options) -> Document {
        self.with(&pipeline(*options))
    }

    /// Parse without prettification.
    ///
    /// Shortcut for `.with(&STRING_TO_TREE)`.
    pub fn tree(&self) -> Document {
        self.with(&STRING_TO_TREE)
    }

    /// Get the raw source string
    pub fn source(&self) -> String {
        self.source.clone()
    }

    /// Get a reference to the raw source string
    pub fn source_ref(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doccy::testing::workspace_path;

    #[test]
    fn test_from_string() {
        let loader = DocumentLoader::from_string("{p: Hello}");
        assert_eq!(loader.source(), "{p: Hello}");
        assert_eq!(loader.source_ref(), "{p: Hello}");
    }

    #[test]
    fn test_from_path() {
        let loader = DocumentLoader::from_path(workspace_path("docs/samples/article.doccy")).unwrap();
        assert!(loader.source_ref().contains("{h1"));
    }

    #[test]
    fn test_from_path_nonexistent() {
        let result = DocumentLoader::from_path("nonexistent.doccy");
        match result {
            Err(LoaderError::NotFound(path)) => assert_eq!(path, PathBuf::from("nonexistent.doccy")),
            _ => panic!("expected NotFound"),
        }
    }

    #[test]
    fn test_from_path_directory_is_io_error() {
        let result = DocumentLoader::from_path(workspace_path("docs"));
        assert!(matches!(result, Err(LoaderError::Io(_))));
    }

    #[test]
    fn test_parse_and_tree() {
        let loader = DocumentLoader::from_string("one -- two");
        assert_eq!(loader.tree().to_string(), "one -- two\n");
        assert_eq!(loader.parse().to_string(), "<p>one \u{2014}\u{a0}two</p>\n");
    }

    #[test]
    fn test_parse_with() {
        let loader = DocumentLoader::from_string("one -- two");
        let options = Options {
            pretty_print_text: false,
            ..Options::default()
        };
        assert_eq!(loader.parse_with(&options).to_string(), "<p>one -- two</p>\n");
    }

    #[test]
    fn test_loader_is_reusable() {
        let loader = DocumentLoader::from_string("{p: x}");
        let first = loader.parse();
        let second = loader.parse();
        assert_eq!(first.to_string(), second.to_string());
    }
}
