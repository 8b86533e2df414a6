//! Standard transform definitions
//!
//! Prebuilt pipelines as `once_cell::sync::Lazy` statics, plus [pipeline] for option sets
//! that are only known at run time.

use crate::doccy::options::Options;
use crate::doccy::transforms::stages::{Parsing, PrettyPrintText, WrapFloatingText};
use crate::doccy::transforms::Transform;
use crate::doccy::tree::Document;
use once_cell::sync::Lazy;

/// Type alias for transforms producing a document from source text
pub type DocumentTransform = Transform<String, Document>;

/// Source text to tree, exactly as the markup describes it.
pub static STRING_TO_TREE: Lazy<DocumentTransform> =
    Lazy::new(|| Transform::identity().then(Parsing::new()));

/// Source text to prettified document, with default options.
///
/// This is the standard transform for most use cases.
pub static STRING_TO_DOCUMENT: Lazy<DocumentTransform> = Lazy::new(|| {
    let options = Options::default();
    Transform::identity()
        .then_transform(&*STRING_TO_TREE)
        .then(WrapFloatingText::new())
        .then(PrettyPrintText::new(options))
});

/// Build the pipeline for a set of options, leaving out the passes they switch off.
pub fn pipeline(options: Options) -> DocumentTransform {
    let mut transform: DocumentTransform = Transform::identity().then(Parsing::new());
    if options.wrap_floating_text {
        transform = transform.then(WrapFloatingText::new());
    }
    if options.pretty_print_text {
        transform = transform.then(PrettyPrintText::new(options));
    }
    transform
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_to_tree() {
        let doc = STRING_TO_TREE.run("{p: it's}".to_string());
        assert_eq!(doc.to_string(), "<p>it's</p>\n");
    }

    #[test]
    fn test_string_to_document() {
        let doc = STRING_TO_DOCUMENT.run("it's".to_string());
        assert_eq!(doc.to_string(), "<p>it’s</p>\n");
    }

    #[test]
    fn test_pipeline_matches_standard_for_defaults() {
        let source = "Floating -- text.\n\n{div: more 'text' here}".to_string();
        let standard = STRING_TO_DOCUMENT.run(source.clone());
        let built = pipeline(Options::default()).run(source);
        assert_eq!(standard.to_string(), built.to_string());
    }

    #[test]
    fn test_pipeline_skips_disabled_passes() {
        let doc = pipeline(Options::raw()).run("one -- two".to_string());
        assert_eq!(doc.to_string(), "one -- two\n");
    }

    #[test]
    fn test_transforms_are_reusable() {
        let first = STRING_TO_DOCUMENT.run("one".to_string());
        let second = STRING_TO_DOCUMENT.run("two".to_string());
        assert_eq!(first.to_string(), "<p>one</p>\n");
        assert_eq!(second.to_string(), "<p>two</p>\n");
    }
}
