//! Testing utilities for tree assertions
//!
//!     Tests that walk the arena by hand are verbose and brittle: they index children,
//!     unwrap names and compare strings, and every change in how a document is shaped breaks
//!     them in many places. Use the fluent assertions here instead:
//!
//!     ```rust,ignore
//!     use doccy_parser::doccy::testing::assert_tree;
//!
//!     let doc = parse_tree("{a @href \"http://x.test/\": text}");
//!     assert_tree(&doc)
//!         .child_count(1)
//!         .child(0, |a| {
//!             a.name("a")
//!                 .attribute("href", "http://x.test/")
//!                 .child_count(1)
//!                 .child(0, |text| text.text("text"))
//!         });
//!     ```
//!
//!     Failures name the path to the node that did not match, for example
//!     `data > div[1] > p[0]: expected element <p>, found text "..."`.
//!
//! Sample documents
//!
//!     Whole documents used across tests live under `docs/samples/` at the workspace root;
//!     [workspace_path] resolves paths relative to it.

use crate::doccy::tree::{Document, NodeId, NodeKind};
use std::path::{Path, PathBuf};

/// Start an assertion chain at the root element.
pub fn assert_tree(doc: &Document) -> NodeAssertion<'_> {
    NodeAssertion {
        doc,
        id: doc.root(),
        context: "data".to_string(),
    }
}

/// Resolve a path relative to the workspace root.
pub fn workspace_path(relative_path: &str) -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .join(relative_path)
}

/// Assertions about one node. Every method panics on mismatch and returns `self` otherwise.
pub struct NodeAssertion<'a> {
    doc: &'a Document,
    id: NodeId,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    fn describe(&self) -> String {
        match self.doc.kind(self.id) {
            NodeKind::Element(element) => format!("element <{}>", element.name),
            NodeKind::Text(text) => format!("text {:?}", text),
        }
    }

    /// The node is an element with this name.
    pub fn name(self, expected: &str) -> Self {
        if self.doc.name(self.id) != Some(expected) {
            panic!(
                "{}: expected element <{}>, found {}",
                self.context,
                expected,
                self.describe()
            );
        }
        self
    }

    /// The node is a text node with exactly this payload.
    pub fn text(self, expected: &str) -> Self {
        if self.doc.text(self.id) != Some(expected) {
            panic!(
                "{}: expected text {:?}, found {}",
                self.context,
                expected,
                self.describe()
            );
        }
        self
    }

    /// The node is a text node, whatever its payload.
    pub fn is_text(self) -> Self {
        assert!(
            self.doc.text(self.id).is_some(),
            "{}: expected text, found {}",
            self.context,
            self.describe()
        );
        self
    }

    pub fn attribute(self, name: &str, expected: &str) -> Self {
        let actual = self.doc.attribute(self.id, name);
        assert_eq!(
            actual,
            Some(expected),
            "{}: attribute {:?} of {}",
            self.context,
            name,
            self.describe()
        );
        self
    }

    pub fn no_attribute(self, name: &str) -> Self {
        assert!(
            self.doc.attribute(self.id, name).is_none(),
            "{}: expected no attribute {:?} on {}",
            self.context,
            name,
            self.describe()
        );
        self
    }

    /// Attribute names, in order.
    pub fn attribute_names(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .doc
            .attributes(self.id)
            .iter()
            .map(|(name, _)| name.as_str())
            .collect();
        assert_eq!(actual, expected, "{}: attribute names", self.context);
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        let actual = self.doc.children(self.id).len();
        assert_eq!(
            actual, expected,
            "{}: expected {} children, found {}",
            self.context, expected, actual
        );
        self
    }

    /// Run assertions on the child at `index`.
    pub fn child<F>(self, index: usize, assertions: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        let children = self.doc.children(self.id);
        let Some(&child) = children.get(index) else {
            panic!(
                "{}: no child at index {}, {} children",
                self.context,
                index,
                children.len()
            );
        };
        let label = self.doc.name(child).unwrap_or("#text");
        assertions(NodeAssertion {
            doc: self.doc,
            id: child,
            context: format!("{} > {}[{}]", self.context, label, index),
        });
        self
    }

    pub fn text_content(self, expected: &str) -> Self {
        assert_eq!(
            self.doc.text_content(self.id),
            expected,
            "{}: text content",
            self.context
        );
        self
    }

    pub fn text_contains(self, needle: &str) -> Self {
        let content = self.doc.text_content(self.id);
        assert!(
            content.contains(needle),
            "{}: expected text content to contain {:?}, found {:?}",
            self.context,
            needle,
            content
        );
        self
    }

    /// The node serializes to exactly this markup.
    pub fn xml(self, expected: &str) -> Self {
        assert_eq!(
            crate::doccy::formats::xml::to_xml(self.doc, self.id),
            expected,
            "{}: markup",
            self.context
        );
        self
    }

    /// Depth of the deepest element below this node.
    pub fn max_depth(self, expected: usize) -> Self {
        let base = self.doc.depth(self.id);
        let actual = self
            .doc
            .descendants(self.id)
            .into_iter()
            .filter(|id| self.doc.element(*id).is_some())
            .map(|id| self.doc.depth(id) - base)
            .max()
            .unwrap_or(0);
        assert_eq!(actual, expected, "{}: element depth", self.context);
        self
    }
}
