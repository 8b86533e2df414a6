//! Individual transformation stages
//!
//! Each stage implements [Runnable]. Parsing turns source text into a tree; the other two
//! stages are the prettification passes and rewrite a tree in place.

use crate::doccy::options::Options;
use crate::doccy::parsing::parse_tree;
use crate::doccy::prettify::{paragraphs, typography};
use crate::doccy::transforms::Runnable;
use crate::doccy::tree::Document;

/// Parsing stage: source text to tree, without prettification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Parsing;

impl Parsing {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<String, Document> for Parsing {
    fn run(&self, input: String) -> Document {
        parse_tree(&input)
    }
}

/// Wraps floating text of container elements into paragraphs.
#[derive(Debug, Default, Clone, Copy)]
pub struct WrapFloatingText;

impl WrapFloatingText {
    pub fn new() -> Self {
        Self
    }
}

impl Runnable<Document, Document> for WrapFloatingText {
    fn run(&self, mut input: Document) -> Document {
        paragraphs::wrap_floating_text(&mut input);
        input
    }
}

/// Typography, whitespace tidying and widow prevention.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrettyPrintText {
    options: Options,
}

impl PrettyPrintText {
    pub fn new(options: Options) -> Self {
        Self { options }
    }
}

impl Runnable<Document, Document> for PrettyPrintText {
    fn run(&self, mut input: Document) -> Document {
        typography::pretty_print_text(&mut input, &self.options);
        input
    }
}
