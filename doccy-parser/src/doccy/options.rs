//! Formatting options
//!
//! Read once per parse. Every flag can be deserialized on its own; missing flags take their
//! defaults, so a configuration file only needs to mention what it changes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Wrap floating text of container elements into paragraphs.
    pub wrap_floating_text: bool,

    /// Run the typography pass (quotes, dashes, ellipses, widows).
    pub pretty_print_text: bool,

    /// Convert acronyms, ampersands, ellipses, dashes and quotation marks into
    /// stylable markup.
    pub convert_textual_elements: bool,

    /// Use classic "double spacing" between sentences instead of single spacing.
    pub double_sentence_spacing: bool,

    /// Join the last words of a block with a non-breaking space.
    pub prevent_widowed_words: bool,

    /// Convert three full stops into an ellipsis.
    pub pretty_ellipses: bool,

    /// Convert double hyphens into em dashes and single hyphens into en dashes.
    pub pretty_hyphens: bool,

    /// Convert straight quotation marks into typographer's quotation marks.
    pub pretty_quotation_marks: bool,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            wrap_floating_text: true,
            pretty_print_text: true,
            convert_textual_elements: false,
            double_sentence_spacing: false,
            prevent_widowed_words: true,
            pretty_ellipses: true,
            pretty_hyphens: true,
            pretty_quotation_marks: true,
        }
    }
}

impl Options {
    /// Options that leave the parsed tree exactly as the markup described it.
    pub fn raw() -> Self {
        Options {
            wrap_floating_text: false,
            pretty_print_text: false,
            ..Options::default()
        }
    }
}
