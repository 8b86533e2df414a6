//! Prettification
//!
//!     Runs over a finished tree and rewrites it in place, in two passes:
//!
//!         1. [paragraphs]: floating text of container elements is wrapped into `<p>`
//!            elements, blank lines split paragraphs and single line breaks become `<br/>`.
//!         2. [typography]: straight quotes, dashes and ellipses are replaced by their
//!            typographic forms, then [widows] tidies the whitespace at the edges of block
//!            text and joins the last words of each block.
//!
//!     Each pass can be switched off through [Options]. Neither pass touches preformatted
//!     elements (`code`, `samp`, `kbd`, `var`, `pre`) or anything inside them.
//!
//!     Whitespace in these passes is ASCII whitespace only, so the no-break spaces they
//!     insert are never matched again.

pub mod paragraphs;
pub mod typography;
pub mod widows;

use crate::doccy::options::Options;
use crate::doccy::tree::Document;
use tracing::debug;

/// ASCII whitespace, as a regex class.
pub(crate) const WS: &str = r"[\t\n\x0C\r ]";

/// Anything but ASCII whitespace, as a regex class.
pub(crate) const NON_WS: &str = r"[^\t\n\x0C\r ]";

pub(crate) fn is_ws(c: char) -> bool {
    c.is_ascii_whitespace()
}

pub(crate) fn trim_ws(value: &str) -> &str {
    value.trim_matches(is_ws)
}

/// Run every pass the options ask for.
pub fn prettify(doc: &mut Document, options: &Options) {
    if options.wrap_floating_text {
        paragraphs::wrap_floating_text(doc);
    }
    if options.pretty_print_text {
        typography::pretty_print_text(doc, options);
    }
    debug!(
        nodes = doc.node_count(),
        diagnostics = doc.diagnostics().len(),
        "prettified document"
    );
}
