//! Paragraph re-flow
//!
//!     The children of every container element (`data`, `blockquote`, `div`, `header`,
//!     `footer`, `aside`, `article`, `section`) are split into groups. A child that is a
//!     paragraph break element (`p`, `ul`, `h1`, ...) forms a group of its own and is kept as
//!     is; runs of everything else form inline groups.
//!
//!     Inline groups are rewritten as markup: blank lines end a paragraph, a remaining line
//!     break after some text becomes `<br/>`, runs of whitespace collapse to one space and the
//!     result is wrapped in `<p>`. The container's children are then replaced by reading the
//!     rewritten markup back.
//!
//!     Containers are visited innermost first. Reading the markup back can fail, for instance
//!     when a blank line sits inside an inline element; the container is then left empty and
//!     a warning diagnostic is recorded on the document.

use super::{trim_ws, NON_WS, WS};
use crate::doccy::diagnostics::Diagnostic;
use crate::doccy::formats::fragment::append_fragment;
use crate::doccy::formats::xml::to_xml;
use crate::doccy::tree::tags::{is_paragraph_break, PARAGRAPH_CONTAINER_TAGS};
use crate::doccy::tree::{Document, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"((\r\n|\n){WS}*){{2,}}")).unwrap());

static LINE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"({NON_WS})\r?\n")).unwrap());

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(&format!(r"{WS}{{2,}}")).unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
enum Group {
    Break(String),
    Inline(String),
}

/// Re-flow the floating text of every container element.
pub fn wrap_floating_text(doc: &mut Document) {
    let containers = doc.elements_named(PARAGRAPH_CONTAINER_TAGS);
    debug!(containers = containers.len(), "wrapping floating text");
    for container in containers.into_iter().rev() {
        reflow(doc, container);
    }
}

/// Re-flow the children of one container.
pub fn reflow(doc: &mut Document, container: NodeId) {
    let content: String = group_children(doc, container)
        .into_iter()
        .filter_map(|group| match group {
            Group::Break(markup) => Some(markup),
            Group::Inline(markup) => paragraphs(&markup),
        })
        .collect();

    doc.remove_children(container);
    if content.is_empty() {
        return;
    }

    if let Err(error) = append_fragment(doc, container, &content) {
        let name = doc.name(container).unwrap_or_default().to_string();
        warn!(element = %name, %error, "re-flowed content is not well formed, dropping it");
        doc.push_diagnostic(
            Diagnostic::warning(format!("re-flowed content could not be read back: {error}"))
                .with_code("paragraph-reflow")
                .with_element(name),
        );
    }
}

fn group_children(doc: &Document, container: NodeId) -> Vec<Group> {
    let mut groups = vec![Group::Inline(String::new())];
    for &child in doc.children(container) {
        let markup = to_xml(doc, child);
        let breaks = doc.name(child).map(is_paragraph_break).unwrap_or(false);
        if breaks {
            groups.push(Group::Break(markup));
            groups.push(Group::Inline(String::new()));
        } else if let Some(Group::Inline(current)) = groups.last_mut() {
            current.push_str(&markup);
        }
    }
    groups
}

/// Turn the markup of an inline group into paragraphs, `None` when there is nothing to wrap.
fn paragraphs(markup: &str) -> Option<String> {
    let value = trim_ws(markup);
    if value.is_empty() {
        return None;
    }
    let value = BLANK_LINES.replace_all(value, "</p><p>");
    let value = LINE_BREAK.replace_all(&value, "${1}<br/>");
    let value = SPACES.replace_all(&value, " ");
    Some(format!("<p>{value}</p>"))
}
