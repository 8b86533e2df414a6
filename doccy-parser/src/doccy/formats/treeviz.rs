//! Treeviz formatter
//!
//! One line per node, nesting drawn with box characters, so the shape of a parsed document
//! can be scanned at a glance:
//!
//!     ⧉ data
//!     ├─ ¶ p
//!     │ ├─ ◦ A paragraph with
//!     │ ├─ ○ em
//!     │ │ └─ ◦ emphasis
//!     │ └─ ◦ .
//!     └─ ○ hr
//!
//! Icons
//!     Root: ⧉
//!     Paragraph (p): ¶
//!     Line break (br): ↵
//!     Preformatted (code, samp, kbd, var, pre): ƒ
//!     Anchor (a): ⊕
//!     Other elements: ○
//!     Text: ◦
//!
//! Element labels show the tag name followed by `#id` and `.class` shorthand when present.
//! Text labels are truncated to 30 characters, with newlines shown as `↵`.

use super::snapshot::{snapshot_from_document, NodeSnapshot};
use crate::doccy::tree::tags::is_preformatted;
use crate::doccy::tree::Document;

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(snapshot: &NodeSnapshot) -> &'static str {
    if snapshot.node_type == "Text" {
        return "◦";
    }
    match snapshot.label.as_str() {
        "p" => "¶",
        "br" => "↵",
        "a" => "⊕",
        name if is_preformatted(name) => "ƒ",
        _ => "○",
    }
}

fn label(snapshot: &NodeSnapshot) -> String {
    if snapshot.node_type == "Text" {
        return truncate(&snapshot.label.replace('\n', "↵"), 30);
    }

    let mut label = snapshot.label.clone();
    for attribute in &snapshot.attributes {
        match attribute.name.as_str() {
            "id" => {
                label.push('#');
                label.push_str(&attribute.value);
            }
            "class" => {
                for class in attribute.value.split_whitespace() {
                    label.push('.');
                    label.push_str(class);
                }
            }
            _ => {}
        }
    }
    label
}

fn format_snapshot(
    snapshot: &NodeSnapshot,
    prefix: &str,
    child_index: usize,
    child_count: usize,
) -> String {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };

    let mut output = format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(snapshot),
        label(snapshot)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, &child_prefix, i, child_count));
    }

    output
}

pub fn to_treeviz_str(doc: &Document) -> String {
    let snapshot = snapshot_from_document(doc);
    let mut output = format!("⧉ {}\n", snapshot.label);

    let child_count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        output.push_str(&format_snapshot(child, "", i, child_count));
    }

    output
}
