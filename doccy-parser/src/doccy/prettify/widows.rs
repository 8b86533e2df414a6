//! Block whitespace and widowed words
//!
//! For every block level, pretty printable element:
//!
//!     - Whitespace at either end of a direct text child collapses to a single space. Text
//!       that is nothing but whitespace is emptied, unless it separates two inline
//!       siblings, in which case it is kept as one space.
//!     - The last text run that contains whitespace is found, either a direct text child or
//!       text inside an inline child. Its last two words are joined with a no-break space so
//!       the final word never ends up alone on a line.
//!
//! How the last words are matched depends on what follows the text run. Before a block
//! element the final word may carry one trailing space; at the end of the block, or before a
//! short inline element, it may not. Text followed by anything else is left alone.

use super::{is_ws, trim_ws, NON_WS, WS};
use crate::doccy::options::Options;
use crate::doccy::tree::{Document, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Joins widowed words.
pub const NO_BREAK_SPACE: char = '\u{a0}';

static EDGES: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("^{WS}+|{WS}+$")).unwrap());

static BEFORE_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"((^|{WS}){NON_WS}{{0,20}}){WS}({NON_WS}{{1,20}}{WS}?)$"
    ))
    .unwrap()
});

static TRAILING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"((^|{WS}){NON_WS}{{0,20}}){WS}({NON_WS}{{0,20}})$"
    ))
    .unwrap()
});

/// Inline siblings shorter than this still let the last words be joined.
const SHORT_INLINE: usize = 16;

pub fn tidy_blocks(doc: &mut Document, options: &Options) {
    let root = doc.root();
    let printable = doc.pretty_printable_map();
    let blocks: Vec<NodeId> = std::iter::once(root)
        .chain(doc.descendants(root))
        .filter(|id| doc.is_block_level(*id) && printable[*id])
        .collect();

    for block in blocks {
        tidy_block(doc, block, &printable, options.prevent_widowed_words);
    }
}

fn tidy_block(doc: &mut Document, block: NodeId, printable: &[bool], prevent_widows: bool) {
    let mut widow = None;

    for child in doc.children(block).to_vec() {
        if let Some(text) = doc.text(child) {
            let value = collapse_edges(text, separates_inlines(doc, child));
            let spaced = value.chars().any(is_ws);
            doc.set_text(child, value);
            if prevent_widows && spaced {
                widow = Some(child);
            }
        } else if prevent_widows && !doc.is_block_level(child) && printable[child] {
            for text in doc.text_nodes(child) {
                if doc.text(text).is_some_and(|value| value.chars().any(is_ws)) {
                    widow = Some(text);
                }
            }
        }
    }

    if let Some(text) = widow {
        join_last_words(doc, text);
    }
}

/// Does the node sit between two siblings that flow inline?
fn separates_inlines(doc: &Document, id: NodeId) -> bool {
    match (doc.previous_sibling(id), doc.next_sibling(id)) {
        (Some(previous), Some(next)) => !doc.is_block_level(previous) && !doc.is_block_level(next),
        _ => false,
    }
}

fn collapse_edges(value: &str, keep_separator: bool) -> String {
    let value = EDGES.replace_all(value, " ");
    if !trim_ws(&value).is_empty() {
        value.into_owned()
    } else if keep_separator && !value.is_empty() {
        " ".to_string()
    } else {
        String::new()
    }
}

fn join_last_words(doc: &mut Document, text: NodeId) {
    let pattern: &Regex = match doc.next_sibling(text) {
        None => &*TRAILING,
        Some(next) if doc.is_block_level(next) => &*BEFORE_BLOCK,
        Some(next)
            if doc.element(next).is_some()
                && trim_ws(&doc.text_content(next)).chars().count() < SHORT_INLINE =>
        {
            &*TRAILING
        }
        Some(_) => return,
    };

    let Some(value) = doc.text(text) else {
        return;
    };
    let joined = pattern
        .replace(value, format!("${{1}}{NO_BREAK_SPACE}${{3}}").as_str())
        .into_owned();
    doc.set_text(text, joined);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doccy::parsing::parse_tree;

    fn tidied(source: &str, prevent_widowed_words: bool) -> String {
        let mut doc = parse_tree(source);
        let options = Options {
            prevent_widowed_words,
            ..Options::default()
        };
        tidy_blocks(&mut doc, &options);
        doc.to_string()
    }

    #[test]
    fn test_last_words_are_joined() {
        assert_eq!(
            tidied("{p: one two three four five}", true),
            "<p>one two three four\u{a0}five</p>\n"
        );
    }

    #[test]
    fn test_disabled() {
        assert_eq!(
            tidied("{p: one two three}", false),
            "<p>one two three</p>\n"
        );
    }

    #[test]
    fn test_edges_collapse() {
        assert_eq!(
            tidied("{p: {em: a}   tail  }", false),
            "<p><em>a</em> tail </p>\n"
        );
        assert_eq!(tidied("{div:  \n {p: x} \n }", false), "<div><p>x</p></div>\n");
    }

    #[test]
    fn test_text_inside_inline_child() {
        assert_eq!(
            tidied("{p: see {em: the last words}}", true),
            "<p>see <em>the last\u{a0}words</em></p>\n"
        );
    }

    #[test]
    fn test_short_inline_sibling() {
        assert_eq!(
            tidied("{p: one two {em: three}}", true),
            "<p>one two\u{a0}<em>three</em></p>\n"
        );
    }

    #[test]
    fn test_long_inline_sibling_is_left_alone() {
        assert_eq!(
            tidied("{p: one two {code: a rather long piece of code}}", true),
            "<p>one two <code>a rather long piece of code</code></p>\n"
        );
    }

    #[test]
    fn test_before_block_sibling() {
        assert_eq!(
            tidied("{div: one two three {p: x}}", true),
            "<div>one two\u{a0}three <p>x</p></div>\n"
        );
    }

    #[test]
    fn test_space_between_inline_siblings_is_kept() {
        assert_eq!(
            tidied("{p: {em: a}  \n {em: b}}", false),
            "<p><em>a</em> <em>b</em></p>\n"
        );
        assert_eq!(
            tidied("{div: {em: a} {p: b}}", false),
            "<div><em>a</em><p>b</p></div>\n"
        );
    }

    #[test]
    fn test_preformatted_blocks_are_skipped() {
        assert_eq!(
            tidied("{pre: one two  }", true),
            "<pre>one two  </pre>\n"
        );
    }
}
