//! Typography
//!
//!     Every text node whose parent is pretty printable goes through a cascade of
//!     substitutions, each switched by its own option:
//!
//!         quotation marks   it's → it’s, '99 → ’99, 'a' → ‘a’, "a" → “a”
//!         sentence spacing  `. ` → `.` + no-break space + space
//!         ellipses          ... → …
//!         hyphens           -- → —, - → –
//!
//!     With `convert_textual_elements` the result is also split into stylable elements:
//!     `ABC(expansion)` becomes `<abbr title="expansion">ABC</abbr>`, and dashes, ampersands,
//!     quotation marks and ellipses are each wrapped in a classed `<span>`.
//!
//!     Whitespace tidying and widow prevention run afterwards, see [super::widows].

use super::{widows, NON_WS};
use crate::doccy::options::Options;
use crate::doccy::tree::{Document, Element, NodeId};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::debug;

static APOSTROPHE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\w)'(\w)|(\s)'(\d+\w?)\b").unwrap());

static CLOSING_SINGLE: Lazy<Regex> = Lazy::new(|| Regex::new(&format!("({NON_WS})'")).unwrap());

static CLOSING_DOUBLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("({NON_WS})\"")).unwrap());

static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"([!?.]) ").unwrap());

static ACRONYM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b([A-Z][A-Z0-9]{2,})\b\(([^)]*)\)").unwrap());

/// A piece of converted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    /// An element holding a single run of text.
    Element(Element, String),
}

/// Apply the typography cascade to every eligible text node, then tidy block whitespace.
pub fn pretty_print_text(doc: &mut Document, options: &Options) {
    let mut changed = 0;
    let printable = doc.pretty_printable_map();
    for text in doc.text_nodes(doc.root()) {
        let Some(parent) = doc.parent(text) else {
            continue;
        };
        if !printable[parent] {
            continue;
        }
        let Some(original) = doc.text(text) else {
            continue;
        };

        let value = typeset(original, options);
        if value != original {
            changed += 1;
        }

        if options.convert_textual_elements && !value.is_empty() {
            let pieces = textual_elements(&value);
            if !matches!(pieces.as_slice(), [Piece::Text(_)]) {
                let replacements: Vec<NodeId> =
                    pieces.into_iter().map(|piece| create(doc, piece)).collect();
                doc.replace_with(text, &replacements);
                continue;
            }
        }

        doc.set_text(text, value);
    }
    debug!(changed, "typeset text");

    widows::tidy_blocks(doc, options);
}

/// Run the substitution cascade over a piece of text.
pub fn typeset(value: &str, options: &Options) -> String {
    let mut value = value.to_string();

    if options.pretty_quotation_marks {
        value = replace_guarded(
            &APOSTROPHE,
            &value,
            |captures, rest| captures.get(3).is_none() || !rest.starts_with('\''),
            |captures| match (captures.get(1), captures.get(2)) {
                (Some(before), Some(after)) => format!("{}’{}", before.as_str(), after.as_str()),
                _ => format!("{}’{}", &captures[3], &captures[4]),
            },
        );
        value = replace_guarded(&CLOSING_SINGLE, &value, closes_quote, |captures| {
            format!("{}’", &captures[1])
        });
        value = value.replace('\'', "‘");
        value = replace_guarded(&CLOSING_DOUBLE, &value, closes_quote, |captures| {
            format!("{}”", &captures[1])
        });
        value = value.replace('"', "“");
    }

    if options.double_sentence_spacing {
        value = SENTENCE_END
            .replace_all(&value, "${1}\u{a0} ")
            .into_owned();
    }

    if options.pretty_ellipses {
        value = value.replace("...", "…");
    }

    if options.pretty_hyphens {
        value = value.replace("--", "—").replace('-', "–");
    }

    value
}

/// Is a quote followed by something that makes it a closing quote?
fn closes_quote(_: &Captures<'_>, rest: &str) -> bool {
    rest.chars()
        .next()
        .map_or(true, |c| c.is_ascii_whitespace() || c.is_ascii_punctuation())
}

/// Replace every match the guard accepts.
///
/// The guard sees the captures and the text following the match. A rejected match is
/// retried one character further on.
fn replace_guarded<G, R>(expression: &Regex, text: &str, guard: G, replace: R) -> String
where
    G: Fn(&Captures<'_>, &str) -> bool,
    R: Fn(&Captures<'_>) -> String,
{
    let mut output = String::with_capacity(text.len());
    let mut copied = 0;
    let mut position = 0;

    while position < text.len() {
        let Some(captures) = expression.captures_at(text, position) else {
            break;
        };
        let Some(whole) = captures.get(0) else {
            break;
        };

        if guard(&captures, &text[whole.end()..]) {
            output.push_str(&text[copied..whole.start()]);
            output.push_str(&replace(&captures));
            copied = whole.end();
            position = whole.end();
        } else {
            let step = text[whole.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            position = whole.start() + step;
        }
    }

    output.push_str(&text[copied..]);
    output
}

/// Split typeset text into plain text and stylable elements.
pub fn textual_elements(value: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut copied = 0;

    for captures in ACRONYM.captures_iter(value) {
        let Some(whole) = captures.get(0) else {
            continue;
        };
        split_glyphs(&value[copied..whole.start()], &mut pieces);

        let mut abbr = Element::new("abbr");
        abbr.set_attribute("title", &captures[2]);
        pieces.push(Piece::Element(abbr, captures[1].to_string()));
        copied = whole.end();
    }

    split_glyphs(&value[copied..], &mut pieces);
    pieces
}

fn split_glyphs(text: &str, pieces: &mut Vec<Piece>) {
    let mut plain = String::new();
    for c in text.chars() {
        let Some(class) = glyph_class(c) else {
            plain.push(c);
            continue;
        };
        if !plain.is_empty() {
            pieces.push(Piece::Text(std::mem::take(&mut plain)));
        }
        let mut span = Element::new("span");
        span.set_attribute("class", class);
        pieces.push(Piece::Element(span, c.to_string()));
    }
    if !plain.is_empty() {
        pieces.push(Piece::Text(plain));
    }
}

fn glyph_class(c: char) -> Option<&'static str> {
    match c {
        '—' => Some("dash em"),
        '–' => Some("dash en"),
        '&' => Some("ampersand"),
        '‘' => Some("quote left single"),
        '’' => Some("quote right single"),
        '“' => Some("quote left double"),
        '”' => Some("quote right double"),
        '«' => Some("quote left angle"),
        '»' => Some("quote right angle"),
        '…' => Some("ellipsis"),
        _ => None,
    }
}

fn create(doc: &mut Document, piece: Piece) -> NodeId {
    match piece {
        Piece::Text(text) => doc.create_text(text),
        Piece::Element(element, text) => {
            let id = doc.create_element(element);
            if !text.is_empty() {
                let text = doc.create_text(text);
                doc.append_child(id, text);
            }
            id
        }
    }
}
