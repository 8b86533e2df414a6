//! Tag header grammar
//!
//!     The header is everything between an open brace and the `: ` that starts the element
//!     content:
//!
//!         {a @href "http://x.test/" .external: text}
//!          ^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^^
//!
//!     It is read one header token at a time. A token is one of: an element name, the
//!     terminator, an attribute marker (`@name`, `%name`, `.class`, `#id`) or, failing those,
//!     a single character. Tokens are classified in this order:
//!
//!         1. The terminator ends the header.
//!         2. A marker sets or opens an attribute. Only the first marker may be glued to what
//!            precedes it; later markers need leading whitespace. A glued marker that follows
//!            an open attribute is part of that attribute's value.
//!         3. While an attribute is open, the token is appended to its value. A value that
//!            starts with a double quote is read as a quoted run instead (see [read_quoted]).
//!            The quoted run is not bounded by the cursor window; it ends at the closing quote
//!            however far away that is.
//!         4. The element name, once.
//!         5. Whitespace is skipped.
//!         6. Anything else means the header is not well formed.
//!
//!     The header is well formed when it has a name and reached the terminator. Only then is
//!     the element added to the tree; otherwise nothing is, and the caller decides where to
//!     resume.

use crate::doccy::cursor::{Cursor, Token};
use crate::doccy::tree::{Document, Element, NodeId};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static HEADER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[a-z][a-z0-9]*|:\s+|\s*[@#.%][a-z][a-z0-9\-]*|(?s:.))").unwrap()
});

static TERMINATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:\s+$").unwrap());

static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\s*)([@#.%])([a-z][a-z0-9\-]*)$").unwrap());

static ELEMENT_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*$").unwrap());

/// Attributes collected while reading a header, in order of first occurrence.
#[derive(Debug, Default)]
struct Header {
    name: Option<String>,
    attributes: Vec<(String, String)>,
    current: Option<String>,
    ended: bool,
}

impl Header {
    fn value(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set(&mut self, name: &str, value: String) {
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    fn open(&mut self, name: String) {
        self.set(&name, String::new());
        self.current = Some(name);
    }

    fn add_class(&mut self, class: &str) {
        let value = match self.value("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set("class", value);
        self.current = None;
    }

    fn set_id(&mut self, id: &str) {
        self.set("id", id.to_string());
        self.current = None;
    }

    /// Is the open attribute still waiting for its first value character?
    fn awaiting_value(&self) -> bool {
        self.current
            .as_deref()
            .map(|name| self.value(name).unwrap_or("").is_empty())
            .unwrap_or(false)
    }

    fn append_value(&mut self, token: &str) {
        let Some(name) = self.current.clone() else {
            return;
        };
        let existing = self.value(&name).unwrap_or("").to_string();
        let mut value = if existing.is_empty() {
            token.trim_start()
        } else {
            token
        };
        if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
            value = &value[1..value.len() - 1];
        }
        self.set(&name, format!("{existing}{value}"));
    }

    fn into_element(self) -> Option<Element> {
        if !self.ended {
            return None;
        }
        let mut element = Element::new(self.name?);
        element.attributes = self.attributes;
        Some(element)
    }
}

/// Read a tag header at the cursor, which sits right after an open brace.
///
/// On success the element is appended to `parent` and its id returned; the cursor is left
/// after the terminator. On failure the tree is untouched and the cursor position is
/// meaningless.
pub fn open_tag(cursor: &mut Cursor<'_>, doc: &mut Document, parent: NodeId) -> Option<NodeId> {
    let element = read_header(cursor)?;
    Some(doc.append_element(parent, element))
}

/// Read a tag header into an element without touching any tree.
pub fn read_header(cursor: &mut Cursor<'_>) -> Option<Element> {
    let mut header = Header::default();

    while cursor.has_more() {
        if header.awaiting_value() {
            let lookahead = cursor.remaining();
            if let Some((value, consumed)) = read_quoted(lookahead) {
                let begin = cursor.end();
                cursor.advance(&Token::new(&lookahead[..consumed], begin));
                if let Some(name) = header.current.take() {
                    header.set(&name, value);
                }
                continue;
            }
        }

        let Some(token) = cursor.after(&HEADER_TOKEN) else {
            break;
        };
        cursor.advance(&token);

        if token.test(&TERMINATOR) {
            header.ended = true;
            break;
        }

        if let Some(captures) = MARKER.captures(token.value) {
            let spaced = !captures[1].is_empty();
            if header.current.is_none() || spaced {
                let ident = &captures[3];
                match &captures[2] {
                    "@" => header.open(ident.to_string()),
                    "%" => header.open(format!("data-{ident}")),
                    "." => header.add_class(ident),
                    _ => header.set_id(ident),
                }
                continue;
            }
        }

        if header.current.is_some() {
            header.append_value(token.value);
            continue;
        }

        if header.name.is_none() && token.test(&ELEMENT_NAME) {
            header.name = Some(token.value.to_string());
            continue;
        }

        if token.value.trim().is_empty() {
            continue;
        }

        trace!(offset = token.begin, token = token.value, "unexpected header token");
        break;
    }

    header.into_element()
}

/// Read a double quoted value, skipping leading whitespace.
///
/// `\"` stands for a quote, everything else is copied as is. Returns the decoded value and
/// the number of bytes consumed (closing quote included), or `None` when the input does not
/// start with a quote or the quote is never closed.
pub fn read_quoted(input: &str) -> Option<(String, usize)> {
    let start = input.len() - input.trim_start().len();
    let mut chars = input[start..].char_indices();
    if !matches!(chars.next(), Some((_, '"'))) {
        return None;
    }

    let mut value = String::new();
    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => return Some((value, start + offset + 1)),
            '\\' if input[start + offset + 1..].starts_with('"') => {
                chars.next();
                value.push('"');
            }
            _ => value.push(c),
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(source: &str) -> Option<Element> {
        let mut cursor = Cursor::new(source);
        read_header(&mut cursor)
    }

    fn attributes(element: &Element) -> Vec<(&str, &str)> {
        element
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_name_and_terminator() {
        let element = header("p: text").unwrap();
        assert_eq!(element.name, "p");
        assert!(element.attributes.is_empty());
    }

    #[test]
    fn test_cursor_stops_after_terminator() {
        let mut cursor = Cursor::new("em:  text");
        read_header(&mut cursor).unwrap();
        assert_eq!(cursor.remaining(), "text");
    }

    #[test]
    fn test_missing_terminator_fails() {
        assert!(header("notanattr").is_none());
        assert!(header("p:text").is_none());
    }

    #[test]
    fn test_missing_name_fails() {
        assert!(header(".alpha: x").is_none());
        assert!(header(": x").is_none());
    }

    #[test]
    fn test_second_name_fails() {
        assert!(header("p q: x").is_none());
    }

    #[test]
    fn test_class_and_id_shorthand() {
        let element = header("div.alpha.beta#main: x").unwrap();
        assert_eq!(element.name, "div");
        assert_eq!(
            attributes(&element),
            vec![("class", "alpha beta"), ("id", "main")]
        );
    }

    #[test]
    fn test_last_id_wins() {
        let element = header("p #one #two: x").unwrap();
        assert_eq!(element.attribute("id"), Some("two"));
    }

    #[test]
    fn test_quoted_attribute() {
        let element = header(r#"a @href "http://x.test/": text"#).unwrap();
        assert_eq!(attributes(&element), vec![("href", "http://x.test/")]);
    }

    #[test]
    fn test_escaped_quote_in_value() {
        let element = header(r#"q @title "say \"hi\"": x"#).unwrap();
        assert_eq!(element.attribute("title"), Some(r#"say "hi""#));
    }

    #[test]
    fn test_unquoted_value_keeps_glued_markers() {
        let element = header("a @href http://x.test/a#b: text").unwrap();
        assert_eq!(element.attribute("href"), Some("http://x.test/a#b"));
    }

    #[test]
    fn test_spaced_marker_closes_value() {
        let element = header("img @src a.png @alt Alt text .wide: ").unwrap();
        assert_eq!(
            attributes(&element),
            vec![("src", "a.png"), ("alt", "Alt text"), ("class", "wide")]
        );
    }

    #[test]
    fn test_data_attribute() {
        let element = header("span %user-id 42: x").unwrap();
        assert_eq!(element.attribute("data-user-id"), Some("42"));
    }

    #[test]
    fn test_reopened_attribute_resets_value() {
        let element = header("a @title one @title two: x").unwrap();
        assert_eq!(attributes(&element), vec![("title", "two")]);
    }

    #[test]
    fn test_unterminated_quote_is_plain_value() {
        let element = header(r#"a @title "open: x"#).unwrap();
        assert_eq!(element.attribute("title"), Some(r#""open"#));
    }

    #[test]
    fn test_newline_terminator() {
        let element = header("div:\nbody").unwrap();
        assert_eq!(element.name, "div");
    }

    #[test]
    fn test_long_quoted_value() {
        let value = "v ".repeat(1500);
        let source = format!("a @title \"{value}\": x");
        let element = header(&source).unwrap();
        assert_eq!(element.attribute("title"), Some(value.as_str()));
    }

    #[test]
    fn test_read_quoted() {
        assert_eq!(read_quoted(r#" "abc" rest"#), Some(("abc".to_string(), 6)));
        assert_eq!(read_quoted(r#""a\"b""#), Some((r#"a"b"#.to_string(), 6)));
        assert_eq!(read_quoted(r#""a\b""#), Some((r"a\b".to_string(), 5)));
        assert_eq!(read_quoted("abc"), None);
        assert_eq!(read_quoted(r#""abc"#), None);
    }

    #[test]
    fn test_open_tag_appends_on_success_only() {
        let mut doc = Document::new();
        let root = doc.root();

        let mut cursor = Cursor::new("p: x");
        let id = open_tag(&mut cursor, &mut doc, root).unwrap();
        assert_eq!(doc.parent(id), Some(root));

        let mut cursor = Cursor::new("p x");
        assert!(open_tag(&mut cursor, &mut doc, root).is_none());
        assert_eq!(doc.children(root).len(), 1);
    }
}
