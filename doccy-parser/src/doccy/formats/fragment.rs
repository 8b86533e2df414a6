//! XML fragment reader
//!
//! Reads a well-formed XML fragment (any number of top level nodes, no declaration) into
//! detached nodes of an existing document. This is the inverse of [super::xml] and is used
//! when a pass rewrites serialized markup and needs it back as a tree.
//!
//! The reader is strict. Mismatched or unclosed tags, unquoted attributes and unknown
//! entities are errors; nothing is appended to the document when reading fails.

use crate::doccy::tree::{Document, Element, NodeId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FragmentError {
    #[error("unexpected end of fragment at byte {0}")]
    UnexpectedEnd(usize),
    #[error("malformed tag at byte {0}")]
    MalformedTag(usize),
    #[error("end tag </{found}> at byte {offset} does not close <{expected}>")]
    MismatchedEndTag {
        offset: usize,
        expected: String,
        found: String,
    },
    #[error("end tag </{found}> at byte {offset} closes nothing")]
    UnexpectedEndTag { offset: usize, found: String },
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("invalid entity reference at byte {0}")]
    InvalidEntity(usize),
}

/// Parse `markup` and append the resulting nodes to `parent`.
///
/// Returns the ids of the nodes appended at the top level.
pub fn append_fragment(
    doc: &mut Document,
    parent: NodeId,
    markup: &str,
) -> Result<Vec<NodeId>, FragmentError> {
    let events = read_fragment(markup)?;
    let mut appended = Vec::new();
    let mut open = vec![parent];

    for event in events {
        let current = open.last().copied().unwrap_or(parent);
        match event {
            Event::Open(element) => {
                let id = doc.append_element(current, element);
                if open.len() == 1 {
                    appended.push(id);
                }
                open.push(id);
            }
            Event::Text(text) => {
                let id = doc.append_text(current, text);
                if open.len() == 1 {
                    appended.push(id);
                }
            }
            Event::Close => {
                if open.len() > 1 {
                    open.pop();
                }
            }
        }
    }
    Ok(appended)
}

/// A checked, flat reading of the fragment, so a failed read leaves the document untouched.
/// Open and close events are balanced.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Open(Element),
    Text(String),
    Close,
}

fn push_text(events: &mut Vec<Event>, text: String) {
    if text.is_empty() {
        return;
    }
    if let Some(Event::Text(existing)) = events.last_mut() {
        existing.push_str(&text);
    } else {
        events.push(Event::Text(text));
    }
}

fn read_fragment(markup: &str) -> Result<Vec<Event>, FragmentError> {
    let mut events = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut position = 0;

    while position < markup.len() {
        let rest = &markup[position..];

        if let Some(after) = rest.strip_prefix("</") {
            let close = after
                .find('>')
                .ok_or(FragmentError::UnexpectedEnd(markup.len()))?;
            let found = after[..close].trim_end();
            if !is_name(found) {
                return Err(FragmentError::MalformedTag(position));
            }
            let expected = open.pop().ok_or_else(|| FragmentError::UnexpectedEndTag {
                offset: position,
                found: found.to_string(),
            })?;
            if expected != found {
                return Err(FragmentError::MismatchedEndTag {
                    offset: position,
                    expected,
                    found: found.to_string(),
                });
            }
            events.push(Event::Close);
            position += 2 + close + 1;
        } else if rest.starts_with('<') {
            let (element, self_closing, consumed) = read_start_tag(markup, position)?;
            if !self_closing {
                open.push(element.name.clone());
            }
            events.push(Event::Open(element));
            if self_closing {
                events.push(Event::Close);
            }
            position += consumed;
        } else {
            let length = rest.find('<').unwrap_or(rest.len());
            push_text(&mut events, decode_entities(&rest[..length], position)?);
            position += length;
        }
    }

    if let Some(name) = open.pop() {
        return Err(FragmentError::Unclosed(name));
    }
    Ok(events)
}

/// Read `<name attr="value" ...>` or `<name .../>` starting at `start`.
fn read_start_tag(markup: &str, start: usize) -> Result<(Element, bool, usize), FragmentError> {
    let bytes = markup.as_bytes();
    let mut position = start + 1;

    let name_end = scan_name(markup, position);
    if name_end == position {
        return Err(FragmentError::MalformedTag(start));
    }
    let mut element = Element::new(&markup[position..name_end]);
    position = name_end;

    loop {
        let whitespace_start = position;
        while position < bytes.len() && bytes[position].is_ascii_whitespace() {
            position += 1;
        }
        match bytes.get(position) {
            None => return Err(FragmentError::UnexpectedEnd(markup.len())),
            Some(b'>') => return Ok((element, false, position + 1 - start)),
            Some(b'/') => {
                return match bytes.get(position + 1) {
                    Some(b'>') => Ok((element, true, position + 2 - start)),
                    None => Err(FragmentError::UnexpectedEnd(markup.len())),
                    Some(_) => Err(FragmentError::MalformedTag(start)),
                };
            }
            Some(_) if position == whitespace_start => {
                return Err(FragmentError::MalformedTag(start));
            }
            Some(_) => {}
        }

        let attribute_end = scan_name(markup, position);
        if attribute_end == position {
            return Err(FragmentError::MalformedTag(start));
        }
        let name = &markup[position..attribute_end];
        position = attribute_end;

        while position < bytes.len() && bytes[position].is_ascii_whitespace() {
            position += 1;
        }
        if bytes.get(position) != Some(&b'=') {
            return Err(FragmentError::MalformedTag(start));
        }
        position += 1;
        while position < bytes.len() && bytes[position].is_ascii_whitespace() {
            position += 1;
        }

        let quote = match bytes.get(position) {
            Some(quote @ (b'"' | b'\'')) => *quote,
            None => return Err(FragmentError::UnexpectedEnd(markup.len())),
            Some(_) => return Err(FragmentError::MalformedTag(start)),
        };
        position += 1;
        let value_length = markup[position..]
            .find(quote as char)
            .ok_or(FragmentError::UnexpectedEnd(markup.len()))?;
        let raw = &markup[position..position + value_length];
        if raw.contains('<') {
            return Err(FragmentError::MalformedTag(start));
        }
        element.set_attribute(name, decode_entities(raw, position)?);
        position += value_length + 1;
    }
}

fn scan_name(markup: &str, start: usize) -> usize {
    let mut end = start;
    for (offset, ch) in markup[start..].char_indices() {
        let valid = if offset == 0 {
            ch.is_alphabetic() || ch == '_' || ch == ':'
        } else {
            ch.is_alphanumeric() || matches!(ch, '_' | ':' | '-' | '.')
        };
        if !valid {
            break;
        }
        end = start + offset + ch.len_utf8();
    }
    end
}

fn is_name(candidate: &str) -> bool {
    !candidate.is_empty() && scan_name(candidate, 0) == candidate.len()
}

/// Decode the predefined entities and numeric character references.
fn decode_entities(raw: &str, offset: usize) -> Result<String, FragmentError> {
    if !raw.contains('&') {
        return Ok(raw.to_string());
    }

    let mut output = String::with_capacity(raw.len());
    let mut rest = raw;
    let mut consumed = 0;

    while let Some(amp) = rest.find('&') {
        output.push_str(&rest[..amp]);
        let at = offset + consumed + amp;
        let after = &rest[amp + 1..];
        let semi = after.find(';').ok_or(FragmentError::InvalidEntity(at))?;
        let entity = &after[..semi];

        let decoded = match entity {
            "amp" => '&',
            "lt" => '<',
            "gt" => '>',
            "quot" => '"',
            "apos" => '\'',
            _ => decode_numeric(entity).ok_or(FragmentError::InvalidEntity(at))?,
        };
        output.push(decoded);

        let step = amp + 1 + semi + 1;
        consumed += step;
        rest = &rest[step..];
    }
    output.push_str(rest);
    Ok(output)
}

fn decode_numeric(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let hex = digits
        .strip_prefix('x')
        .or_else(|| digits.strip_prefix('X'));
    let code = match hex {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}
