//! Parsing
//!
//!     Doccy markup is parsed in a single pass over the source. The main loop looks at one
//!     token at a time (see [crate::doccy::token]) and keeps track of a single piece of
//!     state: the element new nodes are appended to (the insertion point).
//!
//!         - Text and escaped braces become text nodes.
//!         - An open brace hands over to the [header] grammar. When the header is well
//!           formed the new element becomes the insertion point; when it is not, the brace is
//!           kept as literal text and parsing resumes right after it.
//!         - A close brace moves the insertion point back up to its parent.
//!
//! Unbalanced braces
//!
//!     Every literal open brace is expected to be balanced by a literal close brace later on,
//!     so close braces are first used to pay back literal opens. This is a plain counter: it
//!     knows how many literal opens are outstanding, not which one a close belongs to.
//!     Extra close braces at the root are dropped. Neither case is an error.

pub mod header;

use crate::doccy::cursor::{Cursor, Token};
use crate::doccy::options::Options;
use crate::doccy::prettify;
use crate::doccy::token::{next_token, MarkupToken};
use crate::doccy::tree::{Document, NodeId};
use tracing::{debug, trace};

/// Parse doccy markup and run the prettification passes the options ask for.
pub fn parse_document(source: &str, options: &Options) -> Document {
    let mut doc = parse_tree(source);
    prettify::prettify(&mut doc, options);
    doc
}

/// Parse doccy markup into a tree, without any prettification.
pub fn parse_tree(source: &str) -> Document {
    let mut doc = Document::new();
    let mut cursor = Cursor::new(source);
    let mut parent = doc.root();
    let mut skip_next_close: usize = 0;

    while cursor.has_more() {
        let Some((kind, length)) = next_token(cursor.remaining()) else {
            break;
        };
        let begin = cursor.end();
        let token = Token::new(&source[begin..begin + length], begin);
        cursor.advance(&token);

        match kind {
            MarkupToken::Open => match header::open_tag(&mut cursor, &mut doc, parent) {
                Some(element) => {
                    trace!(offset = begin, "open element");
                    parent = element;
                }
                None => {
                    debug!(
                        offset = begin,
                        "tag header is not well formed, keeping the brace as text"
                    );
                    append_literal(&mut doc, parent, token.value);
                    cursor.advance(&token);
                    skip_next_close += 1;
                }
            },
            MarkupToken::Close => {
                if skip_next_close > 0 {
                    append_literal(&mut doc, parent, token.value);
                    skip_next_close -= 1;
                } else if let Some(up) = doc.parent(parent) {
                    parent = up;
                } else {
                    trace!(offset = begin, "dropping close brace at the root");
                }
            }
            MarkupToken::EscapedBrace => {
                append_literal(&mut doc, parent, &token.value[1..]);
            }
            MarkupToken::Backslash | MarkupToken::Text => {
                append_literal(&mut doc, parent, token.value);
            }
        }
    }

    doc
}

/// Append text, extending the last child when it is already a text node.
fn append_literal(doc: &mut Document, parent: NodeId, value: &str) {
    if let Some(&last) = doc.children(parent).last() {
        if doc.text(last).is_some() {
            doc.push_text(last, value);
            return;
        }
    }
    doc.append_text(parent, value);
}
