//! Markup tokens
//!
//! The main parse loop only distinguishes four things: braces, escaped braces, a stray
//! backslash and everything else. The tokenization is done through the logos lexer library.
//!
//! The lexer is restarted at the cursor for every step of the main loop, so the tag header
//! grammar (which works with patterns on the cursor directly) can consume or give back
//! input in between.

use logos::Logos;

/// Token classes of the main parse loop.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkupToken {
    /// `\{` or `\}`: a literal brace.
    #[regex(r"\\[{}]")]
    EscapedBrace,

    #[token("{")]
    Open,

    #[token("}")]
    Close,

    /// A backslash that does not escape a brace.
    #[token("\\")]
    Backslash,

    /// A maximal run of anything that is not a brace or a backslash.
    #[regex(r"[^{}\\]+")]
    Text,
}

/// Lex the first token of `source`.
///
/// Returns the token class and its byte length, or `None` at the end of input.
pub fn next_token(source: &str) -> Option<(MarkupToken, usize)> {
    let mut lexer = MarkupToken::lexer(source);
    match lexer.next()? {
        Ok(token) => Some((token, lexer.span().end)),
        // Every character belongs to one of the classes, so this is unreachable for
        // well-formed UTF-8; treat it as the end of input rather than panicking.
        Err(()) => None,
    }
}

/// Tokenize a whole source, for inspection and tests.
pub fn tokenize(source: &str) -> Vec<(MarkupToken, std::ops::Range<usize>)> {
    let mut lexer = MarkupToken::lexer(source);
    let mut tokens = Vec::new();
    while let Some(result) = lexer.next() {
        if let Ok(token) = result {
            tokens.push((token, lexer.span()));
        }
    }
    tokens
}
