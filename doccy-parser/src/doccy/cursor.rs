//! Cursor
//!
//!     A scanning position over an immutable source buffer. The cursor remembers the span of
//!     the last consumed token (`begin..end`) and answers "where is the next match of this
//!     pattern" questions relative to it.
//!
//!     Searches are bounded: forward searches look at no more than [LIMIT_AFTER] bytes past
//!     `end`, backward searches at no more than [LIMIT_BEFORE] bytes before `begin`. The
//!     grammar never needs more context than that, and bounding the haystack keeps every
//!     step independent of the size of the remaining input.
//!
//!     Pattern anchors refer to the window, so `^` in a forward search means "right at the
//!     cursor" and `$` in a backward search means "right before the token".

use regex::Regex;

/// Maximum number of bytes a forward search may look at.
pub const LIMIT_AFTER: usize = 1024;

/// Maximum number of bytes a backward search may look at.
pub const LIMIT_BEFORE: usize = 256;

/// A span of the source buffer discovered by a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub begin: usize,
    pub end: usize,
    pub value: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(value: &'a str, begin: usize) -> Self {
        Token {
            begin,
            end: begin + value.len(),
            value,
        }
    }

    /// Does the token value match the expression?
    pub fn test(&self, expression: &Regex) -> bool {
        expression.is_match(self.value)
    }

    /// Extract a capture group from the token value.
    pub fn extract(&self, expression: &Regex, group: usize) -> Option<&'a str> {
        expression
            .captures(self.value)
            .and_then(|captures| captures.get(group))
            .map(|m| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

/// Scanning state over one source buffer.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a str,
    begin: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(buffer: &'a str) -> Self {
        Cursor {
            buffer,
            begin: 0,
            end: 0,
        }
    }

    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Everything after the last consumed token.
    pub fn remaining(&self) -> &'a str {
        &self.buffer[self.end..]
    }

    /// Is there still data to scan?
    pub fn has_more(&self) -> bool {
        self.end < self.buffer.len()
    }

    /// Forward search with the default window.
    pub fn after(&self, expression: &Regex) -> Option<Token<'a>> {
        self.after_within(expression, LIMIT_AFTER)
    }

    /// Forward search from `end`, looking at no more than `limit` bytes.
    pub fn after_within(&self, expression: &Regex, limit: usize) -> Option<Token<'a>> {
        let stop = floor_char_boundary(self.buffer, self.end.saturating_add(limit));
        let window = &self.buffer[self.end..stop];

        expression
            .find(window)
            .map(|m| Token::new(m.as_str(), self.end + m.start()))
    }

    /// Backward search with the default window.
    pub fn before(&self, expression: &Regex) -> Option<Token<'a>> {
        self.before_within(expression, LIMIT_BEFORE)
    }

    /// Search the `limit` bytes that precede `begin`.
    ///
    /// The leftmost match inside the window is returned, so patterns that care about the
    /// text adjacent to the token should anchor with `$`.
    pub fn before_within(&self, expression: &Regex, limit: usize) -> Option<Token<'a>> {
        let start = ceil_char_boundary(self.buffer, self.begin.saturating_sub(limit));
        let window = &self.buffer[start..self.begin];

        expression
            .find(window)
            .map(|m| Token::new(m.as_str(), start + m.start()))
    }

    /// Move the cursor onto a token.
    pub fn advance(&mut self, token: &Token<'_>) {
        debug_assert!(token.begin <= token.end && token.end <= self.buffer.len());
        self.begin = token.begin;
        self.end = token.end;
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    let mut index = index;
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

fn ceil_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn re(pattern: &str) -> Regex {
        Regex::new(pattern).unwrap()
    }

    #[test]
    fn test_after_returns_absolute_positions() {
        let mut cursor = Cursor::new("abc def ghi");
        let token = cursor.after(&re(r"[a-z]+")).unwrap();
        assert_eq!((token.begin, token.end, token.value), (0, 3, "abc"));

        cursor.advance(&token);
        let token = cursor.after(&re(r"[a-z]+")).unwrap();
        assert_eq!((token.begin, token.end, token.value), (4, 7, "def"));
    }

    #[test]
    fn test_anchor_refers_to_cursor() {
        let mut cursor = Cursor::new("abc def");
        cursor.advance(&Token::new("abc", 0));
        assert!(cursor.after(&re(r"^[a-z]+")).is_none());
        assert_eq!(cursor.after(&re(r"^\s+")).unwrap().value, " ");
    }

    #[test]
    fn test_after_respects_limit() {
        let cursor = Cursor::new("aaaaab");
        assert!(cursor.after_within(&re("b"), 3).is_none());
        assert_eq!(cursor.after_within(&re("b"), 6).unwrap().begin, 5);
    }

    #[test]
    fn test_after_limit_lands_on_char_boundary() {
        let cursor = Cursor::new("ééé");
        // 3 bytes would split the second character.
        let token = cursor.after_within(&re(".+"), 3).unwrap();
        assert_eq!(token.value, "é");
    }

    #[test]
    fn test_before_searches_behind_token() {
        let mut cursor = Cursor::new("one two three");
        cursor.advance(&Token::new("three", 8));
        let token = cursor.before(&re(r"[a-z]+\s$")).unwrap();
        assert_eq!(token.value, "two ");
        assert_eq!(token.begin, 4);
    }

    #[test]
    fn test_has_more_and_remaining() {
        let mut cursor = Cursor::new("ab");
        assert!(cursor.has_more());
        cursor.advance(&Token::new("a", 0));
        assert_eq!(cursor.remaining(), "b");
        cursor.advance(&Token::new("b", 1));
        assert!(!cursor.has_more());
        assert_eq!(cursor.remaining(), "");
    }

    #[test]
    fn test_token_helpers() {
        let token = Token::new("@href", 3);
        assert!(token.test(&re(r"^@")));
        assert_eq!(token.extract(&re(r"^@([a-z]+)"), 1), Some("href"));
        assert_eq!(token.extract(&re(r"^#([a-z]+)"), 1), None);
    }
}
