//! Tag classification
//!
//! Every behavior that varies by element is decided by its tag name alone, so this is a
//! set of pure lookups rather than per-node dispatch.

/// Element names whose content is preformatted and must be left alone.
pub const PREFORMATTED_TAGS: &[&str] = &["code", "samp", "kbd", "var", "pre"];

/// Element names that flow inline with text. Everything else is block level.
pub const INLINE_TAGS: &[&str] = &[
    "data", "a", "abbr", "acronym", "dfn", "em", "strong", "i", "b", "big", "small", "tt",
    "span", "cite", "del", "ins", "q", "sub", "sup", "code", "samp", "kbd", "var",
];

/// Element names that contain list items.
pub const LIST_TAGS: &[&str] = &["ol", "ul", "dl"];

/// Elements that break a run of floating text into separate paragraphs.
pub const PARAGRAPH_BREAK_TAGS: &[&str] = &[
    "section", "article", "aside", "header", "footer", "nav", "dialog", "figure", "address",
    "p", "hr", "pre", "blockquote", "ol", "ul", "li", "dl", "dt", "dd", "img", "iframe",
    "embed", "object", "param", "video", "audio", "source", "canvas", "map", "area", "table",
    "caption", "colgroup", "col", "tbody", "thead", "tfoot", "tr", "td", "th", "form",
    "fieldset", "label", "input", "button", "select", "datalist", "optgroup", "option",
    "textarea", "keygen", "output", "details", "datagrid", "command", "bb", "menu", "legend",
    "div", "h1", "h2", "h3", "h4", "h5", "h6",
];

/// Elements whose floating text gets wrapped into paragraphs.
pub const PARAGRAPH_CONTAINER_TAGS: &[&str] = &[
    "data", "blockquote", "div", "header", "footer", "aside", "article", "section",
];

/// Everything the prettifier needs to know about a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TagClass {
    pub preformatted: bool,
    pub inline: bool,
    pub list: bool,
    pub paragraph_break: bool,
    pub paragraph_container: bool,
}

impl TagClass {
    pub fn of(name: &str) -> Self {
        let name = name.to_ascii_lowercase();
        let name = name.as_str();

        TagClass {
            preformatted: PREFORMATTED_TAGS.contains(&name),
            inline: INLINE_TAGS.contains(&name),
            list: LIST_TAGS.contains(&name),
            paragraph_break: PARAGRAPH_BREAK_TAGS.contains(&name),
            paragraph_container: PARAGRAPH_CONTAINER_TAGS.contains(&name),
        }
    }

    pub fn is_block_level(&self) -> bool {
        !self.inline
    }
}

pub fn is_preformatted(name: &str) -> bool {
    TagClass::of(name).preformatted
}

pub fn is_block_level(name: &str) -> bool {
    TagClass::of(name).is_block_level()
}

pub fn is_list(name: &str) -> bool {
    TagClass::of(name).list
}

pub fn is_paragraph_break(name: &str) -> bool {
    TagClass::of(name).paragraph_break
}

pub fn is_paragraph_container(name: &str) -> bool {
    TagClass::of(name).paragraph_container
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preformatted_tags() {
        for name in ["code", "samp", "kbd", "var", "pre", "PRE"] {
            assert!(is_preformatted(name), "{name} should be preformatted");
        }
        assert!(!is_preformatted("p"));
    }

    #[test]
    fn test_block_level() {
        assert!(is_block_level("p"));
        assert!(is_block_level("div"));
        assert!(is_block_level("br"));
        assert!(!is_block_level("em"));
        assert!(!is_block_level("data"));
        assert!(!is_block_level("code"));
    }

    #[test]
    fn test_lists_and_paragraphs() {
        assert!(is_list("ul"));
        assert!(!is_list("li"));
        assert!(is_paragraph_break("h3"));
        assert!(!is_paragraph_break("em"));
        assert!(is_paragraph_container("data"));
        assert!(is_paragraph_container("section"));
        assert!(!is_paragraph_container("p"));
    }

    #[test]
    fn test_pre_is_both_block_and_preformatted() {
        let class = TagClass::of("pre");
        assert!(class.preformatted);
        assert!(class.is_block_level());
        assert!(class.paragraph_break);
    }
}
