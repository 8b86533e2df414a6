//! XML serialization
//!
//! Produces the same shape a DOM `saveXML` of a node does: no declaration, no added
//! whitespace, empty elements self-closed.

use crate::doccy::tree::{Document, NodeId, NodeKind};

/// Serialize one node and its subtree.
pub fn to_xml(doc: &Document, id: NodeId) -> String {
    let mut output = String::new();
    write_node(doc, id, &mut output);
    output
}

/// Serialize the children of a node, concatenated.
pub fn children_to_xml(doc: &Document, id: NodeId) -> String {
    let mut output = String::new();
    for child in doc.children(id) {
        write_node(doc, *child, &mut output);
    }
    output
}

enum Step {
    Open(NodeId),
    Close(NodeId),
}

/// Depth first with an explicit stack; nesting depth is bounded by the input, not the
/// call stack.
fn write_node(doc: &Document, id: NodeId, output: &mut String) {
    let mut stack = vec![Step::Open(id)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Open(id) => match doc.kind(id) {
                NodeKind::Text(text) => escape_text(text, output),
                NodeKind::Element(element) => {
                    output.push('<');
                    output.push_str(&element.name);
                    for (name, value) in &element.attributes {
                        output.push(' ');
                        output.push_str(name);
                        output.push_str("=\"");
                        escape_attribute(value, output);
                        output.push('"');
                    }

                    let children = doc.children(id);
                    if children.is_empty() {
                        output.push_str("/>");
                        continue;
                    }

                    output.push('>');
                    stack.push(Step::Close(id));
                    stack.extend(children.iter().rev().map(|child| Step::Open(*child)));
                }
            },
            Step::Close(id) => {
                if let Some(name) = doc.name(id) {
                    output.push_str("</");
                    output.push_str(name);
                    output.push('>');
                }
            }
        }
    }
}

pub fn escape_text(text: &str, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
}

/// Attribute values additionally escape quotes and the whitespace characters an XML reader
/// would otherwise normalize away.
pub fn escape_attribute(value: &str, output: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' => output.push_str("&quot;"),
            '\n' => output.push_str("&#10;"),
            '\r' => output.push_str("&#13;"),
            '\t' => output.push_str("&#9;"),
            _ => output.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doccy::tree::Element;

    #[test]
    fn test_escapes() {
        let mut doc = Document::new();
        let root = doc.root();
        let mut element = Element::new("a");
        element.set_attribute("title", "say \"hi\"\n& <go>");
        let a = doc.append_element(root, element);
        doc.append_text(a, "1 < 2 & 3 > 2 \"ok\"");

        assert_eq!(
            to_xml(&doc, a),
            "<a title=\"say &quot;hi&quot;&#10;&amp; &lt;go&gt;\">1 &lt; 2 &amp; 3 &gt; 2 \"ok\"</a>"
        );
    }

    #[test]
    fn test_deep_nesting() {
        let mut doc = Document::new();
        let mut parent = doc.root();
        for _ in 0..100_000 {
            parent = doc.append_element(parent, Element::new("b"));
        }
        doc.append_text(parent, "x");

        let xml = to_xml(&doc, doc.root());
        assert!(xml.starts_with("<data><b><b>"));
        assert!(xml.ends_with("x</b></b></data>"));
        assert_eq!(xml.matches("</b>").count(), 100_000);
    }

    #[test]
    fn test_empty_elements_self_close() {
        let mut doc = Document::new();
        let root = doc.root();
        doc.append_element(root, Element::new("hr"));
        doc.append_text(root, "x");
        assert_eq!(children_to_xml(&doc, root), "<hr/>x");
    }
}
