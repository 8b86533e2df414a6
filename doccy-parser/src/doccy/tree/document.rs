//! Arena backed document

use super::tags::TagClass;
use crate::doccy::diagnostics::Diagnostic;
use crate::doccy::formats::xml;
use std::fmt;

/// Index of a node in its document's arena.
pub type NodeId = usize;

/// Name of the root element every document starts with.
pub const ROOT_NAME: &str = "data";

/// An element: a tag name plus attributes in order of first occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, keeping its original position if it already exists.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name, value)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed doccy document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: a single `data` root element.
    pub fn new() -> Self {
        let root = Node {
            kind: NodeKind::Element(Element::new(ROOT_NAME)),
            parent: None,
            children: Vec::new(),
        };
        Document {
            nodes: vec![root],
            root: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes in the arena, detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn push_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    // ----- construction -----

    /// Create a detached element.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push_node(NodeKind::Element(element))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push_node(NodeKind::Text(text.into()))
    }

    fn push_node(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Append `child` as the last child of `parent`, detaching it from wherever it was.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        debug_assert_ne!(parent, child);
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    /// Convenience: create an element and append it.
    pub fn append_element(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.create_element(element);
        self.append_child(parent, id);
        id
    }

    /// Convenience: create a text node and append it.
    pub fn append_text(&mut self, parent: NodeId, text: impl Into<String>) -> NodeId {
        let id = self.create_text(text);
        self.append_child(parent, id);
        id
    }

    /// Remove a node from its parent. The node keeps its own subtree.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id].parent.take() {
            self.nodes[parent].children.retain(|child| *child != id);
        }
    }

    /// Detach every child of `id`.
    pub fn remove_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id].children);
        for child in children {
            self.nodes[child].parent = None;
        }
    }

    /// Put `replacements` where `id` is, in order, and detach `id`.
    pub fn replace_with(&mut self, id: NodeId, replacements: &[NodeId]) {
        let Some(parent) = self.nodes[id].parent else {
            return;
        };
        for &replacement in replacements {
            self.detach(replacement);
            self.nodes[replacement].parent = Some(parent);
        }
        let siblings = &mut self.nodes[parent].children;
        if let Some(position) = siblings.iter().position(|child| *child == id) {
            siblings.splice(position..=position, replacements.iter().copied());
        }
        self.nodes[id].parent = None;
    }

    // ----- navigation -----

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let position = siblings.iter().position(|child| *child == id)?;
        siblings.get(position + 1).copied()
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.nodes[id].parent?;
        let siblings = &self.nodes[parent].children;
        let position = siblings.iter().position(|child| *child == id)?;
        position.checked_sub(1).map(|previous| siblings[previous])
    }

    /// Number of element ancestors between the node and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id].parent;
        while let Some(parent) = current {
            depth += 1;
            current = self.nodes[parent].parent;
        }
        depth
    }

    /// All nodes below `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        result
    }

    /// Elements with any of the given names, root included, in document order.
    pub fn elements_named(&self, names: &[&str]) -> Vec<NodeId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|id| {
                self.name(*id)
                    .map(|name| names.iter().any(|n| n.eq_ignore_ascii_case(name)))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Text nodes below `id` in document order.
    pub fn text_nodes(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|node| self.text(*node).is_some())
            .collect()
    }

    // ----- content -----

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id].kind {
            NodeKind::Element(element) => Some(element),
            NodeKind::Text(_) => None,
        }
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|element| element.name.as_str())
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id].kind {
            NodeKind::Text(text) => Some(text),
            NodeKind::Element(_) => None,
        }
    }

    /// Replace the payload of a text node. Elements are left untouched.
    pub fn set_text(&mut self, id: NodeId, value: impl Into<String>) {
        if let NodeKind::Text(text) = &mut self.nodes[id].kind {
            *text = value.into();
        }
    }

    /// Extend the payload of a text node in place. Elements are left untouched.
    pub fn push_text(&mut self, id: NodeId, value: &str) {
        if let NodeKind::Text(text) = &mut self.nodes[id].kind {
            text.push_str(value);
        }
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|element| element.attribute(name))
    }

    pub fn attributes(&self, id: NodeId) -> &[(String, String)] {
        self.element(id)
            .map(|element| element.attributes.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let NodeKind::Element(element) = &mut self.nodes[id].kind {
            element.set_attribute(name, value);
        }
    }

    /// Concatenated text of a node and everything below it.
    pub fn text_content(&self, id: NodeId) -> String {
        if let Some(text) = self.text(id) {
            return text.to_string();
        }
        self.text_nodes(id)
            .into_iter()
            .filter_map(|node| self.text(node))
            .collect()
    }

    // ----- classification -----

    /// Tag class of an element, `None` for text.
    pub fn tag_class(&self, id: NodeId) -> Option<TagClass> {
        self.name(id).map(TagClass::of)
    }

    pub fn is_block_level(&self, id: NodeId) -> bool {
        self.tag_class(id)
            .map(|class| class.is_block_level())
            .unwrap_or(false)
    }

    /// Can typography be applied here?
    ///
    /// Preformatted elements are not pretty printable, and neither is anything inside one.
    /// Text nodes answer for their parent element. The root has no parent element; the
    /// document above it never suppresses.
    pub fn is_pretty_printable(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if let Some(class) = self.tag_class(node) {
                if class.preformatted {
                    return false;
                }
            }
            current = self.nodes[node].parent;
        }
        true
    }

    /// Pretty printability of every node under the root, indexed by [NodeId].
    ///
    /// Computed top down in one walk, so asking for every node costs O(n) instead of a walk
    /// up the ancestors per node. Nodes not under the root are reported as printable.
    pub fn pretty_printable_map(&self) -> Vec<bool> {
        let mut printable = vec![true; self.nodes.len()];
        let mut stack = vec![(self.root, true)];
        while let Some((id, inherited)) = stack.pop() {
            let preformatted = self
                .tag_class(id)
                .map(|class| class.preformatted)
                .unwrap_or(false);
            let value = inherited && !preformatted;
            printable[id] = value;
            stack.extend(self.nodes[id].children.iter().map(|child| (*child, value)));
        }
        printable
    }

    /// Serialize the whole tree, root included.
    pub fn to_xml(&self) -> String {
        xml::to_xml(self, self.root)
    }
}

impl fmt::Display for Document {
    /// Every child of the root, one per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children(self.root) {
            writeln!(f, "{}", xml::to_xml(self, *child))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, NodeId, NodeId) {
        let mut doc = Document::new();
        let root = doc.root();
        let p = doc.append_element(root, Element::new("p"));
        let text = doc.append_text(p, "hello ");
        let em = doc.append_element(p, Element::new("em"));
        doc.append_text(em, "world");
        (doc, p, text, em)
    }

    #[test]
    fn test_new_document_has_data_root() {
        let doc = Document::new();
        assert_eq!(doc.name(doc.root()), Some("data"));
        assert!(doc.children(doc.root()).is_empty());
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_navigation() {
        let (doc, p, text, em) = sample();
        assert_eq!(doc.parent(p), Some(doc.root()));
        assert_eq!(doc.children(p), &[text, em]);
        assert_eq!(doc.next_sibling(text), Some(em));
        assert_eq!(doc.next_sibling(em), None);
        assert_eq!(doc.depth(em), 2);
        assert_eq!(doc.text_content(p), "hello world");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let (doc, p, text, em) = sample();
        let names: Vec<NodeId> = doc.descendants(doc.root());
        assert_eq!(names, vec![p, text, em, em + 1]);
    }

    #[test]
    fn test_attributes_keep_first_position() {
        let mut element = Element::new("a");
        element.set_attribute("href", "x");
        element.set_attribute("id", "y");
        element.set_attribute("href", "z");
        assert_eq!(
            element.attributes,
            vec![
                ("href".to_string(), "z".to_string()),
                ("id".to_string(), "y".to_string())
            ]
        );
    }

    #[test]
    fn test_replace_with() {
        let (mut doc, p, text, em) = sample();
        let a = doc.create_text("a");
        let b = doc.create_text("b");
        doc.replace_with(text, &[a, b]);
        assert_eq!(doc.children(p), &[a, b, em]);
        assert_eq!(doc.parent(text), None);
        assert_eq!(doc.parent(a), Some(p));
    }

    #[test]
    fn test_remove_children_detaches() {
        let (mut doc, p, text, _) = sample();
        doc.remove_children(p);
        assert!(doc.children(p).is_empty());
        assert_eq!(doc.parent(text), None);
        assert_eq!(doc.descendants(doc.root()), vec![p]);
    }

    #[test]
    fn test_pretty_printable_walks_ancestors() {
        let mut doc = Document::new();
        let root = doc.root();
        let pre = doc.append_element(root, Element::new("pre"));
        let em = doc.append_element(pre, Element::new("em"));
        let text = doc.append_text(em, "x");
        let p = doc.append_element(root, Element::new("p"));

        assert!(doc.is_pretty_printable(root));
        assert!(!doc.is_pretty_printable(pre));
        assert!(!doc.is_pretty_printable(em));
        assert!(!doc.is_pretty_printable(text));
        assert!(doc.is_pretty_printable(p));
    }

    #[test]
    fn test_pretty_printable_map_matches_ancestor_walk() {
        let mut doc = Document::new();
        let root = doc.root();
        let pre = doc.append_element(root, Element::new("pre"));
        let em = doc.append_element(pre, Element::new("em"));
        doc.append_text(em, "x");
        let p = doc.append_element(root, Element::new("p"));
        doc.append_text(p, "y");

        let map = doc.pretty_printable_map();
        for id in std::iter::once(root).chain(doc.descendants(root)) {
            assert_eq!(map[id], doc.is_pretty_printable(id), "node {id}");
        }
    }

    #[test]
    fn test_push_text_extends_in_place() {
        let (mut doc, p, text, em) = sample();
        doc.push_text(text, "there ");
        doc.push_text(em, "ignored");
        assert_eq!(doc.text_content(p), "hello there world");
    }

    #[test]
    fn test_siblings() {
        let (doc, p, text, em) = sample();
        assert_eq!(doc.previous_sibling(em), Some(text));
        assert_eq!(doc.previous_sibling(text), None);
        assert_eq!(doc.previous_sibling(p), None);
    }

    #[test]
    fn test_elements_named_includes_root() {
        let (doc, p, _, _) = sample();
        assert_eq!(doc.elements_named(&["data", "p"]), vec![doc.root(), p]);
    }

    #[test]
    fn test_display_prints_root_children() {
        let (doc, _, _, _) = sample();
        assert_eq!(doc.to_string(), "<p>hello <em>world</em></p>\n");
        assert_eq!(doc.to_xml(), "<data><p>hello <em>world</em></p></data>");
    }
}
