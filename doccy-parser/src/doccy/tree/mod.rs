//! Document tree
//!
//!     The output of parsing: a rooted, ordered tree of element and text nodes. The root is
//!     always an element named `data`.
//!
//!     Nodes live in an arena owned by the [Document] and refer to each other through
//!     [NodeId] indices. Children are owned (listed) by their parent, the parent link is a
//!     plain back reference used for navigation, so there are no reference cycles and both
//!     ascending and descending are O(1).
//!
//!     Nodes removed from the tree stay in the arena, detached. They are never visited by
//!     traversals that start at the root.

pub mod document;
pub mod tags;

pub use document::{Document, Element, NodeId, NodeKind};
pub use tags::TagClass;
