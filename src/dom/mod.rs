//! Host document - the minimal DOM the binding runtime runs against.
//!
//! Nodes live in an index arena owned by a [`Document`]:
//! - Indices are recycled through a free pool; each reuse bumps the slot's
//!   generation so stale ids stop resolving
//! - Removing a node removes its subtree, running every destroy callback
//!   (children before parents) before any node is detached
//! - Listeners are plain callbacks keyed by event name; dispatch bubbles
//!   from the target to the root
//!
//! The document models just what bindings need: attributes, the form
//! properties `value`/`checked`/`selected`, class lists, text content,
//! measured metrics and HTML serialization. It has no layout engine, so
//! metrics stay zero unless the host sets them.

mod document;
mod event;
mod html;
mod interact;

use std::fmt;

pub use document::{Document, ListenerId, Metrics};
pub use event::{Event, EventHandler};

use crate::types::Value;

// =============================================================================
// NodeId
// =============================================================================

/// Arena slot of a node inside its [`Document`], plus the generation the
/// slot had when the node was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Raw arena index.
    pub fn index(self) -> usize {
        self.index
    }

    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generation == 0 {
            write!(f, "#{}", self.index)
        } else {
            write!(f, "#{}v{}", self.index, self.generation)
        }
    }
}

// =============================================================================
// ElementRef
// =============================================================================

/// A live element: a document handle plus a node id.
///
/// This is what action factories receive, and what `bind:this` exposes
/// through [`Value::Element`].
#[derive(Clone)]
pub struct ElementRef {
    document: Document,
    id: NodeId,
}

impl ElementRef {
    pub fn new(document: Document, id: NodeId) -> Self {
        Self { document, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Whether the node is attached to the document body.
    pub fn is_connected(&self) -> bool {
        self.document.is_connected(self.id)
    }

    /// Whether the node still exists, attached or not.
    pub fn is_alive(&self) -> bool {
        self.document.contains(self.id)
    }

    pub fn tag(&self) -> Option<String> {
        self.document.tag(self.id)
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.document.attr(self.id, name)
    }

    pub fn value(&self) -> String {
        self.document.value(self.id)
    }

    pub fn checked(&self) -> bool {
        self.document.checked(self.id)
    }

    pub fn text_content(&self) -> String {
        self.document.text_content(self.id)
    }

    pub fn inner_html(&self) -> String {
        self.document.inner_html(self.id)
    }

    pub fn outer_html(&self) -> String {
        self.document.outer_html(self.id)
    }

    pub fn class_list(&self) -> Vec<String> {
        self.document.class_list(self.id)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.document.has_class(self.id, class)
    }

    /// First descendant with tag `tag`, in document order.
    pub fn query(&self, tag: &str) -> Option<ElementRef> {
        self.document
            .find_by_tag(self.id, tag)
            .map(|id| ElementRef::new(self.document.clone(), id))
    }

    pub fn query_all(&self, tag: &str) -> Vec<ElementRef> {
        self.document
            .find_all_by_tag(self.id, tag)
            .into_iter()
            .map(|id| ElementRef::new(self.document.clone(), id))
            .collect()
    }

    /// Simulate a user click.
    pub fn click(&self) -> Event {
        self.document.click(self.id)
    }

    /// Simulate typing `text` at the end of the current content.
    pub fn type_text(&self, text: &str) {
        self.document.type_text(self.id, text);
    }

    /// Simulate clearing the field.
    pub fn clear(&self) {
        self.document.clear(self.id);
    }

    /// The element as a [`Value::Element`].
    pub fn to_value(&self) -> Value {
        Value::Element(self.id)
    }
}

impl PartialEq for ElementRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.document.same_document(&other.document)
    }
}

impl fmt::Debug for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("id", &self.id)
            .field("tag", &self.tag())
            .finish()
    }
}
