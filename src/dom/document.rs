//! Document - node arena, tree operations and element state.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use super::event::EventHandler;
use super::NodeId;
use crate::types::Cleanup;

// =============================================================================
// Types
// =============================================================================

/// Handle identifying one registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Box metrics of an element. The document does no layout, so these are
/// whatever the host last set (zero by default).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub client_width: f64,
    pub client_height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl Metrics {
    /// Look up a metric by its DOM property name (`clientWidth`, ...).
    pub fn get(&self, property: &str) -> Option<f64> {
        match property {
            "clientWidth" => Some(self.client_width),
            "clientHeight" => Some(self.client_height),
            "offsetWidth" => Some(self.offset_width),
            "offsetHeight" => Some(self.offset_height),
            _ => None,
        }
    }
}

pub(super) enum NodeKind {
    Element(ElementData),
    Text(String),
}

pub(super) struct ElementData {
    pub(super) tag: String,
    pub(super) attributes: Vec<(String, String)>,
    /// Value set through the property. `None` falls back to the `value`
    /// attribute.
    value: Option<String>,
    checked: bool,
    selected: bool,
    /// On a single select: the value was set to something no option has,
    /// so nothing is selected (`selectedIndex == -1`).
    unselected: bool,
    metrics: Metrics,
}

impl ElementData {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            value: None,
            checked: false,
            selected: false,
            unselected: false,
            metrics: Metrics::default(),
        }
    }

    pub(super) fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

struct Listener {
    id: ListenerId,
    kind: String,
    handler: EventHandler,
}

pub(super) struct Node {
    pub(super) kind: NodeKind,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    listeners: Vec<Listener>,
    on_destroy: Vec<Cleanup>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            listeners: Vec::new(),
            on_destroy: Vec::new(),
        }
    }
}

struct Tree {
    nodes: Vec<Option<Node>>,
    /// Current generation per slot, bumped when the slot is freed.
    generations: Vec<u32>,
    free: Vec<usize>,
    body: NodeId,
    next_listener: u64,
}

impl Tree {
    fn is_current(&self, id: NodeId) -> bool {
        self.generations.get(id.index) == Some(&id.generation)
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        if !self.is_current(id) {
            return None;
        }
        self.nodes.get(id.index).and_then(Option::as_ref)
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if !self.is_current(id) {
            return None;
        }
        self.nodes.get_mut(id.index).and_then(Option::as_mut)
    }

    fn allocate(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            self.nodes[index] = Some(node);
            NodeId::new(index, self.generations[index])
        } else {
            self.nodes.push(Some(node));
            self.generations.push(0);
            NodeId::new(self.nodes.len() - 1, 0)
        }
    }

    /// Take the node out of its slot and retire the id.
    fn release(&mut self, id: NodeId) -> Option<Node> {
        if !self.is_current(id) {
            return None;
        }
        let node = self.nodes.get_mut(id.index).and_then(Option::take)?;
        self.generations[id.index] = self.generations[id.index].wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }
}

// =============================================================================
// Document
// =============================================================================

/// A single-threaded in-memory document.
///
/// Cloning yields another handle to the same document. No borrow is held
/// while user callbacks run, so listeners and destroy callbacks may freely
/// call back into the document.
#[derive(Clone)]
pub struct Document {
    inner: Rc<RefCell<Tree>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document with a `<body>` root.
    pub fn new() -> Self {
        let mut tree = Tree {
            nodes: Vec::new(),
            generations: Vec::new(),
            free: Vec::new(),
            body: NodeId::new(0, 0),
            next_listener: 0,
        };
        let body = tree.allocate(Node::new(NodeKind::Element(ElementData::new("body"))));
        tree.body = body;
        Self {
            inner: Rc::new(RefCell::new(tree)),
        }
    }

    /// The root `<body>` element.
    pub fn body(&self) -> NodeId {
        self.inner.borrow().body
    }

    /// Whether two handles point at the same document.
    pub fn same_document(&self, other: &Document) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Number of live nodes, body included.
    pub fn node_count(&self) -> usize {
        self.inner.borrow().nodes.iter().filter(|n| n.is_some()).count()
    }

    pub(super) fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&Node) -> R) -> Option<R> {
        self.inner.borrow().node(id).map(f)
    }

    fn with_element<R>(&self, id: NodeId, f: impl FnOnce(&ElementData) -> R) -> Option<R> {
        let tree = self.inner.borrow();
        match tree.node(id).map(|n| &n.kind) {
            Some(NodeKind::Element(el)) => Some(f(el)),
            _ => None,
        }
    }

    fn with_element_mut<R>(&self, id: NodeId, f: impl FnOnce(&mut ElementData) -> R) -> Option<R> {
        let mut tree = self.inner.borrow_mut();
        match tree.node_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Element(el)) => Some(f(el)),
            _ => None,
        }
    }

    // =========================================================================
    // Tree
    // =========================================================================

    pub fn create_element(&self, tag: &str) -> NodeId {
        self.inner
            .borrow_mut()
            .allocate(Node::new(NodeKind::Element(ElementData::new(tag))))
    }

    pub fn create_text(&self, text: &str) -> NodeId {
        self.inner
            .borrow_mut()
            .allocate(Node::new(NodeKind::Text(text.to_string())))
    }

    /// Whether `id` refers to a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.inner.borrow().node(id).is_some()
    }

    /// Whether `id` is live and reachable from `<body>`.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.ancestry(id).last() == Some(&self.body())
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.with_element(id, |_| ()).is_some()
    }

    /// Append `child` as the last child of `parent`, detaching it from its
    /// previous parent first.
    pub fn append(&self, parent: NodeId, child: NodeId) {
        let mut guard = self.inner.borrow_mut();
        let tree = &mut *guard;
        if tree.node(parent).is_none() || parent == child {
            return;
        }
        let previous = match tree.node_mut(child) {
            Some(node) => node.parent.replace(parent),
            None => return,
        };
        if let Some(previous) = previous.and_then(|p| tree.node_mut(p)) {
            previous.children.retain(|c| *c != child);
        }
        if let Some(parent) = tree.node_mut(parent) {
            parent.children.push(child);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.inner.borrow().node(id).and_then(|n| n.parent)
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.with_node(id, |n| n.children.clone()).unwrap_or_default()
    }

    /// First child that is an element.
    pub fn first_element_child(&self, id: NodeId) -> Option<NodeId> {
        self.children(id).into_iter().find(|c| self.is_element(*c))
    }

    /// All descendants of `root` in document order, `root` excluded.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).into_iter().rev());
        }
        out
    }

    /// `id` followed by its ancestors up to the root.
    pub fn ancestry(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = Some(id);
        while let Some(node) = current {
            if !self.contains(node) {
                break;
            }
            path.push(node);
            current = self.parent(node);
        }
        path
    }

    fn post_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        for child in self.children(root) {
            out.extend(self.post_order(child));
        }
        out.push(root);
        out
    }

    /// Register `callback` to run when `id` is removed. Runs immediately if
    /// the node is already gone.
    pub fn on_destroy(&self, id: NodeId, callback: Cleanup) {
        let pending = {
            let mut tree = self.inner.borrow_mut();
            match tree.node_mut(id) {
                Some(node) => {
                    node.on_destroy.push(callback);
                    None
                }
                None => Some(callback),
            }
        };
        if let Some(callback) = pending {
            callback();
        }
    }

    /// Remove `id` and its subtree.
    ///
    /// Destroy callbacks run first for the whole subtree, children before
    /// parents, while every node is still attached. Only then are the nodes
    /// detached and their indices returned to the pool.
    pub fn remove(&self, id: NodeId) {
        if !self.contains(id) || id == self.body() {
            return;
        }
        let order = self.post_order(id);
        trace!(node = %id, subtree = order.len(), "removing node");

        for node in &order {
            let callbacks = self
                .inner
                .borrow_mut()
                .node_mut(*node)
                .map(|n| std::mem::take(&mut n.on_destroy))
                .unwrap_or_default();
            for callback in callbacks {
                callback();
            }
        }

        let parent = self.parent(id);
        let removed: Vec<Node> = {
            let mut guard = self.inner.borrow_mut();
            let tree = &mut *guard;
            if let Some(parent) = parent.and_then(|p| tree.node_mut(p)) {
                parent.children.retain(|c| *c != id);
            }
            let mut removed = Vec::with_capacity(order.len());
            for node in order {
                if let Some(data) = tree.release(node) {
                    removed.push(data);
                }
            }
            removed
        };
        // Listener closures may own document handles; drop them unborrowed.
        drop(removed);
    }

    /// Find descendants of `root` matching `predicate`.
    pub fn find_all(&self, root: NodeId, predicate: impl Fn(&Document, NodeId) -> bool) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| predicate(self, *id))
            .collect()
    }

    pub fn find_all_by_tag(&self, root: NodeId, tag: &str) -> Vec<NodeId> {
        let tag = tag.to_ascii_lowercase();
        self.find_all(root, |doc, id| doc.tag(id).as_deref() == Some(tag.as_str()))
    }

    pub fn find_by_tag(&self, root: NodeId, tag: &str) -> Option<NodeId> {
        self.find_all_by_tag(root, tag).into_iter().next()
    }

    pub fn find_by_attr(&self, root: NodeId, name: &str, value: &str) -> Option<NodeId> {
        self.find_all(root, |doc, id| doc.attr(id, name).as_deref() == Some(value))
            .into_iter()
            .next()
    }

    // =========================================================================
    // Attributes
    // =========================================================================

    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.with_element(id, |el| el.tag.clone())
    }

    pub fn attr(&self, id: NodeId, name: &str) -> Option<String> {
        self.with_element(id, |el| el.attr(name).map(str::to_string))
            .flatten()
    }

    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.attr(id, name).is_some()
    }

    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.with_element(id, |el| el.attributes.clone())
            .unwrap_or_default()
    }

    pub fn set_attr(&self, id: NodeId, name: &str, value: &str) {
        self.with_element_mut(id, |el| {
            match el.attributes.iter_mut().find(|(key, _)| key == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => el.attributes.push((name.to_string(), value.to_string())),
            }
        });
    }

    pub fn remove_attr(&self, id: NodeId, name: &str) {
        self.with_element_mut(id, |el| el.attributes.retain(|(key, _)| key != name));
    }

    /// Lower-cased `type` attribute of an input, `"text"` when absent.
    pub fn input_type(&self, id: NodeId) -> String {
        self.attr(id, "type")
            .map(|t| t.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string())
    }

    /// Whether the element is editable through `contenteditable`.
    pub fn is_content_editable(&self, id: NodeId) -> bool {
        matches!(self.attr(id, "contenteditable").as_deref(), Some(v) if v != "false")
    }

    // =========================================================================
    // Class list
    // =========================================================================

    pub fn class_list(&self, id: NodeId) -> Vec<String> {
        self.attr(id, "class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.class_list(id).iter().any(|c| c == class)
    }

    /// Add (`on`) or remove a class token.
    pub fn toggle_class(&self, id: NodeId, class: &str, on: bool) {
        let mut classes = self.class_list(id);
        let present = classes.iter().any(|c| c == class);
        if on == present {
            return;
        }
        if on {
            classes.push(class.to_string());
        } else {
            classes.retain(|c| c != class);
        }
        self.set_attr(id, "class", &classes.join(" "));
    }

    // =========================================================================
    // Form properties
    // =========================================================================

    /// The `value` property. Selects report their selected option's value,
    /// options fall back to their text.
    pub fn value(&self, id: NodeId) -> String {
        match self.tag(id).as_deref() {
            Some("select") => self.select_value(id),
            Some("option") => self.option_value(id),
            _ => self
                .with_element(id, |el| {
                    el.value
                        .clone()
                        .or_else(|| el.attr("value").map(str::to_string))
                        .unwrap_or_default()
                })
                .unwrap_or_default(),
        }
    }

    /// Set the `value` property. On a select this selects the option(s)
    /// whose value matches.
    pub fn set_value(&self, id: NodeId, value: &str) {
        if self.tag(id).as_deref() == Some("select") {
            let mut any = false;
            for option in self.options(id) {
                let matches = self.option_value(option) == value;
                any |= matches;
                self.set_selected(option, matches);
            }
            self.with_element_mut(id, |el| el.unselected = !any);
            return;
        }
        self.with_element_mut(id, |el| el.value = Some(value.to_string()));
    }

    pub fn checked(&self, id: NodeId) -> bool {
        self.with_element(id, |el| el.checked).unwrap_or(false)
    }

    pub fn set_checked(&self, id: NodeId, checked: bool) {
        self.with_element_mut(id, |el| el.checked = checked);
    }

    pub fn selected(&self, id: NodeId) -> bool {
        self.with_element(id, |el| el.selected).unwrap_or(false)
    }

    pub fn set_selected(&self, id: NodeId, selected: bool) {
        self.with_element_mut(id, |el| el.selected = selected);
        if selected {
            let select = self
                .ancestry(id)
                .into_iter()
                .skip(1)
                .find(|a| self.tag(*a).as_deref() == Some("select"));
            if let Some(select) = select {
                self.with_element_mut(select, |el| el.unselected = false);
            }
        }
    }

    /// Option elements of a select, in document order.
    pub fn options(&self, select: NodeId) -> Vec<NodeId> {
        self.find_all_by_tag(select, "option")
    }

    pub fn option_value(&self, option: NodeId) -> String {
        self.attr(option, "value")
            .unwrap_or_else(|| self.text_content(option))
    }

    /// Values of the selected options. A single select with nothing
    /// explicitly selected reports its first option, unless its value was
    /// set to one no option has.
    pub fn selected_values(&self, select: NodeId) -> Vec<String> {
        let options = self.options(select);
        let flagged: Vec<NodeId> = options.iter().copied().filter(|o| self.selected(*o)).collect();
        let unselected = self.with_element(select, |el| el.unselected).unwrap_or(false);
        if unselected || self.has_attr(select, "multiple") {
            return flagged.into_iter().map(|o| self.option_value(o)).collect();
        }
        flagged
            .first()
            .or(options.first())
            .map(|o| vec![self.option_value(*o)])
            .unwrap_or_default()
    }

    pub fn select_value(&self, select: NodeId) -> String {
        self.selected_values(select)
            .into_iter()
            .next()
            .unwrap_or_default()
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let own = self.with_node(id, |n| match &n.kind {
            NodeKind::Text(text) => Some(text.clone()),
            NodeKind::Element(_) => None,
        });
        match own {
            Some(Some(text)) => text,
            Some(None) => self
                .children(id)
                .into_iter()
                .map(|c| self.text_content(c))
                .collect(),
            None => String::new(),
        }
    }

    /// Replace the node's content with a single text node.
    pub fn set_text_content(&self, id: NodeId, text: &str) {
        if self.set_text(id, text) {
            return;
        }
        for child in self.children(id) {
            self.remove(child);
        }
        if !text.is_empty() {
            let node = self.create_text(text);
            self.append(id, node);
        }
    }

    /// Update the data of a text node. Returns false for non-text nodes.
    pub fn set_text(&self, id: NodeId, text: &str) -> bool {
        let mut tree = self.inner.borrow_mut();
        match tree.node_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Text(data)) => {
                if data != text {
                    *data = text.to_string();
                }
                true
            }
            _ => false,
        }
    }

    // =========================================================================
    // Metrics
    // =========================================================================

    pub fn metrics(&self, id: NodeId) -> Metrics {
        self.with_element(id, |el| el.metrics).unwrap_or_default()
    }

    pub fn set_metrics(&self, id: NodeId, metrics: Metrics) {
        self.with_element_mut(id, |el| el.metrics = metrics);
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register `handler` for `kind` events reaching `id`.
    pub fn add_listener(&self, id: NodeId, kind: &str, handler: EventHandler) -> ListenerId {
        let mut tree = self.inner.borrow_mut();
        let listener = ListenerId(tree.next_listener);
        tree.next_listener += 1;
        if let Some(node) = tree.node_mut(id) {
            node.listeners.push(Listener {
                id: listener,
                kind: kind.to_string(),
                handler,
            });
        }
        listener
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn remove_listener(&self, id: NodeId, listener: ListenerId) -> bool {
        let removed = {
            let mut tree = self.inner.borrow_mut();
            tree.node_mut(id).and_then(|node| {
                let position = node.listeners.iter().position(|l| l.id == listener)?;
                Some(node.listeners.remove(position))
            })
        };
        removed.is_some()
    }

    /// Register a listener and get back a cleanup that removes it.
    pub fn listen(&self, id: NodeId, kind: &str, handler: impl Fn(&super::Event) + 'static) -> Cleanup {
        let listener = self.add_listener(id, kind, Rc::new(handler));
        let document = self.clone();
        Box::new(move || {
            document.remove_listener(id, listener);
        })
    }

    pub fn has_listener(&self, id: NodeId, listener: ListenerId) -> bool {
        self.with_node(id, |n| n.listeners.iter().any(|l| l.id == listener))
            .unwrap_or(false)
    }

    pub fn listener_count(&self, id: NodeId, kind: &str) -> usize {
        self.with_node(id, |n| n.listeners.iter().filter(|l| l.kind == kind).count())
            .unwrap_or(0)
    }

    pub(super) fn listeners_for(&self, id: NodeId, kind: &str) -> Vec<(ListenerId, EventHandler)> {
        self.with_node(id, |n| {
            n.listeners
                .iter()
                .filter(|l| l.kind == kind)
                .map(|l| (l.id, l.handler.clone()))
                .collect()
        })
        .unwrap_or_default()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_create_and_append() {
        let doc = Document::new();
        let div = doc.create_element("DIV");
        doc.append(doc.body(), div);

        assert_eq!(doc.tag(div).as_deref(), Some("div"));
        assert_eq!(doc.parent(div), Some(doc.body()));
        assert_eq!(doc.children(doc.body()), vec![div]);
    }

    #[test]
    fn test_append_moves_node() {
        let doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let child = doc.create_text("x");
        doc.append(a, child);
        doc.append(b, child);

        assert!(doc.children(a).is_empty());
        assert_eq!(doc.children(b), vec![child]);
    }

    #[test]
    fn test_remove_runs_destroy_children_first() {
        let doc = Document::new();
        let parent = doc.create_element("div");
        let child = doc.create_element("span");
        doc.append(doc.body(), parent);
        doc.append(parent, child);

        let order = Rc::new(RefCell::new(Vec::new()));
        let order_parent = order.clone();
        let order_child = order.clone();
        let doc_for_child = doc.clone();
        doc.on_destroy(parent, Box::new(move || order_parent.borrow_mut().push("parent")));
        doc.on_destroy(
            child,
            Box::new(move || {
                // Still attached while callbacks run.
                assert!(doc_for_child.contains(child));
                order_child.borrow_mut().push("child");
            }),
        );

        doc.remove(parent);

        assert_eq!(*order.borrow(), vec!["child", "parent"]);
        assert!(!doc.contains(parent));
        assert!(!doc.contains(child));
        assert!(doc.children(doc.body()).is_empty());
    }

    #[test]
    fn test_indices_are_recycled() {
        let doc = Document::new();
        let div = doc.create_element("div");
        doc.append(doc.body(), div);
        doc.remove(div);

        let again = doc.create_element("p");
        assert_eq!(again, div);
        assert_eq!(doc.node_count(), 2);
    }

    #[test]
    fn test_on_destroy_for_missing_node_runs_now() {
        let doc = Document::new();
        let div = doc.create_element("div");
        doc.remove(div);

        let ran = Rc::new(Cell::new(false));
        let ran_clone = ran.clone();
        doc.on_destroy(div, Box::new(move || ran_clone.set(true)));
        assert!(ran.get());
    }

    #[test]
    fn test_class_toggle() {
        let doc = Document::new();
        let h1 = doc.create_element("h1");
        doc.set_attr(h1, "class", "large");
        doc.toggle_class(h1, "active", true);
        assert_eq!(doc.class_list(h1), vec!["large", "active"]);

        doc.toggle_class(h1, "active", true);
        assert_eq!(doc.class_list(h1), vec!["large", "active"]);

        doc.toggle_class(h1, "large", false);
        assert_eq!(doc.attr(h1, "class").as_deref(), Some("active"));
    }

    #[test]
    fn test_input_value_falls_back_to_attribute() {
        let doc = Document::new();
        let input = doc.create_element("input");
        doc.set_attr(input, "value", "x");
        assert_eq!(doc.value(input), "x");

        doc.set_value(input, "y");
        assert_eq!(doc.value(input), "y");
        assert_eq!(doc.attr(input, "value").as_deref(), Some("x"));
    }

    fn select_with(doc: &Document, values: &[&str], multiple: bool) -> (NodeId, Vec<NodeId>) {
        let select = doc.create_element("select");
        if multiple {
            doc.set_attr(select, "multiple", "");
        }
        let options = values
            .iter()
            .map(|v| {
                let option = doc.create_element("option");
                doc.set_attr(option, "value", v);
                doc.append(select, option);
                option
            })
            .collect();
        (select, options)
    }

    #[test]
    fn test_single_select_defaults_to_first_option() {
        let doc = Document::new();
        let (select, options) = select_with(&doc, &["a", "b", "c"], false);
        assert_eq!(doc.value(select), "a");

        doc.set_selected(options[1], true);
        assert_eq!(doc.value(select), "b");

        doc.set_value(select, "c");
        assert_eq!(doc.value(select), "c");
        assert!(!doc.selected(options[1]));
    }

    #[test]
    fn test_select_value_without_matching_option() {
        let doc = Document::new();
        let (select, options) = select_with(&doc, &["a", "b", "c"], false);
        doc.set_value(select, "z");
        assert!(doc.selected_values(select).is_empty());
        assert_eq!(doc.value(select), "");

        doc.set_selected(options[1], true);
        assert_eq!(doc.value(select), "b");
    }

    #[test]
    fn test_multi_select_values() {
        let doc = Document::new();
        let (select, options) = select_with(&doc, &["a", "b", "c"], true);
        assert!(doc.selected_values(select).is_empty());
        assert_eq!(doc.value(select), "");

        doc.set_selected(options[2], true);
        doc.set_selected(options[0], true);
        assert_eq!(doc.selected_values(select), vec!["a", "c"]);
    }

    #[test]
    fn test_text_content() {
        let doc = Document::new();
        let p = doc.create_element("p");
        let strong = doc.create_element("strong");
        let a = doc.create_text("Hello ");
        let b = doc.create_text("World");
        doc.append(p, a);
        doc.append(p, strong);
        doc.append(strong, b);
        assert_eq!(doc.text_content(p), "Hello World");

        doc.set_text_content(p, "bye");
        assert_eq!(doc.text_content(p), "bye");
        assert!(!doc.contains(strong));
    }

    #[test]
    fn test_is_connected_requires_body_ancestor() {
        let doc = Document::new();
        let section = doc.create_element("section");
        let h1 = doc.create_element("h1");
        doc.append(section, h1);
        assert!(doc.contains(h1));
        assert!(!doc.is_connected(h1));

        doc.append(doc.body(), section);
        assert!(doc.is_connected(h1));
    }

    #[test]
    fn test_stale_id_does_not_alias_reused_slot() {
        let doc = Document::new();
        let canvas = doc.create_element("canvas");
        doc.append(doc.body(), canvas);
        doc.remove(canvas);

        let p = doc.create_element("p");
        assert_eq!(p.index(), canvas.index());
        assert_ne!(p, canvas);
        assert!(!doc.contains(canvas));
        assert_eq!(doc.tag(canvas), None);
        assert_eq!(doc.tag(p).as_deref(), Some("p"));
    }

    #[test]
    fn test_listener_removal() {
        let doc = Document::new();
        let button = doc.create_element("button");
        let listener = doc.add_listener(button, "click", Rc::new(|_| {}));
        assert_eq!(doc.listener_count(button, "click"), 1);
        assert!(doc.remove_listener(button, listener));
        assert!(!doc.remove_listener(button, listener));
        assert_eq!(doc.listener_count(button, "click"), 0);
    }

    #[test]
    fn test_metrics_default_to_zero() {
        let doc = Document::new();
        let div = doc.create_element("div");
        assert_eq!(doc.metrics(div).get("clientWidth"), Some(0.0));
        assert_eq!(doc.metrics(div).get("scrollTop"), None);
    }
}
