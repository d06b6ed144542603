//! Simulated user interaction.
//!
//! These helpers drive the document the way a user would: they change the
//! form state first and then fire the events a browser fires, so bindings
//! see exactly what they would see in the real thing.

use tracing::debug;

use super::{Document, Event, NodeId};

/// State captured before a checkbox/radio click so it can be rolled back
/// when a listener prevents the default action.
enum Activation {
    Checkbox { was_checked: bool },
    Radio { previous: Vec<(NodeId, bool)> },
}

impl Document {
    fn is_input_of_type(&self, node: NodeId, kind: &str) -> bool {
        self.tag(node).as_deref() == Some("input") && self.input_type(node) == kind
    }

    /// Radios sharing `node`'s non-empty `name`, `node` included.
    fn radio_group(&self, node: NodeId) -> Vec<NodeId> {
        match self.attr(node, "name").filter(|n| !n.is_empty()) {
            Some(name) => self.find_all(self.body(), |doc, id| {
                doc.is_input_of_type(id, "radio") && doc.attr(id, "name").as_deref() == Some(&name)
            }),
            None => vec![node],
        }
    }

    fn activate(&self, node: NodeId) -> Option<Activation> {
        if self.is_input_of_type(node, "checkbox") {
            let was_checked = self.checked(node);
            self.set_checked(node, !was_checked);
            return Some(Activation::Checkbox { was_checked });
        }
        if self.is_input_of_type(node, "radio") {
            if self.checked(node) {
                return None;
            }
            let mut group = self.radio_group(node);
            if !group.contains(&node) {
                group.push(node);
            }
            let previous: Vec<(NodeId, bool)> = group.iter().map(|id| (*id, self.checked(*id))).collect();
            for id in group {
                self.set_checked(id, id == node);
            }
            return Some(Activation::Radio { previous });
        }
        None
    }

    fn roll_back(&self, node: NodeId, activation: Activation) {
        match activation {
            Activation::Checkbox { was_checked } => self.set_checked(node, was_checked),
            Activation::Radio { previous } => {
                for (id, checked) in previous {
                    self.set_checked(id, checked);
                }
            }
        }
    }

    /// Click `node`.
    ///
    /// Checkboxes toggle and radios check before the click is dispatched.
    /// If a listener prevents the default, the change is rolled back;
    /// otherwise `input` and `change` follow.
    pub fn click(&self, node: NodeId) -> Event {
        let activation = self.activate(node);
        let event = self.dispatch(Event::new("click", node));
        if let Some(activation) = activation {
            if event.default_prevented() {
                debug!(node = %node, "click default prevented, rolling back");
                self.roll_back(node, activation);
            } else {
                self.fire(node, "input");
                self.fire(node, "change");
            }
        }
        event
    }

    /// Type `text` one character at a time at the end of the current value
    /// (or content, for contenteditable elements). Fires `input` after each
    /// character.
    pub fn type_text(&self, node: NodeId, text: &str) {
        let editable = self.is_content_editable(node);
        for ch in text.chars() {
            if editable {
                let mut content = self.text_content(node);
                content.push(ch);
                self.set_text_content(node, &content);
            } else {
                let mut value = self.value(node);
                value.push(ch);
                self.set_value(node, &value);
            }
            self.fire(node, "input");
        }
    }

    /// Empty the field and fire `input`.
    pub fn clear(&self, node: NodeId) {
        if self.is_content_editable(node) {
            self.set_text_content(node, "");
        } else {
            self.set_value(node, "");
        }
        self.fire(node, "input");
    }

    /// Replace an editable element's content in one go and fire `input`.
    pub fn edit_content(&self, node: NodeId, text: &str) {
        self.set_text_content(node, text);
        self.fire(node, "input");
    }

    /// Select the options of `select` whose values are in `values`, firing
    /// `input` and `change` after each one. A single select ends up with the
    /// last matching option selected.
    pub fn select_options(&self, select: NodeId, values: &[&str]) {
        let multiple = self.has_attr(select, "multiple");
        for option in self.options(select) {
            let value = self.option_value(option);
            if !values.contains(&value.as_str()) {
                continue;
            }
            if multiple {
                self.set_selected(option, true);
            } else {
                self.set_value(select, &value);
            }
            self.fire(select, "input");
            self.fire(select, "change");
        }
    }

    /// Deselect options of a multi-select by value.
    pub fn deselect_options(&self, select: NodeId, values: &[&str]) {
        if !self.has_attr(select, "multiple") {
            debug!(node = %select, "deselect on a single select ignored");
            return;
        }
        for option in self.options(select) {
            if !self.selected(option) || !values.contains(&self.option_value(option).as_str()) {
                continue;
            }
            self.set_selected(option, false);
            self.fire(select, "input");
            self.fire(select, "change");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn input(doc: &Document, kind: &str) -> NodeId {
        let node = doc.create_element("input");
        doc.set_attr(node, "type", kind);
        doc.append(doc.body(), node);
        node
    }

    fn record(doc: &Document, node: NodeId, kinds: &[&str]) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in kinds {
            let log = log.clone();
            // Dropping the cleanup without calling it keeps the listener.
            let _ = doc.listen(node, kind, move |e| log.borrow_mut().push(e.kind().to_string()));
        }
        log
    }

    #[test]
    fn test_click_toggles_checkbox() {
        let doc = Document::new();
        let checkbox = input(&doc, "checkbox");
        let log = record(&doc, checkbox, &["click", "input", "change"]);

        doc.click(checkbox);
        assert!(doc.checked(checkbox));
        assert_eq!(*log.borrow(), vec!["click", "input", "change"]);

        doc.click(checkbox);
        assert!(!doc.checked(checkbox));
    }

    #[test]
    fn test_prevented_click_rolls_back() {
        let doc = Document::new();
        let checkbox = input(&doc, "checkbox");
        let _prevent = doc.listen(checkbox, "click", |e| e.prevent_default());
        let log = record(&doc, checkbox, &["change"]);

        let event = doc.click(checkbox);
        assert!(event.default_prevented());
        assert!(!doc.checked(checkbox));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_radio_click_unchecks_named_siblings() {
        let doc = Document::new();
        let a = input(&doc, "radio");
        let b = input(&doc, "radio");
        doc.set_attr(a, "name", "pick");
        doc.set_attr(b, "name", "pick");

        doc.click(a);
        doc.click(b);
        assert!(!doc.checked(a));
        assert!(doc.checked(b));

        let log = record(&doc, b, &["change"]);
        doc.click(b);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_type_and_clear() {
        let doc = Document::new();
        let text = input(&doc, "text");
        doc.set_value(text, "a");
        let log = record(&doc, text, &["input"]);

        doc.type_text(text, "bc");
        assert_eq!(doc.value(text), "abc");
        assert_eq!(log.borrow().len(), 2);

        doc.clear(text);
        assert_eq!(doc.value(text), "");
    }

    #[test]
    fn test_select_and_deselect_options() {
        let doc = Document::new();
        let select = doc.create_element("select");
        doc.set_attr(select, "multiple", "");
        for value in ["a", "b", "c"] {
            let option = doc.create_element("option");
            doc.set_attr(option, "value", value);
            doc.append(select, option);
        }

        doc.select_options(select, &["a", "c"]);
        assert_eq!(doc.selected_values(select), vec!["a", "c"]);

        doc.deselect_options(select, &["a"]);
        assert_eq!(doc.selected_values(select), vec!["c"]);
    }
}
