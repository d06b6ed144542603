//! Components and helpers shared by the integration suites.
//!
//! - `Counter`: a button showing "Count is N" that increments on click,
//!   forwards the click, and yields `count` to its default slot
//! - `List`: one `<li>` per item yielding `item` to the default slot, then a
//!   `footer` slot yielding `items`

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use spark_bind::{
    render, watch, Component, ComponentScope, Document, ElementDescriptor, ElementRef, MountHandle, Result, Store,
    Value, DEFAULT_SLOT,
};

// =============================================================================
// Helpers
// =============================================================================

/// Render `view` into a fresh document.
pub fn mount(view: &ElementDescriptor) -> (Document, MountHandle) {
    let doc = Document::new();
    let handle = render(&doc, view).unwrap();
    (doc, handle)
}

/// Every element with `tag` inside the rendered tree, in document order.
pub fn all(handle: &MountHandle, tag: &str) -> Vec<ElementRef> {
    handle.container().query_all(tag)
}

/// First element with `tag` inside the rendered tree.
pub fn one(handle: &MountHandle, tag: &str) -> ElementRef {
    handle.container().query(tag).unwrap()
}

/// Records every `(value, name)` pair a `let:` setter receives.
pub fn recorder() -> (Rc<RefCell<Vec<(Value, String)>>>, impl Fn(&Value, &str) + 'static) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    (calls, move |value: &Value, name: &str| {
        sink.borrow_mut().push((value.clone(), name.to_string()))
    })
}

// =============================================================================
// Counter
// =============================================================================

pub struct Counter;

impl Counter {
    pub fn component() -> Rc<dyn Component> {
        Rc::new(Counter)
    }
}

impl Component for Counter {
    fn name(&self) -> &str {
        "Counter"
    }

    fn render(&self, scope: &ComponentScope) -> Result<()> {
        let initial = match scope.prop_value("initialCount") {
            Value::Undefined => Value::from(0),
            value => value,
        };
        let count = scope.prop("count", initial);
        let doc = scope.document().clone();

        let button = doc.create_element("button");
        doc.append(scope.target(), button);

        if scope.has_slot(DEFAULT_SLOT) {
            if let Some(pass) = scope.render_slot(DEFAULT_SLOT, button, &[("count", count.get())])? {
                let stop = watch(&*count, move |value| pass.update(&[("count", value.clone())]));
                scope.on_destroy(stop);
            }
        } else {
            let label = doc.create_text(&format!("Count is {}", count.get()));
            doc.append(button, label);
            let text_doc = doc.clone();
            let stop = watch(&*count, move |value| {
                text_doc.set_text(label, &format!("Count is {value}"));
            });
            scope.on_destroy(stop);
        }

        let component = scope.component().clone();
        let cell = count.clone();
        let off = doc.listen(button, "click", move |event| {
            cell.update(&|value: &Value| Value::from(value.as_number().unwrap_or(0.0) + 1.0));
            component.forward(event);
        });
        scope.on_destroy(off);
        Ok(())
    }
}

// =============================================================================
// List
// =============================================================================

pub struct List;

impl List {
    pub fn component() -> Rc<dyn Component> {
        Rc::new(List)
    }
}

impl Component for List {
    fn name(&self) -> &str {
        "List"
    }

    fn render(&self, scope: &ComponentScope) -> Result<()> {
        let items = scope.prop_value("items").as_list();
        let doc = scope.document();
        let target = scope.target();

        let ul = doc.create_element("ul");
        doc.append(target, ul);
        for item in &items {
            let li = doc.create_element("li");
            doc.append(ul, li);
            scope.render_slot(DEFAULT_SLOT, li, &[("item", item.clone())])?;
        }

        let gap = doc.create_text(" ");
        doc.append(target, gap);
        scope.render_slot("footer", target, &[("items", Value::List(items))])?;
        Ok(())
    }
}
