//! `bind:value` on `<select>` and `<select multiple>`.

use tracing::trace;

use super::{resolve_initial, BindContext, BindingStrategy};
use crate::dom::{Document, NodeId};
use crate::store::watch;
use crate::types::{Cleanup, Value};

/// Read `text` back as the same kind of value the store held, so a numeric
/// store stays numeric.
pub(crate) fn coerce_like(previous: &Value, text: String) -> Value {
    match previous {
        Value::Number(_) => Value::Text(text.clone())
            .as_number()
            .map_or(Value::Text(text), Value::Number),
        _ => Value::Text(text),
    }
}

// =============================================================================
// Single select
// =============================================================================

/// Binds the selected option's value.
#[derive(Debug, Clone, Copy)]
pub struct SelectBinding;

impl BindingStrategy for SelectBinding {
    fn name(&self) -> &'static str {
        "select"
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let doc = cx.document();
        let fallback = (!doc.options(node).is_empty()).then(|| Value::Text(doc.select_value(node)));
        if let Some(value) = resolve_initial(cx.store(), fallback) {
            doc.set_value(node, &value.to_string());
        }
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        Some(watch(&**cx.store(), move |value| doc.set_value(node, &value.to_string())))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let store = cx.store().clone();
        Some(cx.document().listen(node, "change", move |_| {
            let value = coerce_like(&store.get(), doc.select_value(node));
            store.set(value);
        }))
    }
}

// =============================================================================
// Multi select
// =============================================================================

/// Binds the list of selected option values.
///
/// On change the new list keeps the previously selected values that are
/// still selected, in their previous order, followed by newly selected
/// options in document order.
#[derive(Debug, Clone, Copy)]
pub struct MultiSelectBinding;

fn apply_membership(doc: &Document, select: NodeId, selected: &[Value]) {
    for option in doc.options(select) {
        let value = Value::Text(doc.option_value(option));
        doc.set_selected(option, selected.iter().any(|v| v.loosely_eq(&value)));
    }
}

/// Merge the previous selection with what the select now reports.
pub(crate) fn merge_selection(previous: &[Value], now_selected: &[String]) -> Vec<Value> {
    let is_selected = |v: &Value| now_selected.iter().any(|s| v.loosely_eq(&Value::Text(s.clone())));
    let mut merged: Vec<Value> = Vec::with_capacity(now_selected.len());
    for value in previous {
        if is_selected(value) && !merged.iter().any(|m| m.loosely_eq(value)) {
            merged.push(value.clone());
        }
    }
    for text in now_selected {
        let value = Value::Text(text.clone());
        if !merged.iter().any(|m| m.loosely_eq(&value)) {
            merged.push(value);
        }
    }
    merged
}

impl BindingStrategy for MultiSelectBinding {
    fn name(&self) -> &'static str {
        "multi-select"
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let doc = cx.document();
        let rendered = doc
            .selected_values(node)
            .into_iter()
            .map(Value::Text)
            .collect();
        if let Some(value) = resolve_initial(cx.store(), Some(Value::List(rendered))) {
            apply_membership(doc, node, &value.as_list());
        }
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        Some(watch(&**cx.store(), move |value| apply_membership(&doc, node, &value.as_list())))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let store = cx.store().clone();
        Some(cx.document().listen(node, "change", move |_| {
            let merged = merge_selection(&store.get().as_list(), &doc.selected_values(node));
            trace!(node = %node, selected = merged.len(), "multi-select → store");
            store.set(Value::List(merged));
        }))
    }
}
