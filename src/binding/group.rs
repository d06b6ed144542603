//! `bind:group` on checkbox and radio inputs.
//!
//! Sibling inputs bound to the same store form a group. The store is shared
//! by reference; each input subscribes on its own and re-evaluates its
//! `checked` state from the store on every change.
//!
//! - Checkbox groups hold a list of the checked inputs' values, in the order
//!   they were checked.
//! - Radio groups hold the checked input's value.
//!
//! When the store starts undefined, the first input of a checkbox group
//! seeds it with `[]` and statically checked inputs add themselves. A radio
//! group seeds it only from a statically checked input.

use tracing::trace;

use super::select::coerce_like;
use super::{BindContext, BindingStrategy};
use crate::dom::{Document, NodeId};
use crate::store::watch;
use crate::types::{Cleanup, Value};

#[derive(Debug, Clone, Copy)]
pub struct GroupBinding;

fn is_checkbox(doc: &Document, node: NodeId) -> bool {
    doc.input_type(node) == "checkbox"
}

/// Whether `value` (the input's own value) is selected by `group`.
fn is_member(checkbox: bool, group: &Value, value: &Value) -> bool {
    if checkbox {
        group.as_list().iter().any(|v| v.loosely_eq(value))
    } else {
        group.loosely_eq(value)
    }
}

/// Add or remove `value` from a checkbox group list. Added values take the
/// kind of the existing members, so a numeric group stays numeric.
pub(crate) fn toggle_member(group: &Value, value: &Value, checked: bool) -> Value {
    let mut list = group.as_list();
    let present = list.iter().any(|v| v.loosely_eq(value));
    if checked && !present {
        let added = match list.first() {
            Some(like) => coerce_like(like, value.to_string()),
            None => value.clone(),
        };
        list.push(added);
    } else if !checked {
        list.retain(|v| !v.loosely_eq(value));
    }
    Value::List(list)
}

impl BindingStrategy for GroupBinding {
    fn name(&self) -> &'static str {
        "group"
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let doc = cx.document();
        let store = cx.store();
        let checkbox = is_checkbox(doc, node);
        let value = Value::Text(doc.value(node));
        let statically_checked = doc.checked(node);

        if store.get().is_undefined() {
            if checkbox {
                store.set(Value::List(Vec::new()));
                cx.mark_group_seeded();
            } else if statically_checked {
                cx.mark_group_seeded();
            }
        }

        // Inputs of a group this pass seeded contribute their static state.
        if cx.group_seeded() && statically_checked {
            trace!(node = %node, value = %value, "static check seeds group");
            let seeded = if checkbox {
                toggle_member(&store.get(), &value, true)
            } else {
                value.clone()
            };
            store.set(seeded);
        }

        doc.set_checked(node, is_member(checkbox, &store.get(), &value));
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let checkbox = is_checkbox(&doc, node);
        Some(watch(&**cx.store(), move |group| {
            let value = Value::Text(doc.value(node));
            doc.set_checked(node, is_member(checkbox, group, &value));
        }))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let store = cx.store().clone();
        let checkbox = is_checkbox(&doc, node);
        Some(cx.document().listen(node, "change", move |_| {
            let value = Value::Text(doc.value(node));
            let checked = doc.checked(node);
            if checkbox {
                store.set(toggle_member(&store.get(), &value, checked));
            } else if checked {
                store.set(coerce_like(&store.get(), value.to_string()));
            }
        }))
    }
}
