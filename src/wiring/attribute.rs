//! Static and store-driven attributes.

use crate::dom::{Document, NodeId};
use crate::store::{watch, StoreRef};
use crate::types::{Cleanup, Value};

/// Attributes that are present-or-absent rather than valued.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "autofocus", "checked", "disabled", "hidden", "multiple", "open", "readonly", "required",
    "selected",
];

/// Write `value` to `node` under `name`.
///
/// `value`, `checked` and `selected` also drive the matching form property.
/// `Undefined`, `Null` and `false` remove the attribute.
pub(crate) fn apply_attribute(document: &Document, node: NodeId, name: &str, value: &Value) {
    match name {
        "checked" => document.set_checked(node, value.truthy()),
        "selected" => document.set_selected(node, value.truthy()),
        "value" => match document.tag(node).as_deref() {
            Some("textarea") => {
                document.set_value(node, &value.to_string());
                return;
            }
            Some("select") => {
                if !value.is_nullish() {
                    document.set_value(node, &value.to_string());
                }
                return;
            }
            _ => {}
        },
        _ => {}
    }

    match value {
        Value::Undefined | Value::Null | Value::Bool(false) => document.remove_attr(node, name),
        Value::Bool(true) if BOOLEAN_ATTRIBUTES.contains(&name) => document.set_attr(node, name, ""),
        other => document.set_attr(node, name, &other.to_string()),
    }
}

/// Keep attribute `name` in sync with `store`.
pub(crate) fn bind_attribute(document: &Document, node: NodeId, name: &str, store: &StoreRef) -> Cleanup {
    apply_attribute(document, node, name, &store.get());
    let doc = document.clone();
    let name = name.to_string();
    watch(&**store, move |value| apply_attribute(&doc, node, &name, value))
}
