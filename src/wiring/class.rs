//! Class-toggle wiring - `class:name`.

use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::store::{watch, StoreRef};
use crate::types::Cleanup;

/// Source of a class toggle.
#[derive(Clone)]
pub enum Toggle {
    Static(bool),
    Store(StoreRef),
}

/// Apply a class toggle to `node`. Store-driven toggles re-apply on every
/// store change and return the unsubscribe.
pub(crate) fn apply_class_toggle(
    document: &Document,
    node: NodeId,
    class: &str,
    toggle: &Toggle,
) -> Option<Cleanup> {
    match toggle {
        Toggle::Static(on) => {
            document.toggle_class(node, class, *on);
            None
        }
        Toggle::Store(store) => {
            document.toggle_class(node, class, store.get().truthy());
            let doc = document.clone();
            let class = class.to_string();
            Some(watch(&**store, move |value| {
                trace!(class = %class, on = value.truthy(), "class toggle");
                doc.toggle_class(node, &class, value.truthy());
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{derived, writable, Store};
    use crate::types::Value;

    #[test]
    fn test_store_toggle_follows_truthiness() {
        let doc = Document::new();
        let h1 = doc.create_element("h1");
        let active = writable(false);
        let inactive = derived(active.clone(), |v| Value::Bool(!v.truthy()));

        let _a = apply_class_toggle(&doc, h1, "active", &Toggle::Store(active.clone()));
        let _b = apply_class_toggle(&doc, h1, "inactive", &Toggle::Store(inactive));
        assert_eq!(doc.class_list(h1), vec!["inactive"]);

        active.set(Value::Bool(true));
        assert_eq!(doc.class_list(h1), vec!["active"]);
    }

    #[test]
    fn test_static_toggle() {
        let doc = Document::new();
        let p = doc.create_element("p");
        assert!(apply_class_toggle(&doc, p, "shown", &Toggle::Static(true)).is_none());
        assert!(doc.has_class(p, "shown"));
    }

    #[test]
    fn test_unsubscribe_stops_toggling() {
        let doc = Document::new();
        let p = doc.create_element("p");
        let flag = writable(true);
        let cleanup = apply_class_toggle(&doc, p, "on", &Toggle::Store(flag.clone()));
        if let Some(cleanup) = cleanup {
            cleanup();
        }
        flag.set(Value::Bool(false));
        assert!(doc.has_class(p, "on"));
    }
}
