//! `bind:value` / `bind:checked` on a single checkbox.

use super::{resolve_initial, BindContext, BindingStrategy};
use crate::store::watch;
use crate::types::{Cleanup, Value};

/// Binds a checkbox's `checked` state to a boolean store.
///
/// An undefined store is always seeded: with the static `checked` state, or
/// `false`.
#[derive(Debug, Clone, Copy)]
pub struct CheckboxBinding;

impl BindingStrategy for CheckboxBinding {
    fn name(&self) -> &'static str {
        "checkbox"
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let doc = cx.document();
        let rendered = Value::Bool(doc.checked(node));
        if let Some(value) = resolve_initial(cx.store(), Some(rendered)) {
            doc.set_checked(node, value.truthy());
        }
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        Some(watch(&**cx.store(), move |value| doc.set_checked(node, value.truthy())))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let store = cx.store().clone();
        Some(cx.document().listen(node, "change", move |_| {
            store.set(Value::Bool(doc.checked(node)));
        }))
    }
}
