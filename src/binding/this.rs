//! `bind:this` (and its alias `ref`).

use super::{BindContext, BindTarget, BindingStrategy};
use crate::types::{Cleanup, Value};

/// Puts the live element or component into the store after mount and resets
/// the store to `Null` at unmount.
#[derive(Debug, Clone, Copy)]
pub struct ThisBinding;

impl BindingStrategy for ThisBinding {
    fn name(&self) -> &'static str {
        "this"
    }

    fn initialize(&self, cx: &BindContext) {
        let reference = match cx.target() {
            BindTarget::Element(node) => Value::Element(*node),
            BindTarget::Component(component) => Value::Component(component.clone()),
        };
        cx.store().set(reference);
    }

    fn attach_store_subscription(&self, _cx: &BindContext) -> Option<Cleanup> {
        None
    }

    fn attach_dom_listener(&self, _cx: &BindContext) -> Option<Cleanup> {
        None
    }

    fn teardown(&self, cx: &BindContext) {
        cx.store().set(Value::Null);
    }

    fn after_mount(&self) -> bool {
        true
    }
}
