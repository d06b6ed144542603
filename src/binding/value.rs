//! `bind:value` on text-like inputs, textareas and number/range inputs.

use tracing::trace;

use super::{resolve_initial, BindContext, BindingStrategy};
use crate::store::watch;
use crate::types::{Cleanup, Value};

/// Binds the `value` property, updating the store on every `input` event.
///
/// The numeric flavour (number and range inputs) stores numbers: an empty
/// field becomes `Null`.
#[derive(Debug, Clone, Copy)]
pub struct ValueBinding {
    numeric: bool,
}

impl ValueBinding {
    pub fn text() -> Self {
        Self { numeric: false }
    }

    pub fn numeric() -> Self {
        Self { numeric: true }
    }

    fn read(&self, raw: String) -> Value {
        if !self.numeric {
            return Value::Text(raw);
        }
        Value::Text(raw).as_number().map_or(Value::Null, Value::Number)
    }
}

impl BindingStrategy for ValueBinding {
    fn name(&self) -> &'static str {
        if self.numeric { "number" } else { "value" }
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let doc = cx.document();

        // The static value (or textarea content) is already in the DOM.
        let rendered = doc.value(node);
        let fallback = (!rendered.is_empty())
            .then(|| self.read(rendered))
            .filter(|v| !v.is_nullish());

        if let Some(value) = resolve_initial(cx.store(), fallback) {
            doc.set_value(node, &value.to_string());
        }
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let this = *self;
        Some(watch(&**cx.store(), move |value| {
            let current = doc.value(node);
            let text = value.to_string();
            // "1." already reads as 1: leave the field alone while typing.
            if current == text || this.read(current) == *value {
                return;
            }
            doc.set_value(node, &text);
        }))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let store = cx.store().clone();
        let this = *self;
        Some(cx.document().listen(node, "input", move |_| {
            let value = this.read(doc.value(node));
            trace!(node = %node, value = %value, "input → store");
            store.set(value);
        }))
    }
}
