//! `bind:textContent` / `bind:innerText` / `bind:innerHTML` on
//! contenteditable elements.

use super::{resolve_initial, BindContext, BindingStrategy};
use crate::dom::{Document, NodeId};
use crate::store::watch;
use crate::types::{Cleanup, Value};

/// Binds the element's content. Writes always go in as text: the document
/// does not parse markup.
#[derive(Debug, Clone, Copy)]
pub struct ContentBinding;

fn read(doc: &Document, node: NodeId, property: &str) -> String {
    match property {
        "innerHTML" => doc.inner_html(node),
        _ => doc.text_content(node),
    }
}

impl BindingStrategy for ContentBinding {
    fn name(&self) -> &'static str {
        "content"
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let doc = cx.document();
        let rendered = read(doc, node, cx.property());
        let fallback = (!rendered.is_empty()).then_some(Value::Text(rendered));
        if let Some(value) = resolve_initial(cx.store(), fallback) {
            doc.set_text_content(node, &value.to_string());
        }
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let property = cx.property().to_string();
        Some(watch(&**cx.store(), move |value| {
            let text = value.to_string();
            if read(&doc, node, &property) != text {
                doc.set_text_content(node, &text);
            }
        }))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let node = cx.element()?;
        let doc = cx.document().clone();
        let store = cx.store().clone();
        let property = cx.property().to_string();
        Some(cx.document().listen(node, "input", move |_| {
            store.set(Value::Text(read(&doc, node, &property)));
        }))
    }
}
