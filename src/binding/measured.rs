//! Read-only measured properties (`clientWidth`, `offsetHeight`, ...).

use tracing::debug;

use super::{BindContext, BindingStrategy};
use crate::types::{Cleanup, Value};

/// Reads the metric once after mount and pushes it into the store. There is
/// no way back: the store never drives the element.
#[derive(Debug, Clone, Copy)]
pub struct MeasuredBinding;

impl BindingStrategy for MeasuredBinding {
    fn name(&self) -> &'static str {
        "measured"
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(node) = cx.element() else { return };
        let metric = cx.document().metrics(node).get(cx.property()).unwrap_or_default();
        debug!(node = %node, property = cx.property(), metric, "measured");
        cx.store().set(Value::Number(metric));
    }

    fn attach_store_subscription(&self, _cx: &BindContext) -> Option<Cleanup> {
        None
    }

    fn attach_dom_listener(&self, _cx: &BindContext) -> Option<Cleanup> {
        None
    }

    fn after_mount(&self) -> bool {
        true
    }
}
