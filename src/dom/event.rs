//! Events and bubbling dispatch.

use std::cell::Cell;
use std::rc::Rc;

use tracing::trace;

use super::{Document, NodeId};
use crate::types::Value;

/// DOM event listener.
pub type EventHandler = Rc<dyn Fn(&Event)>;

/// A dispatched event.
///
/// Flags use interior mutability so listeners can stop propagation or
/// prevent the default action through a shared reference.
#[derive(Debug, Clone)]
pub struct Event {
    kind: String,
    target: NodeId,
    current_target: Cell<Option<NodeId>>,
    propagation_stopped: Cell<bool>,
    default_prevented: Cell<bool>,
    cancelable: bool,
    detail: Value,
}

impl Event {
    /// A cancelable event aimed at `target`.
    pub fn new(kind: &str, target: NodeId) -> Self {
        Self {
            kind: kind.to_string(),
            target,
            current_target: Cell::new(None),
            propagation_stopped: Cell::new(false),
            default_prevented: Cell::new(false),
            cancelable: true,
            detail: Value::Undefined,
        }
    }

    /// Attach a payload (component events carry one).
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = detail;
        self
    }

    pub fn with_cancelable(mut self, cancelable: bool) -> Self {
        self.cancelable = cancelable;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Node the event was dispatched at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose listener is currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target.get()
    }

    pub fn detail(&self) -> &Value {
        &self.detail
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    /// Mark the default action as prevented. No-op on non-cancelable events.
    pub fn prevent_default(&self) {
        if self.cancelable {
            self.default_prevented.set(true);
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub(crate) fn set_current_target(&self, node: Option<NodeId>) {
        self.current_target.set(node);
    }
}

impl Document {
    /// Dispatch `event` at its target and bubble it to the root.
    ///
    /// Each node's listeners are snapshotted before running, so listeners
    /// added during dispatch wait for the next event. A listener removed by
    /// an earlier one in the same round is skipped.
    pub fn dispatch(&self, event: Event) -> Event {
        let path = self.ancestry(event.target());
        trace!(kind = event.kind(), target = %event.target(), depth = path.len(), "dispatch");

        for node in path {
            let listeners = self.listeners_for(node, event.kind());
            if listeners.is_empty() {
                continue;
            }
            event.set_current_target(Some(node));
            for (id, handler) in listeners {
                if !self.has_listener(node, id) {
                    continue;
                }
                handler(&event);
            }
            if event.propagation_stopped() {
                break;
            }
        }
        event.set_current_target(None);
        event
    }

    /// Dispatch a fresh event of `kind` at `target`.
    pub fn fire(&self, target: NodeId, kind: &str) -> Event {
        self.dispatch(Event::new(kind, target))
    }
}
