//! Components - the minimal contract the binding runtime renders.
//!
//! A component is anything implementing [`Component`]. At mount the runtime
//! creates an instance ([`ComponentRef`]) holding:
//! - the static props and any values handed over by `bind:` directives
//! - one [`Writable`] cell per prop the component asked for
//! - the `on:` handlers forwarded by the consumer
//! - the slot content (children) given by the consumer
//!
//! and calls [`Component::render`] with a [`ComponentScope`].
//!
//! # Example
//!
//! ```ignore
//! struct Greeting;
//!
//! impl Component for Greeting {
//!     fn name(&self) -> &str {
//!         "Greeting"
//!     }
//!
//!     fn render(&self, scope: &ComponentScope) -> Result<()> {
//!         let name = scope.prop("name", "world");
//!         let doc = scope.document();
//!         let p = doc.create_element("p");
//!         let text = doc.create_text(&format!("Hello {}", name.get()));
//!         doc.append(p, text);
//!         doc.append(scope.target(), p);
//!         Ok(())
//!     }
//! }
//! ```

mod scope;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

pub use scope::{ComponentScope, SlotPass, DEFAULT_SLOT};
pub(crate) use scope::{collect_slots, SlotContent};

use crate::dom::{Document, Event, EventHandler, NodeId};
use crate::error::Result;
use crate::pipeline::MountContext;
use crate::store::{watch, writable, Store, Writable};
use crate::types::{Cleanup, Value};
use crate::wiring::events::{guard, DetachSlot};
use crate::wiring::EventModifiers;

/// A renderable component.
pub trait Component {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Build the component's nodes under `scope.target()`.
    fn render(&self, scope: &ComponentScope) -> Result<()>;
}

// =============================================================================
// Instance
// =============================================================================

struct Handler {
    id: u64,
    kind: String,
    handler: EventHandler,
}

pub(crate) struct Instance {
    name: String,
    cx: MountContext,
    anchor: NodeId,
    statics: Rc<Vec<(String, Value)>>,
    provided: RefCell<HashMap<String, Value>>,
    props: RefCell<HashMap<String, Rc<Writable>>>,
    handlers: RefCell<Vec<Handler>>,
    next_handler: Cell<u64>,
    slots: Vec<SlotContent>,
    on_destroy: RefCell<Vec<Cleanup>>,
    destroyed: Cell<bool>,
}

/// Handle to a live component instance.
///
/// Two handles are equal when they point at the same instance.
#[derive(Clone)]
pub struct ComponentRef(Rc<Instance>);

impl ComponentRef {
    pub(crate) fn new(
        name: &str,
        cx: MountContext,
        anchor: NodeId,
        statics: Rc<Vec<(String, Value)>>,
        slots: Vec<SlotContent>,
    ) -> Self {
        Self(Rc::new(Instance {
            name: name.to_string(),
            cx,
            anchor,
            statics,
            provided: RefCell::new(HashMap::new()),
            props: RefCell::new(HashMap::new()),
            handlers: RefCell::new(Vec::new()),
            next_handler: Cell::new(0),
            slots,
            on_destroy: RefCell::new(Vec::new()),
            destroyed: Cell::new(false),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn document(&self) -> &Document {
        &self.0.cx.document
    }

    /// Node the component renders into.
    pub fn anchor(&self) -> NodeId {
        self.0.anchor
    }

    pub fn is_destroyed(&self) -> bool {
        self.0.destroyed.get()
    }

    pub(crate) fn mount_context(&self) -> &MountContext {
        &self.0.cx
    }

    pub(crate) fn slots(&self) -> &[SlotContent] {
        &self.0.slots
    }

    fn cell(&self, name: &str) -> Option<Rc<Writable>> {
        self.0.props.borrow().get(name).cloned()
    }

    fn static_prop(&self, name: &str) -> Option<Value> {
        self.0
            .statics
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .filter(|value| !value.is_undefined())
    }

    // =========================================================================
    // Props
    // =========================================================================

    /// Current value of prop `name`: the live cell if the component created
    /// one, else a handed-over value, else the static prop.
    pub fn prop_value(&self, name: &str) -> Value {
        if let Some(cell) = self.cell(name) {
            return cell.get();
        }
        let provided = self.0.provided.borrow().get(name).cloned();
        provided
            .or_else(|| self.static_prop(name))
            .unwrap_or_default()
    }

    /// Update prop `name` from outside.
    pub fn set_prop(&self, name: &str, value: Value) {
        match self.cell(name) {
            Some(cell) => cell.set(value),
            None => {
                self.0.provided.borrow_mut().insert(name.to_string(), value);
            }
        }
    }

    /// Hand a value over before render. It takes precedence over the static
    /// prop and the component's default.
    pub fn provide(&self, name: &str, value: Value) {
        self.0.provided.borrow_mut().insert(name.to_string(), value.clone());
        if let Some(cell) = self.cell(name) {
            cell.set(value);
        }
    }

    /// The cell backing prop `name`, created on first use.
    pub(crate) fn prop_cell(&self, name: &str, default: Value) -> Rc<Writable> {
        if let Some(cell) = self.cell(name) {
            return cell;
        }
        let provided = self.0.provided.borrow().get(name).cloned();
        let initial = provided
            .or_else(|| self.static_prop(name))
            .unwrap_or(default);
        let cell = writable(initial);
        self.0.props.borrow_mut().insert(name.to_string(), cell.clone());
        cell
    }

    /// Observe changes to prop `name`.
    pub fn watch_prop(&self, name: &str, f: impl Fn(&Value) + 'static) -> Cleanup {
        let cell = self.prop_cell(name, Value::Undefined);
        watch(&*cell, f)
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Register a handler for events the component emits or forwards.
    pub fn on(&self, kind: &str, modifiers: EventModifiers, handler: EventHandler) -> Cleanup {
        let id = self.0.next_handler.get();
        self.0.next_handler.set(id + 1);

        let detach: DetachSlot = Rc::new(RefCell::new(None));
        self.0.handlers.borrow_mut().push(Handler {
            id,
            kind: kind.to_string(),
            handler: guard(handler, modifiers, detach.clone()),
        });

        let remove = {
            let instance: Weak<Instance> = Rc::downgrade(&self.0);
            move || {
                if let Some(instance) = instance.upgrade() {
                    instance.handlers.borrow_mut().retain(|h| h.id != id);
                }
            }
        };
        *detach.borrow_mut() = Some(Box::new(remove.clone()));
        Box::new(remove)
    }

    pub fn handler_count(&self, kind: &str) -> usize {
        self.0.handlers.borrow().iter().filter(|h| h.kind == kind).count()
    }

    /// Run the handlers registered for `event.kind()`.
    pub fn forward(&self, event: &Event) {
        let snapshot: Vec<(u64, EventHandler)> = self
            .0
            .handlers
            .borrow()
            .iter()
            .filter(|h| h.kind == event.kind())
            .map(|h| (h.id, h.handler.clone()))
            .collect();
        for (id, handler) in snapshot {
            let live = self.0.handlers.borrow().iter().any(|h| h.id == id);
            if live {
                handler(event);
            }
        }
    }

    /// Emit a component event carrying `detail`.
    pub fn emit(&self, kind: &str, detail: Value) -> Event {
        let event = Event::new(kind, self.0.anchor).with_detail(detail);
        event.set_current_target(Some(self.0.anchor));
        self.forward(&event);
        event
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    pub(crate) fn add_destroy(&self, cleanup: Cleanup) {
        if self.is_destroyed() {
            cleanup();
            return;
        }
        self.0.on_destroy.borrow_mut().push(cleanup);
    }

    /// Run the component's destroy callbacks and drop its handlers. Runs once.
    pub fn destroy(&self) {
        if self.0.destroyed.replace(true) {
            return;
        }
        debug!(component = %self.0.name, "destroying component");
        let callbacks = std::mem::take(&mut *self.0.on_destroy.borrow_mut());
        for callback in callbacks {
            callback();
        }
        let handlers = std::mem::take(&mut *self.0.handlers.borrow_mut());
        drop(handlers);
    }
}

impl PartialEq for ComponentRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ComponentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentRef")
            .field("name", &self.0.name)
            .field("anchor", &self.0.anchor)
            .field("destroyed", &self.0.destroyed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::GroupSeeds;
    use std::collections::HashSet;

    fn instance(statics: Vec<(String, Value)>) -> ComponentRef {
        let doc = Document::new();
        let body = doc.body();
        let cx = MountContext::new(doc, GroupSeeds::new(RefCell::new(HashSet::new())));
        ComponentRef::new("Test", cx, body, Rc::new(statics), Vec::new())
    }

    #[test]
    fn test_prop_precedence() {
        let c = instance(vec![("count".to_string(), Value::from(5))]);
        assert_eq!(c.prop_value("count"), Value::from(5));

        c.provide("count", Value::from(1));
        assert_eq!(c.prop_value("count"), Value::from(1));

        let cell = c.prop_cell("count", Value::from(0));
        assert_eq!(cell.get(), Value::from(1));
        assert!(c.prop_value("missing").is_undefined());
        assert_eq!(c.prop_cell("missing", Value::from(7)).get(), Value::from(7));
    }

    #[test]
    fn test_set_prop_updates_cell_and_watchers() {
        let c = instance(Vec::new());
        let cell = c.prop_cell("count", Value::from(0));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _stop = c.watch_prop("count", move |v| seen_clone.borrow_mut().push(v.clone()));

        c.set_prop("count", Value::from(3));
        assert_eq!(cell.get(), Value::from(3));
        assert_eq!(*seen.borrow(), vec![Value::from(3)]);
    }

    #[test]
    fn test_handlers_and_once() {
        let c = instance(Vec::new());
        let calls = Rc::new(Cell::new(0));
        let calls_clone = calls.clone();
        let _off = c.on(
            "done",
            EventModifiers::ONCE,
            Rc::new(move |e: &Event| {
                assert_eq!(e.detail(), &Value::from("x"));
                calls_clone.set(calls_clone.get() + 1);
            }),
        );

        c.emit("done", Value::from("x"));
        c.emit("done", Value::from("x"));
        assert_eq!(calls.get(), 1);
        assert_eq!(c.handler_count("done"), 0);
    }

    #[test]
    fn test_destroy_runs_once() {
        let c = instance(Vec::new());
        let runs = Rc::new(Cell::new(0));
        let runs_clone = runs.clone();
        c.add_destroy(Box::new(move || runs_clone.set(runs_clone.get() + 1)));

        c.destroy();
        c.destroy();
        assert_eq!(runs.get(), 1);
        assert!(c.is_destroyed());
    }

    #[test]
    fn test_identity_equality() {
        let a = instance(Vec::new());
        let b = instance(Vec::new());
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
