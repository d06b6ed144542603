//! Component scope - what a component sees while rendering.

use std::rc::Rc;

use tracing::{debug, trace};

use super::ComponentRef;
use crate::descriptor::Child;
use crate::dom::{Document, Event, NodeId};
use crate::error::Result;
use crate::pipeline::mount_child;
use crate::store::Writable;
use crate::types::Value;
use crate::wiring::slot::{hand_off, SlotLet};

/// Name of the slot formed by children without a `slot` key.
pub const DEFAULT_SLOT: &str = "default";

// =============================================================================
// Slots
// =============================================================================

/// Content the consumer passed for one slot.
#[derive(Clone, Debug)]
pub(crate) struct SlotContent {
    name: String,
    children: Vec<Child>,
    lets: Vec<SlotLet>,
}

/// Split a component's children into slots.
///
/// Elements carrying `slot="x"` form slot `x` together with their own
/// `let:` directives. Everything else forms the default slot, which takes
/// the component's `let:` directives.
pub(crate) fn collect_slots(children: &[Child], default_lets: Vec<SlotLet>) -> Vec<SlotContent> {
    let mut default_children = Vec::new();
    let mut named: Vec<SlotContent> = Vec::new();

    for child in children {
        let slot = match child {
            Child::Element(descriptor) => descriptor
                .slot()
                .filter(|name| *name != DEFAULT_SLOT)
                .map(|name| (name.to_string(), descriptor.slot_lets())),
            _ => None,
        };
        match slot {
            Some((name, lets)) => match named.iter_mut().find(|s| s.name == name) {
                Some(existing) => {
                    existing.children.push(child.clone());
                    existing.lets.extend(lets);
                }
                None => named.push(SlotContent {
                    name,
                    children: vec![child.clone()],
                    lets,
                }),
            },
            None => default_children.push(child.clone()),
        }
    }

    let mut slots = Vec::with_capacity(named.len() + 1);
    if !default_children.is_empty() {
        slots.push(SlotContent {
            name: DEFAULT_SLOT.to_string(),
            children: default_children,
            lets: default_lets,
        });
    }
    slots.extend(named);
    slots
}

/// A rendered slot. Each [`update`](Self::update) is a further render pass:
/// every `let:` receiver gets the new values.
#[derive(Clone, Debug)]
pub struct SlotPass {
    lets: Vec<SlotLet>,
}

impl SlotPass {
    pub fn update(&self, props: &[(&str, Value)]) {
        hand_off(&self.lets, props);
    }
}

// =============================================================================
// Scope
// =============================================================================

/// Handed to [`Component::render`](super::Component::render).
pub struct ComponentScope {
    component: ComponentRef,
}

impl ComponentScope {
    pub(crate) fn new(component: ComponentRef) -> Self {
        Self { component }
    }

    pub fn document(&self) -> &Document {
        self.component.document()
    }

    /// Node to render into.
    pub fn target(&self) -> NodeId {
        self.component.anchor()
    }

    /// The instance being rendered.
    pub fn component(&self) -> &ComponentRef {
        &self.component
    }

    /// Cell for prop `name`.
    ///
    /// Its initial value is the bound store's value, else the static prop,
    /// else `default`. Writes to the cell reach `bind:` stores.
    pub fn prop(&self, name: &str, default: impl Into<Value>) -> Rc<Writable> {
        self.component.prop_cell(name, default.into())
    }

    /// Current value of prop `name` without creating a cell.
    pub fn prop_value(&self, name: &str) -> Value {
        self.component.prop_value(name)
    }

    /// Emit a component event to the consumer's `on:` handlers.
    pub fn emit(&self, kind: &str, detail: impl Into<Value>) -> Event {
        self.component.emit(kind, detail.into())
    }

    /// Re-dispatch a DOM event to the consumer's `on:` handlers.
    pub fn forward(&self, event: &Event) {
        self.component.forward(event);
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.component.slots().iter().any(|s| s.name == name)
    }

    /// Render a fresh copy of slot `name` into `parent`.
    ///
    /// `let:` receivers get `props` before the content mounts. Returns
    /// `None` when the consumer gave no content for the slot.
    pub fn render_slot(&self, name: &str, parent: NodeId, props: &[(&str, Value)]) -> Result<Option<SlotPass>> {
        let Some(slot) = self.component.slots().iter().find(|s| s.name == name) else {
            trace!(component = self.component.name(), slot = name, "no slot content");
            return Ok(None);
        };
        debug!(component = self.component.name(), slot = name, "rendering slot");
        hand_off(&slot.lets, props);
        let cx = self.component.mount_context();
        for child in &slot.children {
            mount_child(cx, parent, child)?;
        }
        // Content under a still-detached parent waits for the outer render.
        cx.flush();
        Ok(Some(SlotPass {
            lets: slot.lets.clone(),
        }))
    }

    /// Run `cleanup` when the component is destroyed.
    pub fn on_destroy(&self, cleanup: impl FnOnce() + 'static) {
        self.component.add_destroy(Box::new(cleanup));
    }
}
