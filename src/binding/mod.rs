//! Binding strategies - `bind:property` two-way bindings.
//!
//! Every bindable shape (text input, checkbox, select, ...) has a strategy
//! object implementing [`BindingStrategy`]. Which strategy handles a
//! `bind:` directive is decided once, at construction time, by looking the
//! target up in a [`StrategyRegistry`].
//!
//! At mount, for each binding, in order:
//! 1. `prepare` - before the target renders (components read their props here)
//! 2. `initialize` - resolve the initial value and seed the store if needed
//! 3. `attach_store_subscription` - store → target
//! 4. `attach_dom_listener` - target → store
//!
//! At unmount the cleanups from 3 and 4 run, then `teardown`.
//!
//! # Precedence
//!
//! A store holding a value always wins over the static prop. A store holding
//! `Undefined` is seeded once from the static prop (or the rendered state),
//! before any target → store listener exists.

mod checkbox;
mod component;
mod content;
mod group;
mod measured;
mod registry;
mod select;
mod this;
mod value;

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::trace;

pub use checkbox::CheckboxBinding;
pub use component::ComponentBinding;
pub use content::ContentBinding;
pub use group::GroupBinding;
pub use measured::MeasuredBinding;
pub use registry::{BindingRule, PropertyMatch, ShapeMatch, StrategyRegistry, TargetShape};
pub use select::{MultiSelectBinding, SelectBinding};
pub use this::ThisBinding;
pub use value::ValueBinding;

use crate::component::ComponentRef;
use crate::dom::{Document, NodeId};
use crate::store::{store_id, StoreRef};
use crate::types::{Cleanup, Value};

// =============================================================================
// Strategy contract
// =============================================================================

/// One bindable shape.
pub trait BindingStrategy {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Runs before the target renders.
    fn prepare(&self, _cx: &BindContext) {}

    /// Resolve the initial state (store wins, undefined store is seeded).
    fn initialize(&self, cx: &BindContext);

    /// Push store changes to the target.
    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup>;

    /// Push target changes back to the store.
    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup>;

    /// Runs at unmount, after the subscription and listener are gone.
    fn teardown(&self, _cx: &BindContext) {}

    /// Whether the binding must wait until its target is reachable from the
    /// document body. Such bindings attach after the render pass.
    fn after_mount(&self) -> bool {
        false
    }
}

// =============================================================================
// Context
// =============================================================================

/// Stores seeded for `bind:group` during one mount pass, by identity.
pub(crate) type GroupSeeds = Rc<RefCell<HashSet<usize>>>;

/// What a binding is attached to.
#[derive(Clone, Debug)]
pub enum BindTarget {
    Element(NodeId),
    Component(ComponentRef),
}

/// Everything a strategy needs to know about one binding.
#[derive(Clone)]
pub struct BindContext {
    document: Document,
    target: BindTarget,
    property: String,
    store: StoreRef,
    statics: Rc<Vec<(String, Value)>>,
    groups: GroupSeeds,
}

impl BindContext {
    pub(crate) fn new(
        document: Document,
        target: BindTarget,
        property: &str,
        store: StoreRef,
        statics: Rc<Vec<(String, Value)>>,
        groups: GroupSeeds,
    ) -> Self {
        Self {
            document,
            target,
            property: property.to_string(),
            store,
            statics,
            groups,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn target(&self) -> &BindTarget {
        &self.target
    }

    /// The bound element, if the target is one.
    pub fn element(&self) -> Option<NodeId> {
        match self.target {
            BindTarget::Element(node) => Some(node),
            BindTarget::Component(_) => None,
        }
    }

    pub fn component(&self) -> Option<&ComponentRef> {
        match &self.target {
            BindTarget::Component(component) => Some(component),
            BindTarget::Element(_) => None,
        }
    }

    /// Bound property name (`value`, `checked`, `group`, ...).
    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn store(&self) -> &StoreRef {
        &self.store
    }

    /// Static prop given next to the binding.
    pub fn static_value(&self, name: &str) -> Option<&Value> {
        self.statics
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Whether this mount pass already seeded the bound store for a group.
    pub(crate) fn group_seeded(&self) -> bool {
        self.groups.borrow().contains(&store_id(&self.store))
    }

    pub(crate) fn mark_group_seeded(&self) {
        self.groups.borrow_mut().insert(store_id(&self.store));
    }
}

/// Apply the precedence rule.
///
/// Returns the store's value when it holds one. Otherwise seeds the store
/// with `fallback` and returns it; `None` when there is nothing to seed.
pub fn resolve_initial(store: &StoreRef, fallback: Option<Value>) -> Option<Value> {
    let current = store.get();
    if !current.is_undefined() {
        return Some(current);
    }
    let seeded = fallback?;
    trace!(value = %seeded, "seeding undefined store");
    store.set(seeded.clone());
    Some(seeded)
}
