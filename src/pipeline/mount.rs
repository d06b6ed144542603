//! Mounting - turning descriptors into live nodes.
//!
//! For an element, in order:
//! 1. create the node and mount its children (a `<textarea>` takes its text
//!    children as its value instead)
//! 2. apply static attributes, then attach the node to its parent
//! 3. run the directive passes: reactive attributes and class toggles,
//!    `bind:`, `on:`, then `use:`
//! 4. register one teardown on the node that releases everything from 3
//!
//! Work that needs a node reachable from the body is queued on the
//! [`MountContext`] instead and runs once the pass has attached its root:
//! first the element's `use:` factories, then bindings that read the live
//! element (`bind:clientWidth`, `bind:this`), each group in declaration
//! order. Elements are queued children first. Each queued item registers
//! its own teardown.
//!
//! Components follow the same shape around [`Component::render`]: values
//! that must be visible during render (`bind:` stores holding a value,
//! reactive props, `on:` handlers) are handed over first, everything that
//! observes the rendered state is attached after.
//!
//! [`Component::render`]: crate::component::Component::render

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::binding::{BindContext, BindTarget, BindingStrategy, GroupSeeds};
use crate::component::{collect_slots, Component, ComponentRef, ComponentScope};
use crate::descriptor::{Child, DirectiveRecord, ElementDescriptor, Tag};
use crate::dom::{Document, ElementRef, NodeId};
use crate::error::Result;
use crate::store::watch;
use crate::types::{Cleanup, Value};
use crate::wiring::actions::run_action;
use crate::wiring::attribute::{apply_attribute, bind_attribute};
use crate::wiring::class::apply_class_toggle;
use crate::wiring::listen;

// =============================================================================
// Mount context
// =============================================================================

/// Deferred mount work for one node, run once that node is attached.
type Effect = (NodeId, Box<dyn FnOnce()>);

/// State shared by every node mounted in one render pass.
#[derive(Clone)]
pub(crate) struct MountContext {
    pub(crate) document: Document,
    pub(crate) groups: GroupSeeds,
    effects: Rc<RefCell<Vec<Effect>>>,
}

impl MountContext {
    pub(crate) fn new(document: Document, groups: GroupSeeds) -> Self {
        Self {
            document,
            groups,
            effects: Rc::default(),
        }
    }

    /// Queue `work` for `node`. Its record is released when the node is
    /// removed.
    fn defer(&self, node: NodeId, work: impl FnOnce() -> BindingRecord + 'static) {
        let doc = self.document.clone();
        self.effects.borrow_mut().push((
            node,
            Box::new(move || {
                let record = work();
                doc.on_destroy(node, Box::new(move || record.release()));
            }),
        ));
    }

    /// Run queued work whose node is now reachable from the body, in the
    /// order it was queued. Work for removed nodes is dropped; work for
    /// nodes still detached stays queued.
    pub(crate) fn flush(&self) {
        loop {
            let batch = std::mem::take(&mut *self.effects.borrow_mut());
            let mut waiting = Vec::new();
            let mut ran = 0;
            for (node, effect) in batch {
                if !self.document.contains(node) {
                    trace!(node = %node, "node removed before mount effects ran");
                } else if self.document.is_connected(node) {
                    effect();
                    ran += 1;
                } else {
                    waiting.push((node, effect));
                }
            }
            let mut effects = self.effects.borrow_mut();
            let queued_meanwhile = std::mem::take(&mut *effects);
            *effects = waiting;
            effects.extend(queued_meanwhile);
            if ran == 0 {
                break;
            }
            trace!(effects = ran, "mount effects ran");
        }
    }

    /// Drop queued work without running it.
    pub(crate) fn discard(&self) {
        let dropped = std::mem::take(&mut *self.effects.borrow_mut());
        if !dropped.is_empty() {
            trace!(effects = dropped.len(), "discarding mount effects");
        }
    }
}

/// What a descriptor turned into.
#[derive(Clone, Debug)]
pub enum Mounted {
    Element(NodeId),
    Component(ComponentRef),
    Fragment,
}

// =============================================================================
// Live directives
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BindingKind {
    Attribute,
    Class,
    Bind,
    Event,
    Action,
}

/// Cleanups owned by one applied directive.
struct BindingRecord {
    kind: BindingKind,
    name: String,
    cleanups: Vec<Cleanup>,
    binding: Option<(Rc<dyn BindingStrategy>, BindContext)>,
}

impl BindingRecord {
    fn new(kind: BindingKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            cleanups: Vec::new(),
            binding: None,
        }
    }

    fn with_cleanup(mut self, cleanup: Option<Cleanup>) -> Self {
        self.cleanups.extend(cleanup);
        self
    }

    fn release(self) {
        trace!(kind = ?self.kind, name = %self.name, "releasing directive");
        for cleanup in self.cleanups {
            cleanup();
        }
        if let Some((strategy, cx)) = self.binding {
            strategy.teardown(&cx);
        }
    }
}

/// Every directive applied to one element or component.
#[derive(Default)]
struct LiveElement {
    records: Vec<BindingRecord>,
}

impl LiveElement {
    fn push(&mut self, record: BindingRecord) {
        self.records.push(record);
    }

    /// Release records in the order they were applied.
    fn teardown(self) {
        for record in self.records {
            record.release();
        }
    }

    fn into_cleanup(self) -> Cleanup {
        Box::new(move || self.teardown())
    }
}

/// Run the store-to-target and target-to-store halves of a binding.
fn attach_binding(strategy: Rc<dyn BindingStrategy>, cx: BindContext) -> BindingRecord {
    strategy.initialize(&cx);
    let mut record = BindingRecord::new(BindingKind::Bind, cx.property());
    record.cleanups.extend(strategy.attach_store_subscription(&cx));
    record.cleanups.extend(strategy.attach_dom_listener(&cx));
    debug!(strategy = strategy.name(), property = cx.property(), "binding attached");
    record.binding = Some((strategy, cx));
    record
}

// =============================================================================
// Children
// =============================================================================

/// Mount one child under `parent`.
pub(crate) fn mount_child(cx: &MountContext, parent: NodeId, child: &Child) -> Result<()> {
    let doc = &cx.document;
    match child {
        Child::Text(text) => {
            let node = doc.create_text(text);
            doc.append(parent, node);
        }
        Child::Number(n) => {
            let node = doc.create_text(&Value::Number(*n).to_string());
            doc.append(parent, node);
        }
        Child::Store(store) => {
            let node = doc.create_text(&store.get().to_string());
            doc.append(parent, node);
            let text_doc = doc.clone();
            let stop = watch(&**store, move |value| {
                text_doc.set_text(node, &value.to_string());
            });
            doc.on_destroy(node, stop);
        }
        Child::Element(descriptor) => {
            mount_descriptor(cx, parent, descriptor)?;
        }
        Child::List(children) => {
            for child in children {
                mount_child(cx, parent, child)?;
            }
        }
        Child::Empty => {}
    }
    Ok(())
}

/// Text of a `<textarea>`'s children, read once.
fn textarea_text(children: &[Child]) -> String {
    children
        .iter()
        .map(|child| match child {
            Child::Text(text) => text.clone(),
            Child::Number(n) => Value::Number(*n).to_string(),
            Child::Store(store) => store.get().to_string(),
            Child::List(nested) => textarea_text(nested),
            Child::Element(_) | Child::Empty => String::new(),
        })
        .collect()
}

// =============================================================================
// Descriptors
// =============================================================================

/// Mount `descriptor` under `parent`.
pub(crate) fn mount_descriptor(cx: &MountContext, parent: NodeId, descriptor: &ElementDescriptor) -> Result<Mounted> {
    match descriptor.tag() {
        Tag::Element(tag) => mount_element(cx, parent, tag, descriptor).map(Mounted::Element),
        Tag::Component(component) => {
            mount_component(cx, parent, component.clone(), descriptor).map(Mounted::Component)
        }
        Tag::Fragment => {
            for child in descriptor.children() {
                mount_child(cx, parent, child)?;
            }
            Ok(Mounted::Fragment)
        }
    }
}

fn mount_element(cx: &MountContext, parent: NodeId, tag: &str, descriptor: &ElementDescriptor) -> Result<NodeId> {
    let doc = &cx.document;
    let node = doc.create_element(tag);

    if tag == "textarea" {
        let text = textarea_text(descriptor.children());
        if !text.is_empty() {
            doc.set_value(node, &text);
        }
    } else {
        for child in descriptor.children() {
            if let Err(err) = mount_child(cx, node, child) {
                doc.remove(node);
                return Err(err);
            }
        }
    }

    for (name, value) in descriptor.attributes() {
        apply_attribute(doc, node, name, value);
    }
    doc.append(parent, node);
    trace!(tag, node = %node, "element attached");

    let directives = descriptor.directives();
    let mut live = LiveElement::default();

    for record in directives {
        match record {
            DirectiveRecord::Attribute { name, store } => {
                let cleanup = bind_attribute(doc, node, name, store);
                live.push(BindingRecord::new(BindingKind::Attribute, name).with_cleanup(Some(cleanup)));
            }
            DirectiveRecord::ClassToggle { class, toggle } => {
                let cleanup = apply_class_toggle(doc, node, class, toggle);
                live.push(BindingRecord::new(BindingKind::Class, class).with_cleanup(cleanup));
            }
            _ => {}
        }
    }

    let statics = Rc::new(descriptor.attributes().to_vec());
    let mut late = Vec::new();
    for record in directives {
        if let DirectiveRecord::Bind {
            property,
            store,
            strategy,
        } = record
        {
            let bind_cx = BindContext::new(
                doc.clone(),
                BindTarget::Element(node),
                property,
                store.clone(),
                statics.clone(),
                cx.groups.clone(),
            );
            strategy.prepare(&bind_cx);
            if strategy.after_mount() {
                late.push((strategy.clone(), bind_cx));
            } else {
                live.push(attach_binding(strategy.clone(), bind_cx));
            }
        }
    }

    for record in directives {
        if let DirectiveRecord::Event {
            event,
            modifiers,
            handler,
        } = record
        {
            let cleanup = listen(doc, node, event, *modifiers, handler.clone());
            live.push(BindingRecord::new(BindingKind::Event, event).with_cleanup(Some(cleanup)));
        }
    }

    let element = ElementRef::new(doc.clone(), node);
    for record in directives {
        match record {
            DirectiveRecord::Action { name, action } => {
                let (name, action, element) = (name.clone(), action.clone(), element.clone());
                cx.defer(node, move || {
                    let cleanup = run_action(&name, &action, &element);
                    BindingRecord::new(BindingKind::Action, &name).with_cleanup(cleanup)
                });
            }
            DirectiveRecord::SlotLet(slot_let) => {
                trace!(tag, name = slot_let.name(), "let: outside a component slot; ignored");
            }
            _ => {}
        }
    }
    for (strategy, bind_cx) in late {
        cx.defer(node, move || attach_binding(strategy, bind_cx));
    }

    if !live.records.is_empty() {
        doc.on_destroy(node, live.into_cleanup());
    }
    Ok(node)
}

fn mount_component(
    cx: &MountContext,
    parent: NodeId,
    component: Rc<dyn Component>,
    descriptor: &ElementDescriptor,
) -> Result<ComponentRef> {
    let doc = &cx.document;
    let statics = Rc::new(descriptor.attributes().to_vec());
    let instance = ComponentRef::new(
        component.name(),
        cx.clone(),
        parent,
        statics.clone(),
        collect_slots(descriptor.children(), descriptor.slot_lets()),
    );
    debug!(component = instance.name(), "mounting component");

    let directives = descriptor.directives();
    let mut live = LiveElement::default();
    let mut pending = Vec::new();

    for record in directives {
        match record {
            DirectiveRecord::Attribute { name, store } => {
                instance.provide(name, store.get());
            }
            DirectiveRecord::Bind {
                property,
                store,
                strategy,
            } => {
                let bind_cx = BindContext::new(
                    doc.clone(),
                    BindTarget::Component(instance.clone()),
                    property,
                    store.clone(),
                    statics.clone(),
                    cx.groups.clone(),
                );
                strategy.prepare(&bind_cx);
                pending.push((strategy.clone(), bind_cx));
            }
            DirectiveRecord::Event {
                event,
                modifiers,
                handler,
            } => {
                let cleanup = instance.on(event, *modifiers, handler.clone());
                live.push(BindingRecord::new(BindingKind::Event, event).with_cleanup(Some(cleanup)));
            }
            _ => {}
        }
    }

    if let Err(err) = component.render(&ComponentScope::new(instance.clone())) {
        debug!(component = instance.name(), error = %err, "component render failed");
        live.teardown();
        instance.destroy();
        return Err(err);
    }

    for record in directives {
        if let DirectiveRecord::Attribute { name, store } = record {
            let target = instance.clone();
            let prop = name.clone();
            let stop = watch(&**store, move |value| target.set_prop(&prop, value.clone()));
            live.push(BindingRecord::new(BindingKind::Attribute, name).with_cleanup(Some(stop)));
        }
    }
    for (strategy, bind_cx) in pending {
        if strategy.after_mount() {
            cx.defer(parent, move || attach_binding(strategy, bind_cx));
        } else {
            live.push(attach_binding(strategy, bind_cx));
        }
    }

    let owned = instance.clone();
    doc.on_destroy(
        parent,
        Box::new(move || {
            live.teardown();
            owned.destroy();
        }),
    );
    Ok(instance)
}

// =============================================================================
// Mount Handle
// =============================================================================

/// Handle returned by [`Runtime::render`](super::Runtime::render).
///
/// The rendered tree lives in a container element appended to the
/// document body. Dropping the handle leaves the tree mounted; call
/// [`unmount`](Self::unmount) to tear it down.
pub struct MountHandle {
    document: Document,
    container: NodeId,
    mounted: Mounted,
}

impl MountHandle {
    pub(crate) fn new(document: Document, container: NodeId, mounted: Mounted) -> Self {
        Self {
            document,
            container,
            mounted,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The container element holding the rendered tree.
    pub fn container(&self) -> ElementRef {
        ElementRef::new(self.document.clone(), self.container)
    }

    /// First element rendered into the container.
    pub fn element(&self) -> Option<ElementRef> {
        self.document
            .first_element_child(self.container)
            .map(|node| ElementRef::new(self.document.clone(), node))
    }

    /// The root component, when a component was rendered.
    pub fn component(&self) -> Option<&ComponentRef> {
        match &self.mounted {
            Mounted::Component(component) => Some(component),
            _ => None,
        }
    }

    pub fn mounted(&self) -> &Mounted {
        &self.mounted
    }

    pub fn is_mounted(&self) -> bool {
        self.document.contains(self.container)
    }

    /// Remove the rendered tree, releasing every directive.
    ///
    /// Subscriptions and listeners are released first, then `bind:this`
    /// stores are reset and action destroy functions run.
    pub fn unmount(self) {
        debug!(container = %self.container, "unmounting");
        self.document.remove(self.container);
    }
}
