//! Event wiring - `on:event|modifiers` listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{trace, warn};

use crate::dom::{Document, Event, EventHandler, NodeId};
use crate::types::Cleanup;

bitflags::bitflags! {
    /// Event directive modifiers.
    ///
    /// Combine with bitwise OR: `EventModifiers::ONCE | EventModifiers::SELF`.
    /// Each modifier is independent, so the order they were written in does
    /// not matter.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct EventModifiers: u8 {
        /// Remove the listener after the first handled event.
        const ONCE = 1 << 0;
        /// Only handle events whose target is the listening element.
        const SELF = 1 << 1;
        /// Stop propagation before the handler runs.
        const STOP_PROPAGATION = 1 << 2;
        /// Prevent the default action before the handler runs.
        const PREVENT_DEFAULT = 1 << 3;
    }
}

impl EventModifiers {
    /// Parse a single modifier name as written after `|`.
    pub fn from_modifier(name: &str) -> Option<Self> {
        match name {
            "once" => Some(Self::ONCE),
            "self" => Some(Self::SELF),
            "stopPropagation" => Some(Self::STOP_PROPAGATION),
            "preventDefault" => Some(Self::PREVENT_DEFAULT),
            _ => None,
        }
    }

    /// Fold `|`-separated modifier names into a set. Unknown names are
    /// dropped with a warning.
    pub fn parse<'a>(event: &str, names: impl IntoIterator<Item = &'a str>) -> Self {
        names.into_iter().fold(Self::empty(), |acc, name| match Self::from_modifier(name) {
            Some(flag) => acc | flag,
            None => {
                warn!(event, modifier = name, "ignoring unknown event modifier");
                acc
            }
        })
    }
}

/// Slot holding the function that detaches a listener; filled right after
/// registration so a `once` listener can remove itself.
pub(crate) type DetachSlot = Rc<RefCell<Option<Cleanup>>>;

/// Wrap `handler` so `modifiers` are honored.
///
/// `self` is checked first and skips everything, including the other
/// modifiers. `stopPropagation` and `preventDefault` run before the handler.
/// `once` only counts events that got past the `self` check.
pub(crate) fn guard(handler: EventHandler, modifiers: EventModifiers, detach: DetachSlot) -> EventHandler {
    let fired = Cell::new(false);
    Rc::new(move |event: &Event| {
        if modifiers.contains(EventModifiers::SELF) && event.current_target() != Some(event.target()) {
            trace!(kind = event.kind(), "self modifier: event from descendant skipped");
            return;
        }
        if modifiers.contains(EventModifiers::ONCE) {
            if fired.replace(true) {
                return;
            }
            let detach = detach.borrow_mut().take();
            if let Some(detach) = detach {
                detach();
            }
        }
        if modifiers.contains(EventModifiers::STOP_PROPAGATION) {
            event.stop_propagation();
        }
        if modifiers.contains(EventModifiers::PREVENT_DEFAULT) {
            event.prevent_default();
        }
        handler(event);
    })
}

/// Attach `handler` to `node` for `event`, honoring `modifiers`.
///
/// The returned cleanup removes the listener; calling it after a `once`
/// listener already removed itself is harmless.
pub fn listen(
    document: &Document,
    node: NodeId,
    event: &str,
    modifiers: EventModifiers,
    handler: EventHandler,
) -> Cleanup {
    let detach: DetachSlot = Rc::new(RefCell::new(None));
    let listener = document.add_listener(node, event, guard(handler, modifiers, detach.clone()));

    let doc = document.clone();
    *detach.borrow_mut() = Some(Box::new(move || {
        doc.remove_listener(node, listener);
    }));

    let doc = document.clone();
    Box::new(move || {
        doc.remove_listener(node, listener);
    })
}
