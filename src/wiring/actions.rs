//! Action wiring - `use:name` lifecycle hooks.

use std::fmt;
use std::rc::Rc;

use tracing::debug;

use crate::dom::ElementRef;
use crate::types::Cleanup;

/// Action factory: called once with the live element right after mount.
pub type ActionFn = Rc<dyn Fn(&ElementRef) -> Option<ActionHandle>>;

/// What an action factory may hand back.
#[derive(Default)]
pub struct ActionHandle {
    destroy: Option<Cleanup>,
}

impl ActionHandle {
    /// A handle with no teardown.
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle whose `destroy` runs at unmount.
    pub fn with_destroy(destroy: impl FnOnce() + 'static) -> Self {
        Self {
            destroy: Some(Box::new(destroy)),
        }
    }

    pub fn has_destroy(&self) -> bool {
        self.destroy.is_some()
    }
}

impl fmt::Debug for ActionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionHandle")
            .field("destroy", &self.destroy.is_some())
            .finish()
    }
}

/// Invoke `action` on `element` and return its teardown, if any.
///
/// Panics from the factory propagate to the caller.
pub(crate) fn run_action(name: &str, action: &ActionFn, element: &ElementRef) -> Option<Cleanup> {
    debug!(action = name, node = %element.id(), "running action");
    action(element).and_then(|handle| handle.destroy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;
    use std::cell::Cell;

    #[test]
    fn test_action_receives_element_and_returns_destroy() {
        let doc = Document::new();
        let h1 = doc.create_element("h1");
        let element = ElementRef::new(doc.clone(), h1);

        let destroyed = Rc::new(Cell::new(0));
        let destroyed_clone = destroyed.clone();
        let action: ActionFn = Rc::new(move |el: &ElementRef| {
            assert_eq!(el.tag().as_deref(), Some("h1"));
            let destroyed = destroyed_clone.clone();
            Some(ActionHandle::with_destroy(move || destroyed.set(destroyed.get() + 1)))
        });

        let destroy = run_action("first", &action, &element);
        assert_eq!(destroyed.get(), 0);
        if let Some(destroy) = destroy {
            destroy();
        }
        assert_eq!(destroyed.get(), 1);
    }

    #[test]
    fn test_action_without_handle() {
        let doc = Document::new();
        let element = ElementRef::new(doc.clone(), doc.body());
        let action: ActionFn = Rc::new(|_: &ElementRef| None);
        assert!(run_action("second", &action, &element).is_none());

        let action: ActionFn = Rc::new(|_: &ElementRef| Some(ActionHandle::new()));
        assert!(run_action("third", &action, &element).is_none());
    }
}
