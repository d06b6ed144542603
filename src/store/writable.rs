//! Writable store.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::{Store, Subscriber, Unsubscribe};
use crate::types::Value;

type SubscriberList = RefCell<Vec<(u64, Subscriber)>>;

/// A read/write store.
///
/// Setting a value equal to the current one is a no-op: no notification is
/// sent. This is what keeps DOM→store→DOM round trips from looping.
pub struct Writable {
    value: RefCell<Value>,
    subscribers: Rc<SubscriberList>,
    next_id: Cell<u64>,
    /// Bumped on every change; lets a notification loop notice that a
    /// subscriber already caused a newer value to be broadcast.
    version: Cell<u64>,
}

/// Create a writable store holding `initial`.
///
/// Pass `Value::Undefined` (or `None::<i32>`) for an uninitialized store.
pub fn writable(initial: impl Into<Value>) -> Rc<Writable> {
    Rc::new(Writable::new(initial.into()))
}

impl Writable {
    pub fn new(initial: Value) -> Self {
        Self {
            value: RefCell::new(initial),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
            version: Cell::new(0),
        }
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    fn is_subscribed(&self, id: u64) -> bool {
        self.subscribers.borrow().iter().any(|(sid, _)| *sid == id)
    }
}

impl Store for Writable {
    fn get(&self) -> Value {
        self.value.borrow().clone()
    }

    fn subscribe(&self, callback: Subscriber) -> Unsubscribe {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, callback));

        let subscribers: Weak<SubscriberList> = Rc::downgrade(&self.subscribers);
        Box::new(move || {
            if let Some(list) = subscribers.upgrade() {
                list.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        })
    }

    fn set(&self, value: Value) {
        if *self.value.borrow() == value {
            return;
        }
        *self.value.borrow_mut() = value.clone();
        let version = self.version.get() + 1;
        self.version.set(version);

        let snapshot: Vec<(u64, Subscriber)> = self.subscribers.borrow().clone();
        trace!(subscribers = snapshot.len(), "store changed");
        for (id, callback) in snapshot {
            // A nested set already broadcast a newer value to everyone.
            if self.version.get() != version {
                break;
            }
            // Unsubscribed by an earlier callback in this round.
            if !self.is_subscribed(id) {
                continue;
            }
            callback(&value);
        }
    }
}

impl fmt::Debug for Writable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writable")
            .field("value", &*self.value.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

// =============================================================================
// Tests
// =============================================================================
