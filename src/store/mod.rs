//! Stores - observable value containers.
//!
//! The binding runtime only ever talks to a store through the [`Store`]
//! contract:
//! - `get()` reads the current value
//! - `subscribe(callback)` registers a callback that runs synchronously on
//!   every change and returns an unsubscribe function
//! - `set(value)` replaces the value
//!
//! Subscribing does not invoke the callback with the current value; callers
//! read `get()` when they need the initial state.
//!
//! Two implementations ship with the crate:
//! - [`Writable`] - a plain read/write container
//! - [`Derived`] - a read-only view computed from another store
//!
//! # Example
//!
//! ```ignore
//! use spark_bind::store::{writable, derived, Store};
//!
//! let active = writable(false);
//! let inactive = derived(active.clone(), |v| (!v.truthy()).into());
//!
//! active.set(true.into());
//! assert_eq!(inactive.get(), false.into());
//! ```

mod derived;
mod writable;

use std::rc::Rc;

pub use derived::{derived, Derived};
pub use writable::{writable, Writable};

use crate::types::{Cleanup, Value};

/// Store change callback.
pub type Subscriber = Rc<dyn Fn(&Value)>;

/// Function returned by [`Store::subscribe`]. Call it to stop receiving
/// updates.
pub type Unsubscribe = Cleanup;

/// Shared handle to any store. Identity (the pointer) is meaningful: group
/// bindings use it to recognize siblings bound to the same store.
pub type StoreRef = Rc<dyn Store>;

/// The store contract consumed by the binding runtime.
pub trait Store {
    /// Current value. `Value::Undefined` means the store holds nothing yet.
    fn get(&self) -> Value;

    /// Register `callback`; it runs synchronously on every change.
    fn subscribe(&self, callback: Subscriber) -> Unsubscribe;

    /// Replace the value and notify subscribers.
    fn set(&self, value: Value);

    /// Replace the value with `f(current)`.
    fn update(&self, f: &dyn Fn(&Value) -> Value) {
        let next = f(&self.get());
        self.set(next);
    }
}

/// Read a store's current value.
pub fn get(store: &dyn Store) -> Value {
    store.get()
}

/// Subscribe with a plain closure.
pub fn watch(store: &dyn Store, f: impl Fn(&Value) + 'static) -> Unsubscribe {
    store.subscribe(Rc::new(f))
}

/// Identity of a store handle, stable for the store's lifetime.
pub fn store_id(store: &StoreRef) -> usize {
    Rc::as_ptr(store).cast::<()>() as usize
}
