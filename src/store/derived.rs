//! Derived (read-only) store.

use std::fmt;
use std::rc::Rc;

use tracing::warn;

use super::{Store, StoreRef, Subscriber, Unsubscribe};
use crate::types::Value;

/// A read-only store whose value is computed from another store.
///
/// Subscribers are notified whenever the source changes. `set` is ignored.
pub struct Derived {
    source: StoreRef,
    map: Rc<dyn Fn(&Value) -> Value>,
}

/// Create a store computed from `source` with `map`.
pub fn derived<S>(source: Rc<S>, map: impl Fn(&Value) -> Value + 'static) -> Rc<Derived>
where
    S: Store + 'static,
{
    Rc::new(Derived {
        source,
        map: Rc::new(map),
    })
}

impl Store for Derived {
    fn get(&self) -> Value {
        (self.map)(&self.source.get())
    }

    fn subscribe(&self, callback: Subscriber) -> Unsubscribe {
        let map = self.map.clone();
        self.source
            .subscribe(Rc::new(move |value: &Value| callback(&map(value))))
    }

    fn set(&self, _value: Value) {
        warn!("ignoring write to a derived store");
    }
}

impl fmt::Debug for Derived {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived").field("value", &self.get()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{watch, writable};
    use std::cell::RefCell;

    #[test]
    fn test_derived_follows_source() {
        let active = writable(false);
        let inactive = derived(active.clone(), |v| Value::Bool(!v.truthy()));
        assert_eq!(inactive.get(), Value::Bool(true));

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _unsubscribe = watch(&*inactive, move |v| seen_clone.borrow_mut().push(v.clone()));

        active.set(Value::Bool(true));
        assert_eq!(inactive.get(), Value::Bool(false));
        assert_eq!(*seen.borrow(), vec![Value::Bool(false)]);
    }

    #[test]
    fn test_derived_ignores_set() {
        let count = writable(1);
        let doubled = derived(count.clone(), |v| Value::from(v.as_number().unwrap_or(0.0) * 2.0));
        doubled.set(Value::from(100));
        assert_eq!(doubled.get(), Value::from(2));
        assert_eq!(count.get(), Value::from(1));
    }
}
