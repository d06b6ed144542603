//! Slot/let wiring - handing slot values to the consumer.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::store::StoreRef;
use crate::types::Value;

/// Setter receiving `(value, name)` on every render pass of a slot.
pub type SlotSetter = Rc<dyn Fn(&Value, &str)>;

/// Where a `let:` directive delivers its value.
#[derive(Clone)]
pub enum LetReceiver {
    Setter(SlotSetter),
    Store(StoreRef),
}

/// One `let:name` directive.
#[derive(Clone)]
pub struct SlotLet {
    name: String,
    receiver: LetReceiver,
}

impl SlotLet {
    pub fn new(name: impl Into<String>, receiver: LetReceiver) -> Self {
        Self {
            name: name.into(),
            receiver,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Deliver `value`: setters are called, stores are written.
    pub fn deliver(&self, value: &Value) {
        trace!(name = %self.name, "let hand-off");
        match &self.receiver {
            LetReceiver::Setter(setter) => setter(value, &self.name),
            LetReceiver::Store(store) => store.set(value.clone()),
        }
    }
}

impl fmt::Debug for SlotLet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receiver = match self.receiver {
            LetReceiver::Setter(_) => "setter",
            LetReceiver::Store(_) => "store",
        };
        f.debug_struct("SlotLet")
            .field("name", &self.name)
            .field("receiver", &receiver)
            .finish()
    }
}

/// One render pass: every `let:` receives the slot prop of the same name
/// (`Undefined` when the slot does not provide it).
pub(crate) fn hand_off(lets: &[SlotLet], props: &[(&str, Value)]) {
    for slot_let in lets {
        let value = props
            .iter()
            .find(|(name, _)| *name == slot_let.name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default();
        slot_let.deliver(&value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{writable, Store};
    use std::cell::RefCell;

    #[test]
    fn test_setter_receives_value_and_name() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let calls_clone = calls.clone();
        let lets = vec![SlotLet::new(
            "count",
            LetReceiver::Setter(Rc::new(move |v: &Value, name: &str| {
                calls_clone.borrow_mut().push((v.clone(), name.to_string()));
            })),
        )];

        hand_off(&lets, &[("count", Value::from(0))]);
        hand_off(&lets, &[("count", Value::from(1))]);

        assert_eq!(
            *calls.borrow(),
            vec![
                (Value::from(0), "count".to_string()),
                (Value::from(1), "count".to_string())
            ]
        );
    }

    #[test]
    fn test_store_is_written_each_pass() {
        let count = writable(-1);
        let lets = vec![SlotLet::new("count", LetReceiver::Store(count.clone()))];

        hand_off(&lets, &[("count", Value::from(0))]);
        assert_eq!(count.get(), Value::from(0));
        hand_off(&lets, &[("count", Value::from(2))]);
        assert_eq!(count.get(), Value::from(2));
    }

    #[test]
    fn test_missing_prop_delivers_undefined() {
        let item = writable("a");
        let lets = vec![SlotLet::new("item", LetReceiver::Store(item.clone()))];
        hand_off(&lets, &[("other", Value::from(1))]);
        assert!(item.get().is_undefined());
    }
}
