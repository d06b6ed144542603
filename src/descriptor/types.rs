//! Descriptor types - props, tags and children.
//!
//! A property bag is an ordered list of `(key, Prop)`. Each prop is one of:
//! - a static [`Value`]
//! - a [`Store`] (bound, reactive)
//! - an event handler, action factory or slot setter
//!
//! Conversions are provided so most values can be passed directly:
//!
//! ```ignore
//! let text = writable("a");
//! let props = props! {
//!     "class" => "large",
//!     "bind:value" => text.clone(),
//!     "on:click|once" => Prop::handler(|_| println!("clicked")),
//! };
//! ```

use std::fmt;
use std::rc::Rc;

use crate::component::Component;
use crate::dom::{ElementRef, Event, EventHandler};
use crate::store::{Store, StoreRef};
use crate::types::Value;
use crate::wiring::{ActionFn, ActionHandle, SlotSetter};

use super::ElementDescriptor;

// =============================================================================
// Prop
// =============================================================================

/// A value given under a property-bag key.
#[derive(Clone)]
pub enum Prop {
    /// Static value.
    Value(Value),
    /// Bound store.
    Store(StoreRef),
    /// Event handler (`on:`).
    Handler(EventHandler),
    /// Action factory (`use:`).
    Action(ActionFn),
    /// Slot value setter (`let:`).
    Setter(SlotSetter),
}

impl Prop {
    pub fn handler(f: impl Fn(&Event) + 'static) -> Self {
        Prop::Handler(Rc::new(f))
    }

    pub fn action(f: impl Fn(&ElementRef) -> Option<ActionHandle> + 'static) -> Self {
        Prop::Action(Rc::new(f))
    }

    pub fn setter(f: impl Fn(&Value, &str) + 'static) -> Self {
        Prop::Setter(Rc::new(f))
    }

    /// Short description used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Prop::Value(_) => "value",
            Prop::Store(_) => "store",
            Prop::Handler(_) => "handler",
            Prop::Action(_) => "action",
            Prop::Setter(_) => "setter",
        }
    }
}

impl fmt::Debug for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prop::Value(v) => f.debug_tuple("Value").field(v).finish(),
            other => write!(f, "{}", other.kind()),
        }
    }
}

impl From<Value> for Prop {
    fn from(value: Value) -> Self {
        Prop::Value(value)
    }
}

impl From<&str> for Prop {
    fn from(value: &str) -> Self {
        Prop::Value(value.into())
    }
}

impl From<String> for Prop {
    fn from(value: String) -> Self {
        Prop::Value(value.into())
    }
}

impl From<bool> for Prop {
    fn from(value: bool) -> Self {
        Prop::Value(value.into())
    }
}

impl From<f64> for Prop {
    fn from(value: f64) -> Self {
        Prop::Value(value.into())
    }
}

impl From<i32> for Prop {
    fn from(value: i32) -> Self {
        Prop::Value(value.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Prop {
    fn from(values: Vec<T>) -> Self {
        Prop::Value(values.into())
    }
}

impl<S: Store + 'static> From<Rc<S>> for Prop {
    fn from(store: Rc<S>) -> Self {
        Prop::Store(store)
    }
}

// =============================================================================
// Props
// =============================================================================

/// Ordered property bag. Inserting an existing key replaces its prop in
/// place.
#[derive(Clone, Debug, Default)]
pub struct Props {
    entries: Vec<(String, Prop)>,
}

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, prop: impl Into<Prop>) {
        let key = key.into();
        let prop = prop.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = prop,
            None => self.entries.push((key, prop)),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, prop: impl Into<Prop>) -> Self {
        self.insert(key, prop);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    /// Static value under `key`, if it holds one.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        match self.get(key) {
            Some(Prop::Value(value)) => Some(value),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
        self.entries.iter().map(|(k, p)| (k.as_str(), p))
    }
}

impl IntoIterator for Props {
    type Item = (String, Prop);
    type IntoIter = std::vec::IntoIter<(String, Prop)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl From<Option<Props>> for Props {
    fn from(props: Option<Props>) -> Self {
        props.unwrap_or_default()
    }
}

// =============================================================================
// Tag
// =============================================================================

/// What a descriptor builds.
#[derive(Clone)]
pub enum Tag {
    /// A DOM element by tag name.
    Element(String),
    /// A component instance.
    Component(Rc<dyn Component>),
    /// No wrapper: children mount straight into the parent.
    Fragment,
}

impl Tag {
    pub fn component(component: impl Component + 'static) -> Self {
        Tag::Component(Rc::new(component))
    }

    /// Name used in logs and errors.
    pub fn name(&self) -> String {
        match self {
            Tag::Element(tag) => format!("<{tag}>"),
            Tag::Component(c) => format!("<{}>", c.name()),
            Tag::Fragment => "<fragment>".to_string(),
        }
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<&str> for Tag {
    fn from(tag: &str) -> Self {
        Tag::Element(tag.to_ascii_lowercase())
    }
}

impl From<String> for Tag {
    fn from(tag: String) -> Self {
        Tag::Element(tag.to_ascii_lowercase())
    }
}

impl From<Rc<dyn Component>> for Tag {
    fn from(component: Rc<dyn Component>) -> Self {
        Tag::Component(component)
    }
}

// =============================================================================
// Child
// =============================================================================

/// A positional child.
#[derive(Clone)]
pub enum Child {
    Text(String),
    Number(f64),
    Element(ElementDescriptor),
    /// Rendered as a text node that follows the store.
    Store(StoreRef),
    /// Nested list, flattened on construction.
    List(Vec<Child>),
    /// Dropped on construction (`null`, `false`, ...).
    Empty,
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Child::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Child::Element(d) => f.debug_tuple("Element").field(d).finish(),
            Child::Store(store) => f.debug_tuple("Store").field(&store.get()).finish(),
            Child::List(items) => f.debug_tuple("List").field(items).finish(),
            Child::Empty => f.write_str("Empty"),
        }
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Child::Text(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Child::Text(text)
    }
}

impl From<f64> for Child {
    fn from(n: f64) -> Self {
        Child::Number(n)
    }
}

impl From<i32> for Child {
    fn from(n: i32) -> Self {
        Child::Number(n.into())
    }
}

/// `true` and `false` both render nothing.
impl From<bool> for Child {
    fn from(_: bool) -> Self {
        Child::Empty
    }
}

impl From<ElementDescriptor> for Child {
    fn from(descriptor: ElementDescriptor) -> Self {
        Child::Element(descriptor)
    }
}

impl<S: Store + 'static> From<Rc<S>> for Child {
    fn from(store: Rc<S>) -> Self {
        Child::Store(store)
    }
}

impl<T: Into<Child>> From<Vec<T>> for Child {
    fn from(items: Vec<T>) -> Self {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Child>> From<Option<T>> for Child {
    fn from(child: Option<T>) -> Self {
        child.map(Into::into).unwrap_or(Child::Empty)
    }
}

impl From<Value> for Child {
    fn from(value: Value) -> Self {
        match value {
            Value::Undefined | Value::Null | Value::Bool(_) => Child::Empty,
            Value::Number(n) => Child::Number(n),
            Value::Text(text) => Child::Text(text),
            Value::List(items) => Child::List(items.into_iter().map(Child::from).collect()),
            other => Child::Text(other.to_string()),
        }
    }
}
