//! # spark-bind
//!
//! Hyperscript construction with store-driven two-way bindings.
//!
//! `h(tag, props, children)` builds an element or component description from
//! a property bag that mixes plain attributes with directive keys:
//!
//! - `bind:property` - two-way binding between a store and the element
//! - `class:name` - class toggled by a store (or a static boolean)
//! - `on:event|modifiers` - event listener (`once`, `self`,
//!   `stopPropagation`, `preventDefault`)
//! - `use:name` - action called with the live element, torn down at unmount
//! - `let:name` - value handed back from a component's slot
//!
//! ## Architecture
//!
//! ```text
//! h → ElementDescriptor (directives resolved) → render → live nodes → MountHandle::unmount
//! ```
//!
//! `bind:` directives are resolved to a [`BindingStrategy`] when the
//! descriptor is built, by looking the target up in a [`StrategyRegistry`].
//! Rendering mounts into a [`Document`], an in-memory host with the DOM
//! surface bindings need.
//!
//! ## Modules
//!
//! - [`store`] - the store contract, `Writable` and `Derived`
//! - [`dom`] - host document, events and user-interaction helpers
//! - [`descriptor`] - directive parsing, props and children
//! - [`binding`] - binding strategies and their registry
//! - [`wiring`] - events, actions, class toggles, attributes and slot lets
//! - [`component`] - the component contract
//! - [`pipeline`] - mounting and the runtime
//!
//! ## Example
//!
//! ```ignore
//! use spark_bind::{h, props, render, writable, Document, Prop};
//!
//! let name = writable("world");
//! let view = h!(
//!     "label",
//!     None,
//!     "Name: ",
//!     h!("input", props! { "bind:value" => name.clone() })?,
//! )?;
//!
//! let doc = Document::new();
//! let handle = render(&doc, &view)?;
//! handle.container().query("input").unwrap().type_text("!");
//! assert_eq!(name.get(), "world!".into());
//! handle.unmount();
//! ```

pub mod binding;
pub mod component;
pub mod descriptor;
pub mod dom;
pub mod error;
pub mod pipeline;
pub mod store;
pub mod types;
pub mod wiring;

// Re-export commonly used items
pub use types::*;

pub use error::{BindError, Result};

pub use store::{derived, get, watch, writable, Derived, Store, StoreRef, Subscriber, Unsubscribe, Writable};

pub use dom::{Document, ElementRef, Event, EventHandler, Metrics, NodeId};

pub use descriptor::{normalize_children, parse_key, Child, Directive, ElementDescriptor, Prop, Props, Reserved, Tag};

pub use binding::{
    resolve_initial, BindContext, BindTarget, BindingRule, BindingStrategy, CheckboxBinding, ComponentBinding,
    ContentBinding, GroupBinding, MeasuredBinding, MultiSelectBinding, PropertyMatch, SelectBinding, ShapeMatch,
    StrategyRegistry, TargetShape, ThisBinding, ValueBinding,
};

pub use wiring::{listen, ActionFn, ActionHandle, EventModifiers, LetReceiver, SlotLet, SlotSetter, Toggle};

pub use component::{Component, ComponentRef, ComponentScope, SlotPass, DEFAULT_SLOT};

pub use pipeline::{h, render, MountHandle, Mounted, Runtime, RuntimeBuilder, RuntimeConfig};

// =============================================================================
// Macros
// =============================================================================

/// Build a [`Props`] bag.
///
/// ```ignore
/// let props = props! {
///     "class" => "large",
///     "bind:value" => text.clone(),
///     "on:click|once" => Prop::handler(|_| println!("clicked")),
/// };
/// ```
#[macro_export]
macro_rules! props {
    () => {
        $crate::Props::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        $crate::Props::new()$(.with($key, $value))+
    };
}

/// [`h`] with children given inline. `None` stands for an empty property bag.
///
/// ```ignore
/// let view = h!("p", None, "There are ", count.clone(), " icons")?;
/// let input = h!("input", props! { "bind:value" => text.clone() })?;
/// ```
#[macro_export]
macro_rules! h {
    ($tag:expr) => {
        $crate::h($tag, $crate::Props::new(), ::std::vec::Vec::new())
    };
    ($tag:expr, None $(, $child:expr)* $(,)?) => {
        $crate::h($tag, $crate::Props::new(), ::std::vec![$($crate::Child::from($child)),*])
    };
    ($tag:expr, $props:expr $(, $child:expr)* $(,)?) => {
        $crate::h($tag, $props, ::std::vec![$($crate::Child::from($child)),*])
    };
}
