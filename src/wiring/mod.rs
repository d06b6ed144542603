//! Directive wiring - applying non-`bind:` directives to live elements.
//!
//! - [`events`] - `on:` listeners and their modifiers
//! - [`actions`] - `use:` factories and their teardown
//! - [`class`] - `class:` toggles
//! - [`attribute`] - static and store-driven attributes
//! - [`slot`] - `let:` hand-off on slot render passes

pub mod actions;
pub mod attribute;
pub mod class;
pub mod events;
pub mod slot;

pub use actions::{ActionFn, ActionHandle};
pub use class::Toggle;
pub use events::{listen, EventModifiers};
pub use slot::{LetReceiver, SlotLet, SlotSetter};
