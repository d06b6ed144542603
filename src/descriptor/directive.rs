//! Directive parser - classifying property-bag keys.
//!
//! Namespaced keys look like `prefix:name` or `prefix:name|mod1|mod2`:
//!
//! | Key | Directive |
//! |---|---|
//! | `bind:value` | [`Directive::Bind`] |
//! | `class:active` | [`Directive::ClassToggle`] |
//! | `on:click\|once` | [`Directive::Event`] |
//! | `use:tooltip` | [`Directive::Action`] |
//! | `let:item` | [`Directive::SlotLet`] |
//! | `children`, `ref`, `slot` | [`Directive::Reserved`] |
//!
//! Anything else, including unknown prefixes such as `xlink:href`, is a
//! plain attribute.

use tracing::debug;

use crate::wiring::EventModifiers;

/// Keys with a fixed meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserved {
    /// Ignored; children come from the positional list.
    Children,
    /// Alias for `bind:this`.
    Ref,
    /// Names the component slot an element is assigned to.
    Slot,
}

/// Classification of one property-bag key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'a> {
    Plain(&'a str),
    Reserved(Reserved),
    Bind { property: &'a str },
    ClassToggle { class: &'a str },
    Event { event: &'a str, modifiers: EventModifiers },
    Action { name: &'a str },
    SlotLet { name: &'a str },
}

/// Classify `key`.
pub fn parse_key(key: &str) -> Directive<'_> {
    match key {
        "children" => return Directive::Reserved(Reserved::Children),
        "ref" => return Directive::Reserved(Reserved::Ref),
        "slot" => return Directive::Reserved(Reserved::Slot),
        _ => {}
    }

    let Some((prefix, rest)) = key.split_once(':') else {
        return Directive::Plain(key);
    };
    let mut parts = rest.split('|');
    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Directive::Plain(key);
    }

    let directive = match prefix {
        "on" => {
            return Directive::Event {
                event: name,
                modifiers: EventModifiers::parse(name, parts),
            };
        }
        "bind" => Directive::Bind { property: name },
        "class" => Directive::ClassToggle { class: name },
        "use" => Directive::Action { name },
        "let" => Directive::SlotLet { name },
        _ => return Directive::Plain(key),
    };
    if parts.next().is_some() {
        debug!(key, "modifiers are only meaningful on event directives");
    }
    directive
}
