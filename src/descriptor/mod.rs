//! Element descriptors - the output of `h`.
//!
//! Construction classifies every property-bag key once:
//! - static plain keys become attributes (or component props)
//! - stores under plain keys become reactive attributes
//! - directives become [`DirectiveRecord`]s, with `bind:` already resolved
//!   to its strategy
//!
//! The result is immutable and cheap to clone, so slot content can be
//! mounted as often as the owning component renders it.

mod children;
mod directive;
mod types;

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

pub use children::normalize_children;
pub use directive::{parse_key, Directive, Reserved};
pub use types::{Child, Prop, Props, Tag};

use crate::binding::{BindingStrategy, StrategyRegistry, TargetShape};
use crate::dom::EventHandler;
use crate::error::{BindError, Result};
use crate::store::StoreRef;
use crate::types::Value;
use crate::wiring::{ActionFn, EventModifiers, LetReceiver, SlotLet, Toggle};

// =============================================================================
// Directive records
// =============================================================================

/// A directive ready to be applied at mount.
#[derive(Clone)]
pub(crate) enum DirectiveRecord {
    /// Plain key driven by a store.
    Attribute { name: String, store: StoreRef },
    ClassToggle { class: String, toggle: Toggle },
    Bind {
        property: String,
        store: StoreRef,
        strategy: Rc<dyn BindingStrategy>,
    },
    Event {
        event: String,
        modifiers: EventModifiers,
        handler: EventHandler,
    },
    Action { name: String, action: ActionFn },
    SlotLet(SlotLet),
}

impl fmt::Debug for DirectiveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectiveRecord::Attribute { name, .. } => write!(f, "{name}={{store}}"),
            DirectiveRecord::ClassToggle { class, .. } => write!(f, "class:{class}"),
            DirectiveRecord::Bind { property, strategy, .. } => {
                write!(f, "bind:{property} ({})", strategy.name())
            }
            DirectiveRecord::Event { event, modifiers, .. } => write!(f, "on:{event} {modifiers:?}"),
            DirectiveRecord::Action { name, .. } => write!(f, "use:{name}"),
            DirectiveRecord::SlotLet(slot_let) => write!(f, "let:{}", slot_let.name()),
        }
    }
}

fn invalid(key: &str, expected: &'static str) -> BindError {
    BindError::InvalidDirectiveValue {
        key: key.to_string(),
        expected,
    }
}

// =============================================================================
// ElementDescriptor
// =============================================================================

pub(crate) struct DescriptorInner {
    pub(crate) tag: Tag,
    pub(crate) attributes: Vec<(String, Value)>,
    pub(crate) directives: Vec<DirectiveRecord>,
    pub(crate) slot: Option<String>,
    pub(crate) children: Vec<Child>,
}

/// Immutable description of an element, component or fragment.
#[derive(Clone)]
pub struct ElementDescriptor(pub(crate) Rc<DescriptorInner>);

impl ElementDescriptor {
    /// Classify `props`, resolve `bind:` strategies against `registry` and
    /// normalize `children`.
    pub(crate) fn build(registry: &StrategyRegistry, tag: Tag, props: Props, children: Vec<Child>) -> Result<Self> {
        let entries: Vec<(String, Prop)> = props.into_iter().collect();

        let attributes: Vec<(String, Value)> = entries
            .iter()
            .filter_map(|(key, prop)| match (parse_key(key), prop) {
                (Directive::Plain(name), Prop::Value(value)) => Some((name.to_string(), value.clone())),
                _ => None,
            })
            .collect();

        let shape = match &tag {
            Tag::Element(name) => Some(TargetShape::element(name, &attributes)),
            Tag::Component(_) => Some(TargetShape::component()),
            Tag::Fragment => None,
        };
        let Some(shape) = shape else {
            if !entries.is_empty() {
                warn!(props = entries.len(), "fragments take no props; ignoring them");
            }
            return Ok(Self(Rc::new(DescriptorInner {
                tag,
                attributes: Vec::new(),
                directives: Vec::new(),
                slot: None,
                children: normalize_children(children),
            })));
        };
        let is_component = shape.is_component();

        let bind = |key: &str, property: &str, prop: Prop| -> Result<DirectiveRecord> {
            let Prop::Store(store) = prop else {
                return Err(invalid(key, "a store"));
            };
            let strategy = registry
                .resolve(&shape, property)
                .ok_or_else(|| BindError::UnsupportedBinding {
                    target: shape.to_string(),
                    property: property.to_string(),
                })?;
            Ok(DirectiveRecord::Bind {
                property: property.to_string(),
                store,
                strategy,
            })
        };

        let mut directives = Vec::new();
        let mut slot = None;
        for (key, prop) in entries {
            let record = match parse_key(&key) {
                Directive::Plain(name) => match prop {
                    Prop::Value(_) => continue,
                    Prop::Store(store) => DirectiveRecord::Attribute {
                        name: name.to_string(),
                        store,
                    },
                    _ => return Err(invalid(&key, "a value or a store")),
                },
                Directive::Reserved(Reserved::Children) => {
                    warn!("`children` prop ignored; pass children positionally");
                    continue;
                }
                Directive::Reserved(Reserved::Slot) => match prop {
                    Prop::Value(value) if !value.is_nullish() => {
                        slot = Some(value.to_string());
                        continue;
                    }
                    _ => return Err(invalid(&key, "a slot name")),
                },
                Directive::Reserved(Reserved::Ref) => bind(&key, "this", prop)?,
                Directive::Bind { property } => bind(&key, property, prop)?,
                Directive::ClassToggle { class } => {
                    if is_component {
                        warn!(key = %key, "class toggles do not apply to components");
                        continue;
                    }
                    let toggle = match prop {
                        Prop::Value(value) => Toggle::Static(value.truthy()),
                        Prop::Store(store) => Toggle::Store(store),
                        _ => return Err(invalid(&key, "a boolean or a store")),
                    };
                    DirectiveRecord::ClassToggle {
                        class: class.to_string(),
                        toggle,
                    }
                }
                Directive::Event { event, modifiers } => match prop {
                    Prop::Handler(handler) => DirectiveRecord::Event {
                        event: event.to_string(),
                        modifiers,
                        handler,
                    },
                    _ => return Err(invalid(&key, "an event handler")),
                },
                Directive::Action { name } => {
                    if is_component {
                        warn!(key = %key, "actions do not apply to components");
                        continue;
                    }
                    match prop {
                        Prop::Action(action) => DirectiveRecord::Action {
                            name: name.to_string(),
                            action,
                        },
                        _ => return Err(invalid(&key, "an action factory")),
                    }
                }
                Directive::SlotLet { name } => {
                    let receiver = match prop {
                        Prop::Setter(setter) => LetReceiver::Setter(setter),
                        Prop::Store(store) => LetReceiver::Store(store),
                        _ => return Err(invalid(&key, "a setter or a store")),
                    };
                    DirectiveRecord::SlotLet(SlotLet::new(name, receiver))
                }
            };
            directives.push(record);
        }

        let descriptor = Self(Rc::new(DescriptorInner {
            tag,
            attributes,
            directives,
            slot,
            children: normalize_children(children),
        }));
        debug!(descriptor = ?descriptor, "descriptor built");
        Ok(descriptor)
    }

    pub fn tag(&self) -> &Tag {
        &self.0.tag
    }

    /// Tag name for element descriptors.
    pub fn tag_name(&self) -> Option<&str> {
        match &self.0.tag {
            Tag::Element(name) => Some(name.as_str()),
            _ => None,
        }
    }

    pub fn is_component(&self) -> bool {
        matches!(self.0.tag, Tag::Component(_))
    }

    /// Slot this element is assigned to inside a component.
    pub fn slot(&self) -> Option<&str> {
        self.0.slot.as_deref()
    }

    /// Static attribute (or component prop) `name`.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.0
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn attributes(&self) -> &[(String, Value)] {
        &self.0.attributes
    }

    /// Normalized children.
    pub fn children(&self) -> &[Child] {
        &self.0.children
    }

    pub fn directive_count(&self) -> usize {
        self.0.directives.len()
    }

    pub(crate) fn directives(&self) -> &[DirectiveRecord] {
        &self.0.directives
    }

    /// `let:` directives carried by this descriptor.
    pub(crate) fn slot_lets(&self) -> Vec<SlotLet> {
        self.0
            .directives
            .iter()
            .filter_map(|record| match record {
                DirectiveRecord::SlotLet(slot_let) => Some(slot_let.clone()),
                _ => None,
            })
            .collect()
    }
}

impl fmt::Debug for ElementDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementDescriptor")
            .field("tag", &self.0.tag)
            .field("attributes", &self.0.attributes)
            .field("directives", &self.0.directives)
            .field("slot", &self.0.slot)
            .field("children", &self.0.children.len())
            .finish()
    }
}
