//! Runtime - the `h` constructor and the render entry point.
//!
//! A [`Runtime`] owns the strategy registry used to resolve `bind:`
//! directives. The free functions [`h`] and [`render`] use a per-thread
//! runtime with the builtin strategies; build your own runtime to register
//! extra strategies.
//!
//! # Example
//!
//! ```ignore
//! use spark_bind::{Runtime, BindingRule, ShapeMatch, PropertyMatch, Document};
//!
//! let runtime = Runtime::builder()
//!     .strategy(BindingRule::new(
//!         ShapeMatch::Tag("my-slider"),
//!         PropertyMatch::Is("value"),
//!         SliderBinding,
//!     ))
//!     .build();
//!
//! let doc = Document::new();
//! let view = runtime.h("my-slider", props! { "bind:value" => level.clone() }, vec![])?;
//! let handle = runtime.render(&doc, &view)?;
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use tracing::{debug, info};

use super::mount::{mount_descriptor, MountContext, MountHandle};
use crate::binding::{BindingRule, StrategyRegistry};
use crate::descriptor::{Child, ElementDescriptor, Props, Tag};
use crate::dom::Document;
use crate::error::Result;

// =============================================================================
// Config
// =============================================================================

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Tag of the container element each render creates under the body.
    pub container_tag: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
        }
    }
}

// =============================================================================
// Runtime
// =============================================================================

/// Binding runtime: resolves directives at construction, mounts at render.
pub struct Runtime {
    config: RuntimeConfig,
    registry: StrategyRegistry,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    /// Runtime with the default config and builtin strategies.
    pub fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            registry: StrategyRegistry::builtin(),
        }
    }

    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::default()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    /// Build a descriptor.
    ///
    /// Fails when a `bind:` directive has no strategy for its target or a
    /// directive is given the wrong kind of value.
    pub fn h(&self, tag: impl Into<Tag>, props: impl Into<Props>, children: Vec<Child>) -> Result<ElementDescriptor> {
        ElementDescriptor::build(&self.registry, tag.into(), props.into(), children)
    }

    /// Mount `view` into a fresh container appended to `document`'s body.
    pub fn render(&self, document: &Document, view: &ElementDescriptor) -> Result<MountHandle> {
        let container = document.create_element(&self.config.container_tag);
        document.append(document.body(), container);

        let cx = MountContext::new(document.clone(), Rc::new(RefCell::new(HashSet::new())));
        match mount_descriptor(&cx, container, view) {
            Ok(mounted) => {
                cx.flush();
                cx.discard();
                info!(container = %container, nodes = document.node_count(), "rendered");
                Ok(MountHandle::new(document.clone(), container, mounted))
            }
            Err(err) => {
                debug!(error = %err, "render failed; removing container");
                cx.discard();
                document.remove(container);
                Err(err)
            }
        }
    }
}

/// Builder for [`Runtime`].
#[derive(Default)]
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    rules: Vec<BindingRule>,
}

impl RuntimeBuilder {
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
        self.config.container_tag = tag.into();
        self
    }

    /// Register an extra strategy. Later registrations take precedence.
    pub fn strategy(mut self, rule: BindingRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn build(self) -> Runtime {
        let mut registry = StrategyRegistry::builtin();
        for rule in self.rules {
            registry.register(rule);
        }
        Runtime {
            config: self.config,
            registry,
        }
    }
}

// =============================================================================
// Default runtime
// =============================================================================

thread_local! {
    static DEFAULT_RUNTIME: Runtime = Runtime::new();
}

/// [`Runtime::h`] on the per-thread default runtime.
pub fn h(tag: impl Into<Tag>, props: impl Into<Props>, children: Vec<Child>) -> Result<ElementDescriptor> {
    let (tag, props) = (tag.into(), props.into());
    DEFAULT_RUNTIME.with(|runtime| runtime.h(tag, props, children))
}

/// [`Runtime::render`] on the per-thread default runtime.
pub fn render(document: &Document, view: &ElementDescriptor) -> Result<MountHandle> {
    DEFAULT_RUNTIME.with(|runtime| runtime.render(document, view))
}
