//! `bind:prop` on a component.

use tracing::trace;

use super::{BindContext, BindingStrategy};
use crate::store::watch;
use crate::types::Cleanup;

/// Binds a component prop to a store.
///
/// A store holding a value hands it to the component before it renders.
/// Otherwise the prop value the component settled on seeds the store.
#[derive(Debug, Clone, Copy)]
pub struct ComponentBinding;

impl BindingStrategy for ComponentBinding {
    fn name(&self) -> &'static str {
        "component"
    }

    fn prepare(&self, cx: &BindContext) {
        let Some(component) = cx.component() else { return };
        let value = cx.store().get();
        if !value.is_undefined() {
            component.provide(cx.property(), value);
        }
    }

    fn initialize(&self, cx: &BindContext) {
        let Some(component) = cx.component() else { return };
        if cx.store().get().is_undefined() {
            let value = component.prop_value(cx.property());
            if !value.is_undefined() {
                trace!(component = component.name(), prop = cx.property(), "seeding store from prop");
                cx.store().set(value);
            }
        }
    }

    fn attach_store_subscription(&self, cx: &BindContext) -> Option<Cleanup> {
        let component = cx.component()?.clone();
        let property = cx.property().to_string();
        Some(watch(&**cx.store(), move |value| {
            component.set_prop(&property, value.clone());
        }))
    }

    fn attach_dom_listener(&self, cx: &BindContext) -> Option<Cleanup> {
        let component = cx.component()?;
        let store = cx.store().clone();
        Some(component.watch_prop(cx.property(), move |value| store.set(value.clone())))
    }
}
