//! `class:name` toggles.
//!
//! Run with: cargo test --test class

mod common;

use spark_bind::{derived, h, props, writable, Store, Value};

use common::{mount, one};

#[test]
fn test_class_toggles_follow_stores() {
    let is_active = writable(false);
    let is_not_active = derived(is_active.clone(), |active| Value::from(!active.truthy()));
    let is_admin = writable(true);

    let view = h!(
        "h1",
        props! {
            "class:active" => is_active.clone(),
            "class:inactive" => is_not_active.clone(),
            "class:isAdmin" => is_admin.clone(),
        },
        "Wellcome back!",
    )
    .unwrap();
    let (_doc, handle) = mount(&view);
    let h1 = one(&handle, "h1");

    assert!(h1.has_class("inactive"));
    assert!(h1.has_class("isAdmin"));
    assert!(!h1.has_class("active"));

    is_active.set(true.into());
    assert!(h1.has_class("active"));
    assert!(h1.has_class("isAdmin"));
    assert!(!h1.has_class("inactive"));

    is_admin.set(false.into());
    assert_eq!(h1.class_list(), ["active"]);
}

#[test]
fn test_static_toggle_and_class_attribute() {
    let view = h!("p", props! { "class" => "lead", "class:shown" => true, "class:hidden" => false }).unwrap();
    let (_doc, handle) = mount(&view);

    assert_eq!(one(&handle, "p").class_list(), ["lead", "shown"]);
}

#[test]
fn test_toggle_released_on_unmount() {
    let on = writable(true);
    let (_doc, handle) = mount(&h!("p", props! { "class:on" => on.clone() }).unwrap());

    assert_eq!(on.subscriber_count(), 1);
    handle.unmount();
    assert_eq!(on.subscriber_count(), 0);
}
