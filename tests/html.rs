//! Children, attributes and serialized output.
//!
//! Run with: cargo test --test html

mod common;

use spark_bind::{h, props, writable, BindError, Child, Prop, Props, Store, Tag, Value};

use common::{mount, one};

#[test]
fn test_nested_html() {
    let view = h!(
        "h1",
        props! { "class" => "large" },
        "Hello ",
        h!("strong", None, "World").unwrap(),
        "!",
    )
    .unwrap();
    let (_doc, handle) = mount(&view);

    assert_eq!(
        one(&handle, "h1").outer_html(),
        r#"<h1 class="large">Hello <strong>World</strong>!</h1>"#
    );
}

#[test]
fn test_store_as_child() {
    let count = writable(0);
    let (_doc, handle) = mount(&h!("span", None, "count: ", count.clone()).unwrap());
    let container = handle.container();

    assert!(container.inner_html().contains("<span>count: 0</span>"));

    count.set(Value::from(1));
    assert!(container.inner_html().contains("<span>count: 1</span>"));

    count.set(Value::from(-1));
    assert!(container.inner_html().contains("<span>count: -1</span>"));
}

#[test]
fn test_empty_children_are_dropped() {
    let view = h!(
        "p",
        None,
        "There",
        Value::Null,
        " are ",
        "",
        5,
        Value::Undefined,
        false,
        " icons",
    )
    .unwrap();
    let (_doc, handle) = mount(&view);

    assert_eq!(handle.container().inner_html(), "<p>There are 5 icons</p>");
    assert_eq!(view.children().len(), 4);
}

#[test]
fn test_nested_lists_are_flattened() {
    let items: Vec<Child> = vec![
        Child::from("a"),
        Child::from(vec![Child::from("b"), Child::from(vec!["c", "d"])]),
    ];
    let (_doc, handle) = mount(&h("p", Props::new(), items).unwrap());

    assert_eq!(handle.container().inner_html(), "<p>abcd</p>");
}

#[test]
fn test_fragment_renders_children_in_place() {
    let view = h!(Tag::Fragment, None, h!("b", None, "1").unwrap(), h!("i", None, "2").unwrap()).unwrap();
    let (_doc, handle) = mount(&view);

    assert_eq!(handle.container().inner_html(), "<b>1</b><i>2</i>");
}

#[test]
fn test_reactive_attribute() {
    let title = writable("first");
    let (_doc, handle) = mount(&h!("a", props! { "title" => title.clone(), "xlink:href" => "#icon" }).unwrap());
    let link = one(&handle, "a");

    assert_eq!(link.attr("title").as_deref(), Some("first"));
    assert_eq!(link.attr("xlink:href").as_deref(), Some("#icon"));

    title.set("second".into());
    assert_eq!(link.attr("title").as_deref(), Some("second"));

    title.set(Value::Null);
    assert_eq!(link.attr("title"), None);
}

#[test]
fn test_boolean_attributes() {
    let view = h!("input", props! { "disabled" => true, "readonly" => false, "maxlength" => 4 }).unwrap();
    let (_doc, handle) = mount(&view);

    assert_eq!(one(&handle, "input").outer_html(), r#"<input disabled="" maxlength="4">"#);
}

#[test]
fn test_unknown_prefix_is_plain_attribute() {
    let view = h!("div", props! { "data:role" => "x", "bind:" => "y" }).unwrap();
    let (_doc, handle) = mount(&view);
    let div = one(&handle, "div");

    assert_eq!(div.attr("data:role").as_deref(), Some("x"));
    assert_eq!(div.attr("bind:").as_deref(), Some("y"));
}

#[test]
fn test_children_prop_is_ignored() {
    let view = h!("p", props! { "children" => "ignored" }, "kept").unwrap();
    let (_doc, handle) = mount(&view);

    assert_eq!(handle.container().inner_html(), "<p>kept</p>");
}

#[test]
fn test_construction_errors() {
    let err = h!("div", props! { "bind:value" => writable("x") }).unwrap_err();
    assert_eq!(
        err,
        BindError::UnsupportedBinding {
            target: "<div>".to_string(),
            property: "value".to_string(),
        }
    );

    let err = h!("button", props! { "on:click" => "not a handler" }).unwrap_err();
    assert!(matches!(err, BindError::InvalidDirectiveValue { .. }));

    let err = h!("p", props! { "use:tooltip" => Prop::handler(|_| {}) }).unwrap_err();
    assert!(matches!(err, BindError::InvalidDirectiveValue { .. }));
}
