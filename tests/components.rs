//! Components: props, forwarded events, slots and `let:` hand-off.
//!
//! Run with: cargo test --test components

mod common;

use std::cell::Cell;
use std::rc::Rc;

use spark_bind::{h, props, writable, BindError, Component, ComponentScope, Prop, Result, Store, Value};

use common::{mount, one, recorder, Counter, List};

#[test]
fn test_counter_increments() {
    let (_doc, handle) = mount(&h!(Counter::component()).unwrap());
    let button = one(&handle, "button");
    assert_eq!(button.inner_html(), "Count is 0");

    button.click();
    assert_eq!(button.inner_html(), "Count is 1");

    button.click();
    assert_eq!(button.inner_html(), "Count is 2");
}

#[test]
fn test_counter_initial_count() {
    let (_doc, handle) = mount(&h!(Counter::component(), props! { "initialCount" => 5 }).unwrap());
    let button = one(&handle, "button");
    assert_eq!(button.inner_html(), "Count is 5");

    button.click();
    assert_eq!(button.inner_html(), "Count is 6");
}

#[test]
fn test_forwards_click() {
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let view = h!(
        Counter::component(),
        props! { "on:click" => Prop::handler(move |_| sink.set(sink.get() + 1)) },
    )
    .unwrap();
    let (_doc, handle) = mount(&view);
    let button = one(&handle, "button");

    button.click();
    assert_eq!(calls.get(), 1);
    assert_eq!(button.inner_html(), "Count is 1");
}

#[test]
fn test_forwarded_once_handler() {
    let calls = Rc::new(Cell::new(0));
    let sink = calls.clone();
    let view = h!(
        Counter::component(),
        props! { "on:click|once" => Prop::handler(move |_| sink.set(sink.get() + 1)) },
    )
    .unwrap();
    let (_doc, handle) = mount(&view);
    let button = one(&handle, "button");

    button.click();
    button.click();
    assert_eq!(calls.get(), 1);
    assert_eq!(handle.component().unwrap().handler_count("click"), 0);
}

#[test]
fn test_default_slot_content() {
    let (_doc, handle) = mount(&h!(Counter::component(), None, "New default slot content").unwrap());

    assert_eq!(one(&handle, "button").inner_html(), "New default slot content");
}

#[test]
fn test_let_setter() {
    let (calls, setter) = recorder();
    let view = h!(Counter::component(), props! { "let:count" => Prop::setter(setter) }, "slot content").unwrap();
    let (_doc, handle) = mount(&view);
    let button = one(&handle, "button");

    assert_eq!(*calls.borrow(), vec![(Value::from(0), "count".to_string())]);

    button.click();
    assert_eq!(calls.borrow().last(), Some(&(Value::from(1), "count".to_string())));

    button.click();
    assert_eq!(calls.borrow().last(), Some(&(Value::from(2), "count".to_string())));
    assert_eq!(calls.borrow().len(), 3);
}

#[test]
fn test_let_store() {
    // Set to 0 before the slot content renders.
    let count = writable(-1);
    let view = h!(
        Counter::component(),
        props! { "let:count" => count.clone() },
        "current count: ",
        count.clone(),
    )
    .unwrap();
    let (_doc, handle) = mount(&view);
    let button = one(&handle, "button");

    assert_eq!(button.inner_html(), "current count: 0");

    button.click();
    assert_eq!(count.get(), Value::from(1));
    assert_eq!(button.inner_html(), "current count: 1");

    button.click();
    assert_eq!(count.get(), Value::from(2));
    assert_eq!(button.inner_html(), "current count: 2");
}

#[test]
fn test_named_slot() {
    let (item_calls, item_setter) = recorder();
    let (items_calls, items_setter) = recorder();
    let items = vec!["a", "b", "c"];

    let view = h!(
        List::component(),
        props! { "items" => items.clone(), "let:item" => Prop::setter(item_setter) },
        "each item",
        h!("p", props! { "slot" => "footer", "let:items" => Prop::setter(items_setter) }, "The end").unwrap(),
    )
    .unwrap();
    let (_doc, handle) = mount(&view);

    assert!(handle.container().inner_html().contains(
        "<ul><li>each item</li><li>each item</li><li>each item</li></ul> <p>The end</p>"
    ));

    let names: Vec<Value> = item_calls.borrow().iter().map(|(value, _)| value.clone()).collect();
    assert_eq!(names, [Value::from("a"), Value::from("b"), Value::from("c")]);
    assert!(item_calls.borrow().iter().all(|(_, name)| name == "item"));

    assert_eq!(*items_calls.borrow(), vec![(Value::from(items), "items".to_string())]);
}

#[test]
fn test_reactive_prop() {
    let initial = writable(7);
    let (_doc, handle) = mount(&h!(Counter::component(), props! { "count" => initial.clone() }).unwrap());
    let button = one(&handle, "button");
    assert_eq!(button.inner_html(), "Count is 7");

    initial.set(Value::from(1));
    assert_eq!(button.inner_html(), "Count is 1");
}

#[test]
fn test_unmount_destroys_component() {
    let count = writable(3);
    let (_doc, handle) = mount(&h!(Counter::component(), props! { "bind:count" => count.clone() }).unwrap());
    let component = handle.component().unwrap().clone();

    handle.unmount();
    assert!(component.is_destroyed());
    assert_eq!(count.subscriber_count(), 0);
}

struct Broken;

impl Component for Broken {
    fn name(&self) -> &str {
        "Broken"
    }

    fn render(&self, scope: &ComponentScope) -> Result<()> {
        let doc = scope.document();
        doc.append(scope.target(), doc.create_element("span"));
        Err(BindError::Component {
            component: self.name().to_string(),
            message: "missing data".to_string(),
        })
    }
}

#[test]
fn test_render_error_removes_container() {
    let doc = spark_bind::Document::new();
    let view = h!(Rc::new(Broken) as Rc<dyn Component>).unwrap();

    let err = spark_bind::render(&doc, &view).err().unwrap();
    assert!(matches!(err, BindError::Component { .. }));
    assert!(doc.children(doc.body()).is_empty());
}
