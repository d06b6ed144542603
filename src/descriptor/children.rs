//! Child normalizer.

use super::Child;

/// Flatten nested lists and drop children that render nothing.
///
/// Empty strings and [`Child::Empty`] disappear; text, numbers, element
/// descriptors and stores are kept in order.
pub fn normalize_children(children: Vec<Child>) -> Vec<Child> {
    let mut out = Vec::with_capacity(children.len());
    flatten_into(children, &mut out);
    out
}

fn flatten_into(children: Vec<Child>, out: &mut Vec<Child>) {
    for child in children {
        match child {
            Child::List(items) => flatten_into(items, out),
            Child::Empty => {}
            Child::Text(text) if text.is_empty() => {}
            other => out.push(other),
        }
    }
}
