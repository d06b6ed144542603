//! HTML serialization.

use super::document::NodeKind;
use super::{Document, NodeId};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}

impl Document {
    /// Serialized children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(child, &mut out);
        }
        out
    }

    /// Serialized `node` including its own tag.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        enum Shape {
            Text(String),
            Element(String, Vec<(String, String)>),
        }
        let shape = self.with_node(node, |n| match &n.kind {
            NodeKind::Text(text) => Shape::Text(text.clone()),
            NodeKind::Element(el) => Shape::Element(el.tag.clone(), el.attributes.clone()),
        });
        match shape {
            Some(Shape::Text(text)) => escape_text(&text, out),
            Some(Shape::Element(tag, attributes)) => {
                out.push('<');
                out.push_str(&tag);
                for (name, value) in attributes {
                    out.push(' ');
                    out.push_str(&name);
                    out.push_str("=\"");
                    escape_attr(&value, out);
                    out.push('"');
                }
                out.push('>');
                if VOID_ELEMENTS.contains(&tag.as_str()) {
                    return;
                }
                for child in self.children(node) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(&tag);
                out.push('>');
            }
            None => {}
        }
    }
}
