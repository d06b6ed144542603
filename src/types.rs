//! Core types for spark-bind.
//!
//! [`Value`] is the dynamic value that flows through property bags, stores,
//! and the host document. Everything the binding runtime reads or writes is
//! expressed in terms of it.

use std::fmt;

use crate::component::ComponentRef;
use crate::dom::NodeId;

// =============================================================================
// Cleanup
// =============================================================================

/// Cleanup function returned by subscriptions, listeners and mounts.
///
/// Call it once to release whatever it guards.
pub type Cleanup = Box<dyn FnOnce()>;

// =============================================================================
// Value
// =============================================================================

/// A dynamically typed value.
///
/// `Undefined` means "no value yet". It is what an uninitialized store holds,
/// and the precedence rules treat it differently from `Null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// No value (uninitialized store, missing prop).
    #[default]
    Undefined,
    /// Explicit empty value.
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    /// Live element in a [`Document`](crate::dom::Document).
    Element(NodeId),
    /// Live component instance.
    Component(ComponentRef),
}

impl Value {
    /// True for `Undefined` only.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// True for `Undefined` and `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    /// Boolean coercion used by class toggles and checkbox bindings.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
            Value::List(_) | Value::Element(_) | Value::Component(_) => true,
        }
    }

    /// Numeric coercion. Text is trimmed and parsed; empty text has no number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    trimmed.parse().ok()
                }
            }
            _ => None,
        }
    }

    /// View the value as a list. Nullish values are the empty list and any
    /// other scalar is a list of one.
    pub fn as_list(&self) -> Vec<Value> {
        match self {
            Value::List(items) => items.clone(),
            Value::Undefined | Value::Null => Vec::new(),
            other => vec![other.clone()],
        }
    }

    /// Borrow the text if this is `Value::Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Equality as the DOM sees it: two non-nullish values are equal when
    /// their display strings are equal (`Number(2)` matches `Text("2")`).
    pub fn loosely_eq(&self, other: &Value) -> bool {
        if self == other {
            return true;
        }
        if self.is_nullish() || other.is_nullish() {
            return false;
        }
        self.to_string() == other.to_string()
    }
}

/// Format a number the way it shows up in the document: integral values
/// without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined | Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Value::Element(id) => write!(f, "[element {id}]"),
            Value::Component(c) => write!(f, "[component {}]", c.name()),
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(f64::from(value))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value as f64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::Number(value as f64)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NodeId> for Value {
    fn from(value: NodeId) -> Self {
        Value::Element(value)
    }
}

impl From<ComponentRef> for Value {
    fn from(value: ComponentRef) -> Self {
        Value::Component(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

// =============================================================================
// Tests
// =============================================================================
