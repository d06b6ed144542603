//! Strategy registry - the `(target shape, property) → strategy` table.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use super::{
    BindingStrategy, CheckboxBinding, ComponentBinding, ContentBinding, GroupBinding,
    MeasuredBinding, MultiSelectBinding, SelectBinding, ThisBinding, ValueBinding,
};
use crate::types::Value;

/// Input types bound through their `value` as text.
const TEXT_INPUT_TYPES: &[&str] = &[
    "text", "email", "password", "search", "tel", "url", "hidden", "color", "date", "time",
    "datetime-local", "month", "week",
];

const CONTENT_PROPERTIES: &[&str] = &["textContent", "innerText", "innerHTML"];

const MEASURED_PROPERTIES: &[&str] = &["clientWidth", "clientHeight", "offsetWidth", "offsetHeight"];

// =============================================================================
// Target shape
// =============================================================================

/// What the registry knows about a binding target at construction time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetShape {
    /// Lower-cased tag, or `None` for components.
    tag: Option<String>,
    /// Lower-cased `type` of an input (`"text"` when absent).
    input_type: Option<String>,
    multiple: bool,
    content_editable: bool,
}

impl TargetShape {
    /// Shape of an element from its tag and static attributes.
    pub fn element(tag: &str, statics: &[(String, Value)]) -> Self {
        let tag = tag.to_ascii_lowercase();
        let lookup = |name: &str| statics.iter().find(|(k, _)| k == name).map(|(_, v)| v);
        let input_type = (tag == "input").then(|| {
            lookup("type")
                .filter(|v| !v.is_nullish())
                .map(|v| v.to_string().to_ascii_lowercase())
                .unwrap_or_else(|| "text".to_string())
        });
        let multiple = lookup("multiple").is_some_and(Value::truthy);
        let content_editable = lookup("contenteditable")
            .is_some_and(|v| v.truthy() && v.as_text() != Some("false"));
        Self {
            tag: Some(tag),
            input_type,
            multiple,
            content_editable,
        }
    }

    pub fn component() -> Self {
        Self {
            tag: None,
            input_type: None,
            multiple: false,
            content_editable: false,
        }
    }

    pub fn is_component(&self) -> bool {
        self.tag.is_none()
    }
}

impl fmt::Display for TargetShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.tag, &self.input_type) {
            (None, _) => f.write_str("a component"),
            (Some(tag), Some(kind)) => write!(f, "<{tag} type=\"{kind}\">"),
            (Some(tag), None) if self.multiple => write!(f, "<{tag} multiple>"),
            (Some(tag), None) => write!(f, "<{tag}>"),
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

/// Which targets a rule applies to.
#[derive(Debug, Clone, Copy)]
pub enum ShapeMatch {
    Any,
    AnyElement,
    Component,
    Tag(&'static str),
    InputType(&'static [&'static str]),
    Select { multiple: bool },
    ContentEditable,
}

impl ShapeMatch {
    fn matches(&self, shape: &TargetShape) -> bool {
        match self {
            ShapeMatch::Any => true,
            ShapeMatch::AnyElement => !shape.is_component(),
            ShapeMatch::Component => shape.is_component(),
            ShapeMatch::Tag(tag) => shape.tag.as_deref() == Some(*tag),
            ShapeMatch::InputType(types) => shape
                .input_type
                .as_deref()
                .is_some_and(|kind| types.contains(&kind)),
            ShapeMatch::Select { multiple } => {
                shape.tag.as_deref() == Some("select") && shape.multiple == *multiple
            }
            ShapeMatch::ContentEditable => shape.content_editable,
        }
    }
}

/// Which bound properties a rule applies to.
#[derive(Debug, Clone, Copy)]
pub enum PropertyMatch {
    Any,
    Is(&'static str),
    OneOf(&'static [&'static str]),
}

impl PropertyMatch {
    fn matches(&self, property: &str) -> bool {
        match self {
            PropertyMatch::Any => true,
            PropertyMatch::Is(name) => *name == property,
            PropertyMatch::OneOf(names) => names.contains(&property),
        }
    }
}

/// One row of the strategy table.
#[derive(Clone)]
pub struct BindingRule {
    shape: ShapeMatch,
    property: PropertyMatch,
    strategy: Rc<dyn BindingStrategy>,
}

impl BindingRule {
    pub fn new(shape: ShapeMatch, property: PropertyMatch, strategy: impl BindingStrategy + 'static) -> Self {
        Self {
            shape,
            property,
            strategy: Rc::new(strategy),
        }
    }

    pub fn matches(&self, shape: &TargetShape, property: &str) -> bool {
        self.shape.matches(shape) && self.property.matches(property)
    }
}

impl fmt::Debug for BindingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRule")
            .field("shape", &self.shape)
            .field("property", &self.property)
            .field("strategy", &self.strategy.name())
            .finish()
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Ordered strategy table. The first matching rule wins.
#[derive(Clone, Debug, Default)]
pub struct StrategyRegistry {
    rules: Vec<BindingRule>,
}

impl StrategyRegistry {
    /// A registry with no rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table.
    pub fn builtin() -> Self {
        use PropertyMatch::{Any, Is, OneOf};

        let rules = vec![
            BindingRule::new(ShapeMatch::Any, Is("this"), ThisBinding),
            BindingRule::new(ShapeMatch::Component, Any, ComponentBinding),
            BindingRule::new(ShapeMatch::InputType(&["checkbox", "radio"]), Is("group"), GroupBinding),
            BindingRule::new(
                ShapeMatch::InputType(&["checkbox"]),
                OneOf(&["value", "checked"]),
                CheckboxBinding,
            ),
            BindingRule::new(
                ShapeMatch::InputType(&["number", "range"]),
                Is("value"),
                ValueBinding::numeric(),
            ),
            BindingRule::new(ShapeMatch::InputType(TEXT_INPUT_TYPES), Is("value"), ValueBinding::text()),
            BindingRule::new(ShapeMatch::Tag("textarea"), Is("value"), ValueBinding::text()),
            BindingRule::new(ShapeMatch::Select { multiple: true }, Is("value"), MultiSelectBinding),
            BindingRule::new(ShapeMatch::Select { multiple: false }, Is("value"), SelectBinding),
            BindingRule::new(ShapeMatch::ContentEditable, OneOf(CONTENT_PROPERTIES), ContentBinding),
            BindingRule::new(ShapeMatch::AnyElement, OneOf(MEASURED_PROPERTIES), MeasuredBinding),
        ];
        Self { rules }
    }

    /// Add a rule ahead of every existing one.
    pub fn register(&mut self, rule: BindingRule) {
        self.rules.insert(0, rule);
    }

    /// Find the strategy for `property` on `shape`.
    pub fn resolve(&self, shape: &TargetShape, property: &str) -> Option<Rc<dyn BindingStrategy>> {
        let rule = self.rules.iter().find(|rule| rule.matches(shape, property))?;
        trace!(target = %shape, property, strategy = rule.strategy.name(), "binding resolved");
        Some(rule.strategy.clone())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindContext;
    use crate::types::Cleanup;

    fn statics(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn strategy_for(tag: &str, pairs: &[(&str, Value)], property: &str) -> Option<&'static str> {
        let shape = TargetShape::element(tag, &statics(pairs));
        StrategyRegistry::builtin()
            .resolve(&shape, property)
            .map(|s| s.name())
    }

    #[test]
    fn test_builtin_table() {
        assert_eq!(strategy_for("input", &[], "value"), Some("value"));
        assert_eq!(strategy_for("input", &[("type", "email".into())], "value"), Some("value"));
        assert_eq!(strategy_for("input", &[("type", "number".into())], "value"), Some("number"));
        assert_eq!(strategy_for("input", &[("type", "range".into())], "value"), Some("number"));
        assert_eq!(strategy_for("input", &[("type", "checkbox".into())], "value"), Some("checkbox"));
        assert_eq!(strategy_for("input", &[("type", "checkbox".into())], "checked"), Some("checkbox"));
        assert_eq!(strategy_for("input", &[("type", "radio".into())], "group"), Some("group"));
        assert_eq!(strategy_for("textarea", &[], "value"), Some("value"));
        assert_eq!(strategy_for("select", &[], "value"), Some("select"));
        assert_eq!(strategy_for("select", &[("multiple", true.into())], "value"), Some("multi-select"));
        assert_eq!(
            strategy_for("label", &[("contenteditable", true.into())], "textContent"),
            Some("content")
        );
        assert_eq!(strategy_for("div", &[], "clientWidth"), Some("measured"));
        assert_eq!(strategy_for("canvas", &[], "this"), Some("this"));
        assert_eq!(
            StrategyRegistry::builtin()
                .resolve(&TargetShape::component(), "count")
                .map(|s| s.name()),
            Some("component")
        );
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(strategy_for("div", &[], "value"), None);
        assert_eq!(strategy_for("label", &[], "textContent"), None);
        assert_eq!(
            strategy_for("label", &[("contenteditable", "false".into())], "textContent"),
            None
        );
        assert_eq!(strategy_for("input", &[("type", "radio".into())], "value"), None);
    }

    struct Uppercase;

    impl BindingStrategy for Uppercase {
        fn name(&self) -> &'static str {
            "uppercase"
        }
        fn initialize(&self, _cx: &BindContext) {}
        fn attach_store_subscription(&self, _cx: &BindContext) -> Option<Cleanup> {
            None
        }
        fn attach_dom_listener(&self, _cx: &BindContext) -> Option<Cleanup> {
            None
        }
    }

    #[test]
    fn test_registered_rules_take_priority() {
        let mut registry = StrategyRegistry::builtin();
        let builtin = registry.len();
        registry.register(BindingRule::new(ShapeMatch::Tag("input"), PropertyMatch::Is("value"), Uppercase));

        let shape = TargetShape::element("input", &[]);
        assert_eq!(registry.resolve(&shape, "value").map(|s| s.name()), Some("uppercase"));
        assert_eq!(registry.len(), builtin + 1);
    }

    #[test]
    fn test_shape_display() {
        assert_eq!(TargetShape::element("DIV", &[]).to_string(), "<div>");
        assert_eq!(TargetShape::element("input", &[]).to_string(), "<input type=\"text\">");
        assert_eq!(TargetShape::component().to_string(), "a component");
    }
}
