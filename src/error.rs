//! Error types.

/// Crate result alias.
pub type Result<T> = std::result::Result<T, BindError>;

/// Errors raised while constructing or rendering element descriptors.
///
/// Unknown directive prefixes are never errors; they pass through as plain
/// attributes.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BindError {
    /// A `bind:` directive matched no binding strategy for its target.
    #[error("`bind:{property}` is not supported on {target}")]
    UnsupportedBinding { target: String, property: String },

    /// A directive was given the wrong kind of value.
    #[error("`{key}` expects {expected}")]
    InvalidDirectiveValue { key: String, expected: &'static str },

    /// A component reported a failure from its render function.
    #[error("component <{component}> failed to render: {message}")]
    Component { component: String, message: String },
}
