//! Error types for environment binding

/// Boxed error type returned by [`DecodeEnv`](crate::DecodeEnv) implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding a configuration value from the
/// environment.
///
/// Binding is fail-fast: the first error encountered during the depth-first
/// walk aborts the whole pass. The target may be left partially populated on
/// failure; callers must not assume atomicity.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// Malformed tag directive, or a malformed map entry in an environment
    /// value.
    ///
    /// Occurs when a numeric bound clause (`lt:`, `lte:`, `gt:`, `gte:`) does
    /// not carry a floating-point literal, or when a map entry lacks the
    /// key/value separator.
    #[error("invalid binding directive '{directive}': {message}")]
    TagSyntax {
        /// The offending directive or entry text
        directive: String,
        /// Description of what failed to parse
        message: String,
    },

    /// A field marked `required` resolved to nothing.
    ///
    /// Occurs when the environment has no value, the tag carries no usable
    /// default, and the field's current value is still its zero value.
    #[error("environment variable '{name}' is required but not set")]
    Required {
        /// Composed lookup key of the field
        name: String,
    },

    /// The resolved string could not be parsed as the target type.
    #[error("failed to parse environment variable '{name}' as {type_name}: {message}")]
    Parse {
        /// Composed lookup key the value was resolved under
        name: String,
        /// Fully qualified name of the target type
        type_name: String,
        /// Error message from the underlying parser
        message: String,
    },

    /// A parsed number violates one of the declared `lt`/`lte`/`gt`/`gte`
    /// bounds.
    #[error("value {value} for '{name}' must be {relation} {limit}")]
    Range {
        /// Composed lookup key of the field
        name: String,
        /// The parsed, offending value
        value: f64,
        /// Human-readable relation of the violated bound
        relation: &'static str,
        /// The bound threshold
        limit: f64,
    },

    /// A custom decoder rejected the resolved string.
    #[error("failed to decode environment variable '{name}': {source}")]
    Decode {
        /// Composed lookup key the value was resolved under
        name: String,
        /// Underlying decoder error
        #[source]
        source: BoxError,
    },
}

impl BindError {
    /// Create a parse error for the target type `T`.
    #[doc(hidden)]
    pub fn parse_error<T>(name: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a required-but-unset error.
    #[doc(hidden)]
    pub fn required(name: impl Into<String>) -> Self {
        Self::Required { name: name.into() }
    }

    /// Create a decode error wrapping a custom decoder failure.
    #[doc(hidden)]
    pub fn decode(name: impl Into<String>, source: BoxError) -> Self {
        Self::Decode {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn tag_syntax(directive: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::TagSyntax {
            directive: directive.into(),
            message: message.to_string(),
        }
    }
}
