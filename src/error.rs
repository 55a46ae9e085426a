//! Error types for the depository container.

use thiserror::Error;

/// Dependency injection errors
///
/// Represents the conditions that can occur while registering definitions
/// or resolving keys. None of them are retried internally: they propagate
/// unchanged to the caller of the public API.
///
/// # Examples
///
/// ```rust
/// use depository::{Depository, DiError};
///
/// let depository = Depository::new();
/// match depository.resolve("Mailer") {
///     Err(DiError::NotFound(key)) => assert_eq!(key, "Mailer"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use depository::DiError;
///
/// let circular = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency: A -> B -> A");
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// The registered concrete value matches none of the definition strategies
    #[error("Cannot create a definition for {0}")]
    NotDefinable(String),
    /// A constructor or function parameter has no argument, no resolvable type and no default
    #[error("Unable to resolve parameter `{parameter}` of {target}")]
    Unresolvable { target: String, parameter: String },
    /// Key not registered
    #[error("Key not registered: {0}")]
    NotFound(String),
    /// A method referenced by a callable definition or a post-construction call does not exist
    #[error("Method {class}::{method} is not defined")]
    MethodNotFound { class: String, method: String },
    /// More arguments were supplied than the target declares, or too few were passed to a call
    #[error("{target} expects {expected} arguments, {given} given")]
    ArgumentCount {
        target: String,
        expected: usize,
        given: usize,
    },
    /// Type downcast failed
    #[error("Type mismatch for {target}: expected {expected}")]
    TypeMismatch {
        target: String,
        expected: &'static str,
    },
    /// Circular dependency detected (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Keys must be non-empty
    #[error("Invalid key: {0:?}")]
    InvalidKey(String),
    /// Key taken while overwriting is disabled
    #[error("Key already registered: {0}")]
    AlreadyRegistered(String),
    /// A user supplied constructor, method or closure reported a failure
    #[error("Construction of {target} failed: {message}")]
    Construction { target: String, message: String },
}

impl DiError {
    /// Builds a [`DiError::Construction`] from anything displayable.
    pub fn construction(target: impl Into<String>, message: impl std::fmt::Display) -> Self {
        DiError::Construction {
            target: target.into(),
            message: message.to_string(),
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
