//! Type-erased values and arguments.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// Type-erased shared instance. Everything the container produces, stores or
/// passes as an argument is one of these.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// Wraps a value for storage in the container.
#[inline]
pub fn value<T: Any + Send + Sync>(value: T) -> AnyArc {
    Arc::new(value)
}

/// An argument bound with `with(...)` or passed to `create(...)`.
///
/// `Value` is used as-is. `Key` is resolved through the owning container at
/// creation time, so a definition can refer to another registered item
/// without resolving it eagerly.
#[derive(Clone)]
pub enum Argument {
    Value(AnyArc),
    Key(String),
}

impl Argument {
    /// Argument holding `value`.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Argument::Value(Arc::new(value))
    }

    /// Argument resolved from the container under `key` when used.
    pub fn key(key: impl Into<String>) -> Self {
        Argument::Key(key.into())
    }
}

impl From<AnyArc> for Argument {
    fn from(value: AnyArc) -> Self {
        Argument::Value(value)
    }
}

impl fmt::Debug for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Value(_) => f.write_str("Value(..)"),
            Argument::Key(key) => f.debug_tuple("Key").field(key).finish(),
        }
    }
}

/// Positional, already resolved arguments handed to constructors, methods,
/// free functions and closures.
pub struct Args {
    target: String,
    values: Vec<AnyArc>,
}

impl Args {
    pub(crate) fn new(target: impl Into<String>, values: Vec<AnyArc>) -> Self {
        Self {
            target: target.into(),
            values,
        }
    }

    /// Name of the class, method or key the arguments were assembled for.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the argument at `index` downcast to `T`.
    pub fn get<T: Any + Send + Sync>(&self, index: usize) -> DiResult<Arc<T>> {
        let value = self.any(index)?.clone();
        value.downcast::<T>().map_err(|_| DiError::TypeMismatch {
            target: format!("{} argument #{}", self.target, index),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Returns a clone of the argument at `index`.
    pub fn cloned<T: Any + Send + Sync + Clone>(&self, index: usize) -> DiResult<T> {
        self.get::<T>(index).map(|value| (*value).clone())
    }

    /// Returns the type-erased argument at `index`.
    pub fn any(&self, index: usize) -> DiResult<&AnyArc> {
        self.values.get(index).ok_or_else(|| DiError::ArgumentCount {
            target: self.target.clone(),
            expected: index + 1,
            given: self.values.len(),
        })
    }

    pub fn into_vec(self) -> Vec<AnyArc> {
        self.values
    }
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("target", &self.target)
            .field("len", &self.values.len())
            .finish()
    }
}
