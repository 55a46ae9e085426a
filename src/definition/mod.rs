//! Definitions: how an instance is produced for a registered key.
//!
//! A registration payload ([`Concrete`]) is classified once by
//! [`DefinitionFactory`] into one of four strategies, gathered in the closed
//! [`Definition`] enum:
//!
//! - [`ClosureDefinition`]: call a closure with the supplied arguments
//! - [`ObjectDefinition`]: hand out an already constructed object
//! - [`ClassDefinition`]: construct a class, injecting constructor parameters
//! - [`CallableDefinition`]: call a static method, an instance method or a
//!   free function, injecting its parameters
//!
//! Every strategy implements the [`Define`] contract: `with(...)` replaces the
//! bound arguments, `create(...)` produces an instance.

use std::fmt;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::Key;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Args, Argument};

mod arguments;
mod callable;
mod class;
mod closure;
mod factory;
mod object;

pub use callable::CallableDefinition;
pub use class::{ClassDefinition, MethodCall};
pub use closure::ClosureDefinition;
pub use factory::DefinitionFactory;
pub use object::ObjectDefinition;

pub(crate) use class::instantiate;

/// Closure stored by a closure definition.
pub type ClosureFn = Arc<dyn Fn(Args) -> DiResult<AnyArc> + Send + Sync>;

/// Raw registration payload, classified by [`DefinitionFactory`].
///
/// # Examples
///
/// ```rust
/// use depository::Concrete;
///
/// let closure = Concrete::closure(|_| Ok(42u32));
/// let object = Concrete::object(String::from("ready"));
/// let class: Concrete = "App\\Mailer".into();
/// let callable: Concrete = "Mailer::send".into();
/// let pair = Concrete::method("Mailer", "send");
/// # let _ = (closure, object, class, callable, pair);
/// ```
#[derive(Clone)]
pub enum Concrete {
    /// A closure; receives the supplied arguments as-is.
    Closure(ClosureFn),
    /// An already constructed instance.
    Object(AnyArc),
    /// A class name, a free function name or a `Class::method` reference.
    Name(String),
    /// A `(class, method)` reference.
    Pair(String, String),
}

impl Concrete {
    pub fn closure<T, F>(f: F) -> Self
    where
        T: std::any::Any + Send + Sync,
        F: Fn(Args) -> DiResult<T> + Send + Sync + 'static,
    {
        Concrete::Closure(Arc::new(move |args: Args| f(args).map(|v| Arc::new(v) as AnyArc)))
    }

    /// Closure that already produces a type-erased instance.
    pub fn closure_any<F>(f: F) -> Self
    where
        F: Fn(Args) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        Concrete::Closure(Arc::new(f))
    }

    pub fn object<T: std::any::Any + Send + Sync>(object: T) -> Self {
        Concrete::Object(Arc::new(object))
    }

    /// An instance that is already shared elsewhere.
    pub fn shared(object: AnyArc) -> Self {
        Concrete::Object(object)
    }

    pub fn name(name: impl Into<String>) -> Self {
        Concrete::Name(name.into())
    }

    pub fn method(class: impl Into<String>, method: impl Into<String>) -> Self {
        Concrete::Pair(class.into(), method.into())
    }
}

impl From<&str> for Concrete {
    fn from(name: &str) -> Self {
        Concrete::Name(name.to_string())
    }
}

impl From<String> for Concrete {
    fn from(name: String) -> Self {
        Concrete::Name(name)
    }
}

impl fmt::Debug for Concrete {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concrete::Closure(_) => f.write_str("Closure(..)"),
            Concrete::Object(_) => f.write_str("Object(..)"),
            Concrete::Name(name) => f.debug_tuple("Name").field(name).finish(),
            Concrete::Pair(class, method) => f.debug_tuple("Pair").field(class).field(method).finish(),
        }
    }
}

/// Which strategy a definition uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    Closure,
    Object,
    Class,
    Callable,
}

/// The definition contract.
pub trait Define {
    /// Key the definition was registered under.
    fn key(&self) -> &Key;

    fn kind(&self) -> DefinitionKind;

    /// Currently bound arguments.
    fn arguments(&self) -> &[Argument];

    /// Replaces the bound arguments. No validation happens here: argument
    /// count and type mismatches surface from `create`.
    fn with(&mut self, arguments: Vec<Argument>) -> &mut Self;

    /// Produces an instance. Non-empty `arguments` take precedence over the
    /// bound arguments for this call only.
    fn create(&self, ctx: &dyn ResolverCore, arguments: &[Argument]) -> DiResult<AnyArc>;
}

/// A classified definition.
#[derive(Clone, Debug)]
pub enum Definition {
    Closure(ClosureDefinition),
    Object(ObjectDefinition),
    Class(ClassDefinition),
    Callable(CallableDefinition),
}

impl Definition {
    pub fn as_class(&self) -> Option<&ClassDefinition> {
        match self {
            Definition::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassDefinition> {
        match self {
            Definition::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_callable(&self) -> Option<&CallableDefinition> {
        match self {
            Definition::Callable(callable) => Some(callable),
            _ => None,
        }
    }
}

impl Define for Definition {
    fn key(&self) -> &Key {
        match self {
            Definition::Closure(d) => d.key(),
            Definition::Object(d) => d.key(),
            Definition::Class(d) => d.key(),
            Definition::Callable(d) => d.key(),
        }
    }

    fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Closure(_) => DefinitionKind::Closure,
            Definition::Object(_) => DefinitionKind::Object,
            Definition::Class(_) => DefinitionKind::Class,
            Definition::Callable(_) => DefinitionKind::Callable,
        }
    }

    fn arguments(&self) -> &[Argument] {
        match self {
            Definition::Closure(d) => d.arguments(),
            Definition::Object(d) => d.arguments(),
            Definition::Class(d) => d.arguments(),
            Definition::Callable(d) => d.arguments(),
        }
    }

    fn with(&mut self, arguments: Vec<Argument>) -> &mut Self {
        match self {
            Definition::Closure(d) => {
                d.with(arguments);
            }
            Definition::Object(d) => {
                d.with(arguments);
            }
            Definition::Class(d) => {
                d.with(arguments);
            }
            Definition::Callable(d) => {
                d.with(arguments);
            }
        }
        self
    }

    fn create(&self, ctx: &dyn ResolverCore, arguments: &[Argument]) -> DiResult<AnyArc> {
        match self {
            Definition::Closure(d) => d.create(ctx, arguments),
            Definition::Object(d) => d.create(ctx, arguments),
            Definition::Class(d) => d.create(ctx, arguments),
            Definition::Callable(d) => d.create(ctx, arguments),
        }
    }
}
