//! Resolver traits for key resolution.

use std::any::Any;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::reflection::{ClassInfo, FunctionInfo};
use crate::value::{AnyArc, Argument};

/// Core resolver trait for object-safe resolution.
///
/// This is the narrow interface definitions see of their owning container:
/// resolve a key, ask whether a key can be resolved, and look up class and
/// function metadata. It is object-safe so definitions can take a
/// `&dyn ResolverCore` without knowing the concrete container.
///
/// Most users should use the [`Resolver`] trait instead, which adds typed
/// helpers on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves `key`, passing `arguments` to its definition.
    ///
    /// Aliases are followed, singleton slots are honored and circular
    /// dependencies are detected by the implementation.
    ///
    /// # Returns
    ///
    /// * `Ok(AnyArc)` - The resolved instance wrapped in `Arc<dyn Any>`
    /// * `Err(DiError)` - Resolution error (not found, unresolvable parameter, circular, etc.)
    fn resolve_any(&self, key: &str, arguments: &[Argument]) -> DiResult<AnyArc>;

    /// Whether resolving `key` can succeed without an explicit argument.
    ///
    /// Used while matching declared parameter types: a typed parameter is
    /// injected from the container only when this returns `true`.
    fn has(&self, key: &str) -> bool;

    /// Looks up class metadata by name.
    fn class(&self, name: &str) -> Option<Arc<ClassInfo>>;

    /// Looks up free function metadata by name.
    fn function(&self, name: &str) -> Option<Arc<FunctionInfo>>;
}

/// High-level resolver interface with generic methods for typed resolution.
///
/// Implemented for every [`ResolverCore`], including `dyn ResolverCore`.
///
/// # Examples
///
/// ```
/// use depository::{Argument, Concrete, Depository, Resolver};
///
/// let depository = Depository::new();
/// depository.register("greeting", Concrete::closure(|args| {
///     let name = if args.is_empty() { "world".to_string() } else { args.cloned::<String>(0)? };
///     Ok(format!("hello {}", name))
/// })).unwrap();
///
/// let plain = depository.get::<String>("greeting").unwrap();
/// assert_eq!(&*plain, "hello world");
///
/// let named = depository
///     .get_with::<String>("greeting", &[Argument::value("bob".to_string())])
///     .unwrap();
/// assert_eq!(&*named, "hello bob");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves `key` and downcasts the instance to `T`.
    fn get<T: Any + Send + Sync>(&self, key: &str) -> DiResult<Arc<T>> {
        self.get_with::<T>(key, &[])
    }

    /// Resolves `key` with call-time arguments and downcasts the instance to `T`.
    fn get_with<T: Any + Send + Sync>(&self, key: &str, arguments: &[Argument]) -> DiResult<Arc<T>> {
        let any = self.resolve_any(key, arguments)?;
        any.downcast::<T>().map_err(|_| DiError::TypeMismatch {
            target: key.to_string(),
            expected: std::any::type_name::<T>(),
        })
    }

    /// Resolves `key`, panicking on failure.
    ///
    /// Use this when a missing or broken registration is a programming
    /// error and failing fast is preferable to threading a `Result` through.
    ///
    /// # Panics
    ///
    /// Panics if the key cannot be resolved or the instance is not a `T`.
    fn get_required<T: Any + Send + Sync>(&self, key: &str) -> Arc<T> {
        self.get::<T>(key)
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", key, e))
    }
}

impl<R: ResolverCore + ?Sized> Resolver for R {}
