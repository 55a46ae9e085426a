use std::fmt;

use tracing::warn;

use super::Depository;
use crate::definition::{Define, Definition, DefinitionKind};
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::value::{AnyArc, Argument};

/// Handle to a registered definition.
///
/// Returned by the registration methods of [`Depository`] so bound arguments
/// and post-construction calls can be chained onto the registration. The
/// handle addresses the definition by key, so it always acts on whatever is
/// currently registered under that key.
///
/// ```
/// use depository::{Argument, Concrete, Depository, Resolver};
///
/// let depository = Depository::new();
/// depository
///     .register("sum", Concrete::closure(|args| {
///         Ok(*args.get::<u32>(0)? + *args.get::<u32>(1)?)
///     }))
///     .unwrap()
///     .with([Argument::value(1u32), Argument::value(2u32)]);
///
/// assert_eq!(*depository.get::<u32>("sum").unwrap(), 3);
/// ```
pub struct DefinitionHandle<'d> {
    depository: &'d Depository,
    key: Key,
}

impl<'d> DefinitionHandle<'d> {
    pub(crate) fn new(depository: &'d Depository, key: Key) -> Self {
        Self { depository, key }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Replaces the bound arguments of the definition.
    pub fn with<I>(self, arguments: I) -> Self
    where
        I: IntoIterator<Item = Argument>,
    {
        let arguments: Vec<Argument> = arguments.into_iter().collect();
        let updated = self.depository.update_definition(&self.key, |definition| {
            definition.with(arguments);
        });
        if updated.is_none() {
            warn!(key = %self.key, "Binding arguments to a key that is no longer registered");
        }
        self
    }

    /// Queues a method call on the instance after construction.
    ///
    /// Only class definitions run method calls; on any other definition
    /// this logs a warning and does nothing.
    pub fn call<I>(self, method: &str, arguments: I) -> Self
    where
        I: IntoIterator<Item = Argument>,
    {
        let arguments: Vec<Argument> = arguments.into_iter().collect();
        let queued = self.depository.update_definition(&self.key, |definition| {
            definition
                .as_class_mut()
                .map(|class| {
                    class.call(method, arguments);
                })
                .is_some()
        });
        if queued != Some(true) {
            warn!(key = %self.key, method, "Method calls are only supported on class definitions");
        }
        self
    }

    /// Registers `alias` for this definition's key.
    pub fn alias(self, alias: &str) -> DiResult<Self> {
        self.depository.alias(alias, self.key.as_str())?;
        Ok(self)
    }

    pub fn kind(&self) -> Option<DefinitionKind> {
        self.definition().map(|definition| definition.kind())
    }

    /// Snapshot of the definition as currently registered.
    pub fn definition(&self) -> Option<Definition> {
        self.depository.definition(self.key.as_str())
    }

    /// Runs the definition directly, bypassing the singleton cache.
    pub fn create(&self, arguments: &[Argument]) -> DiResult<AnyArc> {
        let definition = self
            .definition()
            .ok_or_else(|| DiError::NotFound(self.key.to_string()))?;
        definition.create(self.depository, arguments)
    }

    /// Resolves the key through the depository, honoring its lifetime.
    pub fn make(&self) -> DiResult<AnyArc> {
        self.depository.make(self.key.as_str(), &[])
    }
}

impl fmt::Debug for DefinitionHandle<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefinitionHandle")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
