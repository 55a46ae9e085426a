//! The depository container.
//!
//! This module contains the [`Depository`] type, which owns the item table,
//! the alias table, the class metadata and every singleton slot, and the
//! [`DefinitionHandle`] returned by registrations.

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use tracing::{debug, trace};

use crate::config::DepositoryOptions;
use crate::definition::{ClassDefinition, Concrete, Define, Definition, DefinitionFactory};
use crate::error::{DiError, DiResult};
use crate::internal::with_circular_guard;
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::observer::{DiObserver, Observers};
use crate::reflection::{ClassInfo, ClassRegistry, FunctionInfo};
use crate::registration::{Item, Registry, SingletonSlot};
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Argument};

mod handle;

pub use handle::DefinitionHandle;

/// String-keyed dependency injection container.
///
/// Registrations classify their payload into a definition right away, so an
/// unusable payload is rejected at registration time. Resolution follows
/// aliases, detects circular dependencies, injects constructor and method
/// parameters, and caches singleton instances.
///
/// # Thread Safety
///
/// `Depository` is `Send + Sync`. Tables are locked only for lookups and
/// updates, never while a definition runs, and each singleton slot
/// serializes its own initialization so a singleton is constructed at most
/// once.
///
/// # Examples
///
/// ```
/// use depository::{ClassInfo, Concrete, Depository, Parameter, Resolver};
/// use std::sync::Arc;
///
/// struct Service { greeting: Arc<String> }
///
/// let depository = Depository::new();
/// depository.define_class(
///     ClassInfo::new("Service", |args| Ok(Service { greeting: args.get::<String>(0)? }))
///         .param(Parameter::typed("greeter", "Greeter")),
/// );
///
/// depository.register("Greeter", Concrete::closure(|_| Ok("hi".to_string()))).unwrap();
/// depository.singleton("Svc", "Service").unwrap();
///
/// let svc = depository.get::<Service>("Svc").unwrap();
/// assert_eq!(svc.greeting.as_str(), "hi");
/// assert!(Arc::ptr_eq(&svc, &depository.get::<Service>("Svc").unwrap()));
/// ```
pub struct Depository {
    registry: RwLock<Registry>,
    classes: RwLock<ClassRegistry>,
    options: DepositoryOptions,
    observers: Observers,
}

type Snapshot = (Definition, Option<Arc<SingletonSlot>>);

impl Depository {
    /// Creates an empty container with default options.
    pub fn new() -> Self {
        Self::with_options(DepositoryOptions::default())
    }

    pub fn with_options(options: DepositoryOptions) -> Self {
        Self {
            registry: RwLock::new(Registry::new()),
            classes: RwLock::new(ClassRegistry::new()),
            options,
            observers: Observers::new(),
        }
    }

    /// Creates a container that knows the classes and functions in `classes`.
    pub fn with_classes(classes: ClassRegistry, options: DepositoryOptions) -> Self {
        let depository = Self::with_options(options);
        *depository.write_classes() = classes;
        depository
    }

    pub fn options(&self) -> &DepositoryOptions {
        &self.options
    }

    pub fn add_observer(&mut self, observer: Arc<dyn DiObserver>) -> &mut Self {
        self.observers.add(observer);
        self
    }

    /// Makes class `class` loadable. Replaces an earlier class of the same name.
    pub fn define_class(&self, class: ClassInfo) -> &Self {
        debug!(class = %class.name(), "Defined class");
        self.write_classes().define_class(class);
        self
    }

    /// Makes free function `function` callable.
    pub fn define_function(&self, function: FunctionInfo) -> &Self {
        debug!(function = %function.name(), "Defined function");
        self.write_classes().define_function(function);
        self
    }

    // ----- Registration -----

    /// Registers a transient definition for `key`.
    ///
    /// Fails with [`DiError::NotDefinable`] when `concrete` matches none of
    /// the definition strategies.
    pub fn register(&self, key: &str, concrete: impl Into<Concrete>) -> DiResult<DefinitionHandle<'_>> {
        self.register_with_lifetime(key, concrete, Lifetime::Transient)
    }

    /// Registers a singleton definition for `key`.
    pub fn singleton(&self, key: &str, concrete: impl Into<Concrete>) -> DiResult<DefinitionHandle<'_>> {
        self.register_with_lifetime(key, concrete, Lifetime::Singleton)
    }

    /// Registers class `class` under its own name.
    pub fn register_class(&self, class: &str) -> DiResult<DefinitionHandle<'_>> {
        self.register(class, Concrete::name(class))
    }

    pub fn register_with_lifetime(
        &self,
        key: &str,
        concrete: impl Into<Concrete>,
        lifetime: Lifetime,
    ) -> DiResult<DefinitionHandle<'_>> {
        let definition = DefinitionFactory::factory(key, concrete.into(), self)?;
        let key = definition.key().clone();
        let kind = definition.kind();

        {
            let mut registry = self.write_registry();
            if registry.contains(key.as_str()) {
                if !self.options.allow_overwrite {
                    return Err(DiError::AlreadyRegistered(key.to_string()));
                }
                debug!(key = %key, "Replacing registration");
            }
            registry.insert(key.clone(), Item::new(definition, lifetime));
        }

        debug!(key = %key, ?kind, ?lifetime, "Registered definition");
        Ok(DefinitionHandle::new(self, key))
    }

    /// Makes `alias` resolve to whatever `key` resolves to.
    ///
    /// Aliases are followed before items are looked up, so an alias shadows an
    /// item of the same name.
    pub fn alias(&self, alias: &str, key: &str) -> DiResult<()> {
        let alias = Key::new(alias)?;
        let target = Key::new(key)?;

        let mut registry = self.write_registry();
        if !self.options.allow_overwrite && registry.contains(alias.as_str()) {
            return Err(DiError::AlreadyRegistered(alias.to_string()));
        }
        debug!(alias = %alias, key = %target, "Registered alias");
        registry.alias(alias, target);
        Ok(())
    }

    /// Removes the item or alias registered under `key`, dropping any cached
    /// singleton with it.
    pub fn remove(&self, key: &str) -> bool {
        let removed = self.write_registry().remove(key);
        if removed {
            debug!(key = %key, "Removed registration");
        }
        removed
    }

    // ----- Resolution -----

    /// Resolves `key`, passing `arguments` to its definition.
    ///
    /// For singleton items the arguments only matter on the first, caching
    /// resolution.
    pub fn make(&self, key: &str, arguments: &[Argument]) -> DiResult<AnyArc> {
        let key = self.read_registry().canonical(key)?;
        with_circular_guard(&key, self.options.max_depth, || {
            self.observe(&key, || self.make_canonical(&key, arguments))
        })
    }

    /// Resolves `key` without call-time arguments.
    pub fn resolve(&self, key: &str) -> DiResult<AnyArc> {
        self.make(key, &[])
    }

    fn observe<F>(&self, key: &Key, f: F) -> DiResult<AnyArc>
    where
        F: FnOnce() -> DiResult<AnyArc>,
    {
        if !self.observers.has_observers() {
            return f();
        }

        let start = Instant::now();
        self.observers.resolving(key);
        let result = f();
        match &result {
            Ok(_) => self.observers.resolved(key, start.elapsed()),
            Err(error) => self.observers.failed(key, error),
        }
        result
    }

    fn make_canonical(&self, key: &Key, arguments: &[Argument]) -> DiResult<AnyArc> {
        trace!(key = %key, "Resolving");

        let (definition, slot) = match self.snapshot(key) {
            Some(snapshot) => snapshot,
            None => self.autowire(key)?,
        };

        // The registry lock is released here; slots lock on their own.
        match slot {
            Some(slot) => {
                if let Some(instance) = slot.get() {
                    trace!(key = %key, "Singleton cache hit");
                    return Ok(instance);
                }
                slot.get_or_try_init(|| definition.create(self, arguments))
            }
            None => definition.create(self, arguments),
        }
    }

    fn snapshot(&self, key: &Key) -> Option<Snapshot> {
        let registry = self.read_registry();
        let item = registry.get(key.as_str())?;
        Some((item.definition.clone(), item.slot.clone()))
    }

    /// Stores a transient class definition for an unregistered key naming a
    /// defined class.
    fn autowire(&self, key: &Key) -> DiResult<Snapshot> {
        if !self.options.autowire || !self.read_classes().has_class(key.as_str()) {
            return Err(DiError::NotFound(key.to_string()));
        }

        let mut registry = self.write_registry();
        if let Some(item) = registry.get(key.as_str()) {
            return Ok((item.definition.clone(), item.slot.clone()));
        }

        debug!(key = %key, "Autowiring class");
        let definition = Definition::Class(ClassDefinition::new(key.clone(), key.as_str()));
        registry.insert(key.clone(), Item::new(definition.clone(), Lifetime::Transient));
        Ok((definition, None))
    }

    // ----- Introspection -----

    /// Whether `key` (or the key it aliases) has an item.
    pub fn is_registered(&self, key: &str) -> bool {
        let registry = self.read_registry();
        registry
            .canonical(key)
            .is_ok_and(|key| registry.get(key.as_str()).is_some())
    }

    /// Whether `key` (or the key it aliases) is registered as a singleton.
    pub fn is_singleton(&self, key: &str) -> bool {
        let registry = self.read_registry();
        registry.canonical(key).is_ok_and(|key| {
            registry
                .get(key.as_str())
                .is_some_and(|item| item.lifetime.is_singleton())
        })
    }

    /// Snapshot of the definition registered under `key` (aliases followed).
    pub fn definition(&self, key: &str) -> Option<Definition> {
        let registry = self.read_registry();
        let key = registry.canonical(key).ok()?;
        registry.get(key.as_str()).map(|item| item.definition.clone())
    }

    /// Registered item keys followed by alias keys.
    pub fn keys(&self) -> Vec<String> {
        self.read_registry().keys()
    }

    /// Number of registered items, aliases excluded.
    pub fn len(&self) -> usize {
        self.read_registry().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn update_definition<R, F>(&self, key: &Key, f: F) -> Option<R>
    where
        F: FnOnce(&mut Definition) -> R,
    {
        let mut registry = self.write_registry();
        registry.get_mut(key.as_str()).map(|item| f(&mut item.definition))
    }

    // Poisoning only means another thread panicked mid-update of a plain
    // table; the tables stay consistent, so keep serving them.
    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(|e| e.into_inner())
    }

    fn read_classes(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.classes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_classes(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.classes.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for Depository {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Depository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Depository")
            .field("keys", &self.keys())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl ResolverCore for Depository {
    fn resolve_any(&self, key: &str, arguments: &[Argument]) -> DiResult<AnyArc> {
        self.make(key, arguments)
    }

    fn has(&self, key: &str) -> bool {
        let registry = self.read_registry();
        let Ok(key) = registry.canonical(key) else {
            return false;
        };
        registry.get(key.as_str()).is_some()
            || (self.options.autowire && self.read_classes().has_class(key.as_str()))
    }

    fn class(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.read_classes().class(name)
    }

    fn function(&self, name: &str) -> Option<Arc<FunctionInfo>> {
        self.read_classes().function(name)
    }
}
