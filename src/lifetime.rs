//! Item lifetime definitions.

/// Item lifetimes controlling instance caching behavior
///
/// # Examples
///
/// ```rust
/// use depository::{Concrete, Depository, Lifetime};
/// use std::sync::Arc;
///
/// struct Counter;
///
/// let depository = Depository::new();
/// depository
///     .register_with_lifetime("counter", Concrete::closure(|_| Ok(Counter)), Lifetime::Singleton)
///     .unwrap();
///
/// let a = depository.resolve("counter").unwrap();
/// let b = depository.resolve("counter").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(depository.is_singleton("counter"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "lowercase"))]
pub enum Lifetime {
    /// Single instance per container, cached forever
    ///
    /// The definition runs on the first resolution; the result is stored in
    /// the item's slot and handed out on every later resolution. A failed
    /// first resolution leaves the slot empty.
    Singleton,
    /// New instance per resolution, never cached
    ///
    /// Object definitions still hand out their one stored object, since
    /// there is nothing to construct.
    #[default]
    Transient,
}

impl Lifetime {
    pub fn is_singleton(self) -> bool {
        matches!(self, Lifetime::Singleton)
    }
}
