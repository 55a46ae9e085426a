//! Item registration types.

use std::collections::HashMap;
use std::sync::Arc;

use crate::definition::Definition;
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::lifetime::Lifetime;
use crate::value::AnyArc;

#[cfg(feature = "once-cell")]
use once_cell::sync::OnceCell;

/// Cached instance of a singleton item.
///
/// Initialization is exclusive, so the definition runs at most once even
/// when several threads resolve the key at the same time. A failed
/// initialization leaves the slot empty.
#[derive(Default)]
pub(crate) struct SingletonSlot {
    #[cfg(feature = "once-cell")]
    cell: OnceCell<AnyArc>,
    #[cfg(not(feature = "once-cell"))]
    cell: std::sync::Mutex<Option<AnyArc>>,
}

impl SingletonSlot {
    #[cfg(feature = "once-cell")]
    pub(crate) fn get(&self) -> Option<AnyArc> {
        self.cell.get().cloned()
    }

    #[cfg(not(feature = "once-cell"))]
    pub(crate) fn get(&self) -> Option<AnyArc> {
        self.cell
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    #[cfg(feature = "once-cell")]
    pub(crate) fn get_or_try_init<F>(&self, init: F) -> DiResult<AnyArc>
    where
        F: FnOnce() -> DiResult<AnyArc>,
    {
        self.cell.get_or_try_init(init).cloned()
    }

    #[cfg(not(feature = "once-cell"))]
    pub(crate) fn get_or_try_init<F>(&self, init: F) -> DiResult<AnyArc>
    where
        F: FnOnce() -> DiResult<AnyArc>,
    {
        let mut slot = self
            .cell
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(instance) = slot.as_ref() {
            return Ok(instance.clone());
        }
        let instance = init()?;
        *slot = Some(instance.clone());
        Ok(instance)
    }
}

/// A registered definition with its lifetime
pub(crate) struct Item {
    pub(crate) definition: Definition,
    pub(crate) lifetime: Lifetime,
    /// Present for singleton items only
    pub(crate) slot: Option<Arc<SingletonSlot>>,
}

impl Item {
    pub(crate) fn new(definition: Definition, lifetime: Lifetime) -> Self {
        let slot = lifetime.is_singleton().then(|| Arc::new(SingletonSlot::default()));
        Self {
            definition,
            lifetime,
            slot,
        }
    }
}

/// Item and alias tables
#[derive(Default)]
pub(crate) struct Registry {
    items: HashMap<Key, Item>,
    aliases: HashMap<Key, Key>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts an item, dropping any alias of the same name so the item is reachable.
    pub(crate) fn insert(&mut self, key: Key, item: Item) -> Option<Item> {
        self.aliases.remove(&key);
        self.items.insert(key, item)
    }

    pub(crate) fn alias(&mut self, alias: Key, target: Key) -> Option<Key> {
        self.aliases.insert(alias, target)
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Item> {
        self.items.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Item> {
        self.items.get_mut(key)
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key) || self.aliases.contains_key(key)
    }

    /// Removes an item or an alias named `key`.
    pub(crate) fn remove(&mut self, key: &str) -> bool {
        let item = self.items.remove(key).is_some();
        let alias = self.aliases.remove(key).is_some();
        item || alias
    }

    /// Follows the alias chain starting at `key`.
    ///
    /// Keys that are not aliases are returned as they are, registered or not.
    pub(crate) fn canonical(&self, key: &str) -> DiResult<Key> {
        let mut current = Key::new(key)?;
        let mut path = vec![current.clone()];
        while let Some(target) = self.aliases.get(&current) {
            let looped = path.contains(target);
            path.push(target.clone());
            if looped {
                return Err(DiError::Circular(path.iter().map(Key::to_string).collect()));
            }
            current = target.clone();
        }
        Ok(current)
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Item keys followed by alias keys, each group sorted.
    pub(crate) fn keys(&self) -> Vec<String> {
        let mut items: Vec<String> = self.items.keys().map(Key::to_string).collect();
        let mut aliases: Vec<String> = self.aliases.keys().map(Key::to_string).collect();
        items.sort();
        aliases.sort();
        items.extend(aliases);
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ObjectDefinition;
    use crate::value::value;

    fn key(name: &str) -> Key {
        Key::new(name).unwrap()
    }

    fn object_item(name: &str, lifetime: Lifetime) -> Item {
        Item::new(
            Definition::Object(ObjectDefinition::new(key(name), value(1u8))),
            lifetime,
        )
    }

    #[test]
    fn only_singletons_get_a_slot() {
        assert!(object_item("a", Lifetime::Singleton).slot.is_some());
        assert!(object_item("a", Lifetime::Transient).slot.is_none());
    }

    #[test]
    fn slot_initializes_once() {
        let slot = SingletonSlot::default();
        let first = slot.get_or_try_init(|| Ok(value(1u32))).unwrap();
        let second = slot
            .get_or_try_init(|| panic!("slot initialized twice"))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_initialization_leaves_slot_empty() {
        let slot = SingletonSlot::default();
        let result = slot.get_or_try_init(|| Err(DiError::NotFound("x".into())));
        assert!(result.is_err());
        assert!(slot.get().is_none());
    }

    #[test]
    fn canonical_follows_chains() {
        let mut registry = Registry::new();
        registry.insert(key("Mailer"), object_item("Mailer", Lifetime::Transient));
        registry.alias(key("mail"), key("mailer"));
        registry.alias(key("mailer"), key("Mailer"));

        assert_eq!(registry.canonical("mail").unwrap(), key("Mailer"));
        assert_eq!(registry.canonical("unknown").unwrap(), key("unknown"));
    }

    #[test]
    fn canonical_detects_alias_loops() {
        let mut registry = Registry::new();
        registry.alias(key("a"), key("b"));
        registry.alias(key("b"), key("a"));

        match registry.canonical("a") {
            Err(DiError::Circular(path)) => assert_eq!(path, vec!["a", "b", "a"]),
            other => panic!("expected circular alias error, got {:?}", other),
        }
    }

    #[test]
    fn inserting_an_item_replaces_a_same_named_alias() {
        let mut registry = Registry::new();
        registry.alias(key("logger"), key("FileLogger"));
        registry.insert(key("logger"), object_item("logger", Lifetime::Transient));

        assert_eq!(registry.canonical("logger").unwrap(), key("logger"));
        assert_eq!(registry.keys(), vec!["logger".to_string()]);
    }
}
