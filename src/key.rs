//! Container key type.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};

/// Separator between a class name and a method name in callable references.
pub const CALLABLE_SEPARATOR: &str = "::";

/// Key for item storage and lookup.
///
/// Keys are strings with at least one non-whitespace character, conventionally
/// a class or interface name or a user chosen alias. Empty and whitespace-only
/// names are rejected with [`DiError::InvalidKey`]. They are cheap to clone (`Arc<str>`), which matters
/// because the resolution stack and observers carry them around on every
/// lookup.
///
/// # Examples
///
/// ```rust
/// use depository::Key;
///
/// let key = Key::new("App\\Mailer").unwrap();
/// assert_eq!(key.as_str(), "App\\Mailer");
/// assert!(Key::new("").is_err());
/// assert!(Key::new("  ").is_err());
///
/// let callable = Key::new("Mailer::send").unwrap();
/// assert_eq!(callable.split_callable(), Some(("Mailer", "send")));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Arc<str>);

impl Key {
    /// Validates and wraps `name`.
    pub fn new(name: impl AsRef<str>) -> DiResult<Self> {
        let name = name.as_ref();
        if name.trim().is_empty() {
            return Err(DiError::InvalidKey(name.to_string()));
        }
        Ok(Key(Arc::from(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a `Class::method` reference at the first separator.
    ///
    /// Returns `None` when there is no separator or either side is empty.
    pub fn split_callable(&self) -> Option<(&str, &str)> {
        split_callable(&self.0)
    }
}

/// Splits `Class::method` into its two halves.
pub(crate) fn split_callable(name: &str) -> Option<(&str, &str)> {
    let (class, method) = name.split_once(CALLABLE_SEPARATOR)?;
    if class.is_empty() || method.is_empty() {
        return None;
    }
    Some((class, method))
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({:?})", &*self.0)
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn rejects_blank_keys() {
        assert!(matches!(Key::new(""), Err(DiError::InvalidKey(_))));
        assert!(matches!(Key::new("   "), Err(DiError::InvalidKey(_))));
    }

    #[test]
    fn borrows_as_str_for_map_lookup() {
        let mut map = HashMap::new();
        map.insert(Key::new("Logger").unwrap(), 1);
        assert_eq!(map.get("Logger"), Some(&1));
    }

    #[test]
    fn split_requires_both_halves() {
        assert_eq!(split_callable("Mailer::send"), Some(("Mailer", "send")));
        assert_eq!(split_callable("A::b::c"), Some(("A", "b::c")));
        assert_eq!(split_callable("::send"), None);
        assert_eq!(split_callable("Mailer::"), None);
        assert_eq!(split_callable("Mailer"), None);
    }
}
