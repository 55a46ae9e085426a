//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};
use crate::key::Key;

// Thread-local resolution state for circular dependency detection
thread_local! {
    static RESOLUTION_STACK: RefCell<Vec<Key>> = const { RefCell::new(Vec::new()) };
}

/// Guard for managing the thread-local resolution stack
///
/// Entering pushes the key; dropping pops it, also when resolution fails
/// part way through.
pub(crate) struct StackGuard {
    key: Key,
}

impl StackGuard {
    pub(crate) fn enter(key: &Key, max_depth: usize) -> DiResult<Self> {
        RESOLUTION_STACK.with(|stack| {
            let mut stack = stack.borrow_mut();

            // Circular detection BEFORE pushing the new key
            if stack.iter().any(|k| k == key) {
                let mut path: Vec<String> = stack.iter().map(|k| k.to_string()).collect();
                path.push(key.to_string());
                return Err(DiError::Circular(path));
            }

            if stack.len() >= max_depth {
                return Err(DiError::DepthExceeded(stack.len()));
            }

            stack.push(key.clone());
            Ok(())
        })?;

        Ok(Self { key: key.clone() })
    }
}

impl Drop for StackGuard {
    fn drop(&mut self) {
        RESOLUTION_STACK.with(|stack| {
            let popped = stack.borrow_mut().pop();
            debug_assert_eq!(popped.as_ref(), Some(&self.key));
        });
    }
}

/// Execute a closure with circular dependency detection
pub(crate) fn with_circular_guard<T, F>(key: &Key, max_depth: usize, f: F) -> DiResult<T>
where
    F: FnOnce() -> DiResult<T>,
{
    let _guard = StackGuard::enter(key, max_depth)?;
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(name: &str) -> Key {
        Key::new(name).unwrap()
    }

    #[test]
    fn reentering_a_key_reports_the_path() {
        let a = key("A");
        let b = key("B");
        let result = with_circular_guard(&a, 16, || {
            with_circular_guard(&b, 16, || with_circular_guard(&a, 16, || Ok(())))
        });
        match result {
            Err(DiError::Circular(path)) => assert_eq!(path, vec!["A", "B", "A"]),
            other => panic!("expected circular error, got {:?}", other),
        }
    }

    #[test]
    fn stack_unwinds_after_errors() {
        let a = key("A");
        let _ = with_circular_guard(&a, 16, || -> DiResult<()> {
            Err(DiError::NotFound("B".into()))
        });
        // A was popped, so entering it again is fine
        assert!(with_circular_guard(&a, 16, || Ok(())).is_ok());
    }

    #[test]
    fn depth_limit() {
        let a = key("A");
        let b = key("B");
        let result = with_circular_guard(&a, 1, || with_circular_guard(&b, 1, || Ok(())));
        assert!(matches!(result, Err(DiError::DepthExceeded(1))));
    }
}
