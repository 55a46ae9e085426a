//! Diagnostic observers for resolution traceability.
//!
//! Observers are called synchronously around every resolution that reaches a
//! definition (cache hits included). Keep implementations lightweight; for
//! expensive work, queue the event and process it elsewhere.

use std::sync::Arc;
use std::time::Duration;

use crate::error::DiError;
use crate::key::Key;

/// Observer trait for resolution events.
///
/// # Examples
///
/// ```
/// use depository::{Concrete, Depository, DiError, DiObserver, Key};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<String>>);
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, key: &Key) {
///         self.0.lock().unwrap().push(format!("resolving {}", key));
///     }
///     fn resolved(&self, key: &Key, _duration: Duration) {
///         self.0.lock().unwrap().push(format!("resolved {}", key));
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let mut depository = Depository::new();
/// depository.add_observer(recorder.clone());
/// depository.register("answer", Concrete::closure(|_| Ok(42))).unwrap();
/// depository.resolve("answer").unwrap();
///
/// assert_eq!(*recorder.0.lock().unwrap(), vec!["resolving answer", "resolved answer"]);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a key is resolved.
    fn resolving(&self, key: &Key);

    /// Called after a key was resolved successfully.
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when resolving a key failed.
    fn failed(&self, key: &Key, error: &DiError) {
        let _ = (key, error);
    }
}

#[derive(Default)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, key: &Key) {
        for observer in &self.observers {
            observer.resolving(key);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, key: &Key, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(key, duration);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, key: &Key, error: &DiError) {
        for observer in &self.observers {
            observer.failed(key, error);
        }
    }
}

/// Observer that reports resolutions through `tracing`.
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    pub fn new() -> Self {
        Self {
            prefix: "depository".to_string(),
        }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        tracing::info!(prefix = %self.prefix, key = %key, "Resolving");
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::info!(prefix = %self.prefix, key = %key, ?duration, "Resolved");
    }

    fn failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(prefix = %self.prefix, key = %key, %error, "Resolution failed");
    }
}
