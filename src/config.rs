//! Container options.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::{DiError, DiResult};

/// Default limit on nested resolutions.
///
/// Every nesting level costs several stack frames, so the limit must trip
/// well before a 2 MiB thread stack runs out in an unoptimized build.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Behavior switches for a [`Depository`](crate::Depository).
///
/// # Examples
///
/// ```rust
/// use depository::{Concrete, Depository, DepositoryOptions};
///
/// let options = DepositoryOptions {
///     allow_overwrite: false,
///     ..DepositoryOptions::default()
/// };
/// let depository = Depository::with_options(options);
/// depository.register("clock", Concrete::object(0u64)).unwrap();
/// assert!(depository.register("clock", Concrete::object(1u64)).is_err());
/// assert!(depository.options().autowire);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct DepositoryOptions {
    /// Resolve unregistered keys that name a defined class by constructing
    /// that class, and treat such keys as resolvable while injecting typed
    /// parameters.
    pub autowire: bool,
    /// Let a registration replace an existing item or alias under the same key.
    pub allow_overwrite: bool,
    /// Maximum nesting of resolutions before failing with
    /// [`DiError::DepthExceeded`](crate::DiError::DepthExceeded).
    pub max_depth: usize,
}

impl Default for DepositoryOptions {
    fn default() -> Self {
        Self {
            autowire: true,
            allow_overwrite: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[cfg(feature = "config")]
impl DepositoryOptions {
    /// Parses options from JSON; missing fields keep their defaults.
    ///
    /// ```rust
    /// use depository::DepositoryOptions;
    ///
    /// let options = DepositoryOptions::from_json(r#"{ "max_depth": 32 }"#).unwrap();
    /// assert_eq!(options.max_depth, 32);
    /// assert!(options.autowire);
    /// ```
    pub fn from_json(json: &str) -> DiResult<Self> {
        serde_json::from_str(json).map_err(|e| DiError::construction("DepositoryOptions", e))
    }

    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DiError::construction("DepositoryOptions", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = DepositoryOptions::default();
        assert!(options.autowire);
        assert!(options.allow_overwrite);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip_keeps_values() {
        let options = DepositoryOptions {
            autowire: false,
            allow_overwrite: false,
            max_depth: 8,
        };
        let json = options.to_json().unwrap();
        assert_eq!(DepositoryOptions::from_json(&json).unwrap(), options);
    }

    #[cfg(feature = "config")]
    #[test]
    fn invalid_json_is_an_error() {
        assert!(DepositoryOptions::from_json("{ nope").is_err());
    }
}
