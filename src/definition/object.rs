//! Object definitions.

use std::fmt;

use super::{Define, DefinitionKind};
use crate::error::DiResult;
use crate::key::Key;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Argument};

/// Hands out an object that was registered already constructed.
///
/// `create` always returns the stored pointer. `with` is accepted and the
/// arguments are kept, but they never reach the object.
#[derive(Clone)]
pub struct ObjectDefinition {
    key: Key,
    object: AnyArc,
    arguments: Vec<Argument>,
}

impl ObjectDefinition {
    pub fn new(key: Key, object: AnyArc) -> Self {
        Self {
            key,
            object,
            arguments: Vec::new(),
        }
    }

    /// The stored object.
    pub fn get(&self) -> &AnyArc {
        &self.object
    }
}

impl Define for ObjectDefinition {
    fn key(&self) -> &Key {
        &self.key
    }

    fn kind(&self) -> DefinitionKind {
        DefinitionKind::Object
    }

    fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    fn with(&mut self, arguments: Vec<Argument>) -> &mut Self {
        self.arguments = arguments;
        self
    }

    fn create(&self, _ctx: &dyn ResolverCore, _arguments: &[Argument]) -> DiResult<AnyArc> {
        Ok(self.object.clone())
    }
}

impl fmt::Debug for ObjectDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectDefinition")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
