//! Closure definitions.

use std::fmt;

use super::arguments::{resolve_all, select};
use super::{ClosureFn, Define, DefinitionKind};
use crate::error::DiResult;
use crate::key::Key;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Args, Argument};

/// Produces instances by calling a closure.
///
/// The closure is self-contained: no parameter injection happens. It receives
/// the call-time arguments, else the bound arguments, else nothing, with
/// [`Argument::Key`] entries resolved first.
#[derive(Clone)]
pub struct ClosureDefinition {
    key: Key,
    closure: ClosureFn,
    arguments: Vec<Argument>,
}

impl ClosureDefinition {
    pub fn new(key: Key, closure: ClosureFn) -> Self {
        Self {
            key,
            closure,
            arguments: Vec::new(),
        }
    }
}

impl Define for ClosureDefinition {
    fn key(&self) -> &Key {
        &self.key
    }

    fn kind(&self) -> DefinitionKind {
        DefinitionKind::Closure
    }

    fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    fn with(&mut self, arguments: Vec<Argument>) -> &mut Self {
        self.arguments = arguments;
        self
    }

    fn create(&self, ctx: &dyn ResolverCore, arguments: &[Argument]) -> DiResult<AnyArc> {
        let values = resolve_all(ctx, select(arguments, &self.arguments))?;
        (self.closure)(Args::new(self.key.as_str(), values))
    }
}

impl fmt::Debug for ClosureDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClosureDefinition")
            .field("key", &self.key)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}
