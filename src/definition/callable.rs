//! Callable definitions.

use super::arguments::{inject, select};
use super::{instantiate, Define, DefinitionKind};
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::reflection::ClassInfo;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Argument};

/// Calls a method of a class, or a free function when no class is set, and
/// returns its result.
///
/// Parameters are injected the same way class constructors are. Instance
/// methods need a receiver: it is resolved from the container under the
/// class name when that key is resolvable, and constructed from the class
/// metadata otherwise. A definition registered under its own class name
/// (`register("Counter", "Counter::next")`) always constructs its receiver.
#[derive(Clone, Debug)]
pub struct CallableDefinition {
    key: Key,
    class: Option<String>,
    method: String,
    arguments: Vec<Argument>,
}

impl CallableDefinition {
    pub fn new(key: Key, class: Option<String>, method: impl Into<String>) -> Self {
        Self {
            key,
            class,
            method: method.into(),
            arguments: Vec::new(),
        }
    }

    /// Class owning the method, `None` for free functions.
    pub fn class_name(&self) -> Option<&str> {
        self.class.as_deref()
    }

    pub fn method_name(&self) -> &str {
        &self.method
    }

    fn receiver(&self, ctx: &dyn ResolverCore, class: &ClassInfo) -> DiResult<AnyArc> {
        // A key registered to one of its own class's methods cannot be its receiver.
        if class.name() != self.key.as_str() && ctx.has(class.name()) {
            ctx.resolve_any(class.name(), &[])
        } else {
            instantiate(ctx, class, &[])
        }
    }
}

impl Define for CallableDefinition {
    fn key(&self) -> &Key {
        &self.key
    }

    fn kind(&self) -> DefinitionKind {
        DefinitionKind::Callable
    }

    fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    fn with(&mut self, arguments: Vec<Argument>) -> &mut Self {
        self.arguments = arguments;
        self
    }

    fn create(&self, ctx: &dyn ResolverCore, arguments: &[Argument]) -> DiResult<AnyArc> {
        let supplied = select(arguments, &self.arguments);

        let Some(class_name) = self.class.as_deref() else {
            let function = ctx
                .function(&self.method)
                .ok_or_else(|| DiError::NotFound(self.method.clone()))?;
            let args = inject(ctx, function.name(), function.parameters(), supplied)?;
            return function.invoke(args);
        };

        let class = ctx
            .class(class_name)
            .ok_or_else(|| DiError::NotFound(class_name.to_string()))?;
        let method = class
            .method_named(&self.method)
            .ok_or_else(|| DiError::MethodNotFound {
                class: class_name.to_string(),
                method: self.method.clone(),
            })?;

        let receiver = if method.is_static() {
            None
        } else {
            Some(self.receiver(ctx, &class)?)
        };
        let target = format!("{}::{}", class_name, self.method);
        let args = inject(ctx, &target, method.parameters(), supplied)?;
        method.invoke(receiver.as_ref(), args)
    }
}
