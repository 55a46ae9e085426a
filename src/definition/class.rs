//! Class definitions.

use super::arguments::{inject, select};
use super::{Define, DefinitionKind};
use crate::error::{DiError, DiResult};
use crate::key::Key;
use crate::reflection::ClassInfo;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Argument};

/// A method call queued on a class definition, run on every fresh instance.
#[derive(Clone, Debug)]
pub struct MethodCall {
    method: String,
    arguments: Vec<Argument>,
}

impl MethodCall {
    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }
}

/// Constructs a class through its declared constructor.
///
/// Constructor parameters are filled positionally from the supplied
/// arguments; the rest come from the container when their declared type is
/// resolvable, else from their declared default. Queued [`MethodCall`]s run
/// on the new instance before it is returned.
#[derive(Clone, Debug)]
pub struct ClassDefinition {
    key: Key,
    class: String,
    arguments: Vec<Argument>,
    calls: Vec<MethodCall>,
}

impl ClassDefinition {
    pub fn new(key: Key, class: impl Into<String>) -> Self {
        Self {
            key,
            class: class.into(),
            arguments: Vec::new(),
            calls: Vec::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class
    }

    /// Queues `method` to be called on each constructed instance.
    pub fn call(&mut self, method: impl Into<String>, arguments: Vec<Argument>) -> &mut Self {
        self.calls.push(MethodCall {
            method: method.into(),
            arguments,
        });
        self
    }

    pub fn calls(&self) -> &[MethodCall] {
        &self.calls
    }

    fn run_calls(&self, ctx: &dyn ResolverCore, class: &ClassInfo, object: &AnyArc) -> DiResult<()> {
        for call in &self.calls {
            let method = class
                .method_named(&call.method)
                .ok_or_else(|| DiError::MethodNotFound {
                    class: class.name().to_string(),
                    method: call.method.clone(),
                })?;
            let target = format!("{}::{}", class.name(), method.name());
            let args = inject(ctx, &target, method.parameters(), &call.arguments)?;
            method.invoke(Some(object), args)?;
        }
        Ok(())
    }
}

/// Constructs `class` with parameters injected from `supplied` and `ctx`.
pub(crate) fn instantiate(
    ctx: &dyn ResolverCore,
    class: &ClassInfo,
    supplied: &[Argument],
) -> DiResult<AnyArc> {
    let args = inject(ctx, class.name(), class.parameters(), supplied)?;
    class.instantiate(args)
}

impl Define for ClassDefinition {
    fn key(&self) -> &Key {
        &self.key
    }

    fn kind(&self) -> DefinitionKind {
        DefinitionKind::Class
    }

    fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    fn with(&mut self, arguments: Vec<Argument>) -> &mut Self {
        self.arguments = arguments;
        self
    }

    fn create(&self, ctx: &dyn ResolverCore, arguments: &[Argument]) -> DiResult<AnyArc> {
        let class = ctx
            .class(&self.class)
            .ok_or_else(|| DiError::NotFound(self.class.clone()))?;
        let object = instantiate(ctx, &class, select(arguments, &self.arguments))?;
        self.run_calls(ctx, &class, &object)?;
        Ok(object)
    }
}
