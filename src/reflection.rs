//! Class, method and function metadata.
//!
//! Rust has no runtime reflection, so everything the definitions need to know
//! about a "class" is declared up front: its constructor parameters (with
//! optional declared types and defaults), how to construct it from resolved
//! arguments, and its methods. A class is "loadable" exactly when a
//! [`ClassInfo`] for its name has been defined on the container.
//!
//! ```rust
//! use depository::{ClassInfo, MethodInfo, Parameter};
//!
//! struct Transport;
//! struct Mailer { transport: std::sync::Arc<Transport>, retries: u32 }
//!
//! impl Mailer {
//!     fn send(&self, to: &str) -> String {
//!         format!("sent to {} with {} retries", to, self.retries)
//!     }
//! }
//!
//! let mailer = ClassInfo::new("Mailer", |args| {
//!     Ok(Mailer { transport: args.get::<Transport>(0)?, retries: args.cloned(1)? })
//! })
//! .param(Parameter::typed("transport", "Transport"))
//! .param(Parameter::new("retries").default_value(3u32))
//! .method(
//!     MethodInfo::instance("send", |this: &Mailer, args| {
//!         Ok(this.send(&args.cloned::<String>(0)?))
//!     })
//!     .param(Parameter::new("to")),
//! );
//!
//! assert_eq!(mailer.name(), "Mailer");
//! assert_eq!(mailer.parameters().len(), 2);
//! assert!(mailer.method_named("send").is_some());
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::value::{AnyArc, Args};

type Invoker = Arc<dyn Fn(Args) -> DiResult<AnyArc> + Send + Sync>;
type MethodInvoker = Arc<dyn Fn(Option<&AnyArc>, Args) -> DiResult<AnyArc> + Send + Sync>;

/// A declared parameter of a constructor, method or function.
#[derive(Clone)]
pub struct Parameter {
    name: String,
    declared_type: Option<String>,
    default: Option<AnyArc>,
}

impl Parameter {
    /// Untyped parameter without default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: None,
            default: None,
        }
    }

    /// Parameter whose declared type is the container key `type_key`.
    pub fn typed(name: impl Into<String>, type_key: impl Into<String>) -> Self {
        Self::new(name).of_type(type_key)
    }

    pub fn of_type(mut self, type_key: impl Into<String>) -> Self {
        self.declared_type = Some(type_key.into());
        self
    }

    pub fn default_value<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.default = Some(Arc::new(value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> Option<&str> {
        self.declared_type.as_deref()
    }

    pub fn default(&self) -> Option<&AnyArc> {
        self.default.as_ref()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("has_default", &self.default.is_some())
            .finish()
    }
}

/// Metadata and constructor for a class.
#[derive(Clone)]
pub struct ClassInfo {
    name: String,
    parameters: Vec<Parameter>,
    constructor: Invoker,
    methods: HashMap<String, MethodInfo>,
}

impl ClassInfo {
    /// Declares class `name`, constructed by `constructor` from its resolved
    /// constructor arguments.
    pub fn new<T, F>(name: impl Into<String>, constructor: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(Args) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            constructor: Arc::new(move |args: Args| constructor(args).map(|v| Arc::new(v) as AnyArc)),
            methods: HashMap::new(),
        }
    }

    /// Appends a constructor parameter.
    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn method(mut self, method: MethodInfo) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn method_named(&self, name: &str) -> Option<&MethodInfo> {
        self.methods.get(name)
    }

    pub(crate) fn instantiate(&self, args: Args) -> DiResult<AnyArc> {
        (self.constructor)(args)
    }
}

impl fmt::Debug for ClassInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<_> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("ClassInfo")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("methods", &methods)
            .finish()
    }
}

/// Metadata and body for a method, either bound to an instance or static.
#[derive(Clone)]
pub struct MethodInfo {
    name: String,
    parameters: Vec<Parameter>,
    is_static: bool,
    invoke: MethodInvoker,
}

impl MethodInfo {
    /// Instance method: `body` receives the receiver downcast to `T`.
    pub fn instance<T, R, F>(name: impl Into<String>, body: F) -> Self
    where
        T: Any + Send + Sync,
        R: Any + Send + Sync,
        F: Fn(&T, Args) -> DiResult<R> + Send + Sync + 'static,
    {
        let name = name.into();
        let method = name.clone();
        Self {
            name,
            parameters: Vec::new(),
            is_static: false,
            invoke: Arc::new(move |receiver: Option<&AnyArc>, args: Args| {
                let receiver = receiver
                    .and_then(|r| r.downcast_ref::<T>())
                    .ok_or_else(|| DiError::TypeMismatch {
                        target: format!("receiver of {}", method),
                        expected: std::any::type_name::<T>(),
                    })?;
                body(receiver, args).map(|v| Arc::new(v) as AnyArc)
            }),
        }
    }

    /// Static method: no receiver is constructed.
    pub fn static_fn<R, F>(name: impl Into<String>, body: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(Args) -> DiResult<R> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            is_static: true,
            invoke: Arc::new(move |_: Option<&AnyArc>, args: Args| body(args).map(|v| Arc::new(v) as AnyArc)),
        }
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub(crate) fn invoke(&self, receiver: Option<&AnyArc>, args: Args) -> DiResult<AnyArc> {
        (self.invoke)(receiver, args)
    }
}

impl fmt::Debug for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodInfo")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("is_static", &self.is_static)
            .finish()
    }
}

/// Metadata and body for a free function.
#[derive(Clone)]
pub struct FunctionInfo {
    name: String,
    parameters: Vec<Parameter>,
    invoke: Invoker,
}

impl FunctionInfo {
    pub fn new<R, F>(name: impl Into<String>, body: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(Args) -> DiResult<R> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            invoke: Arc::new(move |args: Args| body(args).map(|v| Arc::new(v) as AnyArc)),
        }
    }

    pub fn param(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub(crate) fn invoke(&self, args: Args) -> DiResult<AnyArc> {
        (self.invoke)(args)
    }
}

impl fmt::Debug for FunctionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInfo")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .finish()
    }
}

/// All classes and free functions known to a container.
#[derive(Default, Clone, Debug)]
pub struct ClassRegistry {
    classes: HashMap<String, Arc<ClassInfo>>,
    functions: HashMap<String, Arc<FunctionInfo>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a class.
    pub fn define_class(&mut self, class: ClassInfo) {
        self.classes.insert(class.name.clone(), Arc::new(class));
    }

    /// Adds or replaces a free function.
    pub fn define_function(&mut self, function: FunctionInfo) {
        self.functions.insert(function.name.clone(), Arc::new(function));
    }

    pub fn class(&self, name: &str) -> Option<Arc<ClassInfo>> {
        self.classes.get(name).cloned()
    }

    pub fn function(&self, name: &str) -> Option<Arc<FunctionInfo>> {
        self.functions.get(name).cloned()
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }
}
