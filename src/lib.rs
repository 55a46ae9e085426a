//! # depository
//!
//! String-keyed dependency injection container with declared class metadata.
//!
//! ## Features
//!
//! - **Four definition strategies**: closures, ready objects, classes and callables
//! - **Parameter injection**: typed parameters are resolved from the container, defaults fill the rest
//! - **Singletons and transients**: singletons are constructed at most once, even across threads
//! - **Aliases**: any number of names for one registration
//! - **Circular dependency detection**: fails with the full resolution path instead of recursing forever
//! - **Autowiring**: unregistered keys naming a defined class are constructed on demand
//!
//! ## Quick Start
//!
//! ```rust
//! use depository::{ClassInfo, Concrete, Depository, Parameter, Resolver};
//! use std::sync::Arc;
//!
//! struct Greeter {
//!     word: String,
//! }
//!
//! struct Service {
//!     greeter: Arc<Greeter>,
//!     punctuation: char,
//! }
//!
//! let depository = Depository::new();
//!
//! // Classes are described once: constructor parameters and how to build them
//! depository.define_class(
//!     ClassInfo::new("Service", |args| {
//!         Ok(Service {
//!             greeter: args.get::<Greeter>(0)?,
//!             punctuation: args.cloned(1)?,
//!         })
//!     })
//!     .param(Parameter::typed("greeter", "Greeter"))
//!     .param(Parameter::new("punctuation").default_value('!')),
//! );
//!
//! depository
//!     .register("Greeter", Concrete::closure(|_| Ok(Greeter { word: "hello".into() })))
//!     .unwrap();
//! depository.singleton("Svc", "Service").unwrap();
//!
//! let svc = depository.get::<Service>("Svc").unwrap();
//! assert_eq!(format!("{}{}", svc.greeter.word, svc.punctuation), "hello!");
//! assert!(Arc::ptr_eq(&svc, &depository.get::<Service>("Svc").unwrap()));
//! ```
//!
//! ## Lifetimes
//!
//! - **Singleton**: created on first resolution and shared afterwards
//! - **Transient**: created fresh on every resolution
//!
//! ## Callables
//!
//! ```rust
//! use depository::{Argument, ClassInfo, Concrete, Depository, MethodInfo, Resolver};
//!
//! struct Config;
//!
//! let depository = Depository::new();
//! depository.define_class(
//!     ClassInfo::new("Config", |_| Ok(Config))
//!         .method(MethodInfo::static_fn("port", |args| Ok(*args.get::<u16>(0)? + 1))
//!             .param(depository::Parameter::new("base"))),
//! );
//!
//! depository
//!     .register("port", "Config::port")
//!     .unwrap()
//!     .with([Argument::value(8079u16)]);
//!
//! assert_eq!(*depository.get::<u16>("port").unwrap(), 8080);
//! ```

pub mod config;
pub mod definition;
pub mod depository;
pub mod error;
pub mod key;
pub mod lifetime;
pub mod observer;
pub mod reflection;
pub mod traits;
pub mod value;

// Internal modules
mod internal;
mod registration;

pub use config::{DepositoryOptions, DEFAULT_MAX_DEPTH};
pub use definition::{
    CallableDefinition, ClassDefinition, ClosureDefinition, ClosureFn, Concrete, Define, Definition,
    DefinitionFactory, DefinitionKind, MethodCall, ObjectDefinition,
};
pub use depository::{Depository, DefinitionHandle};
pub use error::{DiError, DiResult};
pub use key::Key;
pub use lifetime::Lifetime;
pub use observer::{DiObserver, LoggingObserver};
pub use reflection::{ClassInfo, ClassRegistry, FunctionInfo, MethodInfo, Parameter};
pub use traits::{Resolver, ResolverCore};
pub use value::{value, AnyArc, Args, Argument};
