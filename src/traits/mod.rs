//! Core traits for the depository container.

mod resolver;

pub use resolver::{Resolver, ResolverCore};
