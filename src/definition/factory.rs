//! Classification of registration payloads.

use super::{
    CallableDefinition, ClassDefinition, ClosureDefinition, Concrete, Definition,
    ObjectDefinition,
};
use crate::error::{DiError, DiResult};
use crate::key::{split_callable, Key};
use crate::traits::ResolverCore;

/// Selects and builds the definition strategy for a registration payload.
///
/// The checks run in a fixed order and the first match wins:
///
/// 1. closure → [`ClosureDefinition`]
/// 2. object → [`ObjectDefinition`]
/// 3. name of a known class → [`ClassDefinition`]
/// 4. name containing `::` → split into a `(class, method)` pair, then 5.
/// 5. pair naming a method of a known class, or name of a known free
///    function → [`CallableDefinition`]
/// 6. anything else → [`DiError::NotDefinable`]
///
/// Class names are checked before the `::` split, so a class whose name
/// contains `::` is never mistaken for a method reference.
pub struct DefinitionFactory;

impl DefinitionFactory {
    /// Classifies `concrete` and binds the resulting definition to `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use depository::{ClassInfo, Define, DefinitionFactory, DefinitionKind, Depository, MethodInfo};
    ///
    /// struct Mailer;
    ///
    /// let depository = Depository::new();
    /// depository.define_class(
    ///     ClassInfo::new("Mailer", |_| Ok(Mailer))
    ///         .method(MethodInfo::instance("send", |_: &Mailer, _| Ok(true))),
    /// );
    ///
    /// let class = DefinitionFactory::factory("mailer", "Mailer".into(), &depository).unwrap();
    /// assert_eq!(class.kind(), DefinitionKind::Class);
    ///
    /// let callable = DefinitionFactory::factory("send", "Mailer::send".into(), &depository).unwrap();
    /// let callable = callable.as_callable().unwrap();
    /// assert_eq!(callable.class_name(), Some("Mailer"));
    /// assert_eq!(callable.method_name(), "send");
    ///
    /// assert!(DefinitionFactory::factory("nope", "Unknown".into(), &depository).is_err());
    /// ```
    pub fn factory(key: &str, concrete: Concrete, ctx: &dyn ResolverCore) -> DiResult<Definition> {
        let key = Key::new(key)?;

        let concrete = match concrete {
            Concrete::Closure(closure) => {
                return Ok(Definition::Closure(ClosureDefinition::new(key, closure)));
            }
            Concrete::Object(object) => {
                return Ok(Definition::Object(ObjectDefinition::new(key, object)));
            }
            Concrete::Name(name) if ctx.class(&name).is_some() => {
                return Ok(Definition::Class(ClassDefinition::new(key, name)));
            }
            Concrete::Name(name) => match split_callable(&name) {
                Some((class, method)) => Concrete::Pair(class.to_string(), method.to_string()),
                None => Concrete::Name(name),
            },
            pair @ Concrete::Pair(..) => pair,
        };

        match concrete {
            Concrete::Pair(class, method) if has_method(ctx, &class, &method) => Ok(
                Definition::Callable(CallableDefinition::new(key, Some(class), method)),
            ),
            Concrete::Name(name) if ctx.function(&name).is_some() => {
                Ok(Definition::Callable(CallableDefinition::new(key, None, name)))
            }
            _ => Err(DiError::NotDefinable(key.to_string())),
        }
    }
}

fn has_method(ctx: &dyn ResolverCore, class: &str, method: &str) -> bool {
    ctx.class(class)
        .is_some_and(|info| info.method_named(method).is_some())
}
