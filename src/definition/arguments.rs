//! Argument selection and parameter injection shared by the strategies.

use crate::error::{DiError, DiResult};
use crate::reflection::Parameter;
use crate::traits::ResolverCore;
use crate::value::{AnyArc, Args, Argument};

/// Call-time arguments win over bound ones when any are given.
pub(crate) fn select<'a>(call: &'a [Argument], bound: &'a [Argument]) -> &'a [Argument] {
    if call.is_empty() {
        bound
    } else {
        call
    }
}

pub(crate) fn resolve_argument(ctx: &dyn ResolverCore, argument: &Argument) -> DiResult<AnyArc> {
    match argument {
        Argument::Value(value) => Ok(value.clone()),
        Argument::Key(key) => ctx.resolve_any(key, &[]),
    }
}

pub(crate) fn resolve_all(ctx: &dyn ResolverCore, arguments: &[Argument]) -> DiResult<Vec<AnyArc>> {
    arguments
        .iter()
        .map(|argument| resolve_argument(ctx, argument))
        .collect()
}

/// Assembles the argument list for `parameters`.
///
/// Per position: the supplied argument, else the container's instance for the
/// declared type, else the declared default.
pub(crate) fn inject(
    ctx: &dyn ResolverCore,
    target: &str,
    parameters: &[Parameter],
    supplied: &[Argument],
) -> DiResult<Args> {
    if supplied.len() > parameters.len() {
        return Err(DiError::ArgumentCount {
            target: target.to_string(),
            expected: parameters.len(),
            given: supplied.len(),
        });
    }

    let mut values = Vec::with_capacity(parameters.len());
    for (position, parameter) in parameters.iter().enumerate() {
        let value = if let Some(argument) = supplied.get(position) {
            resolve_argument(ctx, argument)?
        } else if let Some(type_key) = parameter.declared_type().filter(|ty| ctx.has(ty)) {
            ctx.resolve_any(type_key, &[])?
        } else if let Some(default) = parameter.default() {
            default.clone()
        } else {
            return Err(DiError::Unresolvable {
                target: target.to_string(),
                parameter: parameter.name().to_string(),
            });
        };
        values.push(value);
    }

    Ok(Args::new(target, values))
}
