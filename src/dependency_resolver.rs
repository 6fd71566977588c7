use alloc::{sync::Arc, vec::Vec};
use tracing::debug;

use crate::{
    class::{Class, Replacement},
    context::Context,
    defaults::get_default,
    errors::ResolveErrorKind,
    inject::Declaration,
    metadata,
    overrides::Overrides,
    prototype::{chain, PrototypeRef},
};

/// Resolves every dependency declared in the chain of `proto` into a new context.
///
/// Declarations are merged base-first, so a derived prototype declaring the same property as its base
/// shadows the base declaration. Shadowed factories are never called.
pub(crate) fn resolve(proto: PrototypeRef, overrides: Overrides) -> Result<Context, ResolveErrorKind> {
    let mut declarations: Vec<(&'static str, Arc<dyn Declaration>)> = Vec::new();

    for proto in chain(proto) {
        metadata::ensure_declared(&proto);

        for property in metadata::own_keys(&proto.type_info) {
            let Some(factory) = metadata::factory(&proto.type_info, property) else {
                continue;
            };

            match declarations.iter_mut().find(|(name, _)| *name == property) {
                Some((_, declaration)) => {
                    debug!(prototype = proto.name, property, "Shadowed");
                    *declaration = factory;
                }
                None => declarations.push((property, factory)),
            }
        }
    }

    let mut context = Context::new(proto.name, overrides);
    for (property, declaration) in declarations {
        declaration.inject(property, &mut context)?;
    }

    debug!(properties = context.properties().count(), "Dependencies injected");

    Ok(context)
}

/// Selects what satisfies `declared`: an override, then a default, then the declared class itself.
pub(crate) fn select_replacement<I>(declared: Class<I>, overrides: &Overrides) -> Result<Replacement<I>, ResolveErrorKind>
where
    I: ?Sized + Send + Sync + 'static,
{
    if let Some(replacement) = overrides.get(&declared)? {
        debug!(dependency = declared.name, "Resolved from override");
        return Ok(replacement);
    }
    if let Some(replacement) = get_default(&declared)? {
        debug!(dependency = declared.name, "Resolved from default");
        return Ok(replacement);
    }

    debug!(dependency = declared.name, "Resolved as declared");
    Ok(Replacement::Class(declared))
}
