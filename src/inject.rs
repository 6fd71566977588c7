use alloc::sync::Arc;
use tracing::debug;

use crate::{
    any::TypeInfo, class::Class, context::Context, dependency_resolver::select_replacement, errors::ResolveErrorKind,
    metadata::PrototypeMetadata,
};

/// Type-erased dependency declaration of a property
pub(crate) trait Declaration: Send + Sync {
    /// Resolves the dependency with the context's overrides and assigns it to `property`
    fn inject(&self, property: &'static str, context: &mut Context) -> Result<(), ResolveErrorKind>;
}

struct Factory<I: ?Sized>(fn() -> Class<I>);

impl<I> Declaration for Factory<I>
where
    I: ?Sized + Send + Sync + 'static,
{
    fn inject(&self, property: &'static str, context: &mut Context) -> Result<(), ResolveErrorKind> {
        let declared = (self.0)();
        let replacement = select_replacement(declared, &context.overrides)?;
        let dependency = replacement.instantiate(&context.overrides)?;

        if context.assign(property, dependency) {
            debug!(property, "Replaced previous value");
        }
        Ok(())
    }
}

/// Records dependency declarations of one prototype.
///
/// Passed to [`crate::Prototype::declare`].
pub struct Registrar {
    pub(crate) prototype: TypeInfo,
    pub(crate) metadata: PrototypeMetadata,
}

impl Registrar {
    #[inline]
    #[must_use]
    pub(crate) fn new(prototype: TypeInfo) -> Self {
        Self {
            prototype,
            metadata: PrototypeMetadata::default(),
        }
    }

    /// Marks `property` as a dependency satisfied by the class returned by `factory`.
    ///
    /// The factory is called each time the property is resolved, never for a property shadowed
    /// by a derived prototype. Declaring the same property twice replaces the previous factory.
    #[inline]
    pub fn inject<I>(&mut self, property: &'static str, factory: fn() -> Class<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        debug!(prototype = self.prototype.name, property, "Declared");
        self.metadata.define(property, Arc::new(Factory(factory)));
        self
    }

    /// Own declared property names in declaration order
    #[inline]
    pub fn properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.metadata.keys.iter().copied()
    }
}
