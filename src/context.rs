use alloc::{boxed::Box, collections::BTreeMap, sync::Arc, vec::Vec};
use core::any::{type_name, Any};
use tracing::error;

use crate::{class::Class, errors::ResolveErrorKind, module, overrides::Overrides};

/// Construction context of a module: the overrides it's built with and its resolved properties.
///
/// Passed to [`crate::Module::construct`].
pub struct Context {
    pub(crate) module: &'static str,
    pub(crate) overrides: Overrides,
    values: BTreeMap<&'static str, Box<dyn Any + Send + Sync>>,
    order: Vec<&'static str>,
}

#[cfg(feature = "debug")]
impl core::fmt::Debug for Context {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Context")
            .field("module", &self.module)
            .field("overrides", &self.overrides)
            .field("properties", &self.order)
            .finish()
    }
}

impl Context {
    #[inline]
    #[must_use]
    pub(crate) fn new(module: &'static str, overrides: Overrides) -> Self {
        Self {
            module,
            overrides,
            values: BTreeMap::new(),
            order: Vec::new(),
        }
    }

    /// Assigns a resolved value, replacing a previous one in place.
    /// Returns `true` if there was a previous value.
    pub(crate) fn assign<I: ?Sized + Send + Sync + 'static>(&mut self, property: &'static str, value: Arc<I>) -> bool {
        let replaced = self.values.insert(property, Box::new(value)).is_some();
        if !replaced {
            self.order.push(property);
        }
        replaced
    }

    /// Gets the value injected into `property`
    ///
    /// # Errors
    /// - [`ResolveErrorKind::NoDependency`] if the property isn't declared in the module's chain.
    /// - [`ResolveErrorKind::IncorrectType`] if the property is declared with another interface.
    pub fn get<I: ?Sized + Send + Sync + 'static>(&self, property: &'static str) -> Result<Arc<I>, ResolveErrorKind> {
        let Some(value) = self.values.get(property) else {
            let err = ResolveErrorKind::NoDependency {
                prototype: self.module,
                property,
            };
            error!("{}", err);
            return Err(err);
        };

        match value.downcast_ref::<Arc<I>>() {
            Some(value) => Ok(value.clone()),
            None => {
                let err = ResolveErrorKind::IncorrectType {
                    class: property,
                    expected: type_name::<I>(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.values.contains_key(property)
    }

    /// Injected property names in assignment order,
    /// which is the order they first appear walking the chain base-first
    #[inline]
    pub fn properties(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().copied()
    }

    /// Overrides the module is built with
    #[inline]
    #[must_use]
    pub const fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// Takes the overrides, so the module can keep them for [`crate::Module::overrides`]
    #[inline]
    #[must_use]
    pub fn into_overrides(self) -> Overrides {
        self.overrides
    }

    /// Instantiates a nested module while the module is being constructed.
    /// See [`crate::Module::init_dependency`].
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::InvalidDependencyKind`] if `class` isn't a module and has no override.
    #[inline]
    pub fn init_dependency<I>(&self, class: Class<I>, overrides: Overrides) -> Result<Arc<I>, ResolveErrorKind>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        module::init_dependency(&self.overrides, class, overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::Context;
    use crate::{Overrides, ResolveErrorKind};

    use alloc::{sync::Arc, vec::Vec};

    trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    struct Foo;

    impl Named for Foo {
        fn name(&self) -> &'static str {
            "foo"
        }
    }

    #[test]
    fn test_assign_and_get() {
        let mut context = Context::new("Service", Overrides::new());
        let foo: Arc<dyn Named> = Arc::new(Foo);

        assert!(!context.assign("foo", foo.clone()));
        assert!(context.assign("foo", foo.clone()));

        assert!(Arc::ptr_eq(&context.get::<dyn Named>("foo").unwrap(), &foo));
        assert!(context.contains("foo"));
        assert_eq!(context.properties().collect::<Vec<_>>(), ["foo"]);
    }

    #[test]
    fn test_properties_in_assignment_order() {
        let mut context = Context::new("Service", Overrides::new());

        context.assign::<dyn Named>("zeta", Arc::new(Foo));
        context.assign::<dyn Named>("alpha", Arc::new(Foo));
        context.assign::<dyn Named>("zeta", Arc::new(Foo));

        assert_eq!(context.properties().collect::<Vec<_>>(), ["zeta", "alpha"]);
    }

    #[test]
    fn test_get_errors() {
        let mut context = Context::new("Service", Overrides::new());
        context.assign::<dyn Named>("foo", Arc::new(Foo));

        assert!(matches!(
            context.get::<dyn Named>("bar"),
            Err(ResolveErrorKind::NoDependency {
                prototype: "Service",
                property: "bar",
            })
        ));
        assert!(matches!(
            context.get::<Foo>("foo"),
            Err(ResolveErrorKind::IncorrectType { class: "foo", .. })
        ));
    }
}
