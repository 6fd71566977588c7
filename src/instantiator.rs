use alloc::sync::Arc;
use tracing::debug;

use crate::{class::Replacement, errors::ResolveErrorKind, module::Module, overrides::Overrides};

pub(crate) type BoxedInstantiator<I> = Arc<dyn Fn(&Overrides) -> Result<Arc<I>, ResolveErrorKind> + Send + Sync>;

/// Instantiator of a type without module capability. Overrides aren't used, the type is built with [`Default`].
#[must_use]
pub(crate) fn boxed_plain_instantiator<T, I>(upcast: fn(Arc<T>) -> Arc<I>) -> BoxedInstantiator<I>
where
    T: Default + Send + Sync + 'static,
    I: ?Sized + 'static,
{
    Arc::new(move |_overrides: &Overrides| {
        let dependency = upcast(Arc::new(T::default()));

        debug!("Instantiated");

        Ok(dependency)
    })
}

/// Instantiator of a module. Overrides are propagated into the module's own dependencies.
#[must_use]
pub(crate) fn boxed_module_instantiator<M, I>(upcast: fn(Arc<M>) -> Arc<I>) -> BoxedInstantiator<I>
where
    M: Module,
    I: ?Sized + 'static,
{
    Arc::new(move |overrides: &Overrides| {
        let module = M::di(overrides.clone())?;

        debug!("Instantiated");

        Ok(upcast(Arc::new(module)))
    })
}

/// Wrapper to create a replacement that just injects passed value.
/// It can be used when the value was created outside the module graph.
#[inline]
#[must_use]
pub fn instance<I: ?Sized>(value: Arc<I>) -> Replacement<I> {
    Replacement::Instance(value)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::{boxed_module_instantiator, boxed_plain_instantiator, instance};
    use crate::{class::Replacement, Context, Module, Object, Overrides, Prototype, ResolveErrorKind};

    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicU8, Ordering};
    use tracing_test::traced_test;

    static PLAIN_CALL_COUNT: AtomicU8 = AtomicU8::new(0);

    trait Named: Send + Sync {
        fn name(&self) -> &'static str;
    }

    struct Plain;

    impl Default for Plain {
        fn default() -> Self {
            PLAIN_CALL_COUNT.fetch_add(1, Ordering::SeqCst);
            Self
        }
    }

    impl Named for Plain {
        fn name(&self) -> &'static str {
            "plain"
        }
    }

    struct Service {
        overrides: Overrides,
    }

    impl Prototype for Service {
        type Base = Object;
    }

    impl Module for Service {
        fn construct(context: Context) -> Result<Self, ResolveErrorKind> {
            Ok(Self {
                overrides: context.into_overrides(),
            })
        }

        fn overrides(&self) -> &Overrides {
            &self.overrides
        }
    }

    #[test]
    #[traced_test]
    fn test_plain_instantiator() {
        let instantiator = boxed_plain_instantiator::<Plain, dyn Named>(|plain| plain);

        let first = instantiator(&Overrides::new()).unwrap();
        let second = instantiator(&Overrides::new()).unwrap();

        assert_eq!(first.name(), "plain");
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(PLAIN_CALL_COUNT.load(Ordering::SeqCst), 2);
    }

    #[test]
    #[traced_test]
    fn test_module_instantiator_receives_overrides() {
        let instantiator = boxed_module_instantiator::<Service, Service>(|service| service);
        let overrides = Overrides::new().with_instance(crate::Class::<Service>::module::<Service>(|service| service), {
            Arc::new(Service {
                overrides: Overrides::new(),
            })
        });

        let service = instantiator(&overrides).unwrap();

        assert_eq!(service.overrides.len(), 1);
    }

    #[test]
    fn test_instance() {
        let value: Arc<dyn Named> = Arc::new(Plain);
        let Replacement::Instance(injected) = instance(value.clone()) else {
            panic!("Expected an instance replacement");
        };

        assert!(Arc::ptr_eq(&value, &injected));
    }
}
