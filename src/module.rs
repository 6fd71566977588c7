use alloc::sync::Arc;
use tracing::{debug, error, info_span};

use crate::{
    class::Class,
    context::Context,
    dependency_resolver::resolve,
    errors::ResolveErrorKind,
    overrides::Overrides,
    prototype::{Prototype, PrototypeRef},
};

/// Unit of injectability.
///
/// Constructing a module resolves every dependency declared in its prototype chain and hands them
/// to [`Module::construct`] in a [`Context`].
///
/// # Examples
/// ```rust
/// use protodi::{Class, Context, Module, Object, Overrides, Prototype, Registrar, ResolveErrorKind};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync {
///     fn greet(&self) -> String;
/// }
///
/// #[derive(Default)]
/// struct English;
///
/// impl Greeter for English {
///     fn greet(&self) -> String {
///         "hello".to_owned()
///     }
/// }
///
/// #[derive(Default)]
/// struct Pirate;
///
/// impl Greeter for Pirate {
///     fn greet(&self) -> String {
///         "ahoy".to_owned()
///     }
/// }
///
/// fn greeter() -> Class<dyn Greeter> {
///     Class::plain::<English>(|greeter| greeter)
/// }
///
/// struct Welcome {
///     greeter: Arc<dyn Greeter>,
///     overrides: Overrides,
/// }
///
/// impl Prototype for Welcome {
///     type Base = Object;
///
///     fn declare(registrar: &mut Registrar) {
///         registrar.inject("greeter", greeter);
///     }
/// }
///
/// impl Module for Welcome {
///     fn construct(context: Context) -> Result<Self, ResolveErrorKind> {
///         Ok(Self {
///             greeter: context.get("greeter")?,
///             overrides: context.into_overrides(),
///         })
///     }
///
///     fn overrides(&self) -> &Overrides {
///         &self.overrides
///     }
/// }
///
/// assert_eq!(Welcome::instantiate().unwrap().greeter.greet(), "hello");
///
/// let welcome = Welcome::di(Overrides::new().with_class(greeter(), Class::plain::<Pirate>(|greeter| greeter))).unwrap();
/// assert_eq!(welcome.greeter.greet(), "ahoy");
/// ```
pub trait Module: Prototype + Send + Sync + Sized {
    /// Builds the module from its resolved dependencies
    ///
    /// # Errors
    /// Any error of user construction code, usually [`ResolveErrorKind::Instantiate`].
    fn construct(context: Context) -> Result<Self, ResolveErrorKind>;

    /// Overrides the module was built with, usually kept from [`Context::into_overrides`].
    ///
    /// [`Module::init_dependency`] propagates them into nested modules.
    fn overrides(&self) -> &Overrides;

    /// Builds the module and injects `overrides` into it and its dependents.
    /// When a dependency isn't overridden, its default or declared class is used.
    ///
    /// # Errors
    /// Returns the first error of resolution or construction in the module graph.
    #[inline]
    fn di(overrides: Overrides) -> Result<Self, ResolveErrorKind> {
        build::<Self>(overrides, Self::construct)
    }

    /// Builds the module without overrides
    ///
    /// # Errors
    /// See [`Module::di`].
    #[inline]
    fn instantiate() -> Result<Self, ResolveErrorKind> {
        Self::di(Overrides::new())
    }

    /// Instantiates a nested module. Overrides of this module are propagated to it,
    /// `overrides` take precedence over them without changing this module's own overrides.
    ///
    /// It's useful to create a module conditionally, which isn't possible with declarations.
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::InvalidDependencyKind`] if `class` isn't a module and has no override.
    #[inline]
    fn init_dependency<I>(&self, class: Class<I>, overrides: Overrides) -> Result<Arc<I>, ResolveErrorKind>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        init_dependency(self.overrides(), class, overrides)
    }
}

/// Resolves the chain of `M` and builds the module from the context with `construct`
pub(crate) fn build<M: Module>(
    overrides: Overrides,
    construct: impl FnOnce(Context) -> Result<M, ResolveErrorKind>,
) -> Result<M, ResolveErrorKind> {
    let span = info_span!("di", module = M::name(), overrides = overrides.len());
    let _guard = span.enter();

    let context = resolve(PrototypeRef::of::<M>(), overrides)?;
    construct(context).map_err(|err| {
        error!("{}", err);
        err
    })
}

pub(crate) fn init_dependency<I>(
    inherited: &Overrides,
    class: Class<I>,
    overrides: Overrides,
) -> Result<Arc<I>, ResolveErrorKind>
where
    I: ?Sized + Send + Sync + 'static,
{
    let span = info_span!("init_dependency", dependency = class.name);
    let _guard = span.enter();

    let mut merged = inherited.clone();
    merged.merge(overrides);

    if let Some(replacement) = merged.get(&class)? {
        debug!("Replaced by override");
        return replacement.instantiate(&merged);
    }

    if !class.is_module() {
        let err = ResolveErrorKind::InvalidDependencyKind { name: class.name };
        error!("{}", err);
        return Err(err);
    }

    class.instantiate(&merged)
}
