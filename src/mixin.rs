use alloc::sync::Arc;
use core::ops::{Deref, DerefMut};
use tracing::debug;

use crate::{
    context::Context,
    errors::ResolveErrorKind,
    module::{build, Module},
    overrides::Overrides,
    prototype::Prototype,
};

/// Grants module capability to `T` without changing its chain.
///
/// `T` is built with [`Default`] first, then the dependencies declared in its chain are resolved.
/// The mixin is a [`Module`] whose base is `T`, so `T` and all its bases stay in the chain
/// and the mixin reports `T`'s name.
///
/// # Examples
/// ```rust
/// use protodi::{Class, Mixin, Module, Object, Prototype, Registrar};
///
/// #[derive(Default)]
/// struct Clock;
///
/// #[derive(Default)]
/// struct Legacy {
///     id: u32,
/// }
///
/// impl Prototype for Legacy {
///     type Base = Object;
///
///     fn declare(registrar: &mut Registrar) {
///         registrar.inject("clock", || Class::<Clock>::plain::<Clock>(|clock| clock));
///     }
/// }
///
/// let legacy = Mixin::<Legacy>::instantiate().unwrap();
///
/// assert_eq!(legacy.id, 0);
/// assert!(legacy.dependency::<Clock>("clock").is_ok());
/// assert!(protodi::inherits::<Mixin<Legacy>, Legacy>());
/// ```
pub struct Mixin<T> {
    inner: T,
    context: Context,
}

impl<T> Mixin<T> {
    #[inline]
    fn from_parts(inner: T, context: Context) -> Self {
        Self { inner, context }
    }

    /// Gets the value injected into `property`
    ///
    /// # Errors
    /// See [`Context::get`].
    #[inline]
    pub fn dependency<I: ?Sized + Send + Sync + 'static>(&self, property: &'static str) -> Result<Arc<I>, ResolveErrorKind> {
        self.context.get(property)
    }

    #[inline]
    #[must_use]
    pub const fn context(&self) -> &Context {
        &self.context
    }

    #[inline]
    #[must_use]
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Prototype> Prototype for Mixin<T> {
    type Base = T;

    #[inline]
    fn name() -> &'static str {
        T::name()
    }
}

impl<T> Module for Mixin<T>
where
    T: Prototype + Default + Send + Sync,
{
    /// Builds `T` after the dependencies are resolved.
    /// [`Mixin::di`] builds it before resolution instead.
    #[inline]
    fn construct(context: Context) -> Result<Self, ResolveErrorKind> {
        Ok(Self::from_parts(T::default(), context))
    }

    #[inline]
    fn overrides(&self) -> &Overrides {
        self.context.overrides()
    }

    fn di(overrides: Overrides) -> Result<Self, ResolveErrorKind> {
        let inner = T::default();
        debug!(mixin = T::name(), "Inner constructed");

        build::<Self>(overrides, |context| Ok(Self::from_parts(inner, context)))
    }
}

impl<T> Deref for Mixin<T> {
    type Target = T;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<T> DerefMut for Mixin<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}
