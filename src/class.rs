use alloc::sync::Arc;
use core::{any::type_name, fmt};
use tracing::{debug, error};

use crate::{
    any::{Erased, TypeInfo},
    errors::ResolveErrorKind,
    instantiator::{boxed_module_instantiator, boxed_plain_instantiator, BoxedInstantiator},
    mixin::Mixin,
    module::Module,
    overrides::Overrides,
    prototype::Prototype,
};

/// Capability of a class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Built with no arguments, its own dependencies (if any) aren't resolved
    Plain,
    /// Built with the override map of the construction that requested it
    Module,
}

/// Descriptor of a concrete type `T` viewed as the interface `I` a property is typed with.
///
/// Identity of the descriptor is the identity of `T`: two descriptors of the same type
/// are the same override key regardless of how they were created.
///
/// # Examples
/// ```rust
/// use protodi::Class;
/// use std::sync::Arc;
///
/// trait Storage: Send + Sync {}
///
/// #[derive(Default)]
/// struct MemoryStorage;
///
/// impl Storage for MemoryStorage {}
///
/// fn storage() -> Class<dyn Storage> {
///     Class::plain::<MemoryStorage>(|storage| storage)
/// }
///
/// assert_eq!(storage().name(), "MemoryStorage");
/// ```
pub struct Class<I: ?Sized> {
    pub(crate) type_info: TypeInfo,
    pub(crate) name: &'static str,
    pub(crate) kind: ClassKind,
    instantiator: BoxedInstantiator<I>,
}

impl<I: ?Sized> Clone for Class<I> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            type_info: self.type_info,
            name: self.name,
            kind: self.kind,
            instantiator: self.instantiator.clone(),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Class<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("interface", &type_name::<I>())
            .finish()
    }
}

impl<I: ?Sized + 'static> Class<I> {
    /// Describes a type without module capability. It's built with [`Default`].
    #[inline]
    #[must_use]
    pub fn plain<T>(upcast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        T: Default + Send + Sync + 'static,
    {
        let type_info = TypeInfo::of::<T>();
        Self {
            type_info,
            name: type_info.short_name(),
            kind: ClassKind::Plain,
            instantiator: boxed_plain_instantiator(upcast),
        }
    }

    /// Describes a module. It's built with [`Module::di`], so overrides flow into its own dependencies.
    #[inline]
    #[must_use]
    pub fn module<M>(upcast: fn(Arc<M>) -> Arc<I>) -> Self
    where
        M: Module,
    {
        Self {
            type_info: TypeInfo::of::<M>(),
            name: M::name(),
            kind: ClassKind::Module,
            instantiator: boxed_module_instantiator(upcast),
        }
    }

    /// Describes `T` with module capability granted by [`Mixin`].
    #[inline]
    #[must_use]
    pub fn mixin<T>(upcast: fn(Arc<Mixin<T>>) -> Arc<I>) -> Self
    where
        T: Prototype + Default + Send + Sync,
    {
        Self::module::<Mixin<T>>(upcast)
    }
}

impl<I: ?Sized> Class<I> {
    #[inline]
    #[must_use]
    pub const fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// Display name of the described type
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ClassKind {
        self.kind
    }

    #[inline]
    #[must_use]
    pub fn is_module(&self) -> bool {
        self.kind == ClassKind::Module
    }

    #[inline]
    pub(crate) fn instantiate(&self, overrides: &Overrides) -> Result<Arc<I>, ResolveErrorKind> {
        (self.instantiator)(overrides)
    }
}

/// What satisfies a dependency in place of its declared class
pub enum Replacement<I: ?Sized> {
    /// Another class, instantiated on each injection
    Class(Class<I>),
    /// A ready-made value, injected as-is
    Instance(Arc<I>),
}

impl<I: ?Sized> Clone for Replacement<I> {
    #[inline]
    fn clone(&self) -> Self {
        match self {
            Self::Class(class) => Self::Class(class.clone()),
            Self::Instance(value) => Self::Instance(value.clone()),
        }
    }
}

impl<I: ?Sized> fmt::Debug for Replacement<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class(class) => f.debug_tuple("Class").field(class).finish(),
            Self::Instance(_) => f.debug_tuple("Instance").field(&type_name::<I>()).finish(),
        }
    }
}

impl<I: ?Sized> From<Class<I>> for Replacement<I> {
    #[inline]
    fn from(class: Class<I>) -> Self {
        Self::Class(class)
    }
}

impl<I: ?Sized> From<Arc<I>> for Replacement<I> {
    #[inline]
    fn from(value: Arc<I>) -> Self {
        Self::Instance(value)
    }
}

impl<I: ?Sized> Replacement<I> {
    /// Produces the value to inject.
    /// A class is built (recursively resolved if it's a module), an instance is shared.
    pub(crate) fn instantiate(&self, overrides: &Overrides) -> Result<Arc<I>, ResolveErrorKind> {
        match self {
            Self::Class(class) => class.instantiate(overrides),
            Self::Instance(value) => {
                debug!("Injected as-is");
                Ok(value.clone())
            }
        }
    }
}

impl<I: ?Sized + Send + Sync + 'static> Replacement<I> {
    #[inline]
    pub(crate) fn erase(self) -> Erased {
        Arc::new(self)
    }

    /// Restores a replacement stored for `class`.
    pub(crate) fn from_erased(class: &Class<I>, erased: &Erased) -> Result<Self, ResolveErrorKind> {
        match erased.downcast_ref::<Self>() {
            Some(replacement) => Ok(replacement.clone()),
            None => {
                let err = ResolveErrorKind::IncorrectType {
                    class: class.name,
                    expected: type_name::<I>(),
                };
                error!("{}", err);
                Err(err)
            }
        }
    }
}
