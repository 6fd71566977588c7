use alloc::vec::Vec;
use core::fmt;

use crate::{any::TypeInfo, inject::Registrar};

/// A type that may declare injected properties and inherit the declarations of its base.
///
/// # Examples
/// ```rust
/// use protodi::{Object, Prototype, Registrar};
///
/// struct Repository;
///
/// impl Prototype for Repository {
///     type Base = Object;
/// }
///
/// struct CachedRepository;
///
/// impl Prototype for CachedRepository {
///     type Base = Repository;
/// }
///
/// assert!(protodi::inherits::<CachedRepository, Repository>());
/// ```
pub trait Prototype: 'static {
    /// Prototype whose declarations are inherited. [`Object`] for a chain root.
    type Base: Prototype;

    /// Registers own injected properties. Called once, the first time the prototype is resolved.
    #[inline]
    fn declare(registrar: &mut Registrar) {
        let _ = registrar;
    }

    #[inline]
    #[must_use]
    fn name() -> &'static str {
        TypeInfo::of::<Self>().short_name()
    }
}

/// Universal root of every prototype chain. It's never part of a chain itself.
pub enum Object {}

impl Prototype for Object {
    type Base = Object;
}

/// Runtime descriptor of a [`Prototype`]
#[derive(Clone, Copy)]
pub struct PrototypeRef {
    pub type_info: TypeInfo,
    pub name: &'static str,
    base: fn() -> PrototypeRef,
    pub(crate) declare: fn(&mut Registrar),
}

impl fmt::Debug for PrototypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrototypeRef").field("name", &self.name).finish_non_exhaustive()
    }
}

impl PartialEq for PrototypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.type_info == other.type_info
    }
}

impl Eq for PrototypeRef {}

impl PrototypeRef {
    #[inline]
    #[must_use]
    pub fn of<P: Prototype>() -> Self {
        Self {
            type_info: TypeInfo::of::<P>(),
            name: P::name(),
            base: Self::of::<P::Base>,
            declare: P::declare,
        }
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.type_info == TypeInfo::of::<Object>()
    }

    /// Gets the base prototype, `None` for the root
    #[inline]
    #[must_use]
    pub fn base(&self) -> Option<Self> {
        if self.is_root() {
            None
        } else {
            Some((self.base)())
        }
    }
}

/// Gets the prototype chain from the most-base prototype to `proto` itself, [`Object`] excluded.
#[must_use]
pub fn chain(proto: PrototypeRef) -> Vec<PrototypeRef> {
    let mut chain = Vec::new();
    let mut proto = Some(proto);
    while let Some(current) = proto.filter(|proto| !proto.is_root()) {
        chain.push(current);
        proto = current.base();
    }
    chain.reverse();
    chain
}

/// Checks whether `P` is `A` or has `A` in its chain
#[must_use]
pub fn inherits<P: Prototype, A: Prototype>() -> bool {
    let ancestor = TypeInfo::of::<A>();
    chain(PrototypeRef::of::<P>())
        .iter()
        .any(|proto| proto.type_info == ancestor)
}
