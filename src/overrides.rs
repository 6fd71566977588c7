use alloc::{collections::BTreeMap, sync::Arc};

use crate::{
    any::{self, TypeInfo},
    class::{Class, Replacement},
    errors::ResolveErrorKind,
};

/// Per-construction substitutions of declared classes, keyed by class identity.
///
/// Cloning is cheap, entries are shared.
#[derive(Clone, Default)]
pub struct Overrides {
    pub(crate) map: any::Map,
}

#[cfg(feature = "debug")]
impl core::fmt::Debug for Overrides {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.map.keys().map(|type_info| type_info.name)).finish()
    }
}

impl Overrides {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    /// Replaces `class` wherever it's requested.
    /// Returns `true` if a previous entry for the same class was replaced.
    ///
    /// There is one entry per class, stored for the interface `I` of `class`.
    /// A property that declares the same class viewed as another interface
    /// (`Class<Disk>` and `Class<dyn Storage>` of one type) doesn't get the replacement,
    /// resolving it fails with [`ResolveErrorKind::IncorrectType`].
    #[inline]
    pub fn set<I>(&mut self, class: Class<I>, replacement: Replacement<I>) -> bool
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.map.insert(class.type_info, replacement.erase()).is_some()
    }

    #[inline]
    #[must_use]
    pub fn with<I>(mut self, class: Class<I>, replacement: Replacement<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.set(class, replacement);
        self
    }

    #[inline]
    #[must_use]
    pub fn with_class<I>(self, class: Class<I>, replacement: Class<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.with(class, Replacement::Class(replacement))
    }

    #[inline]
    #[must_use]
    pub fn with_instance<I>(self, class: Class<I>, value: Arc<I>) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.with(class, Replacement::Instance(value))
    }

    /// Gets the replacement of `class`
    ///
    /// # Errors
    /// Returns [`ResolveErrorKind::IncorrectType`] if the stored replacement is viewed as another interface.
    #[inline]
    pub fn get<I>(&self, class: &Class<I>) -> Result<Option<Replacement<I>>, ResolveErrorKind>
    where
        I: ?Sized + Send + Sync + 'static,
    {
        self.map
            .get(&class.type_info)
            .map(|erased| Replacement::from_erased(class, erased))
            .transpose()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, type_info: &TypeInfo) -> bool {
        self.map.contains_key(type_info)
    }

    /// Merges `other` into `self`. Entries of `other` replace entries of `self` for the same class.
    #[inline]
    pub fn merge(&mut self, other: Overrides) {
        self.map.extend(other.map);
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
