use alloc::collections::BTreeMap;
use parking_lot::{const_rwlock, RwLock};
use tracing::debug;

use crate::{
    any,
    class::{Class, Replacement},
    errors::ResolveErrorKind,
};

/// Process-wide replacements, consulted when the overrides of a construction have no entry for a class
static DEFAULTS: RwLock<any::Map> = const_rwlock(BTreeMap::new());

/// Sets the replacement used by default wherever `class` is requested.
///
/// By default each injected dependency is a new instance of its declared class.
/// This replaces the class with another one, or with a value that is injected as-is.
/// Overrides passed to [`crate::Module::di`] or [`crate::Module::init_dependency`] take precedence.
///
/// Like [`crate::Overrides::set`], the default is kept for the interface `I` of `class` only.
pub fn set_default<I>(class: Class<I>, replacement: Replacement<I>)
where
    I: ?Sized + Send + Sync + 'static,
{
    debug!(dependency = class.name, "Default set");
    DEFAULTS.write().insert(class.type_info, replacement.erase());
}

/// Gets the default replacement of `class`
///
/// # Errors
/// Returns [`ResolveErrorKind::IncorrectType`] if the default is viewed as another interface.
pub fn get_default<I>(class: &Class<I>) -> Result<Option<Replacement<I>>, ResolveErrorKind>
where
    I: ?Sized + Send + Sync + 'static,
{
    let erased = DEFAULTS.read().get(&class.type_info).cloned();
    erased.map(|erased| Replacement::from_erased(class, &erased)).transpose()
}

#[must_use]
pub fn has_default<I: ?Sized>(class: &Class<I>) -> bool {
    DEFAULTS.read().contains_key(&class.type_info)
}

/// Removes all defaults.
///
/// Defaults live for the process lifetime, so tests should clear them between independent cases.
pub fn clear_defaults() {
    let mut defaults = DEFAULTS.write();
    debug!(count = defaults.len(), "Defaults cleared");
    defaults.clear();
}
