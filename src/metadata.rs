use alloc::{collections::BTreeMap, sync::Arc, vec::Vec};
use parking_lot::{const_rwlock, RwLock};
use tracing::debug;

use crate::{any::TypeInfo, inject::{Declaration, Registrar}, prototype::PrototypeRef};

/// Own declarations of a prototype
#[derive(Default, Clone)]
pub(crate) struct PrototypeMetadata {
    pub(crate) keys: Vec<&'static str>,
    pub(crate) factories: BTreeMap<&'static str, Arc<dyn Declaration>>,
}

impl PrototypeMetadata {
    pub(crate) fn define(&mut self, property: &'static str, factory: Arc<dyn Declaration>) {
        if self.factories.insert(property, factory).is_none() {
            self.keys.push(property);
        }
    }
}

static METADATA: RwLock<BTreeMap<TypeInfo, PrototypeMetadata>> = const_rwlock(BTreeMap::new());

/// Runs [`crate::Prototype::declare`] of `proto` if it hasn't been run yet.
///
/// The lock isn't held while declaring, concurrent first uses may both declare, only one result is kept.
pub(crate) fn ensure_declared(proto: &PrototypeRef) {
    if METADATA.read().contains_key(&proto.type_info) {
        return;
    }

    let mut registrar = Registrar::new(proto.type_info);
    (proto.declare)(&mut registrar);

    METADATA.write().entry(proto.type_info).or_insert_with(|| {
        debug!(prototype = proto.name, properties = registrar.metadata.keys.len(), "Metadata defined");
        registrar.metadata
    });
}

/// Own declared property names of a prototype in declaration order. Inherited names aren't included.
#[must_use]
pub(crate) fn own_keys(prototype: &TypeInfo) -> Vec<&'static str> {
    METADATA
        .read()
        .get(prototype)
        .map(|metadata| metadata.keys.clone())
        .unwrap_or_default()
}

#[must_use]
pub(crate) fn factory(prototype: &TypeInfo, property: &str) -> Option<Arc<dyn Declaration>> {
    METADATA
        .read()
        .get(prototype)
        .and_then(|metadata| metadata.factories.get(property).cloned())
}

#[cfg(test)]
mod tests {
    use super::{ensure_declared, factory, own_keys};
    use crate::{Class, Object, Prototype, PrototypeRef, Registrar, TypeInfo};

    use core::sync::atomic::{AtomicU8, Ordering};

    static DECLARE_CALL_COUNT: AtomicU8 = AtomicU8::new(0);

    #[derive(Default)]
    struct Dep;

    struct Base;
    struct Derived;

    impl Prototype for Base {
        type Base = Object;

        fn declare(registrar: &mut Registrar) {
            DECLARE_CALL_COUNT.fetch_add(1, Ordering::SeqCst);
            registrar.inject("dep", || Class::<Dep>::plain::<Dep>(|dep| dep));
        }
    }

    impl Prototype for Derived {
        type Base = Base;
    }

    #[test]
    fn test_declared_once() {
        let proto = PrototypeRef::of::<Base>();

        ensure_declared(&proto);
        ensure_declared(&proto);

        assert_eq!(DECLARE_CALL_COUNT.load(Ordering::SeqCst), 1);
        assert_eq!(own_keys(&proto.type_info), ["dep"]);
        assert!(factory(&proto.type_info, "dep").is_some());
        assert!(factory(&proto.type_info, "other").is_none());
    }

    #[test]
    fn test_own_keys_not_inherited() {
        let proto = PrototypeRef::of::<Derived>();
        ensure_declared(&proto);

        assert!(own_keys(&proto.type_info).is_empty());
        assert!(factory(&proto.type_info, "dep").is_none());
        assert!(own_keys(&TypeInfo::of::<Dep>()).is_empty());
    }
}
