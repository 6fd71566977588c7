use alloc::{collections::BTreeMap, sync::Arc};
use core::{
    any::{type_name, Any, TypeId},
    cmp::Ordering,
};

/// Identity of a class. Compared by [`TypeId`] only, so two types sharing a name are distinct.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    pub name: &'static str,
    pub id: TypeId,
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl PartialOrd for TypeInfo {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeInfo {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl TypeInfo {
    #[inline]
    #[must_use]
    pub fn of<T>() -> Self
    where
        T: ?Sized + 'static,
    {
        Self {
            name: type_name::<T>(),
            id: TypeId::of::<T>(),
        }
    }

    /// Type name without its module path.
    ///
    /// Generic arguments are kept, so `a::Wrapper<b::Inner>` becomes `Wrapper<b::Inner>`.
    #[inline]
    #[must_use]
    pub fn short_name(&self) -> &'static str {
        let name = self.name;
        let path = name.split_once('<').map_or(name, |(path, _)| path);
        match path.rsplit_once("::") {
            Some((module, _)) => &name[module.len() + 2..],
            None => name,
        }
    }
}

pub(crate) type Erased = Arc<dyn Any + Send + Sync>;

pub(crate) type Map = BTreeMap<TypeInfo, Erased>;
