#![cfg_attr(not(test), no_std)]

extern crate alloc;

#[macro_use]
pub(crate) mod macros;

pub(crate) mod any;
pub(crate) mod class;
pub(crate) mod context;
pub(crate) mod defaults;
pub(crate) mod dependency_resolver;
pub(crate) mod errors;
pub(crate) mod inject;
pub(crate) mod instantiator;
pub(crate) mod metadata;
pub(crate) mod mixin;
pub(crate) mod module;
pub(crate) mod overrides;
pub(crate) mod prototype;

pub use any::TypeInfo;
pub use class::{Class, ClassKind, Replacement};
pub use context::Context;
pub use defaults::{clear_defaults, get_default, has_default, set_default};
pub use errors::{InstantiateErrorKind, ResolveErrorKind};
pub use inject::Registrar;
pub use instantiator::instance;
pub use mixin::Mixin;
pub use module::Module;
pub use overrides::Overrides;
pub use prototype::{chain, inherits, Object, Prototype, PrototypeRef};
