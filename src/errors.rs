mod dependency_resolver;
mod instantiate;

pub use dependency_resolver::ResolveErrorKind;
pub use instantiate::InstantiateErrorKind;
