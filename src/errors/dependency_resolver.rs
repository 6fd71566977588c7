use super::instantiate::InstantiateErrorKind;

#[derive(thiserror::Error, Debug)]
pub enum ResolveErrorKind {
    #[error(
        "\
        '{name}' is not a module. \
        Only a module can be initialized as a nested dependency, \
        make sure the class is described with `Class::module` or wraps the type in `Mixin`\
        "
    )]
    InvalidDependencyKind { name: &'static str },
    #[error("Incorrect replacement type for {class}. Expected a replacement viewed as {expected}")]
    IncorrectType { class: &'static str, expected: &'static str },
    #[error("Dependency `{property}` isn't declared by {prototype} or its bases")]
    NoDependency {
        prototype: &'static str,
        property: &'static str,
    },
    #[error(transparent)]
    Instantiate(#[from] InstantiateErrorKind),
}

impl From<anyhow::Error> for ResolveErrorKind {
    #[inline]
    fn from(err: anyhow::Error) -> Self {
        Self::Instantiate(InstantiateErrorKind::Custom(err))
    }
}
