#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use protodi::{overrides, Class, Context, Mixin, Module, Object, Overrides, Prototype, Registrar, ResolveErrorKind};
use std::sync::Arc;

#[derive(Default)]
struct B(i32);

#[derive(Default)]
struct CAAAAA;

fn b() -> Class<B> {
    Class::plain::<B>(|b| b)
}

fn caaaaa() -> Class<CAAAAA> {
    Class::plain::<CAAAAA>(|caaaaa| caaaaa)
}

macro_rules! nested_module {
    ($name:ident, $property:literal, $dependency:ty, $factory:expr) => {
        struct $name(Arc<$dependency>, Overrides);

        impl Prototype for $name {
            type Base = Object;

            fn declare(registrar: &mut Registrar) {
                registrar.inject($property, $factory);
            }
        }

        impl Module for $name {
            fn construct(context: Context) -> Result<Self, ResolveErrorKind> {
                Ok(Self(context.get($property)?, context.into_overrides()))
            }

            fn overrides(&self) -> &Overrides {
                &self.1
            }
        }
    };
}

nested_module!(CAAAA, "caaaaa", CAAAAA, caaaaa);
nested_module!(CAAA, "caaaa", CAAAA, || Class::<CAAAA>::module::<CAAAA>(|m| m));
nested_module!(CAA, "caaa", CAAA, || Class::<CAAA>::module::<CAAA>(|m| m));
nested_module!(CA, "caa", CAA, || Class::<CAA>::module::<CAA>(|m| m));
nested_module!(C, "ca", CA, || Class::<CA>::module::<CA>(|m| m));

struct A {
    b: Arc<B>,
    c: Arc<C>,
    overrides: Overrides,
}

impl Prototype for A {
    type Base = Object;

    fn declare(registrar: &mut Registrar) {
        registrar.inject("b", b).inject("c", || Class::<C>::module::<C>(|m| m));
    }
}

impl Module for A {
    fn construct(context: Context) -> Result<Self, ResolveErrorKind> {
        Ok(Self {
            b: context.get("b")?,
            c: context.get("c")?,
            overrides: context.into_overrides(),
        })
    }

    fn overrides(&self) -> &Overrides {
        &self.overrides
    }
}

struct Parent;

impl Prototype for Parent {
    type Base = Object;

    fn declare(registrar: &mut Registrar) {
        registrar.inject("b", b).inject("caaaaa", caaaaa);
    }
}

#[derive(Default)]
struct Child;

impl Prototype for Child {
    type Base = Parent;

    fn declare(registrar: &mut Registrar) {
        registrar.inject("b", b);
    }
}

#[inline]
fn module_instantiate() {
    let _ = A::instantiate().unwrap();
}

#[inline]
fn module_di(overrides: Overrides) {
    let _ = A::di(overrides).unwrap();
}

#[inline]
fn module_init_dependency(module: &A) {
    let _ = module
        .init_dependency(Class::<C>::module::<C>(|m| m), Overrides::new())
        .unwrap();
}

#[inline]
fn mixin_instantiate() {
    let _ = Mixin::<Child>::instantiate().unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let module = A::instantiate().unwrap();

    c.bench_function("module_instantiate", |b| b.iter(|| module_instantiate()))
        .bench_function("module_di_with_class", |bencher| {
            bencher.iter(|| module_di(overrides![class(caaaaa(), caaaaa())]))
        })
        .bench_function("module_di_with_instance", |bencher| {
            let value = Arc::new(B(2));
            bencher.iter(|| module_di(overrides![instance(b(), value.clone())]))
        })
        .bench_function("module_init_dependency", |b| b.iter(|| module_init_dependency(&module)))
        .bench_function("mixin_instantiate", |b| b.iter(|| mixin_instantiate()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
