/// Builds [`crate::Overrides`] from entries in order, later entries for the same class win.
///
/// # Syntax
/// ```text
/// overrides![
///     class(key, replacement_class),
///     instance(key, value),
/// ]
/// ```
///
/// # Examples
/// ```rust
/// use protodi::{overrides, Class};
/// use std::sync::Arc;
///
/// trait Clock: Send + Sync {
///     fn now(&self) -> u64;
/// }
///
/// #[derive(Default)]
/// struct SystemClock;
///
/// impl Clock for SystemClock {
///     fn now(&self) -> u64 {
///         1
///     }
/// }
///
/// struct FixedClock(u64);
///
/// impl Clock for FixedClock {
///     fn now(&self) -> u64 {
///         self.0
///     }
/// }
///
/// fn clock() -> Class<dyn Clock> {
///     Class::plain::<SystemClock>(|clock| clock)
/// }
///
/// let overrides = overrides![instance(clock(), Arc::new(FixedClock(42)))];
/// assert_eq!(overrides.len(), 1);
/// ```
#[macro_export]
macro_rules! overrides {
    ( $( $entries:tt )* ) => {{
        #[allow(unused_mut)]
        let mut overrides = $crate::Overrides::new();
        $crate::overrides_internal! { @entries overrides [ $($entries)* ] }
        overrides
    }};
}

#[macro_export]
#[doc(hidden)]
macro_rules! overrides_internal {
    // === Base case ===
    (@entries $overrides:ident []) => {};

    // === Class replacement ===
    // Example: overrides_internal! { @entries overrides [ class(foo(), foo_stub()) ] }
    (@entries $overrides:ident [ class($key:expr, $replacement:expr $(,)?) $(, $($rest:tt)*)? ]) => {
        $overrides = $overrides.with_class($key, $replacement);
        $crate::overrides_internal! { @entries $overrides [ $($($rest)*)? ] }
    };

    // === Instance replacement ===
    // Example: overrides_internal! { @entries overrides [ instance(foo(), Arc::new(FooStub)) ] }
    (@entries $overrides:ident [ instance($key:expr, $value:expr $(,)?) $(, $($rest:tt)*)? ]) => {
        $overrides = $overrides.with_instance($key, $value);
        $crate::overrides_internal! { @entries $overrides [ $($($rest)*)? ] }
    };
}
