extern crate self as folio_di;

pub use folio_di_derive::Build;
pub use cache::ServiceCache;

mod cache;
mod macros;

/// A container that can build services and caches the ones it has built.
pub trait Provider: Sized {
    fn cache(&mut self) -> &mut ServiceCache;
}

#[diagnostic::on_unimplemented(
    message = "The type `{Self}` cannot be built using the provider `{P}`",
    note = "Add `{Self}` to the provider `{P}` or implement `Build` for `{Self}` and make sure \
            all dependencies are satisfied"
)]
pub trait Build<P: Provider>: Clone + 'static {
    fn build(provider: &mut P) -> Self;
}

pub trait Provides<T>: Provider {
    fn provide(&mut self) -> T;
}

impl<P, T> Provides<T> for P
where
    P: Provider,
    T: Build<P>,
{
    fn provide(&mut self) -> T {
        T::build(self)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use super::*;
    use crate::provider;

    #[derive(Debug, Clone)]
    struct Greeting(&'static str);

    #[derive(Debug, Clone, Build)]
    struct Greeter {
        greeting: Greeting,
        #[state]
        calls: Arc<AtomicUsize>,
    }

    provider! {
        TestProvider { greeting: Greeting, }
    }

    provider! {
        OuterProvider {
            ..inner: TestProvider { Greeting, }
        }
    }

    fn make_provider() -> TestProvider {
        TestProvider {
            _cache: Default::default(),
            greeting: Greeting("hello"),
        }
    }

    #[test]
    fn build_with_dependencies() {
        let mut provider = make_provider();
        let greeter: Greeter = provider.provide();
        assert_eq!(greeter.greeting.0, "hello");
    }

    #[test]
    fn built_services_are_cached() {
        let mut provider = make_provider();
        let a: Greeter = provider.provide();
        let b: Greeter = provider.provide();
        a.calls.fetch_add(1, Ordering::Relaxed);
        assert_eq!(b.calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn built_services_are_stored_in_cache() {
        let mut provider = make_provider();
        assert!(!provider.cache().contains::<Greeter>());

        let _: Greeter = provider.provide();

        assert!(provider.cache().contains::<Greeter>());
    }

    #[test]
    fn delegate_to_base_provider() {
        let mut provider = OuterProvider {
            _cache: Default::default(),
            inner: make_provider(),
        };
        let greeter: Greeter = provider.provide();
        assert_eq!(greeter.greeting.0, "hello");
    }
}
