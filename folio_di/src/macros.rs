/// Define a provider struct.
///
/// Plain fields provide their type by cloning the stored value. A base
/// provider (`..name: Base { A, B, }`) provides the listed types by
/// delegating to `Base`, which also caches what it builds.
///
/// The generated struct has a private `_cache` field that must be
/// initialized with `Default::default()`.
#[macro_export]
macro_rules! provider {
    (@field $provider:ident, $field:ident: $ty:ty) => {
        impl $crate::Build<$provider> for $ty {
            fn build(provider: &mut $provider) -> Self {
                ::core::clone::Clone::clone(&provider.$field)
            }
        }
    };

    (@base $provider:ident, $bfield:ident: $base:ty => $ty:ty) => {
        impl $crate::Build<$provider> for $ty {
            fn build(provider: &mut $provider) -> Self {
                <$base as $crate::Provides<$ty>>::provide(&mut provider.$bfield)
            }
        }
    };

    (
        $(#[doc = $doc:literal])*
        $vis:vis $provider:ident {
            $( $field:ident: $ty:ty, )*
            $( .. $bfield:ident: $base:ty { $($bty:ty,)* } )*
        }
    ) => {
        $(#[doc = $doc])*
        $vis struct $provider {
            _cache: $crate::ServiceCache,
            $( $field: $ty, )*
            $( $bfield: $base, )*
        }

        impl $crate::Provider for $provider {
            fn cache(&mut self) -> &mut $crate::ServiceCache {
                &mut self._cache
            }
        }

        $( $crate::provider!(@field $provider, $field: $ty); )*
        $($( $crate::provider!(@base $provider, $bfield: $base => $bty); )*)*
    };
}
