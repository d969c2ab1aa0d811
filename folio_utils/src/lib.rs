pub use folio_utils_derive::trace_instrument;

/// Version string reported by the CLI and sent in the `User-Agent` header.
pub fn folio_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[macro_export]
macro_rules! assert_matches {
    ($expr:expr, $pat:pat) => {
        match ($expr) {
            $pat => (),
            val => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    };
    ($expr:expr, $pat:pat if $pred:expr) => {{
        let val = $expr;
        match (&val) {
            $pat if $pred => (),
            #[allow(unused_variables)]
            $pat => ::core::panic!(
                "Assertion failed: Value {val:?} does not match predicate {}",
                ::core::stringify!($pred)
            ),
            _ => ::core::panic!(
                "Assertion failed: Value {val:?} did not match pattern {}",
                ::core::stringify!($pat)
            ),
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn version_is_not_empty() {
        assert!(!super::folio_version().is_empty());
    }

    #[test]
    fn assert_matches_with_predicate() {
        assert_matches!(Some(3), Some(x) if *x > 2);
    }

    #[test]
    #[should_panic = "did not match pattern"]
    fn assert_matches_mismatch() {
        assert_matches!(None::<i32>, Some(_));
    }
}
