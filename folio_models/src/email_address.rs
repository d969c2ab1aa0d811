use std::sync::LazyLock;

use regex::Regex;

use crate::macros::nutype_string;

/// The "valid email address" production browsers apply to
/// `<input type=email>`.
pub static EMAIL_ADDRESS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

nutype_string!(EmailAddress(validate(regex = EMAIL_ADDRESS_REGEX)));

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid() {
        for email in [
            "ann@example.com",
            "max.mustermann@example.de",
            "a+tag@sub.domain.org",
            "user@localhost",
        ] {
            assert!(EmailAddress::try_new(email).is_ok(), "{email}");
        }
    }

    #[test]
    fn invalid() {
        for email in [
            "",
            "invalid-email",
            "@example.com",
            "ann@",
            "ann@@example.com",
            "ann lee@example.com",
            "ann@-example.com",
            " ann@example.com",
        ] {
            assert!(EmailAddress::try_new(email).is_err(), "{email:?}");
        }
    }
}
