use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{email_address::EmailAddress, macros::nutype_string};

/// A validated contact message, ready to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub author: ContactMessageAuthor,
    pub subject: ContactMessageSubject,
    pub content: ContactMessageContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessageAuthor {
    pub name: ContactMessageAuthorName,
    pub email: EmailAddress,
}

nutype_string!(ContactMessageAuthorName(validate(
    len_char_min = ContactMessageAuthorName::MIN_LENGTH,
    len_char_max = ContactMessageAuthorName::MAX_LENGTH
)));
impl ContactMessageAuthorName {
    pub const MIN_LENGTH: usize = 2;
    pub const MAX_LENGTH: usize = 100;
}

nutype_string!(ContactMessageSubject(validate(
    len_char_min = ContactMessageSubject::MIN_LENGTH,
    len_char_max = ContactMessageSubject::MAX_LENGTH
)));
impl ContactMessageSubject {
    pub const MIN_LENGTH: usize = 5;
    pub const MAX_LENGTH: usize = 200;
}

// Lengths are counted in Unicode scalar values, like the backend counts them,
// not in the UTF-16 code units a browser form would count.
nutype_string!(ContactMessageContent(validate(
    len_char_min = ContactMessageContent::MIN_LENGTH,
    len_char_max = ContactMessageContent::MAX_LENGTH
)));
impl ContactMessageContent {
    pub const MIN_LENGTH: usize = 10;
    pub const MAX_LENGTH: usize = 2000;
}

/// The in-progress contact form. Fields are plain strings and may hold
/// anything the user typed; [`ContactDraft::validate`] turns a draft into a
/// [`ContactMessage`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }

    /// The length constraint of this field, if it has one.
    pub fn length_bounds(self) -> Option<(usize, usize)> {
        match self {
            Self::Name => Some((
                ContactMessageAuthorName::MIN_LENGTH,
                ContactMessageAuthorName::MAX_LENGTH,
            )),
            Self::Email => None,
            Self::Subject => Some((
                ContactMessageSubject::MIN_LENGTH,
                ContactMessageSubject::MAX_LENGTH,
            )),
            Self::Message => Some((
                ContactMessageContent::MIN_LENGTH,
                ContactMessageContent::MAX_LENGTH,
            )),
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown contact field {0:?}")]
pub struct UnknownContactField(pub String);

impl FromStr for ContactField {
    type Err = UnknownContactField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownContactField(s.into()))
    }
}

impl ContactDraft {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    /// Replace a single field, leaving the others unchanged.
    pub fn set(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        ContactField::ALL
            .into_iter()
            .all(|field| self.get(field).is_empty())
    }

    /// The `current/max` character counter shown below the message field.
    /// Counts Unicode scalar values, so `"👋"` counts as one character.
    pub fn message_counter(&self) -> String {
        format!(
            "{}/{}",
            self.message.chars().count(),
            ContactMessageContent::MAX_LENGTH
        )
    }

    /// Check every field against its constraint. Returns all violations, in
    /// field order.
    pub fn validate(&self) -> Result<ContactMessage, ContactDraftError> {
        let mut violations = Vec::new();

        let name = check(
            &mut violations,
            ContactField::Name,
            &self.name,
            |x| ContactMessageAuthorName::try_new(x),
        );
        let email = check(
            &mut violations,
            ContactField::Email,
            &self.email,
            |x| EmailAddress::try_new(x),
        );
        let subject = check(
            &mut violations,
            ContactField::Subject,
            &self.subject,
            |x| ContactMessageSubject::try_new(x),
        );
        let content = check(
            &mut violations,
            ContactField::Message,
            &self.message,
            |x| ContactMessageContent::try_new(x),
        );

        match (name, email, subject, content) {
            (Some(name), Some(email), Some(subject), Some(content)) => Ok(ContactMessage {
                author: ContactMessageAuthor { name, email },
                subject,
                content,
            }),
            _ => Err(ContactDraftError { violations }),
        }
    }
}

fn check<T, E>(
    violations: &mut Vec<FieldViolation>,
    field: ContactField,
    value: &str,
    parse: impl FnOnce(String) -> Result<T, E>,
) -> Option<T> {
    if value.is_empty() {
        violations.push(FieldViolation {
            field,
            kind: ViolationKind::Missing,
        });
        return None;
    }

    match parse(value.into()) {
        Ok(x) => Some(x),
        Err(_) => {
            let kind = match field.length_bounds() {
                Some((min, _)) if value.chars().count() < min => ViolationKind::TooShort { min },
                Some((_, max)) => ViolationKind::TooLong { max },
                None => ViolationKind::InvalidEmail,
            };
            violations.push(FieldViolation { field, kind });
            None
        }
    }
}

impl From<ContactMessage> for ContactDraft {
    fn from(value: ContactMessage) -> Self {
        Self {
            name: value.author.name.into_inner(),
            email: value.author.email.into_inner(),
            subject: value.subject.into_inner(),
            message: value.content.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", DisplayViolations(.violations))]
pub struct ContactDraftError {
    pub violations: Vec<FieldViolation>,
}

struct DisplayViolations<'a>(&'a [FieldViolation]);

impl fmt::Display for DisplayViolations<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{field} {kind}")]
pub struct FieldViolation {
    pub field: ContactField,
    pub kind: ViolationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidEmail,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "is required"),
            Self::TooShort { min } => write!(f, "must be at least {min} characters long"),
            Self::TooLong { max } => write!(f, "must be at most {max} characters long"),
            Self::InvalidEmail => write!(f, "must be a valid email address"),
        }
    }
}
