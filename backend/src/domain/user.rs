//! User profiles and the authenticated principal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use super::ids::UserId;

/// Maximum accepted length for a first or last name.
pub const NAME_MAX: usize = 100;

/// Validation errors raised by user value types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("email must not be empty")]
    EmptyEmail,
    #[error("email must contain a local part and a domain")]
    MalformedEmail,
    #[error("{field} must not be empty")]
    EmptyName { field: &'static str },
    #[error("{field} must be at most {max} characters")]
    NameTooLong { field: &'static str, max: usize },
    #[error("update must change at least one field")]
    EmptyPatch,
}

/// Lower-cased email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    ///
    /// Only the shape is checked; deliverability is the identity provider's
    /// concern.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && domain.contains('.') && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_lowercase()))
            }
            _ => Err(UserValidationError::MalformedEmail),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// First or last name of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name; `field` labels the error message.
    pub fn new(field: &'static str, raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName { field });
        }
        if trimmed.chars().count() > NAME_MAX {
            return Err(UserValidationError::NameTooLong {
                field,
                max: NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stored user profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Principal view of this profile.
    #[must_use]
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id,
            email: self.email.clone(),
            is_admin: self.is_admin,
        }
    }
}

/// Profile fields captured at registration, before a row exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub id: UserId,
    pub email: Email,
    pub first_name: PersonName,
    pub last_name: PersonName,
}

/// Partial profile update. `is_admin` is only honoured on admin paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<PersonName>,
    pub last_name: Option<PersonName>,
    pub is_admin: Option<bool>,
}

impl UserPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.is_admin.is_none()
    }

    /// Copy of the patch without the admin flag.
    #[must_use]
    pub fn without_admin_flag(self) -> Self {
        Self {
            is_admin: None,
            ..self
        }
    }
}

/// Authenticated identity making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: UserId,
    pub email: Email,
    pub is_admin: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", UserValidationError::EmptyEmail)]
    #[case("   ", UserValidationError::EmptyEmail)]
    #[case("no-at-sign", UserValidationError::MalformedEmail)]
    #[case("@example.com", UserValidationError::MalformedEmail)]
    #[case("user@localhost", UserValidationError::MalformedEmail)]
    #[case("a@b@c.com", UserValidationError::MalformedEmail)]
    fn rejects_bad_emails(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Email::new(raw), Err(expected));
    }

    #[test]
    fn normalises_email_case_and_whitespace() {
        let email = Email::new("  Ada@Example.COM ").expect("valid email");
        assert_eq!(email.as_str(), "ada@example.com");
    }

    #[rstest]
    #[case("")]
    #[case("  ")]
    fn rejects_blank_names(#[case] raw: &str) {
        assert_eq!(
            PersonName::new("first_name", raw),
            Err(UserValidationError::EmptyName { field: "first_name" })
        );
    }

    #[test]
    fn rejects_overlong_names() {
        let raw = "x".repeat(NAME_MAX + 1);
        assert_eq!(
            PersonName::new("last_name", raw),
            Err(UserValidationError::NameTooLong {
                field: "last_name",
                max: NAME_MAX
            })
        );
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            is_admin: Some(true),
            ..UserPatch::default()
        };
        assert!(!patch.is_empty());
        assert!(patch.without_admin_flag().is_empty());
    }
}
