//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors own the rules; these helpers only turn their typed
//! failures into `invalid_request` errors with a `field` and `code` in
//! `details` so clients can point at the offending input.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    AuthValidationError, Error, IdParseError, OfferValidationError, UserValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    EmptyValue,
    Malformed,
    TooLong,
    TooShort,
    OutOfRange,
    EmptyUpdate,
}

impl ErrorCode {
    const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::EmptyValue => "empty_value",
            Self::Malformed => "malformed",
            Self::TooLong => "too_long",
            Self::TooShort => "too_short",
            Self::OutOfRange => "out_of_range",
            Self::EmptyUpdate => "empty_update",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    const fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: &str, code: ErrorCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

/// Parse a path segment into one of the typed identifiers.
pub(crate) fn parse_id<T>(value: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = IdParseError>,
{
    value
        .parse()
        .map_err(|_| invalid_uuid_error(field, value))
}

/// Error for a body that carries no updatable field.
pub(crate) fn empty_update_error() -> Error {
    field_error(
        "body",
        ErrorCode::EmptyUpdate,
        "update must change at least one field",
    )
}

pub(crate) fn map_user_validation_error(error: UserValidationError) -> Error {
    let message = error.to_string();
    match error {
        UserValidationError::EmptyEmail => field_error("email", ErrorCode::EmptyValue, message),
        UserValidationError::MalformedEmail => field_error("email", ErrorCode::Malformed, message),
        UserValidationError::EmptyName { field } => {
            field_error(field, ErrorCode::EmptyValue, message)
        }
        UserValidationError::NameTooLong { field, .. } => {
            field_error(field, ErrorCode::TooLong, message)
        }
        UserValidationError::EmptyPatch => empty_update_error(),
    }
}

pub(crate) fn map_auth_validation_error(error: AuthValidationError) -> Error {
    let message = error.to_string();
    match error {
        AuthValidationError::User(inner) => map_user_validation_error(inner),
        AuthValidationError::EmptyPassword => {
            field_error("password", ErrorCode::EmptyValue, message)
        }
        AuthValidationError::PasswordTooShort { .. } => {
            field_error("password", ErrorCode::TooShort, message)
        }
        AuthValidationError::EmptyToken => Error::unauthorized("missing bearer token"),
    }
}

pub(crate) fn map_offer_validation_error(error: OfferValidationError) -> Error {
    let message = error.to_string();
    match error {
        OfferValidationError::EmptyName => field_error("name", ErrorCode::EmptyValue, message),
        OfferValidationError::NameTooLong { .. } => {
            field_error("name", ErrorCode::TooLong, message)
        }
        OfferValidationError::EmptyCategory => {
            field_error("type", ErrorCode::EmptyValue, message)
        }
        OfferValidationError::ZeroCapacity | OfferValidationError::CapacityTooLarge { .. } => {
            field_error("max_attendees", ErrorCode::OutOfRange, message)
        }
        OfferValidationError::Price(_) => field_error("price", ErrorCode::OutOfRange, message),
        OfferValidationError::EmptyPatch => empty_update_error(),
    }
}
