//! Shared Diesel error classification for the box office repositories.
//!
//! Each repository owns its port error type; this module sorts raw pool and
//! Diesel failures into the handful of cases those types distinguish, and
//! logs the driver detail at debug level so it never reaches a response.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse classification of a failed database call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DbFailure {
    /// The connection dropped or could not be obtained.
    Connection(String),
    /// A unique constraint rejected the write.
    Duplicate(String),
    /// A foreign key rejected the write or delete.
    Referenced(String),
    /// A row-level security policy rejected the write.
    Policy(String),
    /// Anything else, including statement timeouts.
    Query(String),
}

/// Extract a readable message from a pool error.
pub(crate) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Sort a Diesel error into a [`DbFailure`].
pub(crate) fn classify_diesel_error(error: DieselError) -> DbFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DbFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => DbFailure::Query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DbFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DbFailure::Duplicate(constraint_label(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DbFailure::Referenced(constraint_label(info.constraint_name()))
        }
        DieselError::DatabaseError(_, info) if is_policy_message(info.message()) => {
            DbFailure::Policy("row-level security policy violation".to_owned())
        }
        DieselError::DatabaseError(_, info) if is_timeout_message(info.message()) => {
            DbFailure::Query("statement timeout".to_owned())
        }
        _ => DbFailure::Query("database error".to_owned()),
    }
}

fn constraint_label(constraint: Option<&str>) -> String {
    constraint.map_or_else(|| "constraint violation".to_owned(), str::to_owned)
}

fn is_policy_message(message: &str) -> bool {
    message.to_lowercase().contains("row-level security")
}

fn is_timeout_message(message: &str) -> bool {
    message.to_lowercase().contains("statement timeout")
}
