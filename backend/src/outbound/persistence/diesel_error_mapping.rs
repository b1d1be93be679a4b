//! Classification of Diesel failures shared by every repository.
//!
//! Repositories call [`classify_diesel_error`] and translate the resulting
//! [`StoreFailure`] into their own port error, so the connection/query split
//! and the logging stay identical across adapters.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse outcome of a failed database call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The connection dropped; the caller may retry later.
    Connection(String),
    /// A unique constraint rejected the write. Carries the constraint name
    /// when the server reported one.
    UniqueViolation(Option<String>),
    /// Any other failure.
    Query(String),
}

/// Classify a Diesel error, logging the raw cause at `debug`.
pub(crate) fn classify_diesel_error(error: DieselError, operation: &'static str) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(operation, ?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            operation,
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => StoreFailure::Query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::UniqueViolation(info.constraint_name().map(str::to_owned))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        _ => StoreFailure::Query("database error".to_owned()),
    }
}
