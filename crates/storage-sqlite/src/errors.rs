//! rusqlite → core error conversion helpers.

use wonfolio_core::errors::{DatabaseError, Error};

pub(crate) fn connection_failed(err: rusqlite::Error) -> Error {
    Error::Database(DatabaseError::ConnectionFailed(err.to_string()))
}

pub(crate) fn migration_failed(err: rusqlite::Error) -> Error {
    Error::Database(DatabaseError::MigrationFailed(err.to_string()))
}

pub(crate) fn query_failed(err: rusqlite::Error) -> Error {
    Error::Database(DatabaseError::QueryFailed(err.to_string()))
}

/// A stored value no longer parses into its domain type.
pub(crate) fn corrupt_row(detail: impl Into<String>) -> Error {
    Error::Database(DatabaseError::Internal(detail.into()))
}
