use onigiri_core::{DirectoryError, ErrorLocation};

use std::panic::Location;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    /// Stored row could not be turned back into a domain value.
    #[error("Corrupt row in {table}: {message} {location}")]
    CorruptRow {
        table: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("User not found: {id} {location}")]
    UserNotFound { id: Uuid, location: ErrorLocation },

    #[error("Email already registered {location}")]
    EmailTaken { location: ErrorLocation },
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        let unique_violation = source
            .as_database_error()
            .is_some_and(|db| db.is_unique_violation());

        if unique_violation {
            return Self::EmailTaken {
                location: ErrorLocation::from(Location::caller()),
            };
        }

        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for DirectoryError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        match err {
            DbError::UserNotFound { id, location } => Self::NotFound { id, location },
            DbError::EmailTaken { location } => Self::EmailTaken { location },
            other => Self::Backend {
                message: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
