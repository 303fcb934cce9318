use crate::ErrorLocation;

use std::result::Result as StdResult;

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid provider kind: {value} {location}")]
    InvalidProviderKind {
        value: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;

/// Failures reported by a [`crate::UserDirectory`] implementation.
///
/// The auth layer treats everything except `NotFound` and `EmailTaken` as an
/// infrastructure failure.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("User {id} not found {location}")]
    NotFound { id: Uuid, location: ErrorLocation },

    /// Unique-email constraint rejected a write.
    #[error("Email already registered {location}")]
    EmailTaken { location: ErrorLocation },

    #[error("Directory backend failure: {message} {location}")]
    Backend {
        message: String,
        location: ErrorLocation,
    },
}

pub type DirectoryResult<T> = StdResult<T, DirectoryError>;
