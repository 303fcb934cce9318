use onigiri_core::DirectoryError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;
use uuid::Uuid;

pub const EMAIL_IN_USE_MESSAGE: &str = "Email already in use";
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Incorrect email or password";
const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// Carries no location so the rendered text is identical at every site.
    #[error("{}", EMAIL_IN_USE_MESSAGE)]
    EmailInUse,

    /// Unknown email and wrong password both end here, with identical text.
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Provider not found: {name} {location}")]
    ProviderNotFound {
        name: String,
        location: ErrorLocation,
    },

    #[error("Transform not found: {name} {location}")]
    TransformNotFound {
        name: String,
        location: ErrorLocation,
    },

    #[error("Invalid params for transform '{transform}': {message} {location}")]
    InvalidTransformParams {
        transform: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid provider config '{provider}': {message} {location}")]
    InvalidProviderConfig {
        provider: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid token: {message} {location}")]
    TokenInvalid {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("Invalid signing key: {message} {location}")]
    InvalidSigningKey {
        message: String,
        location: ErrorLocation,
    },

    #[error("User {id} not found {location}")]
    UserNotFound { id: Uuid, location: ErrorLocation },

    #[error("Password hashing failed: {message} {location}")]
    Hashing {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token signing failed: {source} {location}")]
    TokenSigning {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Directory call failed: {source} {location}")]
    Directory {
        #[source]
        source: DirectoryError,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        Self::Validation {
            message: message.into(),
            field: field.map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn token_invalid<S: Into<String>>(message: S) -> Self {
        Self::TokenInvalid {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn hashing<S: Into<String>>(message: S) -> Self {
        Self::Hashing {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Stable machine-readable code for client responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::EmailInUse => "EMAIL_IN_USE",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ProviderNotFound { .. } => "PROVIDER_NOT_FOUND",
            Self::TransformNotFound { .. } => "TRANSFORM_NOT_FOUND",
            Self::InvalidTransformParams { .. } => "INVALID_TRANSFORM_PARAMS",
            Self::InvalidProviderConfig { .. } => "INVALID_PROVIDER_CONFIG",
            Self::TokenInvalid { .. } => "TOKEN_INVALID",
            Self::TokenExpired { .. } => "TOKEN_EXPIRED",
            Self::UserNotFound { .. } => "USER_NOT_FOUND",
            Self::InvalidSigningKey { .. }
            | Self::Hashing { .. }
            | Self::TokenSigning { .. }
            | Self::Directory { .. } => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show a caller. Never includes locations, sources or
    /// anything that distinguishes an unknown email from a wrong password.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::EmailInUse => EMAIL_IN_USE_MESSAGE.to_string(),
            Self::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            Self::ProviderNotFound { name, .. } => format!("Unknown identity provider: {name}"),
            Self::TransformNotFound { name, .. } => format!("Unknown transform: {name}"),
            Self::InvalidTransformParams { transform, message, .. } => {
                format!("Invalid transform '{transform}': {message}")
            }
            Self::InvalidProviderConfig { provider, .. } => {
                format!("Identity provider '{provider}' is misconfigured")
            }
            Self::TokenInvalid { .. } => "Invalid session token".to_string(),
            Self::TokenExpired { .. } => "Session token expired".to_string(),
            Self::UserNotFound { .. } => "User not found".to_string(),
            Self::InvalidSigningKey { .. }
            | Self::Hashing { .. }
            | Self::TokenSigning { .. }
            | Self::Directory { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Field name for validation errors
    pub fn field(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => field.clone(),
            _ => None,
        }
    }

    /// Infrastructure failures: logged, reported generically.
    pub fn is_internal(&self) -> bool {
        self.error_code() == "INTERNAL_ERROR"
    }
}

impl From<DirectoryError> for AuthError {
    #[track_caller]
    fn from(source: DirectoryError) -> Self {
        match source {
            DirectoryError::EmailTaken { .. } => Self::EmailInUse,
            source => Self::Directory {
                source,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
