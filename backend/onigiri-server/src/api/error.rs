//! REST API error types
//!
//! Every failure leaves the server as `{"error": {code, message, field?}}`.
//! Auth failures carry the auth layer's stable code and its client-safe
//! message; internal details stay in the log.

use onigiri_auth::AuthError;

use std::panic::Location;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

/// Inner error body with code, message, and optional field
#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "EMAIL_IN_USE", "VALIDATION_ERROR")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Field name if this is a validation error for a specific field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Failure reported by the auth core; status derived from its code
    #[error("{source}")]
    Auth {
        #[from]
        source: AuthError,
    },

    /// Unparseable request body (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth { source } => auth_status(source),
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

fn auth_status(err: &AuthError) -> StatusCode {
    match err {
        AuthError::Validation { .. } => StatusCode::BAD_REQUEST,
        AuthError::EmailInUse => StatusCode::CONFLICT,
        AuthError::InvalidCredentials
        | AuthError::TokenInvalid { .. }
        | AuthError::TokenExpired { .. } => StatusCode::UNAUTHORIZED,
        AuthError::ProviderNotFound { .. } | AuthError::UserNotFound { .. } => {
            StatusCode::NOT_FOUND
        }
        AuthError::TransformNotFound { .. } | AuthError::InvalidTransformParams { .. } => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AuthError::InvalidProviderConfig { .. }
        | AuthError::InvalidSigningKey { .. }
        | AuthError::Hashing { .. }
        | AuthError::TokenSigning { .. }
        | AuthError::Directory { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::debug!("Request rejected ({}): {}", status, self);
        }

        let body = match &self {
            ApiError::Auth { source } => ApiErrorBody {
                code: source.error_code().into(),
                message: source.client_message(),
                field: source.field(),
            },
            ApiError::BadRequest { message, .. } => ApiErrorBody {
                code: "BAD_REQUEST".into(),
                message: message.clone(),
                field: None,
            },
        };

        let mut response = (status, Json(ApiErrorResponse { error: body })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

/// Malformed or missing JSON bodies
impl From<JsonRejection> for ApiError {
    #[track_caller]
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest {
            message: rejection.body_text(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
