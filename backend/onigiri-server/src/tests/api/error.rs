use crate::ApiError;

use onigiri_auth::AuthError;
use onigiri_core::{DirectoryError, ErrorLocation};

use std::panic::Location;

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use uuid::Uuid;

async fn render(error: ApiError) -> (StatusCode, serde_json::Value, Option<String>) {
    let response = error.into_response();
    let status = response.status();
    let challenge = response
        .headers()
        .get(header::WWW_AUTHENTICATE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap(), challenge)
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::from(AuthError::validation("Email cannot be empty", Some("email")));

    let (status, json, _) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["message"], "Email cannot be empty");
    assert_eq!(json["error"]["field"], "email");
}

#[tokio::test]
async fn test_email_in_use_returns_409() {
    let (status, json, _) = render(AuthError::EmailInUse.into()).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "EMAIL_IN_USE");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_invalid_credentials_returns_401_with_bearer_challenge() {
    let (status, json, challenge) = render(AuthError::InvalidCredentials.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "INVALID_CREDENTIALS");
    assert_eq!(json["error"]["message"], "Incorrect email or password");
    assert_eq!(challenge.as_deref(), Some("Bearer"));
}

#[tokio::test]
async fn test_expired_token_returns_401_token_expired() {
    let error = AuthError::TokenExpired {
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json, _) = render(error.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "TOKEN_EXPIRED");
}

#[tokio::test]
async fn test_provider_not_found_returns_404() {
    let error = AuthError::ProviderNotFound {
        name: "nonexistent-provider".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json, _) = render(error.into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "PROVIDER_NOT_FOUND");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("nonexistent-provider")
    );
}

#[tokio::test]
async fn test_transform_not_found_returns_422() {
    let error = AuthError::TransformNotFound {
        name: "no-such-transform".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json, _) = render(error.into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "TRANSFORM_NOT_FOUND");
}

#[tokio::test]
async fn test_user_not_found_returns_404() {
    let error = AuthError::UserNotFound {
        id: Uuid::new_v4(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json, _) = render(error.into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "USER_NOT_FOUND");
}

#[tokio::test]
async fn test_directory_failure_returns_500_without_details() {
    let error = AuthError::from(DirectoryError::Backend {
        message: "disk I/O error at /var/lib/onigiri.db".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    let (status, json, _) = render(error.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"]["message"], "Internal server error");
    assert!(!json.to_string().contains("disk I/O"));
}

#[tokio::test]
async fn test_bad_request_returns_400() {
    let error = ApiError::BadRequest {
        message: "expected JSON".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json, challenge) = render(error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert!(challenge.is_none());
}
