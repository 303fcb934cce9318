use crate::{AppState, health, login, me, sign_up, update_me};

use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        // Auth
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(me))
        // Users
        .route("/api/users/me", patch(update_me))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
