pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    auth::{
        auth::{login, me, sign_up},
        login_request::LoginRequest,
        session_response::SessionResponse,
        sign_up_request::SignUpRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::current_user::CurrentUser,
    users::{
        update_user_request::UpdateUserRequest, user_dto::UserDto, user_response::UserResponse,
        users::update_me,
    },
};
pub use app_state::AppState;
pub use routes::build_router;
