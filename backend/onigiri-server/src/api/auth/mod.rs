#[allow(clippy::module_inception)]
pub mod auth;
pub mod login_request;
pub mod session_response;
pub mod sign_up_request;
