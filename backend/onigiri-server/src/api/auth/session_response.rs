use crate::UserDto;

use onigiri_auth::AuthSession;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserDto,
    pub token: String,
}

impl From<AuthSession> for SessionResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.into(),
            token: session.token,
        }
    }
}
