use onigiri_core::UserIdentity;

use serde::Serialize;
use uuid::Uuid;

/// Public view of a user. Timestamps are RFC 3339.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<UserIdentity> for UserDto {
    fn from(user: UserIdentity) -> Self {
        Self {
            id: user.id,
            display_name: user.display_name,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.map(|dt| dt.to_rfc3339()),
        }
    }
}
