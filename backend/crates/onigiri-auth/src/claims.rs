use crate::{AuthError, Result as AuthErrorResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Expiration timestamp (Unix)
    pub exp: i64,
}

impl SessionClaims {
    /// Validate claims after signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::token_invalid("sub (user id) cannot be empty"));
        }
        if self.exp < self.iat {
            return Err(AuthError::token_invalid("exp precedes iat"));
        }
        Ok(())
    }

    /// Subject parsed as a user id
    #[track_caller]
    pub fn subject_id(&self) -> AuthErrorResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|e| AuthError::token_invalid(format!("sub is not a user id: {e}")))
    }
}
