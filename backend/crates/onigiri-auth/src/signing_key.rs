use crate::{AuthError, MIN_SIGNING_KEY_LEN, Result as AuthErrorResult};

use std::fmt;
use std::panic::Location;

use error_location::ErrorLocation;

/// HS256 secret for session tokens.
///
/// Injected into `TokenIssuer` at construction; rotating keys means building
/// a new issuer from a new `SigningKey`.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    #[track_caller]
    pub fn new(secret: impl Into<Vec<u8>>) -> AuthErrorResult<Self> {
        let secret = secret.into();
        if secret.len() < MIN_SIGNING_KEY_LEN {
            return Err(AuthError::InvalidSigningKey {
                message: format!(
                    "secret must be at least {} bytes, got {}",
                    MIN_SIGNING_KEY_LEN,
                    secret.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(Self(secret))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}
