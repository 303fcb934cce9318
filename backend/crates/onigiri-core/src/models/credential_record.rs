use crate::UserIdentity;

use std::fmt;

/// A stored identity plus its password hash.
///
/// `hashed_password` is always credential-hasher output (a PHC string).
/// The record is deliberately not `Serialize` so it cannot end up in a response.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub identity: UserIdentity,
    pub hashed_password: String,
    /// External provider that created the identity; `None` for password sign-up
    pub auth_provider: Option<String>,
}

impl CredentialRecord {
    /// Whether the identity was created by the named external provider
    pub fn created_by(&self, provider: &str) -> bool {
        self.auth_provider.as_deref() == Some(provider)
    }

    pub fn into_identity(self) -> UserIdentity {
        self.identity
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("identity", &self.identity)
            .field("hashed_password", &"<redacted>")
            .field("auth_provider", &self.auth_provider)
            .finish()
    }
}
