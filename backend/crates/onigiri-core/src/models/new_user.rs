use std::fmt;

/// Input for `UserDirectory::create`.
#[derive(Clone, PartialEq, Eq)]
pub struct NewUser {
    pub display_name: String,
    pub email: String,
    /// Credential-hasher output, never a raw password
    pub hashed_password: String,
    /// External provider creating the identity; `None` for password sign-up
    pub auth_provider: Option<String>,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("hashed_password", &"<redacted>")
            .field("auth_provider", &self.auth_provider)
            .finish()
    }
}
