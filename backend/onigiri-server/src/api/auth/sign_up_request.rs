use onigiri_auth::SignUp;

use std::fmt;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct SignUpRequest {
    /// Optional; defaults to the email's local part
    #[serde(default)]
    pub display_name: Option<String>,

    pub email: String,

    pub password: String,
}

impl From<SignUpRequest> for SignUp {
    fn from(req: SignUpRequest) -> Self {
        SignUp {
            display_name: req.display_name,
            email: req.email,
            password: req.password,
        }
    }
}

impl fmt::Debug for SignUpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignUpRequest")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
