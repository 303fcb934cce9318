use crate::{ConfigError, ConfigErrorResult, MIN_JWT_SECRET_LENGTH};

use std::fmt;
use std::path::Path;

use serde::Deserialize;

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 secret for session tokens
    pub jwt_secret: Option<String>,
    /// Providers TOML file, relative to the config dir
    pub providers_path: Option<String>,
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        match &self.jwt_secret {
            None => {
                return Err(ConfigError::auth(
                    "auth.jwt_secret is required (set ONIGIRI_AUTH_JWT_SECRET)",
                ));
            }
            Some(secret) if secret.len() < MIN_JWT_SECRET_LENGTH => {
                return Err(ConfigError::auth(format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )));
            }
            Some(_) => {}
        }

        if let Some(path) = &self.providers_path {
            if Path::new(path).is_absolute() {
                return Err(ConfigError::auth(
                    "auth.providers_path must be relative to the config directory",
                ));
            }
            if path.contains("..") {
                return Err(ConfigError::auth(
                    "auth.providers_path cannot contain '..'",
                ));
            }
            let full_path = config_dir.join(path);
            if !full_path.exists() {
                return Err(ConfigError::auth(format!(
                    "providers file does not exist: {}",
                    full_path.display()
                )));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .field("providers_path", &self.providers_path)
            .finish()
    }
}
