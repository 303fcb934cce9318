//! Identity provider file.
//!
//! ```toml
//! [[providers]]
//! name = "password"
//! kind = "local"
//!
//! [[providers]]
//! name = "github"
//! kind = "oauth2"
//! client_id = "..."
//! auth_url = "https://github.com/login/oauth/authorize"
//! token_url = "https://github.com/login/oauth/access_token"
//!
//! [providers.field_mappings]
//! login = "display_name"
//! email = "email"
//!
//! [[providers.transforms]]
//! name = "lowercase"
//! params = { field = "email" }
//! ```

use crate::{ConfigError, ConfigErrorResult};

use onigiri_core::ProviderConfig;

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProvidersFile {
    #[serde(default)]
    pub providers: Vec<ProviderConfig>,
}

impl ProvidersFile {
    /// Read and parse the whole file. One malformed entry fails the load.
    pub fn load(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn into_providers(self) -> Vec<ProviderConfig> {
        self.providers
    }
}
