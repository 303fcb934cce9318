//! Identity provider configuration.
//!
//! Loaded once at startup from the providers file and never mutated.
//! `local` entries are markers for password login; everything else
//! describes an external provider and how to normalize its profiles.

use crate::{ProviderKind, TransformConfig};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Unique lookup key
    pub name: String,
    #[serde(default, alias = "type")]
    pub kind: ProviderKind,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub token_url: Option<String>,
    #[serde(default)]
    pub user_info_url: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    /// External field name -> internal field name
    #[serde(default)]
    pub field_mappings: BTreeMap<String, String>,
    /// Applied in order after mapping
    #[serde(default)]
    pub transforms: Vec<TransformConfig>,
}

impl ProviderConfig {
    /// A password-login provider with no mapping pipeline.
    pub fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ProviderKind::Local,
            client_id: None,
            client_secret: None,
            auth_url: None,
            token_url: None,
            user_info_url: None,
            scopes: Vec::new(),
            field_mappings: BTreeMap::new(),
            transforms: Vec::new(),
        }
    }

    pub fn is_local(&self) -> bool {
        self.kind.is_local()
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("client_id", &self.client_id)
            .field(
                "client_secret",
                &self.client_secret.as_ref().map(|_| "<redacted>"),
            )
            .field("auth_url", &self.auth_url)
            .field("token_url", &self.token_url)
            .field("user_info_url", &self.user_info_url)
            .field("scopes", &self.scopes)
            .field("field_mappings", &self.field_mappings)
            .field("transforms", &self.transforms)
            .finish()
    }
}
