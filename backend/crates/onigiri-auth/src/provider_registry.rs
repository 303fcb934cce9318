//! Identity provider registry.
//!
//! Holds the providers configured at startup. The list is small and
//! fixed for the life of the process, so lookup is a linear scan and
//! no locking is needed once the registry is built.

use crate::normalized_profile::scalar_to_string;
use crate::{AuthError, ExternalProfile, NormalizedProfile, Result as AuthErrorResult, Transform};

use onigiri_core::ProviderConfig;

use std::collections::{BTreeMap, HashSet};
use std::panic::Location;

use error_location::ErrorLocation;
use log::debug;

#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<RegisteredProvider>,
}

/// A provider with its transforms already resolved.
#[derive(Debug, Clone)]
struct RegisteredProvider {
    config: ProviderConfig,
    transforms: Vec<Transform>,
}

impl ProviderRegistry {
    /// Build a registry, validating every entry and resolving its
    /// transforms.
    ///
    /// Any invalid entry fails the whole registry; there is no partial
    /// configuration.
    #[track_caller]
    pub fn new(providers: Vec<ProviderConfig>) -> AuthErrorResult<Self> {
        let mut seen = HashSet::new();
        let mut registered = Vec::with_capacity(providers.len());

        for provider in providers {
            if provider.name.trim().is_empty() {
                return Err(invalid_config(&provider, "name cannot be empty"));
            }
            if !seen.insert(provider.name.clone()) {
                return Err(invalid_config(&provider, "duplicate provider name"));
            }

            if provider.is_local() {
                if !provider.field_mappings.is_empty() || !provider.transforms.is_empty() {
                    return Err(invalid_config(
                        &provider,
                        "local providers cannot declare field_mappings or transforms",
                    ));
                }
                registered.push(RegisteredProvider {
                    config: provider,
                    transforms: Vec::new(),
                });
                continue;
            }

            for (field, value) in [
                ("client_id", &provider.client_id),
                ("auth_url", &provider.auth_url),
                ("token_url", &provider.token_url),
            ] {
                if value.as_deref().is_none_or(|v| v.trim().is_empty()) {
                    return Err(invalid_config(&provider, &format!("{field} is required")));
                }
            }

            let mut targets = HashSet::new();
            for internal in provider.field_mappings.values() {
                if !targets.insert(internal.as_str()) {
                    return Err(invalid_config(
                        &provider,
                        &format!("field '{internal}' is mapped from more than one key"),
                    ));
                }
            }

            let transforms = provider
                .transforms
                .iter()
                .map(Transform::resolve)
                .collect::<AuthErrorResult<Vec<_>>>()?;

            registered.push(RegisteredProvider {
                config: provider,
                transforms,
            });
        }

        Ok(Self {
            providers: registered,
        })
    }

    /// Find a provider by exact name.
    #[track_caller]
    pub fn lookup(&self, name: &str) -> AuthErrorResult<&ProviderConfig> {
        self.entry(name).map(|entry| &entry.config)
    }

    /// Map and transform an external profile into internal fields.
    ///
    /// Unmapped external keys are dropped. Transforms run on a fresh field
    /// map; the caller's profile is never touched. Local providers pass
    /// scalar fields through untouched.
    #[track_caller]
    pub fn normalize(
        &self,
        provider: &str,
        profile: &ExternalProfile,
    ) -> AuthErrorResult<NormalizedProfile> {
        let entry = self.entry(provider)?;

        if entry.config.is_local() {
            let fields = profile
                .iter()
                .filter_map(|(k, v)| scalar_to_string(v).map(|v| (k.clone(), v)))
                .collect();
            return Ok(NormalizedProfile::new(fields));
        }

        let mut fields = BTreeMap::new();
        for (external, internal) in &entry.config.field_mappings {
            if let Some(value) = profile.get(external).and_then(scalar_to_string) {
                fields.insert(internal.clone(), value);
            }
        }

        for transform in &entry.transforms {
            transform.apply(&mut fields);
        }

        let normalized = NormalizedProfile::new(fields);
        debug!(
            "Normalized profile from provider '{}': {} field(s), {} transform(s)",
            entry.config.name,
            normalized.len(),
            entry.transforms.len()
        );

        Ok(normalized)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.config.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    #[track_caller]
    fn entry(&self, name: &str) -> AuthErrorResult<&RegisteredProvider> {
        self.providers
            .iter()
            .find(|p| p.config.name == name)
            .ok_or_else(|| AuthError::ProviderNotFound {
                name: name.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

#[track_caller]
fn invalid_config(provider: &ProviderConfig, message: &str) -> AuthError {
    AuthError::InvalidProviderConfig {
        provider: provider.name.clone(),
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
