
use crate::{AuthService, ProviderRegistry, SigningKey, TokenIssuer};

use onigiri_core::{
    CredentialRecord, DirectoryError, DirectoryResult, ErrorLocation, NewUser, ProviderConfig,
    ProviderKind, TransformConfig, UserDirectory, UserIdentity, UserUpdate,
};

use std::panic::Location;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

pub(crate) const TEST_SECRET: &[u8] = b"test-secret-key-at-least-32-bytes-long";

pub(crate) fn test_issuer() -> TokenIssuer {
    TokenIssuer::new(&SigningKey::new(TEST_SECRET).unwrap())
}

/// External provider with GitHub-style mappings and a lowercase email transform.
pub(crate) fn github_provider() -> ProviderConfig {
    let mut provider = ProviderConfig::local("github");
    provider.kind = ProviderKind::Oauth2;
    provider.client_id = Some("client-id".to_string());
    provider.client_secret = Some("client-secret".to_string());
    provider.auth_url = Some("https://github.com/login/oauth/authorize".to_string());
    provider.token_url = Some("https://github.com/login/oauth/access_token".to_string());
    provider
        .field_mappings
        .insert("login".to_string(), "display_name".to_string());
    provider
        .field_mappings
        .insert("email".to_string(), "email".to_string());
    provider
        .transforms
        .push(TransformConfig::new("lowercase").with_param("field", "email"));
    provider
}

pub(crate) fn test_service(directory: Arc<MemoryDirectory>) -> AuthService {
    let registry =
        ProviderRegistry::new(vec![ProviderConfig::local("password"), github_provider()]).unwrap();
    AuthService::new(directory, test_issuer(), registry)
}

/// In-memory directory with a write counter and a switchable failure mode.
#[derive(Default)]
pub(crate) struct MemoryDirectory {
    records: Mutex<Vec<CredentialRecord>>,
    creates: AtomicUsize,
    failing: AtomicBool,
}

impl MemoryDirectory {
    pub(crate) fn create_count(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub(crate) fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub(crate) fn stored_hash(&self, email: &str) -> Option<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.identity.email == email)
            .map(|r| r.hashed_password.clone())
    }

    pub(crate) fn soft_delete(&self, id: Uuid) {
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.identity.id == id) {
            record.identity.deleted_at = Some(Utc::now());
        }
    }

    #[track_caller]
    fn check_failing(&self) -> DirectoryResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DirectoryError::Backend {
                message: "connection refused".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<CredentialRecord>> {
        self.check_failing()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.identity.email == email && !r.identity.is_deleted())
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> DirectoryResult<Option<UserIdentity>> {
        self.check_failing()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.identity.id == id && !r.identity.is_deleted())
            .map(|r| r.identity.clone()))
    }

    async fn create(&self, new_user: NewUser) -> DirectoryResult<UserIdentity> {
        self.check_failing()?;
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.identity.email == new_user.email && !r.identity.is_deleted())
        {
            return Err(DirectoryError::EmailTaken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let identity = UserIdentity {
            id: Uuid::new_v4(),
            display_name: new_user.display_name,
            email: new_user.email,
            created_at: Utc::now(),
            updated_at: None,
            deleted_at: None,
        };
        records.push(CredentialRecord {
            identity: identity.clone(),
            hashed_password: new_user.hashed_password,
            auth_provider: new_user.auth_provider,
        });
        self.creates.fetch_add(1, Ordering::SeqCst);

        Ok(identity)
    }

    async fn update(&self, id: Uuid, update: &UserUpdate) -> DirectoryResult<UserIdentity> {
        self.check_failing()?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.identity.id == id && !r.identity.is_deleted())
            .ok_or_else(|| DirectoryError::NotFound {
                id,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if let Some(display_name) = &update.display_name {
            record.identity.display_name = display_name.clone();
        }
        if let Some(email) = &update.email {
            record.identity.email = email.clone();
        }
        record.identity.updated_at = Some(Utc::now());

        Ok(record.identity.clone())
    }
}
