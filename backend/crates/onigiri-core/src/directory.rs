//! User directory contract.
//!
//! The auth core never talks to storage directly; it reads and writes
//! identities through this trait. Implementations own id assignment and
//! timestamps.

use crate::{CredentialRecord, DirectoryResult, NewUser, UserIdentity, UserUpdate};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the credential record for a non-deleted identity with this email.
    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<CredentialRecord>>;

    /// Fetch a non-deleted identity by id.
    async fn find_by_id(&self, id: Uuid) -> DirectoryResult<Option<UserIdentity>>;

    /// Persist a new identity. The directory assigns `id` and `created_at`.
    async fn create(&self, new_user: NewUser) -> DirectoryResult<UserIdentity>;

    /// Apply `update` to an existing identity.
    ///
    /// Returns `DirectoryError::NotFound` when no non-deleted identity has `id`.
    async fn update(&self, id: Uuid, update: &UserUpdate) -> DirectoryResult<UserIdentity>;
}
