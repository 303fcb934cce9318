//! SQLite-backed user directory.
//!
//! Timestamps are stored as Unix seconds. Soft-deleted rows stay in the
//! table but are invisible to every lookup, and their email can be reused.

use crate::{DbError, Result as DbErrorResult};

use onigiri_core::{
    CredentialRecord, DirectoryResult, NewUser, UserDirectory, UserIdentity, UserUpdate,
};

use std::panic::Location;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

const TABLE: &str = "users";

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    display_name: String,
    email: String,
    hashed_password: String,
    auth_provider: Option<String>,
    created_at: i64,
    updated_at: Option<i64>,
    deleted_at: Option<i64>,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, new_user: NewUser) -> DbErrorResult<UserIdentity> {
        let identity = UserIdentity {
            id: Uuid::new_v4(),
            display_name: new_user.display_name,
            email: new_user.email,
            created_at: now_seconds(),
            updated_at: None,
            deleted_at: None,
        };

        sqlx::query(
            r#"
                INSERT INTO users (
                    id, display_name, email, hashed_password, auth_provider, created_at
                )
                VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(identity.id.to_string())
        .bind(&identity.display_name)
        .bind(&identity.email)
        .bind(&new_user.hashed_password)
        .bind(new_user.auth_provider.as_deref())
        .bind(identity.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(identity)
    }

    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> DbErrorResult<Option<CredentialRecord>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, display_name, email, hashed_password, auth_provider,
                    created_at, updated_at, deleted_at
                FROM users
                WHERE email = ? AND deleted_at IS NULL
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(CredentialRecord::try_from).transpose()
    }

    pub async fn find_identity_by_id(&self, id: Uuid) -> DbErrorResult<Option<UserIdentity>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
                SELECT id, display_name, email, hashed_password, auth_provider,
                    created_at, updated_at, deleted_at
                FROM users
                WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| CredentialRecord::try_from(r).map(CredentialRecord::into_identity))
            .transpose()
    }

    /// Apply the set fields of `update` and stamp `updated_at`.
    pub async fn apply_update(&self, id: Uuid, update: &UserUpdate) -> DbErrorResult<UserIdentity> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET display_name = COALESCE(?, display_name),
                    email = COALESCE(?, email),
                    updated_at = ?
                WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(update.display_name.as_deref())
        .bind(update.email.as_deref())
        .bind(now_seconds().timestamp())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::UserNotFound {
                id,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        self.find_identity_by_id(id)
            .await?
            .ok_or_else(|| DbError::UserNotFound {
                id,
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Mark a user deleted. Returns false when no live user has `id`.
    pub async fn soft_delete(&self, id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                UPDATE users
                SET deleted_at = ?
                WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(now_seconds().timestamp())
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl UserDirectory for UserRepository {
    async fn find_by_email(&self, email: &str) -> DirectoryResult<Option<CredentialRecord>> {
        Ok(self.find_credentials_by_email(email).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> DirectoryResult<Option<UserIdentity>> {
        Ok(self.find_identity_by_id(id).await?)
    }

    async fn create(&self, new_user: NewUser) -> DirectoryResult<UserIdentity> {
        Ok(self.insert(new_user).await?)
    }

    async fn update(&self, id: Uuid, update: &UserUpdate) -> DirectoryResult<UserIdentity> {
        Ok(self.apply_update(id, update).await?)
    }
}

impl TryFrom<UserRow> for CredentialRecord {
    type Error = DbError;

    #[track_caller]
    fn try_from(row: UserRow) -> DbErrorResult<Self> {
        let identity = UserIdentity {
            id: Uuid::parse_str(&row.id)
                .map_err(|e| corrupt(format!("Invalid UUID in users.id: {}", e)))?,
            display_name: row.display_name,
            email: row.email,
            created_at: timestamp(row.created_at, "created_at")?,
            updated_at: row
                .updated_at
                .map(|ts| timestamp(ts, "updated_at"))
                .transpose()?,
            deleted_at: row
                .deleted_at
                .map(|ts| timestamp(ts, "deleted_at"))
                .transpose()?,
        };

        Ok(CredentialRecord {
            identity,
            hashed_password: row.hashed_password,
            auth_provider: row.auth_provider,
        })
    }
}

/// Current time truncated to the stored precision.
fn now_seconds() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now)
}

#[track_caller]
fn timestamp(seconds: i64, column: &str) -> DbErrorResult<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| corrupt(format!("Invalid timestamp in users.{}", column)))
}

#[track_caller]
fn corrupt(message: String) -> DbError {
    DbError::CorruptRow {
        table: TABLE,
        message,
        location: ErrorLocation::from(Location::caller()),
    }
}
