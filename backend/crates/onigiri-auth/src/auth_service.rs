//! Sign-up, login and session resolution.
//!
//! `AuthService` ties the credential hasher, token issuer and provider
//! registry to a [`UserDirectory`]. It holds no mutable state; clones share
//! the same directory, issuer and registry.

use crate::{
    AuthError, CredentialHasher, Credentials, ExternalProfile, ProviderRegistry,
    Result as AuthErrorResult, SignUp, TokenIssuer,
};

use onigiri_core::{
    CredentialRecord, DirectoryError, NewUser, UserDirectory, UserIdentity, UserUpdate,
};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info};
use rand::Rng;
use rand::distr::Alphanumeric;
use uuid::Uuid;

/// Length of the unusable password given to provider-created identities.
const PROVIDER_SECRET_LEN: usize = 32;

/// A successful login: the identity plus its session token.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user: UserIdentity,
    pub token: String,
}

#[derive(Clone)]
pub struct AuthService {
    directory: Arc<dyn UserDirectory>,
    hasher: CredentialHasher,
    tokens: Arc<TokenIssuer>,
    providers: Arc<ProviderRegistry>,
}

impl AuthService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        tokens: TokenIssuer,
        providers: ProviderRegistry,
    ) -> Self {
        Self {
            directory,
            hasher: CredentialHasher::new(),
            tokens: Arc::new(tokens),
            providers: Arc::new(providers),
        }
    }

    /// Register a password identity. No token is issued.
    pub async fn sign_up(&self, request: SignUp) -> AuthErrorResult<UserIdentity> {
        let email = normalize_email(&request.email)?;
        if request.password.is_empty() {
            return Err(AuthError::validation(
                "Password cannot be empty",
                Some("password"),
            ));
        }
        let display_name = resolve_display_name(request.display_name.as_deref(), &email);

        if self.directory.find_by_email(&email).await?.is_some() {
            debug!("Sign-up rejected: email already registered");
            return Err(AuthError::EmailInUse);
        }

        let hashed_password = self.hash_password(request.password).await?;

        // A concurrent sign-up for the same email loses at the unique index
        // and comes back as EmailTaken, which converts to EmailInUse.
        let user = self
            .directory
            .create(NewUser {
                display_name,
                email,
                hashed_password,
                auth_provider: None,
            })
            .await?;

        info!("User {} signed up", user.id);
        Ok(user)
    }

    /// Check an email/password pair and issue a session token.
    ///
    /// An unknown email and a wrong password both fail with
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, credentials: Credentials) -> AuthErrorResult<AuthSession> {
        let email = normalize_email(&credentials.email)?;
        if credentials.password.is_empty() {
            return Err(AuthError::validation(
                "Password cannot be empty",
                Some("password"),
            ));
        }

        let Some(record) = self.directory.find_by_email(&email).await? else {
            debug!("Login rejected: no matching identity");
            return Err(AuthError::InvalidCredentials);
        };

        let CredentialRecord {
            identity,
            hashed_password,
            ..
        } = record;

        if !self
            .verify_password(credentials.password, hashed_password)
            .await?
        {
            debug!("Login rejected for user {}: password mismatch", identity.id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(identity.id)?;
        info!("User {} logged in", identity.id);

        Ok(AuthSession {
            user: identity,
            token,
        })
    }

    /// Log in with a profile obtained from an external provider.
    ///
    /// The profile is normalized through the provider's mappings and
    /// transforms and matched on email. A new identity is created when none
    /// exists. An existing identity is only reachable through the provider
    /// that created it; anything else, password sign-ups included, fails
    /// with [`AuthError::InvalidCredentials`].
    ///
    /// `profile` must come from the provider itself (its user-info
    /// endpoint, reached with a token this server exchanged), never from
    /// the client.
    pub async fn login_with_provider(
        &self,
        provider_name: &str,
        profile: &ExternalProfile,
    ) -> AuthErrorResult<AuthSession> {
        let provider = self.providers.lookup(provider_name)?;
        if provider.is_local() {
            return Err(AuthError::validation(
                format!("Provider '{}' does not accept external profiles", provider.name),
                Some("provider"),
            ));
        }

        let normalized = self.providers.normalize(&provider.name, profile)?;
        let Some(raw_email) = normalized.email() else {
            return Err(AuthError::validation(
                format!("Profile from provider '{}' has no email", provider.name),
                Some("email"),
            ));
        };
        let email = normalize_email(raw_email)?;

        let user = match self.directory.find_by_email(&email).await? {
            Some(record) => owned_by_provider(record, &provider.name)?,
            None => {
                let new_user = NewUser {
                    display_name: resolve_display_name(normalized.display_name(), &email),
                    email: email.clone(),
                    hashed_password: self.hash_password(random_secret()).await?,
                    auth_provider: Some(provider.name.clone()),
                };

                match self.directory.create(new_user).await {
                    Ok(user) => {
                        info!("User {} created from provider '{}'", user.id, provider.name);
                        user
                    }
                    // Lost a race with another first login for the same email
                    Err(DirectoryError::EmailTaken { .. }) => {
                        let record = self
                            .directory
                            .find_by_email(&email)
                            .await?
                            .ok_or(AuthError::EmailInUse)?;
                        owned_by_provider(record, &provider.name)?
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        };

        let token = self.tokens.issue(user.id)?;
        info!("User {} logged in via provider '{}'", user.id, provider.name);

        Ok(AuthSession { user, token })
    }

    /// Resolve a session token to its live identity.
    pub async fn authenticate(&self, token: &str) -> AuthErrorResult<UserIdentity> {
        let id = self.tokens.validate(token)?;

        match self.directory.find_by_id(id).await? {
            Some(user) => Ok(user),
            None => {
                debug!("Token subject {} no longer exists", id);
                Err(AuthError::token_invalid("subject no longer exists"))
            }
        }
    }

    /// Change display name and/or email of an existing identity.
    pub async fn update_user(
        &self,
        id: Uuid,
        mut update: UserUpdate,
    ) -> AuthErrorResult<UserIdentity> {
        if let Some(name) = update.display_name.take() {
            let name = name.trim();
            if name.is_empty() {
                return Err(AuthError::validation(
                    "Display name cannot be empty",
                    Some("display_name"),
                ));
            }
            update.display_name = Some(name.to_string());
        }

        if let Some(raw_email) = update.email.take() {
            let email = normalize_email(&raw_email)?;
            if let Some(existing) = self.directory.find_by_email(&email).await? {
                if existing.identity.id != id {
                    return Err(AuthError::EmailInUse);
                }
            }
            update.email = Some(email);
        }

        if update.is_empty() {
            return self
                .directory
                .find_by_id(id)
                .await?
                .ok_or_else(|| user_not_found(id));
        }

        match self.directory.update(id, &update).await {
            Ok(user) => {
                info!("User {} updated", user.id);
                Ok(user)
            }
            Err(DirectoryError::NotFound { id, .. }) => Err(user_not_found(id)),
            Err(e) => Err(e.into()),
        }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub fn providers(&self) -> &ProviderRegistry {
        &self.providers
    }

    async fn hash_password(&self, password: String) -> AuthErrorResult<String> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AuthError::hashing(format!("hashing task failed: {e}")))?
    }

    async fn verify_password(&self, password: String, stored: String) -> AuthErrorResult<bool> {
        let hasher = self.hasher.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AuthError::hashing(format!("verification task failed: {e}")))
    }
}

/// Trim and lowercase; an empty result is rejected.
#[track_caller]
pub(crate) fn normalize_email(raw: &str) -> AuthErrorResult<String> {
    let email = raw.trim().to_lowercase();
    if email.is_empty() {
        return Err(AuthError::validation("Email cannot be empty", Some("email")));
    }
    Ok(email)
}

fn owned_by_provider(record: CredentialRecord, provider: &str) -> AuthErrorResult<UserIdentity> {
    if record.created_by(provider) {
        return Ok(record.into_identity());
    }

    debug!(
        "Provider login rejected for user {}: identity not created by '{}'",
        record.identity.id, provider
    );
    Err(AuthError::InvalidCredentials)
}

fn resolve_display_name(requested: Option<&str>, email: &str) -> String {
    match requested.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => email.split('@').next().unwrap_or(email).to_string(),
    }
}

fn random_secret() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(PROVIDER_SECRET_LEN)
        .map(char::from)
        .collect()
}

#[track_caller]
fn user_not_found(id: Uuid) -> AuthError {
    AuthError::UserNotFound {
        id,
        location: ErrorLocation::from(Location::caller()),
    }
}
