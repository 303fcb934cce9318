pub mod auth_service;
pub mod claims;
pub mod credential_hasher;
pub mod credentials;
pub mod error;
pub mod normalized_profile;
pub mod provider_registry;
pub mod signing_key;
pub mod token_issuer;
pub mod transform;

pub use auth_service::{AuthService, AuthSession};
pub use claims::SessionClaims;
pub use credential_hasher::CredentialHasher;
pub use credentials::{Credentials, SignUp};
pub use error::{AuthError, Result};
pub use normalized_profile::{ExternalProfile, NormalizedProfile};
pub use provider_registry::ProviderRegistry;
pub use signing_key::SigningKey;
pub use token_issuer::TokenIssuer;
pub use transform::Transform;

/// Lifetime of a session token.
pub const SESSION_TTL_HOURS: i64 = 24;
/// Minimum HS256 secret length in bytes.
pub const MIN_SIGNING_KEY_LEN: usize = 32;

#[cfg(test)]
mod tests;
