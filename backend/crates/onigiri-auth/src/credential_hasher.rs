//! One-way password hashing.
//!
//! Hashes are Argon2id PHC strings. The PHC string records algorithm,
//! version, cost parameters and salt, so verification always reads them
//! back out of the stored hash instead of assuming the current settings.

use crate::{AuthError, Result as AuthErrorResult};

use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use log::warn;
use rand::TryRngCore;
use rand::rngs::OsRng;

/// Memory cost in KiB
const MEMORY_COST_KIB: u32 = 19_456;
/// Iterations
const TIME_COST: u32 = 2;
/// Lanes
const PARALLELISM: u32 = 1;
const SALT_LEN: usize = 16;

#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new() -> Self {
        // The constants are within argon2's accepted ranges; the fallback is
        // the crate default, which has the same values.
        let params =
            Params::new(MEMORY_COST_KIB, TIME_COST, PARALLELISM, None).unwrap_or_default();

        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash `plaintext` with a fresh random salt.
    #[track_caller]
    pub fn hash(&self, plaintext: &str) -> AuthErrorResult<String> {
        let mut salt_bytes = [0u8; SALT_LEN];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|e| AuthError::hashing(format!("entropy source failed: {e}")))?;

        let salt = SaltString::encode_b64(&salt_bytes)
            .map_err(|e| AuthError::hashing(format!("salt encoding failed: {e}")))?;

        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AuthError::hashing(e.to_string()))?;

        Ok(hash.to_string())
    }

    /// Check `plaintext` against a previously stored hash.
    ///
    /// Salt and parameters come from `stored_hash`. Mismatches and
    /// unparseable hashes both return `false`; the digest comparison inside
    /// argon2 is constant time.
    pub fn verify(&self, plaintext: &str, stored_hash: &str) -> bool {
        let parsed = match PasswordHash::new(stored_hash) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!("Stored password hash is not a valid PHC string: {}", e);
                return false;
            }
        };

        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self::new()
    }
}
