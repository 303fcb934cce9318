use crate::{AuthError, Result as AuthErrorResult, SESSION_TTL_HOURS, SessionClaims, SigningKey};

use std::panic::Location;

use chrono::{DateTime, Duration, Utc};
use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// Issues and validates HS256 session tokens.
///
/// Only HS256 is accepted on validation; a token whose header names any
/// other algorithm is rejected before its claims are looked at.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);

        Self {
            encoding_key: EncodingKey::from_secret(key.as_bytes()),
            decoding_key: DecodingKey::from_secret(key.as_bytes()),
            validation,
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    /// Mint a token for `subject`, valid from now for the session TTL.
    #[track_caller]
    pub fn issue(&self, subject: Uuid) -> AuthErrorResult<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Mint a token as if issued at `issued_at`.
    #[track_caller]
    pub fn issue_at(&self, subject: Uuid, issued_at: DateTime<Utc>) -> AuthErrorResult<String> {
        let claims = SessionClaims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|source| {
            AuthError::TokenSigning {
                source,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify `token` and return its subject.
    #[track_caller]
    pub fn validate(&self, token: &str) -> AuthErrorResult<Uuid> {
        self.validate_claims(token)?.subject_id()
    }

    /// Verify `token` and return its claims.
    #[track_caller]
    pub fn validate_claims(&self, token: &str) -> AuthErrorResult<SessionClaims> {
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired {
                        location: ErrorLocation::from(Location::caller()),
                    },
                    _ => AuthError::TokenInvalid {
                        message: e.to_string(),
                        location: ErrorLocation::from(Location::caller()),
                    },
                }
            })?;

        token_data.claims.validate()?;

        Ok(token_data.claims)
    }
}
