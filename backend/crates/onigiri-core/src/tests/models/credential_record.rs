use crate::{CredentialRecord, NewUser, UserIdentity};

use chrono::Utc;
use googletest::prelude::*;
use uuid::Uuid;

fn identity() -> UserIdentity {
    UserIdentity {
        id: Uuid::new_v4(),
        display_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        created_at: Utc::now(),
        updated_at: None,
        deleted_at: None,
    }
}

#[test]
fn given_credential_record_when_debug_formatted_then_hash_redacted() {
    let record = CredentialRecord {
        identity: identity(),
        hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        auth_provider: None,
    };

    let rendered = format!("{:?}", record);

    assert_that!(rendered, not(contains_substring("argon2id")));
    assert_that!(rendered, contains_substring("ada@example.com"));
}

#[test]
fn given_new_user_when_debug_formatted_then_hash_redacted() {
    let new_user = NewUser {
        display_name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
        hashed_password: "$argon2id$secret".to_string(),
        auth_provider: None,
    };

    assert_that!(format!("{:?}", new_user), not(contains_substring("argon2id")));
}

#[test]
fn given_credential_record_when_into_identity_then_identity_kept() {
    let original = identity();
    let record = CredentialRecord {
        identity: original.clone(),
        hashed_password: "hash".to_string(),
        auth_provider: None,
    };

    assert_that!(record.into_identity(), eq(&original));
}

#[test]
fn given_records_from_each_origin_when_created_by_checked_then_only_owner_matches() {
    // Given
    let password_record = CredentialRecord {
        identity: identity(),
        hashed_password: "hash".to_string(),
        auth_provider: None,
    };
    let github_record = CredentialRecord {
        identity: identity(),
        hashed_password: "hash".to_string(),
        auth_provider: Some("github".to_string()),
    };

    // When / Then
    assert!(!password_record.created_by("github"));
    assert!(github_record.created_by("github"));
    assert!(!github_record.created_by("gitlab"));
}
