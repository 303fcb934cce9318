use crate::{ProviderConfig, ProviderKind};

use googletest::prelude::*;

#[test]
fn given_full_toml_entry_when_deserialized_then_all_fields_populated() {
    // Given
    let raw = r#"
        name = "github"
        kind = "oauth2"
        client_id = "abc"
        client_secret = "shh"
        auth_url = "https://github.com/login/oauth/authorize"
        token_url = "https://github.com/login/oauth/access_token"
        user_info_url = "https://api.github.com/user"
        scopes = ["read:user", "user:email"]

        [field_mappings]
        login = "display_name"
        email = "email"

        [[transforms]]
        name = "lowercase"
        params = { field = "email" }
    "#;

    // When
    let provider: ProviderConfig = toml::from_str(raw).unwrap();

    // Then
    assert_that!(provider.name, eq("github"));
    assert_that!(provider.kind, eq(ProviderKind::Oauth2));
    assert_that!(provider.scopes.len(), eq(2));
    assert_eq!(
        provider.field_mappings.get("login").map(String::as_str),
        Some("display_name")
    );
    assert_that!(provider.transforms.len(), eq(1));
    assert_that!(provider.transforms[0].param("field"), some(eq("email")));
}

#[test]
fn given_type_alias_when_deserialized_then_kind_is_read() {
    let provider: ProviderConfig = toml::from_str("name = \"password\"\ntype = \"local\"").unwrap();

    assert_that!(provider.kind, eq(ProviderKind::Local));
    assert!(provider.is_local());
}

#[test]
fn given_client_secret_when_debug_formatted_then_secret_redacted() {
    let mut provider = ProviderConfig::local("corp");
    provider.kind = ProviderKind::Oauth2;
    provider.client_secret = Some("super-secret-value".to_string());

    let rendered = format!("{:?}", provider);

    assert_that!(rendered, not(contains_substring("super-secret-value")));
    assert_that!(rendered, contains_substring("<redacted>"));
}
