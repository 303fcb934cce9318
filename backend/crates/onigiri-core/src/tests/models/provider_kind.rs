use crate::ProviderKind;

use std::str::FromStr;

#[test]
fn test_provider_kind_as_str() {
    assert_eq!(ProviderKind::Local.as_str(), "local");
    assert_eq!(ProviderKind::Oauth2.as_str(), "oauth2");
}

#[test]
fn test_provider_kind_from_str() {
    assert_eq!(ProviderKind::from_str("local").unwrap(), ProviderKind::Local);
    assert_eq!(
        ProviderKind::from_str("oauth2").unwrap(),
        ProviderKind::Oauth2
    );
    assert_eq!(ProviderKind::from_str("oauth").unwrap(), ProviderKind::Oauth2);
    assert!(ProviderKind::from_str("saml").is_err());
}

#[test]
fn test_provider_kind_default_is_external() {
    assert_eq!(ProviderKind::default(), ProviderKind::Oauth2);
    assert!(!ProviderKind::default().is_local());
}
