use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Raw profile as returned by an external provider's user-info endpoint.
pub type ExternalProfile = Map<String, Value>;

pub const EMAIL_FIELD: &str = "email";
pub const DISPLAY_NAME_FIELD: &str = "display_name";

/// Profile fields after mapping and transforms, keyed by internal field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedProfile {
    fields: BTreeMap<String, String>,
}

impl NormalizedProfile {
    pub fn new(fields: BTreeMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Non-empty email, if the provider supplied one
    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL_FIELD).filter(|v| !v.trim().is_empty())
    }

    /// Non-empty display name, if the provider supplied one
    pub fn display_name(&self) -> Option<&str> {
        self.get(DISPLAY_NAME_FIELD).filter(|v| !v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Scalar JSON values as strings. Structured values and nulls have no
/// single-string form and are dropped.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
