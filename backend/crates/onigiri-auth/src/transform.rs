//! Named profile transforms.
//!
//! A transform is a pure function over the mapped field set. The set of
//! names is closed: configuration is resolved into [`Transform`] values
//! once, and an unknown name is an error rather than a no-op.

use crate::{AuthError, Result as AuthErrorResult};

use onigiri_core::TransformConfig;

use std::collections::BTreeMap;
use std::panic::Location;

use error_location::ErrorLocation;

pub const TRIM: &str = "trim";
pub const LOWERCASE: &str = "lowercase";
pub const UPPERCASE: &str = "uppercase";
pub const CONCAT: &str = "concat";
pub const DEFAULT: &str = "default";

const DEFAULT_SEPARATOR: &str = " ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    /// Strip surrounding whitespace from `field`, or from every field
    Trim { field: Option<String> },
    /// Lowercase `field`, or every field
    Lowercase { field: Option<String> },
    /// Uppercase `field`, or every field
    Uppercase { field: Option<String> },
    /// Join present `sources` with `separator` into `target`
    Concat {
        sources: Vec<String>,
        target: String,
        separator: String,
    },
    /// Set `field` to `value` when it is missing or empty
    Default { field: String, value: String },
}

impl Transform {
    /// Every name `resolve` accepts
    pub const NAMES: [&'static str; 5] = [TRIM, LOWERCASE, UPPERCASE, CONCAT, DEFAULT];

    /// Turn a configured transform into its function.
    #[track_caller]
    pub fn resolve(config: &TransformConfig) -> AuthErrorResult<Self> {
        let optional_field = || config.param("field").map(str::to_string);

        match config.name.as_str() {
            TRIM => Ok(Self::Trim {
                field: optional_field(),
            }),
            LOWERCASE => Ok(Self::Lowercase {
                field: optional_field(),
            }),
            UPPERCASE => Ok(Self::Uppercase {
                field: optional_field(),
            }),
            CONCAT => {
                let sources: Vec<String> = required_param(config, "fields")?
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
                if sources.is_empty() {
                    return Err(invalid_params(config, "'fields' lists no field names"));
                }

                Ok(Self::Concat {
                    sources,
                    target: required_param(config, "target")?.to_string(),
                    separator: config
                        .param("separator")
                        .unwrap_or(DEFAULT_SEPARATOR)
                        .to_string(),
                })
            }
            DEFAULT => Ok(Self::Default {
                field: required_param(config, "field")?.to_string(),
                value: required_param(config, "value")?.to_string(),
            }),
            other => Err(AuthError::TransformNotFound {
                name: other.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Trim { .. } => TRIM,
            Self::Lowercase { .. } => LOWERCASE,
            Self::Uppercase { .. } => UPPERCASE,
            Self::Concat { .. } => CONCAT,
            Self::Default { .. } => DEFAULT,
        }
    }

    pub fn apply(&self, fields: &mut BTreeMap<String, String>) {
        match self {
            Self::Trim { field } => map_values(fields, field.as_deref(), |v| v.trim().to_string()),
            Self::Lowercase { field } => map_values(fields, field.as_deref(), str::to_lowercase),
            Self::Uppercase { field } => map_values(fields, field.as_deref(), str::to_uppercase),
            Self::Concat {
                sources,
                target,
                separator,
            } => {
                let parts: Vec<&str> = sources
                    .iter()
                    .filter_map(|source| fields.get(source))
                    .map(String::as_str)
                    .filter(|v| !v.is_empty())
                    .collect();
                if !parts.is_empty() {
                    let joined = parts.join(separator);
                    fields.insert(target.clone(), joined);
                }
            }
            Self::Default { field, value } => {
                let missing = fields.get(field).is_none_or(|v| v.is_empty());
                if missing {
                    fields.insert(field.clone(), value.clone());
                }
            }
        }
    }
}

fn map_values(
    fields: &mut BTreeMap<String, String>,
    only: Option<&str>,
    f: impl Fn(&str) -> String,
) {
    match only {
        Some(name) => {
            if let Some(value) = fields.get_mut(name) {
                *value = f(value);
            }
        }
        None => {
            for value in fields.values_mut() {
                *value = f(value);
            }
        }
    }
}

#[track_caller]
fn required_param<'a>(config: &'a TransformConfig, key: &str) -> AuthErrorResult<&'a str> {
    config
        .param(key)
        .ok_or_else(|| invalid_params(config, &format!("missing required param '{key}'")))
}

#[track_caller]
fn invalid_params(config: &TransformConfig, message: &str) -> AuthError {
    AuthError::InvalidTransformParams {
        transform: config.name.clone(),
        message: message.to_string(),
        location: ErrorLocation::from(Location::caller()),
    }
}
