pub mod directory;
pub mod error;
pub mod models;

#[cfg(test)]
mod tests;

pub use directory::UserDirectory;
pub use error::{CoreError, DirectoryError, DirectoryResult, Result};
pub use error_location::ErrorLocation;
pub use models::credential_record::CredentialRecord;
pub use models::new_user::NewUser;
pub use models::provider_config::ProviderConfig;
pub use models::provider_kind::ProviderKind;
pub use models::transform_config::TransformConfig;
pub use models::user_identity::UserIdentity;
pub use models::user_update::UserUpdate;
