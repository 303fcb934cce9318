pub mod credential_record;
pub mod new_user;
pub mod provider_config;
pub mod provider_kind;
pub mod transform_config;
pub mod user_identity;
pub mod user_update;
