mod credential_record;
mod provider_config;
mod provider_kind;
