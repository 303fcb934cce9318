use onigiri_core::NewUser;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    onigiri_db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub fn new_user(email: &str) -> NewUser {
    NewUser {
        display_name: email.split('@').next().unwrap_or(email).to_string(),
        email: email.to_string(),
        hashed_password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        auth_provider: None,
    }
}
