use std::sync::Arc;

use sqlx::PgPool;

use crate::config::JwtConfig;
use crate::domain::repositories::{StampRepository, UserRepository};
use crate::infrastructure::repositories::{
    InMemoryStampRepository, InMemoryUserRepository, PostgresStampRepository,
    PostgresUserRepository,
};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub stamps: Arc<dyn StampRepository>,
    pub jwt: JwtConfig,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserRepository>,
        stamps: Arc<dyn StampRepository>,
        jwt: JwtConfig,
    ) -> Self {
        Self { users, stamps, jwt }
    }

    /// Repositories backed by PostgreSQL
    pub fn postgres(pool: PgPool, jwt: JwtConfig) -> Self {
        Self::new(
            Arc::new(PostgresUserRepository::new(pool.clone())),
            Arc::new(PostgresStampRepository::new(pool)),
            jwt,
        )
    }

    /// Repositories that live and die with the process
    pub fn in_memory(jwt: JwtConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryStampRepository::new()),
            jwt,
        )
    }
}
