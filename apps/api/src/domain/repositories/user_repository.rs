use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::user::Username;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: Username,
    pub password_hash: String,
}

/// User data ready to be inserted; the id is assigned by storage
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: Username,
    pub password_hash: String,
}

/// Repository trait for users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user, failing with `Conflict` if the name is taken
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;

    /// Find a user by name
    async fn find_by_name(&self, name: &Username) -> Result<Option<User>, RepositoryError>;
}
