// Repository contracts implemented by the infrastructure layer

pub mod stamp_repository;
pub mod user_repository;

use thiserror::Error;

pub use stamp_repository::StampRepository;
pub use user_repository::{NewUser, User, UserRepository};

/// Failure reported by a repository implementation
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),

    /// A stored row no longer satisfies a domain invariant
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                RepositoryError::Conflict(db_err.message().to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}
