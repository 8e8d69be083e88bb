// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod in_memory;
pub mod postgres_stamp_repository;
pub mod postgres_user_repository;

pub use in_memory::{InMemoryStampRepository, InMemoryUserRepository};
pub use postgres_stamp_repository::PostgresStampRepository;
pub use postgres_user_repository::PostgresUserRepository;
