use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::stamp::{NewStamp, Stamp};

/// Repository trait for stamps
///
/// Stamps are insert-only; there is no update or delete.
#[async_trait]
pub trait StampRepository: Send + Sync {
    /// Persist a stamp, assigning its id and creation time
    async fn create(&self, stamp: NewStamp) -> Result<Stamp, RepositoryError>;

    /// The `limit` newest stamps, newest first (ties broken by higher id)
    async fn recent(&self, limit: i64) -> Result<Vec<Stamp>, RepositoryError>;

    /// Find a stamp by ID
    async fn find_by_id(&self, id: i64) -> Result<Option<Stamp>, RepositoryError>;
}
