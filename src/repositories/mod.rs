use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::ApiError;

pub mod memory;

pub use memory::InMemoryRepository;

/// Change applied to a stored entity while the store holds it exclusively.
pub type Change<'a, T> = Box<dyn FnOnce(T) -> Result<T, ApiError> + Send + 'a>;

/// A record with a stable identifier.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Name used in not-found errors.
    const KIND: &'static str;

    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
}

/// Storage port for one entity type.
///
/// Lookups and deletes of an unknown identifier fail with
/// [`ApiError::NotFound`].
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<T, ApiError>;
    /// Inserts or replaces by identifier.
    async fn put(&self, entity: T) -> Result<T, ApiError>;
    /// Reads, changes and writes back as one step. Fails with
    /// [`ApiError::NotFound`] if the identifier is gone, so a completed
    /// delete is never undone.
    async fn update<'a>(&self, id: Uuid, change: Change<'a, T>) -> Result<T, ApiError>;
    /// Returns the removed entity.
    async fn delete(&self, id: Uuid) -> Result<T, ApiError>;
    /// Ordered by creation time, then identifier.
    async fn list(&self) -> Result<Vec<T>, ApiError>;
}
