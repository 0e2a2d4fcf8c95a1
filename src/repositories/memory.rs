use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::repositories::{Change, Entity, Repository};

pub struct InMemoryRepository<T> {
    entities: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn get(&self, id: Uuid) -> Result<T, ApiError> {
        self.entities
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(T::KIND, id))
    }

    async fn put(&self, entity: T) -> Result<T, ApiError> {
        self.entities
            .write()
            .await
            .insert(entity.id(), entity.clone());

        tracing::debug!("stored {} {}", T::KIND, entity.id());
        Ok(entity)
    }

    async fn update<'a>(&self, id: Uuid, change: Change<'a, T>) -> Result<T, ApiError> {
        let mut entities = self.entities.write().await;

        let current = entities
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::not_found(T::KIND, id))?;
        let updated = change(current)?;
        entities.insert(id, updated.clone());

        tracing::debug!("updated {} {}", T::KIND, id);
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<T, ApiError> {
        let removed = self
            .entities
            .write()
            .await
            .remove(&id)
            .ok_or_else(|| ApiError::not_found(T::KIND, id))?;

        tracing::debug!("removed {} {}", T::KIND, id);
        Ok(removed)
    }

    async fn list(&self) -> Result<Vec<T>, ApiError> {
        let mut entities = self
            .entities
            .read()
            .await
            .values()
            .cloned()
            .collect::<Vec<T>>();

        entities.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });

        Ok(entities)
    }
}
