use std::sync::Arc;
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entity::DesignerSession;
use crate::domain::repository::{RepositoryError, RepositoryFactory, SessionRepository, SessionUpdate};
use crate::infrastructure::storage::{MemoryStorage, StorageError};

/// インメモリリポジトリの実装
pub struct MemorySessionRepository {
    storage: Arc<MemoryStorage>,
}

impl MemorySessionRepository {
    pub fn new(storage: Arc<MemoryStorage>) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn create_session(&self, session: &DesignerSession) -> Result<(), RepositoryError> {
        self.storage.insert_session(session.clone())
            .map_err(RepositoryError::from)
    }

    async fn get_session(&self, id: Uuid) -> Result<DesignerSession, RepositoryError> {
        self.storage.get_session(id)
            .map_err(RepositoryError::from)
    }

    async fn update_session(&self, id: Uuid, update: SessionUpdate) -> Result<(), RepositoryError> {
        self.storage.update_session(id, update)
            .map_err(RepositoryError::from)
    }

    async fn delete_session(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.storage.remove_session(id)
            .map_err(RepositoryError::from)
    }

    async fn session_ids(&self) -> Result<Vec<Uuid>, RepositoryError> {
        self.storage.session_ids()
            .map_err(RepositoryError::from)
    }
}

impl From<StorageError> for RepositoryError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::SessionNotFound(id) => RepositoryError::SessionNotFound(id),
            StorageError::SessionAlreadyExists(id) => RepositoryError::SessionAlreadyExists(id),
            StorageError::Rejected(e) => RepositoryError::Rejected(e),
            StorageError::Internal(msg) => RepositoryError::StorageError(msg),
        }
    }
}

/// 単一のインメモリストレージを共有するファクトリ
#[derive(Default)]
pub struct MemoryRepositoryFactory {
    storage: Arc<MemoryStorage>,
}

impl MemoryRepositoryFactory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryFactory for MemoryRepositoryFactory {
    fn session_repository(&self) -> Arc<dyn SessionRepository> {
        Arc::new(MemorySessionRepository::new(self.storage.clone()))
    }
}
