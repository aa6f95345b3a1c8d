use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::entity::{DesignerSession, SchemaError};
use thiserror::Error;
use uuid::Uuid;

/// ストレージエラー
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Session {0} already exists")]
    SessionAlreadyExists(Uuid),

    #[error(transparent)]
    Rejected(#[from] SchemaError),

    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// インメモリのセッションストレージ
#[derive(Debug, Default)]
pub struct MemoryStorage {
    sessions: RwLock<HashMap<Uuid, DesignerSession>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<Uuid, DesignerSession>>, StorageError> {
        self.sessions
            .read()
            .map_err(|e| StorageError::Internal(format!("session lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<Uuid, DesignerSession>>, StorageError> {
        self.sessions
            .write()
            .map_err(|e| StorageError::Internal(format!("session lock poisoned: {}", e)))
    }

    /// セッションを登録する
    pub fn insert_session(&self, session: DesignerSession) -> Result<(), StorageError> {
        let mut sessions = self.write()?;

        if sessions.contains_key(&session.id) {
            return Err(StorageError::SessionAlreadyExists(session.id));
        }

        sessions.insert(session.id, session);
        Ok(())
    }

    /// セッションのコピーを取得する
    pub fn get_session(&self, id: Uuid) -> Result<DesignerSession, StorageError> {
        let sessions = self.read()?;

        sessions
            .get(&id)
            .cloned()
            .ok_or(StorageError::SessionNotFound(id))
    }

    /// 書き込みロックを保持したままセッションを変更する
    ///
    /// 変更はコピーに対して行い、成功した場合のみ反映する。
    pub fn update_session<F>(&self, id: Uuid, update: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut DesignerSession) -> Result<(), SchemaError>,
    {
        let mut sessions = self.write()?;

        let slot = sessions.get_mut(&id).ok_or(StorageError::SessionNotFound(id))?;
        let mut updated = slot.clone();
        update(&mut updated)?;
        *slot = updated;
        Ok(())
    }

    /// セッションを削除する
    pub fn remove_session(&self, id: Uuid) -> Result<(), StorageError> {
        let mut sessions = self.write()?;

        sessions
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::SessionNotFound(id))
    }

    /// 開始時刻順のセッションID
    pub fn session_ids(&self) -> Result<Vec<Uuid>, StorageError> {
        let sessions = self.read()?;
        let mut entries: Vec<&DesignerSession> = sessions.values().collect();
        entries.sort_by_key(|s| (s.started_at, s.id));
        Ok(entries.into_iter().map(|s| s.id).collect())
    }

    pub fn len(&self) -> Result<usize, StorageError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.read()?.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn insert_update_remove() {
        let storage = MemoryStorage::new();
        let session = DesignerSession::new();
        let id = session.id;

        storage.insert_session(session.clone()).unwrap();
        assert!(matches!(
            storage.insert_session(session),
            Err(StorageError::SessionAlreadyExists(existing)) if existing == id
        ));

        storage
            .update_session(id, |s| s.schema.add_table("users").map(|_| ()))
            .unwrap();
        assert_eq!(storage.get_session(id).unwrap().schema.table_names(), ["users"]);

        storage.remove_session(id).unwrap();
        assert!(storage.is_empty().unwrap());
        assert!(matches!(storage.get_session(id), Err(StorageError::SessionNotFound(_))));
        assert!(matches!(storage.remove_session(id), Err(StorageError::SessionNotFound(_))));
    }

    #[test]
    fn update_requires_existing_session() {
        let storage = MemoryStorage::new();
        let result = storage.update_session(Uuid::new_v4(), |_| Ok(()));
        assert!(matches!(result, Err(StorageError::SessionNotFound(_))));
        assert_eq!(storage.len().unwrap(), 0);
    }

    #[test]
    fn rejected_update_leaves_session_untouched() {
        let storage = MemoryStorage::new();
        let session = DesignerSession::new();
        let id = session.id;
        storage.insert_session(session).unwrap();

        // 途中まで変更してから失敗しても反映されない
        let result = storage.update_session(id, |s| {
            s.schema.add_table("half_done")?;
            s.schema.add_table("half_done").map(|_| ())
        });

        assert!(matches!(
            result,
            Err(StorageError::Rejected(SchemaError::TableAlreadyExists(name))) if name == "half_done"
        ));
        assert!(storage.get_session(id).unwrap().schema.is_empty());
    }

    #[test]
    fn concurrent_updates_are_serialized() {
        let storage = Arc::new(MemoryStorage::new());
        let session = DesignerSession::new();
        let id = session.id;
        storage.insert_session(session).unwrap();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let storage = Arc::clone(&storage);
                thread::spawn(move || {
                    storage.update_session(id, move |s| s.schema.add_table(format!("t{}", i)).map(|_| ()))
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        assert_eq!(storage.get_session(id).unwrap().schema.len(), 16);
    }
}
