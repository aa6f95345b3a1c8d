use async_trait::async_trait;
use crate::domain::entity::{DesignerSession, SchemaError};
use crate::Error;
use std::sync::Arc;
use uuid::Uuid;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Session {0} not found")]
    SessionNotFound(Uuid),

    #[error("Session {0} already exists")]
    SessionAlreadyExists(Uuid),

    #[error("Storage error: {0}")]
    StorageError(String),

    /// 変更処理がセッションの入力チェックで拒否された
    #[error(transparent)]
    Rejected(#[from] SchemaError),
}

/// セッションへの変更処理
///
/// ストレージの書き込みロックを保持したまま実行される。`Err` を返した場合、
/// セッションは変更前の状態のまま残る。
pub type SessionUpdate = Box<dyn FnOnce(&mut DesignerSession) -> Result<(), SchemaError> + Send>;

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::SessionNotFound(id) => Error::Schema(format!("Session {} not found", id)),
            RepositoryError::SessionAlreadyExists(id) => Error::Schema(format!("Session {} already exists", id)),
            RepositoryError::StorageError(msg) => Error::Storage(msg),
            RepositoryError::Rejected(e) => Error::Schema(e.to_string()),
        }
    }
}

// セッションリポジトリ - デザイナーセッションの保持と取得のための抽象インターフェース
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// 新しいセッションを登録する
    async fn create_session(&self, session: &DesignerSession) -> Result<(), RepositoryError>;

    /// IDでセッションを取得する
    async fn get_session(&self, id: Uuid) -> Result<DesignerSession, RepositoryError>;

    /// セッションを読み出して変更し、書き戻すまでを1回の操作で行う
    async fn update_session(&self, id: Uuid, update: SessionUpdate) -> Result<(), RepositoryError>;

    /// セッションを破棄する
    async fn delete_session(&self, id: Uuid) -> Result<(), RepositoryError>;

    /// すべてのセッションIDを取得する
    async fn session_ids(&self) -> Result<Vec<Uuid>, RepositoryError>;
}

/// リポジトリファクトリトレイト
pub trait RepositoryFactory: Send + Sync {
    /// セッションリポジトリを取得する
    fn session_repository(&self) -> Arc<dyn SessionRepository>;
}
