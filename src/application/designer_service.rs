use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::application::ddl_generator::DdlGenerator;
use crate::domain::entity::{ColumnDefinition, DesignerSession, SchemaError};
use crate::domain::repository::{RepositoryError, SessionRepository};
use crate::Error;

/// デザイナー操作のエラー（入力チェックはここで行い、DDL生成側では行わない）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DesignerError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for DesignerError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Rejected(e) => DesignerError::Schema(e),
            other => DesignerError::Repository(other),
        }
    }
}

impl From<DesignerError> for Error {
    fn from(err: DesignerError) -> Self {
        match err {
            DesignerError::Schema(e) => Error::Schema(e.to_string()),
            DesignerError::Repository(e) => e.into(),
        }
    }
}

/// テーブルビルダーとスキーマデザイナーのセッション操作
#[derive(Clone)]
pub struct DesignerService {
    repository: Arc<dyn SessionRepository>,
}

impl DesignerService {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// セッションの変更をリポジトリ側で一括して行う
    async fn modify<F>(&self, id: Uuid, f: F) -> Result<(), DesignerError>
    where
        F: FnOnce(&mut DesignerSession) -> Result<(), SchemaError> + Send + 'static,
    {
        Ok(self.repository.update_session(id, Box::new(f)).await?)
    }

    pub async fn start_session(&self) -> Result<DesignerSession, DesignerError> {
        let session = DesignerSession::new();
        self.repository.create_session(&session).await?;
        info!(session_id = %session.id, "designer session started");
        Ok(session)
    }

    pub async fn end_session(&self, id: Uuid) -> Result<(), DesignerError> {
        self.repository.delete_session(id).await?;
        info!(session_id = %id, "designer session ended");
        Ok(())
    }

    pub async fn session(&self, id: Uuid) -> Result<DesignerSession, DesignerError> {
        Ok(self.repository.get_session(id).await?)
    }

    pub async fn session_ids(&self) -> Result<Vec<Uuid>, DesignerError> {
        Ok(self.repository.session_ids().await?)
    }

    // --- テーブルビルダー ---

    pub async fn add_draft_column(&self, id: Uuid, column: ColumnDefinition) -> Result<(), DesignerError> {
        let column = normalize_column(column);
        debug!(session_id = %id, column = %column.name, "adding draft column");
        self.modify(id, move |session| Ok(session.add_draft_column(column)?)).await
    }

    pub async fn clear_draft_columns(&self, id: Uuid) -> Result<(), DesignerError> {
        self.modify(id, |session| {
            session.clear_draft_columns();
            Ok(())
        })
        .await
    }

    /// 入力中のカラムから CREATE TABLE 文を作る（カラムが空でも生成する）
    pub async fn generate_draft_ddl(&self, id: Uuid, table_name: &str) -> Result<String, DesignerError> {
        let table_name = table_name.trim();
        if table_name.is_empty() {
            return Err(SchemaError::EmptyTableName.into());
        }
        let session = self.repository.get_session(id).await?;
        Ok(DdlGenerator::render_create_table(table_name, &session.draft_columns))
    }

    // --- スキーマデザイナー ---
    // テーブル名は前後の空白を除いて扱う

    pub async fn add_table(&self, id: Uuid, name: &str) -> Result<(), DesignerError> {
        let name = name.trim().to_string();
        let table = name.clone();
        self.modify(id, move |session| {
            session.schema.add_table(table)?;
            Ok(())
        })
        .await?;
        info!(session_id = %id, table = %name, "table added to schema");
        Ok(())
    }

    pub async fn remove_table(&self, id: Uuid, name: &str) -> Result<(), DesignerError> {
        let name = name.trim().to_string();
        let table = name.clone();
        self.modify(id, move |session| {
            session.schema.remove_table(&table)?;
            Ok(())
        })
        .await?;
        info!(session_id = %id, table = %name, "table removed from schema");
        Ok(())
    }

    pub async fn clear_tables(&self, id: Uuid) -> Result<(), DesignerError> {
        self.modify(id, |session| {
            session.schema.clear();
            Ok(())
        })
        .await
    }

    pub async fn add_column(&self, id: Uuid, table: &str, column: ColumnDefinition) -> Result<(), DesignerError> {
        let table = table.trim().to_string();
        let column = normalize_column(column);
        debug!(session_id = %id, table = %table, column = %column.name, "adding column");
        self.modify(id, move |session| session.schema.add_column(&table, column)).await
    }

    pub async fn clear_columns(&self, id: Uuid, table: &str) -> Result<(), DesignerError> {
        let table = table.trim().to_string();
        self.modify(id, move |session| {
            session.schema.get_table_mut(&table)?.clear_columns();
            Ok(())
        })
        .await
    }

    pub async fn generate_table_ddl(&self, id: Uuid, table: &str) -> Result<String, DesignerError> {
        let session = self.repository.get_session(id).await?;
        let table = session.schema.get_table(table.trim())?;
        Ok(DdlGenerator::render_table(table))
    }

    pub async fn generate_schema_ddl(&self, id: Uuid) -> Result<String, DesignerError> {
        let session = self.repository.get_session(id).await?;
        debug!(session_id = %id, tables = session.schema.len(), "rendering schema DDL");
        Ok(DdlGenerator::render_schema(&session.schema))
    }
}

fn normalize_column(mut column: ColumnDefinition) -> ColumnDefinition {
    column.name = column.name.trim().to_string();
    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{DataType, TableError};
    use crate::domain::repository::{MockSessionRepository, SessionUpdate};
    use crate::infrastructure::repository::MemorySessionRepository;
    use crate::infrastructure::storage::MemoryStorage;
    use mockall::predicate::eq;

    fn memory_service() -> DesignerService {
        let storage = Arc::new(MemoryStorage::new());
        DesignerService::new(Arc::new(MemorySessionRepository::new(storage)))
    }

    #[tokio::test]
    async fn schema_designer_flow() {
        let service = memory_service();
        let session = service.start_session().await.unwrap();
        let id = session.id;

        service.add_table(id, " customers ").await.unwrap();
        service
            .add_column(id, "customers", ColumnDefinition::new("customer_id", DataType::Int).primary_key().auto_increment())
            .await
            .unwrap();
        service
            .add_column(id, "customers", ColumnDefinition::new("email", DataType::Varchar(100)).unique())
            .await
            .unwrap();
        service.add_table(id, "orders").await.unwrap();

        let ddl = service.generate_schema_ddl(id).await.unwrap();
        assert_eq!(
            ddl,
            "CREATE TABLE customers (\n  customer_id INT AUTO_INCREMENT NOT NULL,\n  email VARCHAR(100) NOT NULL UNIQUE,\n  PRIMARY KEY (customer_id)\n) ENGINE=InnoDB;\n\nCREATE TABLE orders (\n\n) ENGINE=InnoDB;"
        );

        service.remove_table(id, "orders").await.unwrap();
        assert_eq!(
            service.generate_table_ddl(id, "customers").await.unwrap(),
            service.generate_schema_ddl(id).await.unwrap()
        );
    }

    #[tokio::test]
    async fn guards_reject_bad_input() {
        let service = memory_service();
        let id = service.start_session().await.unwrap().id;
        service.add_table(id, "users").await.unwrap();

        assert_eq!(
            service.add_table(id, "users").await,
            Err(DesignerError::Schema(SchemaError::TableAlreadyExists("users".into())))
        );
        assert_eq!(
            service.add_table(id, "   ").await,
            Err(DesignerError::Schema(SchemaError::EmptyTableName))
        );
        assert_eq!(
            service.add_column(id, "users", ColumnDefinition::new(" ", DataType::Int)).await,
            Err(DesignerError::Schema(SchemaError::Table(TableError::EmptyColumnName)))
        );
        assert_eq!(
            service.add_draft_column(id, ColumnDefinition::new("", DataType::Int)).await,
            Err(DesignerError::Schema(SchemaError::Table(TableError::EmptyColumnName)))
        );
        assert_eq!(
            service.remove_table(id, "ghost").await,
            Err(DesignerError::Schema(SchemaError::TableNotFound("ghost".into())))
        );
    }

    #[tokio::test]
    async fn draft_builder_and_clear() {
        let service = memory_service();
        let id = service.start_session().await.unwrap().id;

        service
            .add_draft_column(id, ColumnDefinition::new("id", DataType::Int).primary_key())
            .await
            .unwrap();
        assert_eq!(
            service.add_draft_column(id, ColumnDefinition::new("id ", DataType::Text)).await,
            Err(DesignerError::Schema(SchemaError::Table(TableError::ColumnAlreadyExists("id".into()))))
        );

        assert_eq!(
            service.generate_draft_ddl(id, "my_table").await.unwrap(),
            "CREATE TABLE my_table (\n  id INT NOT NULL,\n  PRIMARY KEY (id)\n) ENGINE=InnoDB;"
        );

        service.clear_draft_columns(id).await.unwrap();
        assert_eq!(
            service.generate_draft_ddl(id, "my_table").await.unwrap(),
            "CREATE TABLE my_table (\n\n) ENGINE=InnoDB;"
        );
    }

    #[tokio::test]
    async fn sessions_are_isolated_and_end() {
        let service = memory_service();
        let first = service.start_session().await.unwrap().id;
        let second = service.start_session().await.unwrap().id;

        service.add_table(first, "only_here").await.unwrap();
        assert!(service.session(second).await.unwrap().schema.is_empty());

        service.end_session(first).await.unwrap();
        assert_eq!(service.session_ids().await.unwrap(), vec![second]);
        assert_eq!(
            service.generate_schema_ddl(first).await,
            Err(DesignerError::Repository(RepositoryError::SessionNotFound(first)))
        );
    }

    #[tokio::test]
    async fn guard_runs_inside_repository_update() {
        let mut session = DesignerSession::new();
        session.schema.add_table("users").unwrap();
        let id = session.id;

        let mut repository = MockSessionRepository::new();
        repository.expect_get_session().never();
        repository
            .expect_update_session()
            .withf(move |target, _| *target == id)
            .times(1)
            .returning(move |_, update| {
                let mut copy = session.clone();
                update(&mut copy).map_err(RepositoryError::from)
            });

        let service = DesignerService::new(Arc::new(repository));
        assert_eq!(
            service.add_table(id, "users").await,
            Err(DesignerError::Schema(SchemaError::TableAlreadyExists("users".into())))
        );
    }

    #[tokio::test]
    async fn table_names_are_trimmed_everywhere() {
        let service = memory_service();
        let id = service.start_session().await.unwrap().id;

        service.add_table(id, " users").await.unwrap();
        service
            .add_column(id, "users ", ColumnDefinition::new("id", DataType::Int))
            .await
            .unwrap();
        assert_eq!(
            service.generate_table_ddl(id, " users ").await.unwrap(),
            "CREATE TABLE users (\n  id INT NOT NULL\n) ENGINE=InnoDB;"
        );

        service.clear_columns(id, "  users").await.unwrap();
        assert!(service.session(id).await.unwrap().schema.get_table("users").unwrap().is_empty());

        service.remove_table(id, " users").await.unwrap();
        assert!(service.session(id).await.unwrap().schema.is_empty());
    }

    /// 各操作の前に実行を譲るリポジトリ（操作の割り込みを起こしやすくする）
    struct YieldingRepository(MemorySessionRepository);

    #[async_trait::async_trait]
    impl SessionRepository for YieldingRepository {
        async fn create_session(&self, session: &DesignerSession) -> Result<(), RepositoryError> {
            tokio::task::yield_now().await;
            self.0.create_session(session).await
        }

        async fn get_session(&self, id: Uuid) -> Result<DesignerSession, RepositoryError> {
            tokio::task::yield_now().await;
            self.0.get_session(id).await
        }

        async fn update_session(&self, id: Uuid, update: SessionUpdate) -> Result<(), RepositoryError> {
            tokio::task::yield_now().await;
            self.0.update_session(id, update).await
        }

        async fn delete_session(&self, id: Uuid) -> Result<(), RepositoryError> {
            tokio::task::yield_now().await;
            self.0.delete_session(id).await
        }

        async fn session_ids(&self) -> Result<Vec<Uuid>, RepositoryError> {
            tokio::task::yield_now().await;
            self.0.session_ids().await
        }
    }

    fn yielding_service() -> DesignerService {
        let storage = Arc::new(MemoryStorage::new());
        DesignerService::new(Arc::new(YieldingRepository(MemorySessionRepository::new(storage))))
    }

    #[tokio::test]
    async fn interleaved_column_additions_are_both_kept() {
        let service = yielding_service();
        let id = service.start_session().await.unwrap().id;
        service.add_table(id, "t").await.unwrap();

        let (a, b) = tokio::join!(
            service.add_column(id, "t", ColumnDefinition::new("a", DataType::Int)),
            service.add_column(id, "t", ColumnDefinition::new("b", DataType::Int)),
        );
        assert_eq!((a, b), (Ok(()), Ok(())));

        let session = service.session(id).await.unwrap();
        assert_eq!(session.schema.get_table("t").unwrap().column_names().join(","), "a,b");
    }

    #[tokio::test]
    async fn interleaved_duplicate_tables_are_rejected_once() {
        let service = yielding_service();
        let id = service.start_session().await.unwrap().id;

        let (first, second) = tokio::join!(service.add_table(id, "dup"), service.add_table(id, "dup"));
        let results = [first, second];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .contains(&Err(DesignerError::Schema(SchemaError::TableAlreadyExists("dup".into())))));
        assert_eq!(service.session(id).await.unwrap().schema.table_names(), ["dup"]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn parallel_mutations_on_one_session() {
        let service = yielding_service();
        let id = service.start_session().await.unwrap().id;
        service.add_table(id, "events").await.unwrap();

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .add_column(id, "events", ColumnDefinition::new(format!("c{}", i), DataType::Int))
                        .await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let session = service.session(id).await.unwrap();
        assert_eq!(session.schema.get_table("events").unwrap().columns.len(), 32);
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let mut repository = MockSessionRepository::new();
        repository
            .expect_create_session()
            .returning(|_| Err(RepositoryError::StorageError("lock poisoned".into())));

        let service = DesignerService::new(Arc::new(repository));
        let err = service.start_session().await.unwrap_err();
        assert!(matches!(Error::from(err), Error::Storage(msg) if msg == "lock poisoned"));
    }
}
