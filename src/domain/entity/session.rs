use crate::domain::entity::column::ColumnDefinition;
use crate::domain::entity::schema::SchemaDefinition;
use crate::domain::entity::table::TableError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 1ユーザーセッション分のデザイナー状態
///
/// セッション開始時に作られ、デザイナーの操作でのみ変更され、終了時に破棄される。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignerSession {
    pub id: Uuid,

    pub started_at: DateTime<Utc>,

    /// スキーマデザイナーのテーブル群
    pub schema: SchemaDefinition,

    /// テーブルビルダーで入力中のカラム（テーブル名は生成時に指定する）
    pub draft_columns: Vec<ColumnDefinition>,
}

impl DesignerSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            schema: SchemaDefinition::new(),
            draft_columns: Vec::new(),
        }
    }

    pub fn add_draft_column(&mut self, column: ColumnDefinition) -> Result<(), TableError> {
        if column.name.trim().is_empty() {
            return Err(TableError::EmptyColumnName);
        }
        if self.draft_columns.iter().any(|c| c.name == column.name) {
            return Err(TableError::ColumnAlreadyExists(column.name));
        }
        self.draft_columns.push(column);
        Ok(())
    }

    pub fn clear_draft_columns(&mut self) {
        self.draft_columns.clear();
    }
}

impl Default for DesignerSession {
    fn default() -> Self {
        Self::new()
    }
}
