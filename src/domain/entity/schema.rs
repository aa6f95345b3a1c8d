use crate::domain::entity::column::ColumnDefinition;
use crate::domain::entity::table::{TableDefinition, TableError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Table '{0}' already exists in schema")]
    TableAlreadyExists(String),

    #[error("Table '{0}' not found in schema")]
    TableNotFound(String),

    #[error("Table name must not be empty")]
    EmptyTableName,

    #[error(transparent)]
    Table(#[from] TableError),
}

/// セッション中に設計されたテーブルの集合
///
/// テーブル名をキーとするマッピングだが、追加順を保持する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemaDefinition {
    tables: Vec<TableDefinition>,
}

impl SchemaDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    /// 空のテーブルを追加する
    pub fn add_table(&mut self, name: impl Into<String>) -> Result<&mut TableDefinition, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyTableName);
        }
        if self.contains(&name) {
            return Err(SchemaError::TableAlreadyExists(name));
        }

        self.tables.push(TableDefinition::new(name));
        let last = self.tables.len() - 1;
        Ok(&mut self.tables[last])
    }

    /// テーブルを削除し、削除した定義を返す
    pub fn remove_table(&mut self, name: &str) -> Result<TableDefinition, SchemaError> {
        let index = self
            .tables
            .iter()
            .position(|t| t.name == name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))?;
        Ok(self.tables.remove(index))
    }

    pub fn add_column(&mut self, table_name: &str, column: ColumnDefinition) -> Result<(), SchemaError> {
        self.get_table_mut(table_name)?.add_column(column)?;
        Ok(())
    }

    pub fn get_table(&self, name: &str) -> Result<&TableDefinition, SchemaError> {
        self.tables
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    pub fn get_table_mut(&mut self, name: &str) -> Result<&mut TableDefinition, SchemaError> {
        self.tables
            .iter_mut()
            .find(|t| t.name == name)
            .ok_or_else(|| SchemaError::TableNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name == name)
    }

    /// 追加順にテーブルを返す
    pub fn tables(&self) -> impl Iterator<Item = &TableDefinition> {
        self.tables.iter()
    }

    pub fn table_names(&self) -> Vec<&str> {
        self.tables.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
