use crate::domain::entity::column::ColumnDefinition;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Column '{0}' already exists in table")]
    ColumnAlreadyExists(String),

    #[error("Column name must not be empty")]
    EmptyColumnName,
}

/// テーブル定義（カラムの順序がそのまま出力順になる）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDefinition {
    // table name
    pub name: String,

    // table columns
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

impl TableDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// カラムを末尾に追加する（同名カラムは拒否）
    pub fn add_column(&mut self, column: ColumnDefinition) -> Result<(), TableError> {
        if column.name.trim().is_empty() {
            return Err(TableError::EmptyColumnName);
        }
        if self.get_column(&column.name).is_some() {
            return Err(TableError::ColumnAlreadyExists(column.name));
        }

        self.columns.push(column);
        Ok(())
    }

    /// ビルダーパターンでカラムを追加する
    pub fn with_column(mut self, column: ColumnDefinition) -> Result<Self, TableError> {
        self.add_column(column)?;
        Ok(self)
    }

    /// 名前でカラムを検索する
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// 主キーに含まれるカラム名（定義順）
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// テーブルのカラム名のリストを取得する
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn clear_columns(&mut self) {
        self.columns.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::DataType;

    #[test]
    fn keeps_insertion_order() {
        let table = TableDefinition::new("orders")
            .with_column(ColumnDefinition::new("total", DataType::Decimal { precision: 10, scale: 2 }))
            .and_then(|t| t.with_column(ColumnDefinition::new("order_id", DataType::Int).primary_key()))
            .and_then(|t| t.with_column(ColumnDefinition::new("customer_id", DataType::Int)))
            .unwrap();

        assert_eq!(table.column_names(), ["total", "order_id", "customer_id"]);
        assert_eq!(table.primary_key_columns(), ["order_id"]);
    }

    #[test]
    fn rejects_duplicate_and_empty_names() {
        let mut table = TableDefinition::new("t");
        table.add_column(ColumnDefinition::new("a", DataType::Int)).unwrap();

        assert_eq!(
            table.add_column(ColumnDefinition::new("a", DataType::Text)),
            Err(TableError::ColumnAlreadyExists("a".to_string()))
        );
        assert_eq!(
            table.add_column(ColumnDefinition::new("  ", DataType::Text)),
            Err(TableError::EmptyColumnName)
        );
        assert_eq!(table.columns.len(), 1);
    }
}
