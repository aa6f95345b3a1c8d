use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entity::StorageEngine;

/// サンプルのデータベース一覧の1行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleDatabase {
    pub name: &'static str,
    pub created: NaiveDate,
    pub size_mb: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleTable {
    pub table_name: &'static str,
    pub engine: StorageEngine,
    pub rows: u64,
    pub size_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleColumn {
    pub table: &'static str,
    pub column: &'static str,
    #[serde(rename = "type")]
    pub data_type: &'static str,
    pub key: &'static str,
    pub null: &'static str,
}

/// DDLページで表示する静的なサンプルカタログ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DdlSampleData {
    pub databases: Vec<SampleDatabase>,
    pub tables: Vec<SampleTable>,
    pub columns: Vec<SampleColumn>,
}

impl DdlSampleData {
    pub fn load() -> Self {
        Self {
            databases: vec![
                database("ecommerce_db", (2024, 1, 15), 245),
                database("inventory_db", (2024, 2, 10), 128),
                database("customer_db", (2024, 3, 5), 89),
            ],
            tables: vec![
                table("customers", 15_430, 12.5),
                table("products", 8_920, 8.2),
                table("orders", 35_670, 25.8),
                table("order_items", 89_450, 45.3),
            ],
            columns: vec![
                column("customer_id", "INT", "PRI"),
                column("email", "VARCHAR(100)", "UNI"),
                column("first_name", "VARCHAR(50)", ""),
                column("last_name", "VARCHAR(50)", ""),
                column("created_at", "TIMESTAMP", ""),
            ],
        }
    }

    pub fn find_table(&self, name: &str) -> Option<&SampleTable> {
        self.tables.iter().find(|t| t.table_name == name)
    }
}

fn database(name: &'static str, (year, month, day): (i32, u32, u32), size_mb: u32) -> SampleDatabase {
    SampleDatabase {
        name,
        // 固定の日付なので範囲外にはならない
        created: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
        size_mb,
    }
}

fn table(table_name: &'static str, rows: u64, size_mb: f64) -> SampleTable {
    SampleTable {
        table_name,
        engine: StorageEngine::InnoDb,
        rows,
        size_mb,
    }
}

fn column(column: &'static str, data_type: &'static str, key: &'static str) -> SampleColumn {
    SampleColumn {
        table: "customers",
        column,
        data_type,
        key,
        null: "NO",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contents() {
        let data = DdlSampleData::load();
        assert_eq!(data.databases.len(), 3);
        assert_eq!(data.databases[0].created.to_string(), "2024-01-15");
        assert_eq!(data.find_table("orders").map(|t| t.rows), Some(35_670));
        assert!(data.find_table("payments").is_none());
        assert!(data.columns.iter().all(|c| c.null == "NO"));
    }

    #[test]
    fn serializes_column_type_field() {
        let json = serde_json::to_value(DdlSampleData::load()).unwrap();
        assert_eq!(json["columns"][1]["type"], "VARCHAR(100)");
        assert_eq!(json["tables"][0]["engine"], "InnoDB");
    }
}
