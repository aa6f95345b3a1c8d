//! DDL text generation for the table builder and schema designer.
//!
//! Pure string formatting: no validation, no I/O. Flag combinations that
//! make no sense to MySQL (a nullable primary key, say) are rendered as-is.

use itertools::Itertools;

use crate::domain::entity::{ColumnDefinition, DatabaseDefinition, SchemaDefinition, TableDefinition};

const COLUMN_INDENT: &str = "  ";

/// DDL Generator
///
/// Stateless; every method is an associated function over borrowed input.
pub struct DdlGenerator;

impl DdlGenerator {
    /// Render one `CREATE TABLE` statement.
    ///
    /// An empty column list yields `CREATE TABLE <name> (\n\n) ENGINE=InnoDB;`.
    pub fn render_create_table(table_name: &str, columns: &[ColumnDefinition]) -> String {
        let mut lines: Vec<String> = columns
            .iter()
            .map(|column| format!("{}{}", COLUMN_INDENT, column))
            .collect();

        let primary_keys = columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .join(", ");
        if !primary_keys.is_empty() {
            lines.push(format!("{}PRIMARY KEY ({})", COLUMN_INDENT, primary_keys));
        }

        format!(
            "CREATE TABLE {} (\n{}\n) ENGINE=InnoDB;",
            table_name,
            lines.join(",\n")
        )
    }

    pub fn render_table(table: &TableDefinition) -> String {
        Self::render_create_table(&table.name, &table.columns)
    }

    /// Render every table in insertion order, separated by one blank line.
    pub fn render_schema(schema: &SchemaDefinition) -> String {
        schema.tables().map(Self::render_table).join("\n\n")
    }

    pub fn render_create_database(database: &DatabaseDefinition) -> String {
        format!(
            "CREATE DATABASE {}\nCHARACTER SET {}\nCOLLATE {};",
            database.name, database.charset, database.collation
        )
    }
}
