//! INSERT / UPDATE / DELETE and import/export statement templates.
//!
//! Values typed by the user are quoted as string literals with embedded
//! single quotes doubled. WHERE conditions are passed through untouched.

use itertools::Itertools;
use thiserror::Error;

use crate::domain::entity::{
    CustomerRecord, CustomerUpdate, DeleteMethod, ExportFormat, ExportOptions, ImportMethod, ImportOptions,
    OrderDeletion, OrderFilter, PriceAdjustment, PriceUpdate, UpdateScope,
};

const CUSTOMER_COLUMNS: &str = "first_name, last_name, email, phone, status, created_at";
const MAX_PRICE_PERCENT: i32 = 50;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DmlError {
    #[error("At least one row is required")]
    NoRows,

    #[error("WHERE condition must not be empty")]
    EmptyCondition,

    #[error("Category must not be empty")]
    EmptyCategory,

    #[error("Percentage change must be between -50 and 50, got {0}")]
    PercentageOutOfRange(i32),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Field separator must not be empty")]
    EmptyDelimiter,
}

/// DML文の生成
pub struct DmlGenerator;

impl DmlGenerator {
    /// 1行分の INSERT
    pub fn render_insert(customer: &CustomerRecord) -> String {
        format!(
            "INSERT INTO customers ({})\nVALUES {};",
            CUSTOMER_COLUMNS,
            Self::customer_values(customer)
        )
    }

    /// 複数行をまとめた INSERT（1行1タプル）
    pub fn render_bulk_insert(customers: &[CustomerRecord]) -> Result<String, DmlError> {
        if customers.is_empty() {
            return Err(DmlError::NoRows);
        }

        let values = customers.iter().map(Self::customer_values).join(",\n");
        Ok(format!("INSERT INTO customers ({})\nVALUES\n{};", CUSTOMER_COLUMNS, values))
    }

    pub fn render_update(update: &CustomerUpdate) -> Result<String, DmlError> {
        let where_clause = match &update.scope {
            UpdateScope::Single { customer_id } => format!("customer_id = {}", customer_id),
            UpdateScope::Conditional { condition } => {
                let condition = condition.trim();
                if condition.is_empty() {
                    return Err(DmlError::EmptyCondition);
                }
                condition.to_string()
            }
            UpdateScope::Bulk => "1=1".to_string(),
        };

        Ok(format!(
            "UPDATE customers\nSET {} = {},\n    updated_at = NOW()\nWHERE {};",
            update.field,
            quote(&update.value),
            where_clause
        ))
    }

    /// カテゴリ単位の価格変更
    ///
    /// 割合は整数パーセントから倍率を小数2桁で作る（10 → `1.10`）。
    pub fn render_price_update(update: &PriceUpdate) -> Result<String, DmlError> {
        let category = update.category.trim();
        if category.is_empty() {
            return Err(DmlError::EmptyCategory);
        }

        let set_clause = match update.adjustment {
            PriceAdjustment::Percentage { percent } => {
                if percent.abs() > MAX_PRICE_PERCENT {
                    return Err(DmlError::PercentageOutOfRange(percent));
                }
                let hundredths = 100 + percent;
                format!("price = price * {}.{:02}", hundredths / 100, hundredths % 100)
            }
            PriceAdjustment::Fixed { amount } if amount < 0.0 => format!("price = price - {:.2}", -amount),
            PriceAdjustment::Fixed { amount } => format!("price = price + {:.2}", amount),
        };

        Ok(format!(
            "UPDATE products\nSET {}\nWHERE category = {};",
            set_clause,
            quote(category)
        ))
    }

    /// 注文の削除（論理削除の場合は UPDATE になる）
    pub fn render_order_deletion(deletion: &OrderDeletion) -> Result<String, DmlError> {
        let base = match deletion.method {
            DeleteMethod::Soft => "UPDATE orders SET deleted_at = NOW(), status = 'deleted'",
            DeleteMethod::Hard => "DELETE FROM orders",
        };

        let where_clause = match &deletion.filter {
            OrderFilter::Order { order_id } => format!("order_id = {}", order_id),
            OrderFilter::Status { status } => format!("status = {}", quote(status.trim())),
            OrderFilter::DateRange { start, end } => {
                if start > end {
                    return Err(DmlError::InvalidDateRange {
                        start: start.to_string(),
                        end: end.to_string(),
                    });
                }
                format!("order_date BETWEEN '{}' AND '{}'", start, end)
            }
            OrderFilter::Customer { customer_id } => format!("customer_id = {}", customer_id),
        };

        Ok(format!("{}\nWHERE {};", base, where_clause))
    }

    pub fn render_import(options: &ImportOptions) -> Result<String, DmlError> {
        let sql = match options.method {
            ImportMethod::LoadDataInfile => {
                if options.delimiter.is_empty() {
                    return Err(DmlError::EmptyDelimiter);
                }

                let mut lines = vec![
                    "LOAD DATA INFILE '/path/to/data.csv'".to_string(),
                    "INTO TABLE customers".to_string(),
                    format!("FIELDS TERMINATED BY '{}'", options.delimiter),
                ];
                if let Some(quote_char) = options.quote {
                    lines.push(format!("ENCLOSED BY '{}'", quote_char));
                }
                lines.push("LINES TERMINATED BY '\\n'".to_string());
                if options.has_header {
                    lines.push("IGNORE 1 ROWS".to_string());
                }
                lines.push("(first_name, last_name, email, phone);".to_string());
                lines.join("\n")
            }
            ImportMethod::InsertStatements => SAMPLE_ROWS
                .iter()
                .map(|row| format!("INSERT INTO customers (first_name, last_name, email, phone)\nVALUES {};", row))
                .join("\n\n"),
            ImportMethod::BulkInsert => format!(
                "INSERT INTO customers (first_name, last_name, email, phone)\nVALUES\n{};",
                SAMPLE_ROWS.iter().map(|row| format!("    {}", row)).join(",\n")
            ),
        };

        Ok(sql)
    }

    /// テーブルのエクスポート（CSV / JSON / INSERT文）
    pub fn render_export(options: &ExportOptions) -> String {
        let table = options.table;
        let columns = table.columns();

        let mut sql = match options.format {
            ExportFormat::Csv => format!(
                "SELECT {table}.*\nINTO OUTFILE '/path/to/{table}_export.csv'\n\
                 FIELDS TERMINATED BY ','\nENCLOSED BY '\"'\nLINES TERMINATED BY '\\n'\nFROM {table}",
                table = table
            ),
            ExportFormat::Json => format!(
                "SELECT JSON_OBJECT(\n{}\n) as json_data\nFROM {}",
                columns.iter().map(|c| format!("    '{}', {}", c, c)).join(",\n"),
                table
            ),
            ExportFormat::SqlInsert => format!(
                "SELECT CONCAT(\n    'INSERT INTO {} VALUES (',\n{},\n    ');'\n) as insert_statement\nFROM {}",
                table,
                columns.iter().map(|c| format!("    QUOTE({})", c)).join(", ',',\n"),
                table
            ),
        };

        if let Some(condition) = options.where_condition.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            sql.push_str(&format!("\nWHERE {}", condition));
        }
        sql.push(';');
        sql
    }

    fn customer_values(customer: &CustomerRecord) -> String {
        let created_at = customer
            .created_at
            .map(|date| format!("'{}'", date))
            .unwrap_or_else(|| "NOW()".to_string());

        format!(
            "({}, {}, {}, {}, '{}', {})",
            quote(&customer.first_name),
            quote(&customer.last_name),
            quote(&customer.email),
            quote(&customer.phone),
            customer.status,
            created_at
        )
    }
}

/// CSV取り込みの例で使う3行
const SAMPLE_ROWS: [&str; 3] = [
    "('John', 'Doe', 'john.doe@email.com', '+1-555-123-4567')",
    "('Jane', 'Smith', 'jane.smith@email.com', '+1-555-234-5678')",
    "('Mike', 'Johnson', 'mike.johnson@email.com', '+1-555-345-6789')",
];

/// 文字列リテラルとして引用する
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
