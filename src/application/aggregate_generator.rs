use itertools::Itertools;
use thiserror::Error;

use crate::domain::entity::{
    AggregateFunction, AggregateQuery, GroupByQuery, HavingQuery, MeasureColumn, WindowQuery,
};

const SELECT_INDENT: &str = "    ";
const WINDOW_BASE_COLUMNS: &str = "sale_id, product_category, sale_amount, sale_date";
const WINDOW_PREVIEW_LIMIT: u32 = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    #[error("Please select at least one aggregate")]
    NoMetrics,

    #[error("Please select at least one grouping column")]
    NoGroupColumns,

    #[error("Filter value for {column} must be a number, got '{value}'")]
    InvalidNumber { column: String, value: String },
}

/// sales テーブルに対する集計クエリの生成
pub struct AggregateGenerator;

impl AggregateGenerator {
    /// `SELECT <func>(...) FROM sales` と任意の WHERE
    ///
    /// `COUNT(sale_id)` は `COUNT(*)` として出力する。
    pub fn render_aggregate(query: &AggregateQuery) -> Result<String, AggregateError> {
        let distinct = if query.distinct { "DISTINCT " } else { "" };
        let argument = match (query.function, query.column, query.distinct) {
            (AggregateFunction::Count, MeasureColumn::SaleId, false) => "*".to_string(),
            (_, column, _) => format!("{}{}", distinct, column),
        };

        let mut sql = format!("SELECT {}({}) FROM sales", query.function, argument);

        if let Some(filter) = &query.filter {
            let value = filter.value.trim();
            if !value.is_empty() {
                let literal = if filter.column.is_textual() {
                    format!("'{}'", value.replace('\'', "''"))
                } else {
                    value
                        .parse::<i64>()
                        .map_err(|_| AggregateError::InvalidNumber {
                            column: filter.column.to_string(),
                            value: value.to_string(),
                        })?
                        .to_string()
                };
                sql.push_str(&format!("\nWHERE {} = {}", filter.column, literal));
            }
        }

        sql.push(';');
        Ok(sql)
    }

    pub fn render_group_by(query: &GroupByQuery) -> Result<String, AggregateError> {
        if query.group_by.is_empty() {
            return Err(AggregateError::NoGroupColumns);
        }
        if query.metrics.is_empty() {
            return Err(AggregateError::NoMetrics);
        }

        let select_items = query
            .group_by
            .iter()
            .map(|c| c.to_string())
            .chain(query.metrics.iter().map(|m| format!("{} as {}", m.expression(), m.alias())));
        let mut sql = select_block(select_items);

        sql.push_str(&format!("\nGROUP BY {}", query.group_by.iter().join(", ")));
        if query.order {
            sql.push_str(&format!("\nORDER BY {}", query.group_by[0]));
        }
        if let Some(limit) = query.limit {
            sql.push_str(&format!("\nLIMIT {}", limit));
        }

        sql.push(';');
        Ok(sql)
    }

    pub fn render_having(query: &HavingQuery) -> Result<String, AggregateError> {
        if query.metrics.is_empty() {
            return Err(AggregateError::NoMetrics);
        }

        let select_items = std::iter::once(query.group_by.to_string())
            .chain(query.metrics.iter().map(|m| m.expression().to_string()));
        let mut sql = select_block(select_items);

        if let Some(condition) = query.where_condition.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            sql.push_str(&format!("\nWHERE {}", condition));
        }

        let having = &query.having;
        sql.push_str(&format!(
            "\nGROUP BY {group}\nHAVING {} {} {}\nORDER BY {group};",
            having.metric.expression(),
            having.comparison,
            having.value,
            group = query.group_by
        ));

        Ok(sql)
    }

    /// ウィンドウ関数のクエリ（先頭20行）
    pub fn render_window(query: &WindowQuery) -> String {
        let mut over = Vec::new();
        if let Some(partition) = query.partition_by {
            over.push(format!("PARTITION BY {}", partition));
        }
        over.push(format!("ORDER BY {}", query.order));
        if let Some(frame) = query.frame.filter(|_| query.function.accepts_frame()) {
            over.push(frame.to_string());
        }

        format!(
            "SELECT\n{indent}{},\n{indent}{} OVER ({}) as window_result\nFROM sales\nORDER BY {}\nLIMIT {};",
            WINDOW_BASE_COLUMNS,
            query.function,
            over.join(" "),
            query.order,
            WINDOW_PREVIEW_LIMIT,
            indent = SELECT_INDENT
        )
    }
}

/// 1項目1行の SELECT 句と `FROM sales`
fn select_block(items: impl Iterator<Item = String>) -> String {
    let items = items.map(|item| format!("{}{}", SELECT_INDENT, item)).join(",\n");
    format!("SELECT\n{}\nFROM sales", items)
}
