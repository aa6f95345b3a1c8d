use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// 顧客のステータス
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
    Pending,
}

/// customers テーブルへ挿入する1行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub status: CustomerStatus,
    /// 省略時は `NOW()`
    #[serde(default)]
    pub created_at: Option<NaiveDate>,
}

/// UPDATE で変更できる顧客の列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CustomerField {
    FirstName,
    LastName,
    Email,
    Phone,
    Status,
}

/// UPDATE の対象範囲
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum UpdateScope {
    Single { customer_id: u64 },
    Conditional { condition: String },
    /// 全行（`WHERE 1=1`）
    Bulk,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub field: CustomerField,
    pub value: String,
    pub scope: UpdateScope,
}

/// 価格の一括変更方法
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriceAdjustment {
    /// -50〜50 の範囲
    Percentage { percent: i32 },
    Fixed { amount: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceUpdate {
    pub category: String,
    pub adjustment: PriceAdjustment,
}

/// 削除対象の注文の絞り込み
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", rename_all = "snake_case")]
pub enum OrderFilter {
    Order { order_id: u64 },
    Status { status: String },
    DateRange { start: NaiveDate, end: NaiveDate },
    Customer { customer_id: u64 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMethod {
    Hard,
    /// `deleted_at` を設定するだけで行は残す
    #[default]
    Soft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeletion {
    pub filter: OrderFilter,
    #[serde(default)]
    pub method: DeleteMethod,
}

/// 定型のクリーンアップ処理
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum CleanupOperation {
    RemoveOldLogs,
    ClearCancelledOrders,
    RemoveInactiveUsers,
    CleanTemporaryData,
}

impl CleanupOperation {
    pub fn statement(&self) -> &'static str {
        match self {
            CleanupOperation::RemoveOldLogs => {
                "DELETE FROM system_logs WHERE created_at < DATE_SUB(NOW(), INTERVAL 30 DAY);"
            }
            CleanupOperation::ClearCancelledOrders => {
                "DELETE FROM orders WHERE status = 'cancelled' AND created_at < DATE_SUB(NOW(), INTERVAL 90 DAY);"
            }
            CleanupOperation::RemoveInactiveUsers => {
                "UPDATE users SET deleted_at = NOW() WHERE last_login < DATE_SUB(NOW(), INTERVAL 1 YEAR);"
            }
            CleanupOperation::CleanTemporaryData => "TRUNCATE TABLE temp_processing_data;",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMethod {
    #[default]
    LoadDataInfile,
    InsertStatements,
    BulkInsert,
}

/// CSV取り込みの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    #[serde(default)]
    pub method: ImportMethod,
    #[serde(default = "default_delimiter")]
    pub delimiter: String,
    /// `None` なら ENCLOSED BY を出力しない
    #[serde(default = "default_quote")]
    pub quote: Option<char>,
    #[serde(default = "default_true")]
    pub has_header: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            method: ImportMethod::default(),
            delimiter: default_delimiter(),
            quote: default_quote(),
            has_header: true,
        }
    }
}

/// エクスポートできるテーブル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ExportTable {
    Customers,
    Products,
    Orders,
}

impl ExportTable {
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            ExportTable::Customers => &["customer_id", "first_name", "last_name", "email", "phone"],
            ExportTable::Products => &["product_id", "name", "price", "stock_quantity", "category"],
            ExportTable::Orders => &["order_id", "customer_id", "order_date", "total_amount", "status"],
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    SqlInsert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    pub table: ExportTable,
    #[serde(default)]
    pub format: ExportFormat,
    #[serde(default)]
    pub where_condition: Option<String>,
}

fn default_delimiter() -> String {
    ",".to_string()
}

fn default_quote() -> Option<char> {
    Some('"')
}

fn default_true() -> bool {
    true
}
