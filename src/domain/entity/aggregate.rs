use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// 集計関数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AggregateFunction {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

/// sales テーブルの数値列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MeasureColumn {
    SaleAmount,
    QuantitySold,
    SaleId,
}

/// sales テーブルのグループ化・絞り込み用の列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DimensionColumn {
    ProductCategory,
    Region,
    Year,
    Month,
    Quarter,
}

impl DimensionColumn {
    /// 文字列の列（WHERE で値を引用する）
    pub fn is_textual(&self) -> bool {
        matches!(self, DimensionColumn::ProductCategory | DimensionColumn::Region)
    }
}

/// `column = value` の絞り込み
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DimensionFilter {
    pub column: DimensionColumn,
    pub value: String,
}

/// 単一の集計クエリ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateQuery {
    pub function: AggregateFunction,
    pub column: MeasureColumn,
    #[serde(default)]
    pub distinct: bool,
    #[serde(default)]
    pub filter: Option<DimensionFilter>,
}

/// GROUP BY / HAVING で使う集計式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalesMetric {
    Count,
    TotalRevenue,
    AvgSale,
    MinSale,
    MaxSale,
}

impl SalesMetric {
    pub fn expression(&self) -> &'static str {
        match self {
            SalesMetric::Count => "COUNT(*)",
            SalesMetric::TotalRevenue => "SUM(sale_amount)",
            SalesMetric::AvgSale => "AVG(sale_amount)",
            SalesMetric::MinSale => "MIN(sale_amount)",
            SalesMetric::MaxSale => "MAX(sale_amount)",
        }
    }

    pub fn alias(&self) -> &'static str {
        match self {
            SalesMetric::Count => "count",
            SalesMetric::TotalRevenue => "total_revenue",
            SalesMetric::AvgSale => "avg_sale",
            SalesMetric::MinSale => "min_sale",
            SalesMetric::MaxSale => "max_sale",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupByQuery {
    pub group_by: Vec<DimensionColumn>,
    pub metrics: Vec<SalesMetric>,
    #[serde(default = "default_true")]
    pub order: bool,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// HAVING の比較演算子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum Comparison {
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    Greater,

    #[strum(serialize = ">=")]
    #[serde(rename = ">=")]
    GreaterOrEqual,

    #[strum(serialize = "<")]
    #[serde(rename = "<")]
    Less,

    #[strum(serialize = "<=")]
    #[serde(rename = "<=")]
    LessOrEqual,

    #[strum(serialize = "=")]
    #[serde(rename = "=")]
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HavingCondition {
    pub metric: SalesMetric,
    pub comparison: Comparison,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HavingQuery {
    pub group_by: DimensionColumn,
    pub metrics: Vec<SalesMetric>,
    pub having: HavingCondition,
    #[serde(default)]
    pub where_condition: Option<String>,
}

/// ウィンドウ関数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFunction {
    #[strum(serialize = "ROW_NUMBER()")]
    RowNumber,

    #[strum(serialize = "RANK()")]
    Rank,

    #[strum(serialize = "DENSE_RANK()")]
    DenseRank,

    #[strum(serialize = "SUM(sale_amount)")]
    RunningSum,

    #[strum(serialize = "AVG(sale_amount)")]
    RunningAvg,

    #[strum(serialize = "LAG(sale_amount)")]
    Lag,

    #[strum(serialize = "LEAD(sale_amount)")]
    Lead,
}

impl WindowFunction {
    /// フレーム句を指定できる集計系の関数
    pub fn accepts_frame(&self) -> bool {
        matches!(self, WindowFunction::RunningSum | WindowFunction::RunningAvg)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowOrder {
    #[default]
    #[strum(serialize = "sale_amount DESC")]
    AmountDesc,

    #[strum(serialize = "sale_date")]
    SaleDate,

    #[strum(serialize = "sale_amount ASC")]
    AmountAsc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFrame {
    #[strum(serialize = "ROWS UNBOUNDED PRECEDING")]
    RowsUnboundedPreceding,

    #[strum(serialize = "ROWS 2 PRECEDING")]
    TwoRowsPreceding,

    #[strum(serialize = "RANGE UNBOUNDED PRECEDING")]
    RangeUnboundedPreceding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowQuery {
    pub function: WindowFunction,
    #[serde(default)]
    pub partition_by: Option<DimensionColumn>,
    #[serde(default)]
    pub order: WindowOrder,
    /// 集計系以外の関数では無視される
    #[serde(default)]
    pub frame: Option<WindowFrame>,
}

fn default_true() -> bool {
    true
}
