use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// データ型の解析エラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataTypeError {
    #[error("Unsupported data type: {0}")]
    Unsupported(String),

    #[error("Invalid VARCHAR length {0} (expected 1..=65535)")]
    InvalidLength(u32),

    #[error("Invalid DECIMAL({precision},{scale}) (precision 1..=65, scale <= 30 and <= precision)")]
    InvalidDecimal { precision: u8, scale: u8 },
}

/// デザイナーで選択できるSQLデータ型
///
/// 表示はMySQLのリテラル表記そのもの（`VARCHAR(100)`, `DECIMAL(10,2)` など）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DataType {
    Int,
    Varchar(u32),
    Text,
    Date,
    Timestamp,
    Decimal { precision: u8, scale: u8 },
}

impl DataType {
    pub const MAX_VARCHAR_LENGTH: u32 = 65_535;
    pub const MAX_DECIMAL_PRECISION: u8 = 65;
    pub const MAX_DECIMAL_SCALE: u8 = 30;

    /// テーブルデザイナーのプルダウンに並ぶ型の一覧
    pub fn designer_choices() -> Vec<DataType> {
        vec![
            DataType::Int,
            DataType::Varchar(50),
            DataType::Varchar(100),
            DataType::Text,
            DataType::Date,
            DataType::Timestamp,
            DataType::Decimal { precision: 10, scale: 2 },
        ]
    }

    pub fn varchar(length: u32) -> Result<Self, DataTypeError> {
        if length == 0 || length > Self::MAX_VARCHAR_LENGTH {
            return Err(DataTypeError::InvalidLength(length));
        }
        Ok(DataType::Varchar(length))
    }

    pub fn decimal(precision: u8, scale: u8) -> Result<Self, DataTypeError> {
        if precision == 0
            || precision > Self::MAX_DECIMAL_PRECISION
            || scale > Self::MAX_DECIMAL_SCALE
            || scale > precision
        {
            return Err(DataTypeError::InvalidDecimal { precision, scale });
        }
        Ok(DataType::Decimal { precision, scale })
    }

    pub fn is_textual(&self) -> bool {
        matches!(self, DataType::Varchar(_) | DataType::Text)
    }

    pub fn is_temporal(&self) -> bool {
        matches!(self, DataType::Date | DataType::Timestamp)
    }
}

/// `NAME(args)` 形式を名前と引数部分に分ける
fn split_arguments(s: &str) -> Option<(&str, &str)> {
    let open = s.find('(')?;
    let inner = s[open + 1..].strip_suffix(')')?;
    Some((s[..open].trim_end(), inner))
}

impl FromStr for DataType {
    type Err = DataTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let unsupported = || DataTypeError::Unsupported(s.trim().to_string());

        match normalized.as_str() {
            "INT" | "INTEGER" => return Ok(DataType::Int),
            "TEXT" => return Ok(DataType::Text),
            "DATE" => return Ok(DataType::Date),
            "TIMESTAMP" => return Ok(DataType::Timestamp),
            _ => {}
        }

        let (name, args) = split_arguments(&normalized).ok_or_else(unsupported)?;
        match name {
            "VARCHAR" => {
                let length = args.trim().parse::<u32>().map_err(|_| unsupported())?;
                DataType::varchar(length)
            }
            "DECIMAL" => {
                let (precision, scale) = args.split_once(',').ok_or_else(unsupported)?;
                let precision = precision.trim().parse::<u8>().map_err(|_| unsupported())?;
                let scale = scale.trim().parse::<u8>().map_err(|_| unsupported())?;
                DataType::decimal(precision, scale)
            }
            _ => Err(unsupported()),
        }
    }
}

impl TryFrom<String> for DataType {
    type Error = DataTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.to_string()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Int => write!(f, "INT"),
            DataType::Varchar(length) => write!(f, "VARCHAR({})", length),
            DataType::Text => write!(f, "TEXT"),
            DataType::Date => write!(f, "DATE"),
            DataType::Timestamp => write!(f, "TIMESTAMP"),
            DataType::Decimal { precision, scale } => write!(f, "DECIMAL({},{})", precision, scale),
        }
    }
}
