use crate::domain::entity::data_type::DataType;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use std::fmt;

/// デザイナーで入力されたカラム定義
///
/// フラグの組み合わせ（NULL許容の主キーなど）は検証しない。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct ColumnDefinition {
    /// カラム名
    #[builder(setter(into))]
    pub name: String,

    /// データ型
    pub data_type: DataType,

    /// NULLを許容するか
    #[builder(default)]
    #[serde(default)]
    pub allow_null: bool,

    /// 主キーに含めるか
    #[builder(default)]
    #[serde(default)]
    pub is_primary_key: bool,

    /// UNIQUE制約
    #[builder(default)]
    #[serde(default)]
    pub is_unique: bool,

    /// AUTO_INCREMENT
    #[builder(default)]
    #[serde(default)]
    pub is_auto_increment: bool,
}

impl ColumnDefinition {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            allow_null: false,
            is_primary_key: false,
            is_unique: false,
            is_auto_increment: false,
        }
    }

    // primary key flag
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.allow_null = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    /// 主キー列にはUNIQUEを付けない（末尾のPRIMARY KEY句で一意になる）
    pub fn renders_unique(&self) -> bool {
        self.is_unique && !self.is_primary_key
    }
}

/// `<name> <type>` に続けて AUTO_INCREMENT / NOT NULL / UNIQUE をこの順で出力する
impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)?;
        if self.is_auto_increment {
            write!(f, " AUTO_INCREMENT")?;
        }
        if !self.allow_null {
            write!(f, " NOT NULL")?;
        }
        if self.renders_unique() {
            write!(f, " UNIQUE")?;
        }
        Ok(())
    }
}
