use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// CREATE DATABASE で選べる文字セット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize)]
pub enum Charset {
    #[default]
    #[strum(serialize = "utf8mb4")]
    #[serde(rename = "utf8mb4")]
    Utf8mb4,

    #[strum(serialize = "utf8")]
    #[serde(rename = "utf8")]
    Utf8,

    #[strum(serialize = "latin1")]
    #[serde(rename = "latin1")]
    Latin1,

    #[strum(serialize = "ascii")]
    #[serde(rename = "ascii")]
    Ascii,
}

/// 照合順序（文字セットとの組み合わせは検証しない）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter, Serialize, Deserialize)]
pub enum Collation {
    #[default]
    #[strum(serialize = "utf8mb4_unicode_ci")]
    #[serde(rename = "utf8mb4_unicode_ci")]
    Utf8mb4UnicodeCi,

    #[strum(serialize = "utf8mb4_general_ci")]
    #[serde(rename = "utf8mb4_general_ci")]
    Utf8mb4GeneralCi,

    #[strum(serialize = "utf8_general_ci")]
    #[serde(rename = "utf8_general_ci")]
    Utf8GeneralCi,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDefinition {
    pub name: String,

    #[serde(default)]
    pub charset: Charset,

    #[serde(default)]
    pub collation: Collation,
}

impl DatabaseDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            charset: Charset::default(),
            collation: Collation::default(),
        }
    }

    pub fn with_charset(mut self, charset: Charset, collation: Collation) -> Self {
        self.charset = charset;
        self.collation = collation;
        self
    }
}
