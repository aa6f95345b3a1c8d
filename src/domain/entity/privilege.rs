use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrivilegeOperation {
    #[display(fmt = "GRANT")]
    Grant,

    #[display(fmt = "REVOKE")]
    Revoke,
}

/// 権限の適用範囲
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "level", rename_all = "snake_case")]
pub enum PrivilegeLevel {
    Global,
    Database { database: String },
    Table { database: String, table: String },
    Column { database: String, table: String, columns: Vec<String> },
}

/// GRANT / REVOKE 文の入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivilegeStatement {
    pub operation: PrivilegeOperation,
    pub privileges: Vec<String>,
    pub target: PrivilegeLevel,
    pub user: String,
    #[serde(default = "default_host")]
    pub host: String,
    /// REVOKE では無視される
    #[serde(default)]
    pub with_grant_option: bool,
}

/// ロール付与の入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleGrant {
    pub roles: Vec<String>,
    pub user: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default)]
    pub set_default: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}
