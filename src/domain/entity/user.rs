use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// 認証プラグイン
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum AuthPlugin {
    #[default]
    #[strum(serialize = "mysql_native_password")]
    #[serde(rename = "mysql_native_password")]
    MysqlNativePassword,

    #[strum(serialize = "caching_sha2_password")]
    #[serde(rename = "caching_sha2_password")]
    CachingSha2Password,

    #[strum(serialize = "sha256_password")]
    #[serde(rename = "sha256_password")]
    Sha256Password,
}

/// パスワードの有効期限
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum PasswordExpiry {
    /// サーバー設定に従う（句を出力しない）
    #[default]
    Default,
    Never,
    Interval { days: u32 },
    Immediate,
}

/// CREATE USER 文の入力
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub user: String,
    #[serde(default = "default_host")]
    pub host: String,
    /// 生成される文ではマスクされる
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub auth_plugin: AuthPlugin,
    #[serde(default)]
    pub password_expire: PasswordExpiry,
    #[serde(default)]
    pub account_lock: bool,
    /// 0 は無制限
    #[serde(default)]
    pub max_connections_per_hour: u32,
    #[serde(default)]
    pub max_user_connections: u32,
}

impl UserAccount {
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            password: String::new(),
            auth_plugin: AuthPlugin::default(),
            password_expire: PasswordExpiry::default(),
            account_lock: false,
            max_connections_per_hour: 0,
            max_user_connections: 0,
        }
    }
}

fn default_host() -> String {
    "localhost".to_string()
}
