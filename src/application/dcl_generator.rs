use itertools::Itertools;
use thiserror::Error;

use crate::domain::entity::{
    AuthPlugin, PasswordExpiry, PrivilegeLevel, PrivilegeOperation, PrivilegeStatement, RoleGrant, UserAccount,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DclError {
    #[error("Please select at least one privilege")]
    NoPrivileges,

    #[error("Please select at least one role")]
    NoRoles,

    #[error("Username must not be empty")]
    EmptyUser,
}

/// CREATE USER / GRANT / REVOKE 文の生成
pub struct DclGenerator;

impl DclGenerator {
    /// 権限の対象（`db.table` など）
    ///
    /// 列レベルで列が空の場合は `*.*` になる。
    pub fn render_target(level: &PrivilegeLevel) -> String {
        match level {
            PrivilegeLevel::Column { database, table, columns } if !columns.is_empty() => {
                format!("{}.{} ({})", database, table, columns.join(", "))
            }
            PrivilegeLevel::Table { database, table } if table != "*" => {
                format!("{}.{}", database, table)
            }
            PrivilegeLevel::Table { database, .. } | PrivilegeLevel::Database { database } => {
                format!("{}.*", database)
            }
            PrivilegeLevel::Column { .. } | PrivilegeLevel::Global => "*.*".to_string(),
        }
    }

    pub fn render_privilege_statement(stmt: &PrivilegeStatement) -> Result<String, DclError> {
        if stmt.privileges.is_empty() {
            return Err(DclError::NoPrivileges);
        }

        let privileges = stmt.privileges.join(", ");
        let target = Self::render_target(&stmt.target);

        let mut sql = match stmt.operation {
            PrivilegeOperation::Grant => {
                let mut sql = format!(
                    "{} {} ON {} TO '{}'@'{}'",
                    stmt.operation, privileges, target, stmt.user, stmt.host
                );
                if stmt.with_grant_option {
                    sql.push_str(" WITH GRANT OPTION");
                }
                sql
            }
            PrivilegeOperation::Revoke => format!(
                "{} {} ON {} FROM '{}'@'{}'",
                stmt.operation, privileges, target, stmt.user, stmt.host
            ),
        };
        sql.push(';');

        Ok(sql)
    }

    /// ロール付与文（デフォルトロール設定を含む場合は2文）
    pub fn render_role_grant(grant: &RoleGrant) -> Result<Vec<String>, DclError> {
        if grant.roles.is_empty() {
            return Err(DclError::NoRoles);
        }

        let roles = grant.roles.iter().map(|r| format!("'{}'", r)).join(", ");
        let mut statements = vec![format!("GRANT {} TO '{}'@'{}';", roles, grant.user, grant.host)];
        if grant.set_default {
            statements.push(format!(
                "ALTER USER '{}'@'{}' DEFAULT ROLE {};",
                grant.user, grant.host, roles
            ));
        }

        Ok(statements)
    }

    /// CREATE USER 文
    ///
    /// パスワードは同じ長さの `*` に置き換える。句の順序は
    /// 認証方式、リソース制限（`WITH`）、パスワード期限、アカウントロック。
    pub fn render_create_user(account: &UserAccount) -> Result<String, DclError> {
        let user = account.user.trim();
        if user.is_empty() {
            return Err(DclError::EmptyUser);
        }

        let mut sql = format!("CREATE USER '{}'@'{}'", user, account.host);

        if account.auth_plugin != AuthPlugin::MysqlNativePassword {
            sql.push_str(&format!(" IDENTIFIED WITH {}", account.auth_plugin));
        }
        if !account.password.is_empty() {
            let masked = "*".repeat(account.password.chars().count());
            sql.push_str(&format!(" BY '{}'", masked));
        }

        let limits: Vec<String> = [
            ("MAX_CONNECTIONS_PER_HOUR", account.max_connections_per_hour),
            ("MAX_USER_CONNECTIONS", account.max_user_connections),
        ]
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(option, n)| format!("{} {}", option, n))
        .collect();
        if !limits.is_empty() {
            sql.push_str(&format!(" WITH {}", limits.join(" ")));
        }

        match account.password_expire {
            PasswordExpiry::Default => {}
            PasswordExpiry::Never => sql.push_str(" PASSWORD EXPIRE NEVER"),
            PasswordExpiry::Interval { days } => {
                sql.push_str(&format!(" PASSWORD EXPIRE INTERVAL {} DAY", days))
            }
            PasswordExpiry::Immediate => sql.push_str(" PASSWORD EXPIRE"),
        }

        if account.account_lock {
            sql.push_str(" ACCOUNT LOCK");
        }

        sql.push(';');
        Ok(sql)
    }
}
