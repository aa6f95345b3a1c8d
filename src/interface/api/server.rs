use axum::{
    Router,
    routing::{delete, get, post},
    Extension,
    Server,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::application::{DdlSampleData, DesignerService};
use crate::domain::repository::RepositoryFactory;
use crate::infrastructure::repository::MemoryRepositoryFactory;
use crate::interface::api::handler::*;
use crate::{Error, Result};

pub const HOST_ENV: &str = "HANDBOOK_HOST";
pub const PORT_ENV: &str = "HANDBOOK_PORT";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080, // デフォルトポート番号
        }
    }
}

impl ServerConfig {
    /// 環境変数から設定を読み込む（未設定の項目はデフォルト値）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup(HOST_ENV) {
            config.host = host
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} is not an IP address: {}", HOST_ENV, host)))?;
        }
        if let Some(port) = lookup(PORT_ENV) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("{} is not a port number: {}", PORT_ENV, port)))?;
        }

        Ok(config)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// ルーターの構築
pub fn build_router(service: DesignerService, samples: Arc<DdlSampleData>) -> Router {
    Router::new()
        .route("/health", get(health_check_handler))
        .route("/api/data-types", get(data_types_handler))
        .route("/api/ddl/create-table", post(create_table_sql_handler))
        .route("/api/ddl/create-database", post(create_database_sql_handler))
        .route("/api/dcl/privileges", post(privilege_sql_handler))
        .route("/api/dcl/roles", post(role_grant_sql_handler))
        .route("/api/dcl/users", post(create_user_sql_handler))
        .route("/api/dml/insert", post(insert_sql_handler))
        .route("/api/dml/bulk-insert", post(bulk_insert_sql_handler))
        .route("/api/dml/update", post(update_sql_handler))
        .route("/api/dml/price-update", post(price_update_sql_handler))
        .route("/api/dml/delete", post(delete_sql_handler))
        .route("/api/dml/import", post(import_sql_handler))
        .route("/api/dml/export", post(export_sql_handler))
        .route("/api/dml/cleanup", get(cleanup_list_handler))
        .route("/api/dml/cleanup/:operation", get(cleanup_impact_handler))
        .route("/api/aggregate/basic", post(aggregate_sql_handler))
        .route("/api/aggregate/group-by", post(group_by_sql_handler))
        .route("/api/aggregate/having", post(having_sql_handler))
        .route("/api/aggregate/window", post(window_sql_handler))
        .route("/api/engines", get(engine_features_handler))
        .route("/api/engines/performance/:workload", get(engine_performance_handler))
        .route("/api/samples/ddl", get(sample_data_handler))
        .route("/api/samples/tables/:table_name/index-impact", get(index_impact_handler))
        .route("/api/sessions", post(start_session_handler).get(list_sessions_handler))
        .route("/api/sessions/:id", get(get_session_handler).delete(end_session_handler))
        .route(
            "/api/sessions/:id/draft/columns",
            post(add_draft_column_handler).delete(clear_draft_columns_handler),
        )
        .route("/api/sessions/:id/draft/ddl", post(draft_ddl_handler))
        .route(
            "/api/sessions/:id/tables",
            post(add_table_handler).delete(clear_tables_handler),
        )
        .route("/api/sessions/:id/tables/:table", delete(remove_table_handler))
        .route(
            "/api/sessions/:id/tables/:table/columns",
            post(add_column_handler).delete(clear_columns_handler),
        )
        .route("/api/sessions/:id/tables/:table/ddl", get(table_ddl_handler))
        .route("/api/sessions/:id/ddl", get(schema_ddl_handler))
        .layer(Extension(service))   // デザイナーサービス
        .layer(Extension(samples))   // サンプルデータ
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    // リポジトリとサービスの初期化
    let factory = MemoryRepositoryFactory::new();
    let service = DesignerService::new(factory.session_repository());
    let samples = Arc::new(DdlSampleData::load());

    let app = build_router(service, samples);

    let addr = config.socket_addr();
    info!("サーバーを{}で起動中...", addr);

    Server::try_bind(&addr)
        .map_err(|e| Error::Config(format!("cannot bind {}: {}", addr, e)))?
        .serve(app.into_make_service())
        .await
        .map_err(|e| Error::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn reads_host_and_port() {
        let config = ServerConfig::from_lookup(lookup(&[(HOST_ENV, "127.0.0.1"), (PORT_ENV, " 3000 ")])).unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[(PORT_ENV, "http")])),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ServerConfig::from_lookup(lookup(&[(HOST_ENV, "localhost")])),
            Err(Error::Config(_))
        ));
    }
}
