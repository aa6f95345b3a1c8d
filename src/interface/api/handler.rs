use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

use crate::application::{
    AggregateError, AggregateGenerator, CleanupImpact, DclError, DclGenerator, DdlGenerator, DdlSampleData,
    DesignerError, DesignerService, DmlError, DmlGenerator, EngineScore, IndexImpact, Simulator,
};
use crate::domain::entity::{
    AggregateQuery, CleanupOperation, ColumnDefinition, CustomerRecord, CustomerUpdate, DataType,
    DatabaseDefinition, DesignerSession, EngineFeatures, ExportOptions, GroupByQuery, HavingQuery, ImportOptions,
    OrderDeletion, PriceUpdate, PrivilegeStatement, RoleGrant, SchemaError, TableError, UserAccount, WindowQuery,
    Workload,
};
use crate::domain::repository::RepositoryError;

/// API エラー
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Designer(#[from] DesignerError),

    #[error(transparent)]
    Dcl(#[from] DclError),

    #[error(transparent)]
    Dml(#[from] DmlError),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Dcl(_) | ApiError::Dml(_) | ApiError::Aggregate(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Designer(e) => match e {
                DesignerError::Schema(SchemaError::TableNotFound(_))
                | DesignerError::Repository(RepositoryError::SessionNotFound(_)) => StatusCode::NOT_FOUND,
                DesignerError::Schema(SchemaError::TableAlreadyExists(_))
                | DesignerError::Schema(SchemaError::Table(TableError::ColumnAlreadyExists(_)))
                | DesignerError::Repository(RepositoryError::SessionAlreadyExists(_)) => StatusCode::CONFLICT,
                DesignerError::Schema(_) | DesignerError::Repository(RepositoryError::Rejected(_)) => {
                    StatusCode::BAD_REQUEST
                }
                DesignerError::Repository(RepositoryError::StorageError(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("request failed: {}", self);
        } else {
            warn!("request rejected ({}): {}", status, self);
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

/// エラーレスポンス
#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// 生成したSQL
#[derive(Serialize, Deserialize)]
pub struct SqlResponse {
    pub sql: String,
}

#[derive(Serialize, Deserialize)]
pub struct StatementsResponse {
    pub statements: Vec<String>,
}

/// CREATE TABLE 生成のリクエスト
#[derive(Deserialize)]
pub struct CreateTableRequest {
    pub table_name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,
}

#[derive(Deserialize)]
pub struct AddTableRequest {
    pub name: String,
}

#[derive(Deserialize)]
pub struct DraftDdlRequest {
    pub table_name: String,
}

#[derive(Deserialize)]
pub struct BulkInsertRequest {
    pub customers: Vec<CustomerRecord>,
}

#[derive(Serialize)]
pub struct IndexImpactResponse {
    pub table_name: String,
    #[serde(flatten)]
    pub impact: IndexImpact,
}

#[derive(Serialize)]
pub struct EnginePerformanceResponse {
    pub workload: String,
    pub scores: Vec<EngineScore>,
}

fn require_name(value: &str, what: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest(format!("{} must not be empty", what)));
    }
    Ok(trimmed.to_string())
}

/// ヘルスチェックハンドラー
pub async fn health_check_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// デザイナーで選べるデータ型
pub async fn data_types_handler() -> Json<Vec<DataType>> {
    Json(DataType::designer_choices())
}

// --- ステートレスな生成 ---

pub async fn create_table_sql_handler(
    Json(payload): Json<CreateTableRequest>,
) -> Result<Json<SqlResponse>, ApiError> {
    let table_name = require_name(&payload.table_name, "table_name")?;
    Ok(Json(SqlResponse {
        sql: DdlGenerator::render_create_table(&table_name, &payload.columns),
    }))
}

pub async fn create_database_sql_handler(
    Json(mut payload): Json<DatabaseDefinition>,
) -> Result<Json<SqlResponse>, ApiError> {
    payload.name = require_name(&payload.name, "name")?;
    Ok(Json(SqlResponse {
        sql: DdlGenerator::render_create_database(&payload),
    }))
}

pub async fn privilege_sql_handler(
    Json(payload): Json<PrivilegeStatement>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DclGenerator::render_privilege_statement(&payload)?,
    }))
}

pub async fn role_grant_sql_handler(
    Json(payload): Json<RoleGrant>,
) -> Result<Json<StatementsResponse>, ApiError> {
    Ok(Json(StatementsResponse {
        statements: DclGenerator::render_role_grant(&payload)?,
    }))
}

pub async fn create_user_sql_handler(
    Json(payload): Json<UserAccount>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DclGenerator::render_create_user(&payload)?,
    }))
}

// --- DML ---

pub async fn insert_sql_handler(Json(payload): Json<CustomerRecord>) -> Json<SqlResponse> {
    Json(SqlResponse {
        sql: DmlGenerator::render_insert(&payload),
    })
}

pub async fn bulk_insert_sql_handler(
    Json(payload): Json<BulkInsertRequest>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DmlGenerator::render_bulk_insert(&payload.customers)?,
    }))
}

pub async fn update_sql_handler(
    Json(payload): Json<CustomerUpdate>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DmlGenerator::render_update(&payload)?,
    }))
}

pub async fn price_update_sql_handler(
    Json(payload): Json<PriceUpdate>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DmlGenerator::render_price_update(&payload)?,
    }))
}

pub async fn delete_sql_handler(
    Json(payload): Json<OrderDeletion>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DmlGenerator::render_order_deletion(&payload)?,
    }))
}

pub async fn import_sql_handler(
    Json(payload): Json<ImportOptions>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: DmlGenerator::render_import(&payload)?,
    }))
}

pub async fn export_sql_handler(Json(payload): Json<ExportOptions>) -> Json<SqlResponse> {
    Json(SqlResponse {
        sql: DmlGenerator::render_export(&payload),
    })
}

pub async fn cleanup_list_handler() -> Json<Vec<CleanupImpact>> {
    Json(Simulator::cleanup_impacts())
}

pub async fn cleanup_impact_handler(
    Path(operation): Path<String>,
) -> Result<Json<CleanupImpact>, ApiError> {
    let operation = CleanupOperation::from_str(&operation)
        .map_err(|_| ApiError::NotFound(format!("Cleanup operation '{}' not found", operation)))?;
    Ok(Json(Simulator::cleanup_impact(operation)))
}

// --- 集計クエリ ---

pub async fn aggregate_sql_handler(
    Json(payload): Json<AggregateQuery>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: AggregateGenerator::render_aggregate(&payload)?,
    }))
}

pub async fn group_by_sql_handler(
    Json(payload): Json<GroupByQuery>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: AggregateGenerator::render_group_by(&payload)?,
    }))
}

pub async fn having_sql_handler(
    Json(payload): Json<HavingQuery>,
) -> Result<Json<SqlResponse>, ApiError> {
    Ok(Json(SqlResponse {
        sql: AggregateGenerator::render_having(&payload)?,
    }))
}

pub async fn window_sql_handler(Json(payload): Json<WindowQuery>) -> Json<SqlResponse> {
    Json(SqlResponse {
        sql: AggregateGenerator::render_window(&payload),
    })
}

// --- ストレージエンジンとサンプル ---

pub async fn engine_features_handler() -> Json<Vec<EngineFeatures>> {
    Json(Simulator::engine_features())
}

pub async fn engine_performance_handler(
    Path(workload): Path<String>,
) -> Result<Json<EnginePerformanceResponse>, ApiError> {
    let workload = Workload::from_str(&workload)
        .map_err(|_| ApiError::BadRequest(format!("Unknown workload: {}", workload)))?;

    Ok(Json(EnginePerformanceResponse {
        workload: workload.to_string(),
        scores: Simulator::engine_performance(workload),
    }))
}

pub async fn sample_data_handler(
    Extension(samples): Extension<Arc<DdlSampleData>>,
) -> Json<DdlSampleData> {
    Json(samples.as_ref().clone())
}

pub async fn index_impact_handler(
    Path(table_name): Path<String>,
    Extension(samples): Extension<Arc<DdlSampleData>>,
) -> Result<Json<IndexImpactResponse>, ApiError> {
    let table = samples
        .find_table(&table_name)
        .ok_or_else(|| ApiError::NotFound(format!("Sample table '{}' not found", table_name)))?;

    Ok(Json(IndexImpactResponse {
        table_name: table.table_name.to_string(),
        impact: Simulator::index_impact(table.rows),
    }))
}

// --- デザイナーセッション ---

pub async fn start_session_handler(
    Extension(service): Extension<DesignerService>,
) -> Result<(StatusCode, Json<DesignerSession>), ApiError> {
    let session = service.start_session().await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_sessions_handler(
    Extension(service): Extension<DesignerService>,
) -> Result<Json<Vec<Uuid>>, ApiError> {
    Ok(Json(service.session_ids().await?))
}

pub async fn get_session_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
) -> Result<Json<DesignerSession>, ApiError> {
    Ok(Json(service.session(id).await?))
}

pub async fn end_session_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
) -> Result<StatusCode, ApiError> {
    service.end_session(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_draft_column_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
    Json(column): Json<ColumnDefinition>,
) -> Result<Json<DesignerSession>, ApiError> {
    service.add_draft_column(id, column).await?;
    Ok(Json(service.session(id).await?))
}

pub async fn clear_draft_columns_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
) -> Result<StatusCode, ApiError> {
    service.clear_draft_columns(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn draft_ddl_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
    Json(payload): Json<DraftDdlRequest>,
) -> Result<Json<SqlResponse>, ApiError> {
    let sql = service.generate_draft_ddl(id, &payload.table_name).await?;
    Ok(Json(SqlResponse { sql }))
}

pub async fn add_table_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
    Json(payload): Json<AddTableRequest>,
) -> Result<(StatusCode, Json<DesignerSession>), ApiError> {
    service.add_table(id, &payload.name).await?;
    Ok((StatusCode::CREATED, Json(service.session(id).await?)))
}

pub async fn clear_tables_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
) -> Result<StatusCode, ApiError> {
    service.clear_tables(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_table_handler(
    Path((id, table)): Path<(Uuid, String)>,
    Extension(service): Extension<DesignerService>,
) -> Result<StatusCode, ApiError> {
    service.remove_table(id, &table).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_column_handler(
    Path((id, table)): Path<(Uuid, String)>,
    Extension(service): Extension<DesignerService>,
    Json(column): Json<ColumnDefinition>,
) -> Result<(StatusCode, Json<DesignerSession>), ApiError> {
    service.add_column(id, &table, column).await?;
    Ok((StatusCode::CREATED, Json(service.session(id).await?)))
}

pub async fn clear_columns_handler(
    Path((id, table)): Path<(Uuid, String)>,
    Extension(service): Extension<DesignerService>,
) -> Result<StatusCode, ApiError> {
    service.clear_columns(id, &table).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn table_ddl_handler(
    Path((id, table)): Path<(Uuid, String)>,
    Extension(service): Extension<DesignerService>,
) -> Result<Json<SqlResponse>, ApiError> {
    let sql = service.generate_table_ddl(id, &table).await?;
    Ok(Json(SqlResponse { sql }))
}

pub async fn schema_ddl_handler(
    Path(id): Path<Uuid>,
    Extension(service): Extension<DesignerService>,
) -> Result<Json<SqlResponse>, ApiError> {
    let sql = service.generate_schema_ddl(id).await?;
    Ok(Json(SqlResponse { sql }))
}
