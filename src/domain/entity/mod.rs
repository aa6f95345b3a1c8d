pub mod data_type;
pub mod column;
pub mod table;
pub mod schema;
pub mod session;
pub mod database;
pub mod engine;
pub mod privilege;
pub mod user;
pub mod dml;
pub mod aggregate;
// src/domain/entity/mod.rs

pub use data_type::{DataType, DataTypeError};
pub use column::ColumnDefinition;
pub use table::{TableDefinition, TableError};
pub use schema::{SchemaDefinition, SchemaError};
pub use session::DesignerSession;
pub use database::{Charset, Collation, DatabaseDefinition};
pub use engine::{EngineFeatures, StorageEngine, Workload};
pub use privilege::{PrivilegeLevel, PrivilegeOperation, PrivilegeStatement, RoleGrant};
pub use user::{AuthPlugin, PasswordExpiry, UserAccount};
pub use dml::{
    CleanupOperation, CustomerField, CustomerRecord, CustomerStatus, CustomerUpdate, DeleteMethod, ExportFormat,
    ExportOptions, ExportTable, ImportMethod, ImportOptions, OrderDeletion, OrderFilter, PriceAdjustment,
    PriceUpdate, UpdateScope,
};
pub use aggregate::{
    AggregateFunction, AggregateQuery, Comparison, DimensionColumn, DimensionFilter, GroupByQuery, HavingCondition,
    HavingQuery, MeasureColumn, SalesMetric, WindowFrame, WindowFunction, WindowOrder, WindowQuery,
};
