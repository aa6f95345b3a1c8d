pub mod aggregate_generator;
pub mod ddl_generator;
pub mod dcl_generator;
pub mod designer_service;
pub mod dml_generator;
pub mod sample_data;
pub mod simulator;

pub use aggregate_generator::{AggregateError, AggregateGenerator};
pub use ddl_generator::DdlGenerator;
pub use dcl_generator::{DclError, DclGenerator};
pub use designer_service::{DesignerError, DesignerService};
pub use dml_generator::{DmlError, DmlGenerator};
pub use sample_data::DdlSampleData;
pub use simulator::{CleanupImpact, EngineScore, ImpactLevel, IndexImpact, Simulator};
