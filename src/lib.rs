pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod interface;

// MySQL Handbook version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Handbook result type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
