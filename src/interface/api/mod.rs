pub mod handler;
pub mod server;

pub use server::{build_router, start_server, ServerConfig};
