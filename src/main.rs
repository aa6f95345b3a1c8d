use tracing::info;
use tracing_subscriber::EnvFilter;
use mysql_handbook::interface::api::{start_server, ServerConfig};
use mysql_handbook::VERSION;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    info!("MySQL Handbook version: {}", VERSION);

    let config = ServerConfig::from_env()?;
    start_server(config).await?;
    Ok(())
}
