use std::net::SocketAddr;

use tracing::info;

use inkpost_common::{Store, StoreConfig};
use inkpost_web::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let addr: SocketAddr = std::env::var("INKPOST_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
        .parse()?;

    let store_config = StoreConfig::production();
    if !store_config.is_memory() {
        if let Some(parent) = std::path::Path::new(&store_config.connection_string).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let store = Store::open_config(&store_config)?;
    info!(
        "Starting Inkpost v{} (store: {})",
        inkpost_common::VERSION,
        store_config.connection_string
    );

    inkpost_web::serve(addr, AppState::new(store)).await
}
