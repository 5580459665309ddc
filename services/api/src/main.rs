use anyhow::Result;
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pauta_api::{create_router, ApiState, Config};
use shared::store::build_store;
use shared::{FallbackCache, ResilientStore};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();
    info!("Starting pauta-api with {:?} backend", config.store.backend);

    let backend = build_store(&config.store).await?;
    let store = Arc::new(ResilientStore::new(backend, FallbackCache::seeded()));

    let app = create_router(ApiState { store });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("pauta-api listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
