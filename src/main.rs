use std::sync::Arc;

use marquee_api::{
    api::{create_router, AppState, SessionSweeperHandle},
    config::Config,
    db::{create_redis_client, Cache, CacheWriterHandle},
    services::TmdbCatalog,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("marquee_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let (cache, cache_handle) = match &config.redis_url {
        Some(url) => {
            let (cache, handle) = Cache::new(create_redis_client(url)?).await;
            tracing::info!("Catalog cache enabled");
            (Some(cache), Some(handle))
        }
        None => {
            tracing::info!("REDIS_URL not set, catalog cache disabled");
            (None, None)
        }
    };

    let catalog = TmdbCatalog::new(
        cache,
        config.tmdb_api_key.clone(),
        config.tmdb_api_url.clone(),
    );
    let state = AppState::new(Arc::new(catalog));
    let sweeper = state.spawn_session_sweeper(config.session_idle_timeout());
    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cache_handle, sweeper))
        .await?;

    Ok(())
}

async fn shutdown_signal(
    cache_handle: Option<CacheWriterHandle>,
    sweeper: SessionSweeperHandle,
) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }

    tracing::info!("Shutting down");
    sweeper.shutdown().await;
    if let Some(handle) = cache_handle {
        handle.shutdown().await;
    }
}
