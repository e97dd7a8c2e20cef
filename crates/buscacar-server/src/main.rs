mod api;
mod middleware;

use std::sync::Arc;
use std::time::Duration;

use buscacar_catalog::CatalogStore;
use buscacar_fipe::{BrandCache, FipeClient};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, default_rate_limit_state, AppState, FipeState};

const FIPE_BACKOFF_BASE_MS: u64 = 500;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = buscacar_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let catalog = CatalogStore::from_paths(&config.feed_path, &config.brands_path)?;
    if catalog.is_empty() {
        tracing::warn!(feed = %config.feed_path.display(), "serving an empty catalog");
    }

    let client = FipeClient::with_base_url(config.fipe_timeout_secs, &config.fipe_base_url)?
        .with_retries(config.fipe_max_retries, FIPE_BACKOFF_BASE_MS);
    let fipe = FipeState {
        client,
        cache: BrandCache::new(Duration::from_secs(config.fipe_cache_ttl_secs)),
        brand_limit: config.fipe_brand_limit,
    };

    let state = AppState {
        catalog: Arc::new(catalog),
        fipe: Arc::new(fipe),
        default_page_size: config.page_size,
    };
    let app = build_app(state, default_rate_limit_state());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, env = ?config.env, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
