mod api;
mod middleware;

use std::sync::Arc;

use storehub_core::{GeocodingProvider, XssSanitizer};
use storehub_db::{PgSessionResolver, PgStoreDirectory};
use storehub_geo::{DisabledGeocoder, TencentGeocoder};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState, PageDefaults};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = storehub_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let pool_config = storehub_db::PoolConfig::from_app_config(&config);
    let pool = storehub_db::connect_pool(&config.database_url, pool_config).await?;
    let applied = storehub_db::run_migrations(&pool).await?;
    tracing::info!(applied, env = %config.env, "database ready");

    let geocoder: Arc<dyn GeocodingProvider> = match config.geocoder_key.as_deref() {
        Some(key) => Arc::new(TencentGeocoder::with_base_url(
            key,
            config.geocoder_timeout_secs,
            &config.geocoder_base_url,
        )?),
        None => {
            tracing::warn!("STOREHUB_GEOCODER_KEY not set; address geocoding disabled");
            Arc::new(DisabledGeocoder)
        }
    };

    let state = AppState {
        pool: pool.clone(),
        sessions: Arc::new(PgSessionResolver::new(pool.clone(), config.session_salt.clone())),
        directory: Arc::new(PgStoreDirectory::new(pool)),
        geocoder,
        sanitizer: Arc::new(XssSanitizer::new()),
        pages: PageDefaults {
            page: config.page_number,
            page_size: config.page_size,
            max_page_size: config.max_page_size,
        },
    };
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "storehub-server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
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
