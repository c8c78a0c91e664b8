use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use persistence::repositories::{AuthAccountRepository, PgDocumentStore};
use trufurrs_api::{
    app::{self, Backends},
    config::Config,
    middleware,
    services::auth::LocalAuthProvider,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    middleware::logging::init_logging(&config.logging)
        .context("Failed to initialize logging")?;

    info!("Starting TruFurrs API v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = middleware::init_metrics() {
        warn!(error = %e, "Prometheus recorder not installed; /metrics will be unavailable");
    }

    let db_config = persistence::db::DatabaseConfig::from(&config.database);
    let pool = persistence::db::create_pool(&db_config).await?;

    info!("Running database migrations...");
    persistence::db::run_migrations(&pool).await?;
    info!("Migrations completed");

    let store = PgDocumentStore::with_change_feed(pool.clone()).await?;
    let auth = LocalAuthProvider::new(AuthAccountRepository::new(pool), config.auth.clone())?;
    let backends = Backends::postgres(store, Arc::new(auth));

    let app = app::create_app(config.clone(), backends)?;

    let addr = config.socket_addr()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
