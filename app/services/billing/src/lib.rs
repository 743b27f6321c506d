mod bootstrap;
mod handlers;
mod routings;

pub use crate::bootstrap::ensure_bootstrap_admin;
pub use crate::routings::router;

use anyhow::Context;
use app_config::AppConfig;
use app_cryptography::hash::PasswordHasher;
use app_log::init_tracing;
use app_state::AppState;
use app_store::PgStore;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::signal;
use tracing::*;

pub async fn billing_service() -> anyhow::Result<()> {
    dotenv().ok();
    let config = AppConfig::new()?;
    let bind = config.backend_bind.clone();
    init_tracing(config.log_level);
    // PostgreSQL
    let database_url = AppConfig::database_url()?;
    let pg = PgPoolOptions::new()
        .max_connections(config.pg_connection)
        .connect(&database_url)
        .await
        .context("Cannot connect to PostgreSQL")?;
    let store = PgStore::new(pg);
    store.migrate().await?;
    // Generating AppState
    let hasher = PasswordHasher::new(config.password_hash_cost)?;
    let app_state = Arc::new(AppState::new(config, Arc::new(store), hasher));
    ensure_bootstrap_admin(&app_state).await?;
    // Loading Routes
    let routes = router(app_state);
    // Setup TCP Port
    let tcp_listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Cannot bind {bind}"))?;
    // Running Server ...
    info!("Serving billing API on {}", &bind);
    axum::serve(tcp_listener, routes)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Billing API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
