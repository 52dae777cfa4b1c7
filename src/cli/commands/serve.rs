use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::app::{router, AppState};
use crate::auth::TokenVerifier;
use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseManager, HobbyStore, MemoryHobbyStore, PgHobbyStore};
use crate::services::HobbyService;

pub async fn handle(config: &AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    let store = open_store(config).await?;
    let verifier = TokenVerifier::new(&config.security.jwt_secret).context("SECURITY_JWT_SECRET must be set")?;
    let state = AppState::new(HobbyService::new(store), verifier);
    let app = router(state, config);

    let bind_addr = format!("0.0.0.0:{}", port.unwrap_or(config.api.port));
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Hobbees API listening on http://{}", bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    info!("Server stopped");
    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn HobbyStore>> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to the database")?;
            DatabaseManager::bootstrap(&pool).await.context("schema bootstrap failed")?;
            Ok(Arc::new(PgHobbyStore::new(pool, config.store.max_revision_retries)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            Ok(Arc::new(MemoryHobbyStore::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
