use customer_service::config::{DatabaseConfig, StorageBackend};
use customer_service::logging::init_logging;
use customer_service::{
    apply_migrations, build_router, ensure_database_exists, load_from_env, AppError, AppState,
    ConfigError, CustomerStore, MemoryCustomerStore, PgCustomerStore,
};
use std::sync::Arc;
use tokio::net::TcpListener;

async fn open_store(db: &DatabaseConfig) -> Result<Arc<dyn CustomerStore>, AppError> {
    match db.backend {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Ok(Arc::new(MemoryCustomerStore::new()))
        }
        StorageBackend::Postgres => {
            let url = db.url.as_deref().ok_or(ConfigError::Missing("DATABASE_URL"))?;
            ensure_database_exists(url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(db.max_connections)
                .connect(url)
                .await?;
            apply_migrations(&pool, &db.schema).await?;
            Ok(Arc::new(PgCustomerStore::new(pool, &db.schema)))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_from_env()?;
    init_logging(&config.log);

    let store = open_store(&config.database).await?;
    let state = AppState::new(store, &config.server.api_prefix);
    let app = build_router(state, &config.server);

    let listener = TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        backend = ?config.database.backend,
        "customer service listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
