use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use stockroom::config::Config;
use stockroom::middleware::RequestId;
use stockroom::unit_of_work::MemoryStore;
use stockroom::{telemetry, AppState};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    telemetry::init(&config.app);
    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!("Starting Stockroom v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Database: {:?}", config.database.target);

    let state = if config.database.is_memory() {
        tracing::warn!("Using the in-memory store; data is lost on shutdown");
        AppState::in_memory(MemoryStore::new())
    } else {
        let pool = config
            .database
            .create_pool_with_retry()
            .await
            .context("Failed to create database pool")?;

        tracing::info!(
            "Database pool initialized ({}..={} connections)",
            config.database.pool_size,
            config.database.max_connections
        );

        if config.database.run_migrations {
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        AppState::mysql(pool)
    };

    // Start HTTP server
    let bind_address = config.server.bind_address();
    tracing::info!(
        "Server binding to {} with {} workers",
        bind_address,
        config.server.workers
    );

    HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Cors::permissive())
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(|cfg| state.configure(cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run()
    .await
    .context("Server terminated with an error")?;

    tracing::info!("Server stopped");
    Ok(())
}
