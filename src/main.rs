use std::sync::Arc;
use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use youth_registry::{
    api,
    config::Settings,
    db::DbPool,
    service::ServiceContext,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "youth_registry=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if dotenv_loaded {
        tracing::debug!("Loaded variables from .env");
    }

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;

    tracing::info!("Starting Youth Registry server on {}:{}", settings.server.host, settings.server.port);

    // Initialize database; a missing variable or an unreachable store stops startup here
    let db_pool = DbPool::connect(&settings.database).await?;
    db_pool.ensure_schema(&settings.database).await?;

    let service_context = Arc::new(ServiceContext::new(
        db_pool.clone(),
        settings.registry.empty_list_is_error,
    ));

    let app = api::create_app(service_context);

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", settings.server.host, settings.server.port)
    ).await?;

    tracing::info!("Server listening on http://{}:{}", settings.server.host, settings.server.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db_pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down...");
}
