//! Snipbin server
//!
//! Server-rendered snippet sharing with signup/login. Startup wires the
//! configuration, the database-backed stores, the page renderer, and the
//! session layer into the request pipeline, then serves until shutdown.

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;

use snipbin::app_state::AppState;
use snipbin::config::Config;
use snipbin::models::{PgSnippetStore, PgUserStore};
use snipbin::render::PageRenderer;
use snipbin::{routes, session};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_target(true)
        .init();

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await?;
    tracing::info!("Database connected successfully");

    let state = AppState::new(
        Arc::new(PgSnippetStore::new(pool.clone())),
        Arc::new(PgUserStore::new(pool)),
        Arc::new(PageRenderer),
    );

    let session_layer = session::session_layer(
        config.session_secret.as_bytes(),
        config.session_lifetime_hours,
    )?;

    let app = routes::app(state, session_layer);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
