mod appointment;
mod auth;
mod db;
mod doctor;
mod error;
mod health;
mod middleware;
mod notification;
mod routes;
mod state;
mod user;
mod water;
mod websocket;

#[cfg(test)]
mod test_utils;

use db::{create_pool, seed_doctors};
use notification::NotificationService;
use routes::create_router;
use state::{AppState, Config};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,health_portal=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Arc::new(Config::from_env()?);
    tracing::info!(
        "Reminders every {:?} for appointments within {} minutes",
        config.reminder_interval,
        config.reminder_window_minutes
    );
    if config.openai_api_key.is_none() {
        tracing::info!("OPENAI_API_KEY not set, using rule-based health advice");
    }

    let db = create_pool();
    seed_doctors(&db).await;

    let state = AppState::new(config, db);
    let notifications = state.notifications.clone();

    let app = create_router(state);

    // Start server
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Server starting on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);
    tracing::info!("Notifications available at ws://{}/ws", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(notifications))
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C after closing every notification socket.
async fn shutdown_signal(notifications: NotificationService) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
    notifications.shutdown();
}
