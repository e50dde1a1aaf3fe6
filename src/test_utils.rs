use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::{create_pool, seed_doctors},
    routes::create_router,
    state::{AppState, Config},
};

pub fn test_config() -> Config {
    Config {
        jwt_secret: "test-secret".to_string(),
        jwt_expiration_hours: 1,
        reminder_interval: Duration::from_secs(60),
        reminder_window_minutes: 24 * 60,
        openai_api_key: None,
        openai_model: "gpt-4o".to_string(),
        openai_base_url: "http://127.0.0.1:9".to_string(),
    }
}

pub async fn test_state(config: Config) -> AppState {
    let db = create_pool();
    seed_doctors(&db).await;
    AppState::new(Arc::new(config), db)
}

/// Creates a user directly in the store (skipping bcrypt) and returns its id and token.
pub async fn create_user(state: &AppState, username: &str) -> (i64, String) {
    let user = state
        .user_repository
        .create(username, "unused-hash", "Test Patient", "patient@example.com")
        .await
        .unwrap();
    let token = state.auth_service.issue_token(&user).unwrap();
    (user.id, token)
}

/// Serves the app on an ephemeral local port and returns `host:port`.
pub async fn spawn_server(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}
