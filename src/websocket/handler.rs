use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    http::HeaderMap,
    response::Response,
};
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::{
    error::{AppError, Result},
    middleware::{authenticate, bearer_token},
    state::AppState,
};

use super::types::NotificationEvent;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub token: Option<String>,
}

/// WebSocket upgrade handler
///
/// Browsers cannot set headers on a WebSocket handshake, so the session
/// token may also travel as the `token` query parameter.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<WsParams>,
    headers: HeaderMap,
) -> Result<Response> {
    let token = params
        .token
        .as_deref()
        .or_else(|| bearer_token(&headers))
        .ok_or(AppError::Unauthorized("Invalid credentials".to_string()))?;
    let authenticated = authenticate(&state, token)?;

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, authenticated, params.user_id, state)))
}

/// The handshake's `userId` must parse and match the session.
fn handshake_user_id(requested: Option<&str>, authenticated: i64) -> Option<i64> {
    requested
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|user_id| *user_id == authenticated)
}

/// Handle individual WebSocket connection
async fn handle_socket(
    mut socket: WebSocket,
    authenticated: i64,
    requested: Option<String>,
    state: AppState,
) {
    let Some(user_id) = handshake_user_id(requested.as_deref(), authenticated) else {
        tracing::warn!(
            "Rejecting WebSocket for user {}: bad userId {:?}",
            authenticated,
            requested
        );
        let _ = socket.send(Message::Close(None)).await;
        return;
    };

    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<NotificationEvent>();

    let connection_id = state.notifications.connect(user_id, tx);

    // Ends when the registry drops this connection's sender.
    let mut send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match serde_json::to_string(&event) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        return;
                    }
                }
                Err(e) => tracing::error!("Failed to serialize {}: {:?}", event.kind(), e),
            }
        }
        let _ = sender.send(Message::Close(None)).await;
    });

    // Server push only: client frames are read to notice the close.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    state.notifications.disconnect(user_id, connection_id);

    tracing::info!("WebSocket connection {} closed for user {}", connection_id, user_id);
}
