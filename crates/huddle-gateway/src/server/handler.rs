//! WebSocket handler
//!
//! The connection gateway: authenticates the handshake, binds presence,
//! pumps frames in both directions, and on close terminates any active
//! call before releasing presence (peer connection ids must still be
//! resolvable when the cancel event fans out).

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use huddle_service::{AuthService, CallService, PresenceService};

use crate::protocol::ClientFrame;

use super::dispatch::dispatch;
use super::state::GatewayState;

/// Channel buffer size for outgoing frames
const FRAME_BUFFER_SIZE: usize = 100;

/// Handshake query parameters
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    /// Access token presented by the client
    token: Option<String>,
}

/// WebSocket gateway handler
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(state, socket, params.token))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, socket: WebSocket, token: Option<String>) {
    // Resolve identity from the handshake credential. Unauthenticated
    // connections are closed without touching any state.
    let user = match token {
        Some(token) => {
            AuthService::new(state.service_context())
                .resolve_identity(&token)
                .await
        }
        None => None,
    };
    let Some(user) = user else {
        tracing::info!("Unauthenticated connection closed");
        let mut socket = socket;
        let _ = socket.close().await;
        return;
    };

    let user_id = user.id;
    let ws_id = Uuid::new_v4().to_string();

    // Register the socket, then bind presence. Concurrent connects by the
    // same account race by design: the most recent ws_id wins.
    let (tx, mut rx) = mpsc::channel(FRAME_BUFFER_SIZE);
    state.registry().register(ws_id.clone(), tx.clone());

    if let Err(e) = PresenceService::new(state.service_context())
        .connect(user_id, &ws_id)
        .await
    {
        tracing::error!(user_id = %user_id, error = %e, "Failed to bind presence");
        state.registry().unregister(&ws_id);
        let mut socket = socket;
        let _ = socket.close().await;
        return;
    }

    tracing::info!(user_id = %user_id, ws_id = %ws_id, "Connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Outbound pump: registry pushes and error replies -> socket
    let ws_id_send = ws_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            match frame.to_json() {
                Ok(json) => {
                    if ws_sink.send(Message::Text(json.into())).await.is_err() {
                        tracing::debug!(ws_id = %ws_id_send, "Socket send failed");
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!(ws_id = %ws_id_send, error = %e, "Frame serialization failed");
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    // Inbound pump: client commands -> services
    let state_recv = state.clone();
    let ws_id_recv = ws_id.clone();
    let recv_task = tokio::spawn(async move {
        while let Some(message) = ws_stream.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, user_id, &ws_id_recv, &tx, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(ws_id = %ws_id_recv, "Binary frames not supported");
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Answered by the websocket layer
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(ws_id = %ws_id_recv, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::debug!(ws_id = %ws_id_recv, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    // Whichever pump ends first, the connection is done
    tokio::select! {
        _ = recv_task => {}
        _ = send_task => {}
    }

    cleanup_connection(&state, user_id, &ws_id).await;
}

/// Parse and dispatch one text frame; errors answer on the same socket
async fn handle_text_frame(
    state: &GatewayState,
    user_id: Uuid,
    ws_id: &str,
    tx: &mpsc::Sender<crate::protocol::ServerFrame>,
    text: &str,
) {
    let frame = match ClientFrame::from_json(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::debug!(ws_id = %ws_id, error = %e, "Unparseable frame");
            return;
        }
    };

    if let Some(reply) = dispatch(state, user_id, frame).await {
        let _ = tx.try_send(reply);
    }
}

/// Clean up a connection on disconnect.
///
/// Order matters: the call teardown fans `cancel-call` out to the peer's
/// connection, which the registry and presence column can still resolve at
/// this point. Only then is the presence binding released (and only when
/// this socket still owns it).
async fn cleanup_connection(state: &GatewayState, user_id: Uuid, ws_id: &str) {
    tracing::info!(user_id = %user_id, ws_id = %ws_id, "Cleaning up connection");

    if let Err(e) = CallService::new(state.service_context())
        .handle_disconnect(user_id)
        .await
    {
        tracing::error!(user_id = %user_id, error = %e, "Call cleanup failed");
    }

    if let Err(e) = PresenceService::new(state.service_context())
        .disconnect(user_id, ws_id)
        .await
    {
        tracing::error!(user_id = %user_id, error = %e, "Presence release failed");
    }

    state.registry().unregister(ws_id);
}
