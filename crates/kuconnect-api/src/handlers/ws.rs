//! WebSocket upgrade handler.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{info, warn};

use kuconnect_service::context::RequestContext;

use crate::error::ApiResult;
use crate::extractors::auth::authenticate;
use crate::state::AppState;

/// Query parameter for WebSocket authentication.
#[derive(Debug, serde::Deserialize)]
pub struct WsQuery {
    /// Bearer token.
    pub token: String,
}

/// GET /ws?token={jwt}
pub async fn ws_upgrade(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
) -> ApiResult<Response> {
    // Authenticate before upgrade
    let ctx = authenticate(&state, &query.token)?;
    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, ctx, socket)))
}

/// Handles an established WebSocket connection.
async fn handle_ws_connection(state: AppState, ctx: RequestContext, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let connections = Arc::clone(&state.realtime.connections);
    let (handle, mut outbound_rx) = connections.register(ctx.user_id);
    let conn_id = handle.id;
    let ping_every = Duration::from_secs(connections.config().ping_interval_seconds.max(1));

    info!(conn_id = %conn_id, user_id = %ctx.user_id, "WebSocket connection established");

    // Outbound frames and keep-alive pings
    let outbound_task = tokio::spawn(async move {
        let mut ping = tokio::time::interval(ping_every);
        ping.tick().await;
        loop {
            tokio::select! {
                frame = outbound_rx.recv() => {
                    let Some(frame) = frame else { break };
                    if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                _ = ping.tick() => {
                    if ws_tx.send(Message::Ping(Default::default())).await.is_err() {
                        break;
                    }
                }
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    });

    while let Some(result) = ws_rx.next().await {
        match result {
            Ok(Message::Text(text)) => {
                state.session.handle_inbound(&handle, text.as_str()).await;
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                break;
            }
        }
        if !handle.is_alive() {
            break;
        }
    }

    outbound_task.abort();
    connections.unregister(&conn_id);

    info!(conn_id = %conn_id, user_id = %ctx.user_id, "WebSocket connection closed");
}
