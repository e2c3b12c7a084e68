//! WebSocket upgrade handler.

use axum::body::Bytes;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::HeaderMap;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tracing::{debug, info, warn};

use skillswap_core::error::AppError;
use skillswap_service::RequestContext;

use crate::dto::request::WsQuery;
use crate::error::ApiResult;
use crate::extractors::auth::authenticate_token;
use crate::state::AppState;

/// GET /ws?token={jwt}
///
/// The caller is authenticated before the upgrade. A bearer header is
/// accepted when the query parameter is absent.
pub async fn ws_handler(
    State(state): State<AppState>,
    ws: WebSocketUpgrade,
    Query(query): Query<WsQuery>,
    headers: HeaderMap,
) -> ApiResult<Response> {
    let token = query
        .token
        .or_else(|| {
            headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::to_owned)
        })
        .ok_or_else(|| AppError::authentication("Missing token"))?;

    let ctx = authenticate_token(&state, &token).await?;

    Ok(ws.on_upgrade(move |socket| handle_ws_connection(state, ctx, socket)))
}

/// Drives one established socket until either side goes away.
async fn handle_ws_connection(state: AppState, ctx: RequestContext, socket: WebSocket) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (handle, mut outbound_rx) = state.realtime.connect(ctx.user_id);
    let conn_id = handle.id;

    info!(conn_id = %conn_id, user_id = %ctx.user_id, "WebSocket connection established");

    let ping_every = state.realtime.ping_interval();
    let writer_handle = handle.clone();
    let mut outbound_task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(ping_every);
        ticker.tick().await;

        loop {
            tokio::select! {
                frame = outbound_rx.recv() => {
                    let Some(frame) = frame else { break };
                    if ws_tx.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                _ = ticker.tick() => {
                    if ws_tx.send(Message::Ping(Bytes::new())).await.is_err() {
                        break;
                    }
                }
                _ = writer_handle.closed() => {
                    let _ = ws_tx.send(Message::Close(None)).await;
                    break;
                }
            }
        }
    });

    let mut inbound_task = tokio::spawn(async move {
        while let Some(result) = ws_rx.next().await {
            match result {
                Ok(Message::Close(_)) => break,
                Ok(Message::Text(text)) => {
                    debug!(conn_id = %conn_id, len = text.len(), "Ignoring inbound text frame");
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(conn_id = %conn_id, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut outbound_task => inbound_task.abort(),
        _ = &mut inbound_task => outbound_task.abort(),
    }

    state.realtime.disconnect(&handle);

    info!(conn_id = %conn_id, user_id = %ctx.user_id, "WebSocket connection closed");
}
