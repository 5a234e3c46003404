// WebSocket handlers: per-connection fixture replay and the shared live feed

use axum::{
    extract::{
        Path, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;
use tokio::time::{Duration, timeout};

use super::AppState;
use crate::error::FixtureError;
use crate::models::TimeSeriesSnapshot;
use crate::worker::ReplayCursor;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Decrements ws_live connection count on drop (connect = +1, drop = -1).
struct WsLiveGuard(Arc<AtomicUsize>);

impl Drop for WsLiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::Relaxed);
    }
}

/// Sends one message; `false` when the client is gone or the send timed out.
async fn send_or_close(socket: &mut WebSocket, message: Message) -> bool {
    matches!(timeout(WS_SEND_TIMEOUT, socket.send(message)).await, Ok(Ok(())))
}

pub(super) async fn ws_replay(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, FixtureError> {
    let fixture = state.catalog.get(&id)?.clone();
    let interval_ms = state.config.replay.interval_ms;
    Ok(ws
        .on_upgrade(move |socket| async move {
            if let Err(e) = stream_replay(socket, ReplayCursor::new(fixture), interval_ms).await {
                tracing::info!(fixture = %id, "Replay stream error: {}", e);
            }
        })
        .into_response())
}

async fn stream_replay(
    mut socket: WebSocket,
    mut cursor: ReplayCursor,
    interval_ms: u64,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to replay stream");
    let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
    tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    // First ping tick completes immediately; skip it so the first frame is data.
    ping_interval.tick().await;
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let Some(snapshot) = cursor.advance() else {
                    break;
                };
                let json = serde_json::to_string(&snapshot)?;
                if !send_or_close(&mut socket, Message::Text(json.into())).await {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                if !send_or_close(&mut socket, Message::Ping(Bytes::new())).await {
                    break;
                }
            }
        }
    }
    Ok(())
}

pub(super) async fn ws_live(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let tx = state.live_tx.clone();
    let conn_count = state.ws_live_connections.clone();
    ws.on_upgrade(move |socket| async move {
        let mut rx = tx.subscribe();
        if let Err(e) = stream_live(socket, &mut rx, conn_count).await {
            tracing::info!("Live stream error: {}", e);
        }
    })
}

async fn stream_live(
    mut socket: WebSocket,
    rx: &mut broadcast::Receiver<TimeSeriesSnapshot>,
    conn_count: Arc<AtomicUsize>,
) -> anyhow::Result<()> {
    conn_count.fetch_add(1, Ordering::Relaxed);
    let _guard = WsLiveGuard(conn_count);
    tracing::info!("Client connected to live stream");

    let mut ping_interval = tokio::time::interval(WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    ping_interval.tick().await;
    loop {
        tokio::select! {
            result = rx.recv() => {
                match result {
                    Ok(snapshot) => {
                        let json = serde_json::to_string(&snapshot)?;
                        if !send_or_close(&mut socket, Message::Text(json.into())).await {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("WebSocket /ws/live client lagged, skipped {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = ping_interval.tick() => {
                if !send_or_close(&mut socket, Message::Ping(Bytes::new())).await {
                    break;
                }
            }
        }
    }
    Ok(())
}
