//! WebSocket endpoint for real-time job notifications.
//!
//! Endpoint: GET /ws?token=<jwt>
//!
//! The token is validated before the upgrade completes; an invalid token is
//! rejected with a 401 JSON error. After the upgrade the socket streams the
//! user's notifications as JSON text frames:
//!
//! ```text
//! {"type":"job","job_id":"...","action":"created","company":"...","title":"...","status":"applied","timestamp":"..."}
//! {"type":"heartbeat","timestamp":"..."}
//! {"type":"catchup","events_missed":100,"timestamp":"..."}
//! ```
//!
//! # Backpressure
//!
//! If a client falls behind (channel buffer overflows), a `catchup` frame is
//! sent indicating how many events were missed. The client should refetch
//! its job list via the REST API.

use std::time::Duration;

use axum::{
    Router,
    extract::{
        Query, State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
    routing::get,
};
use chrono::Utc;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use jobtrack_core::UserId;

use crate::auth;
use crate::error::ApiResult;
use crate::events::{CatchupEvent, HEARTBEAT_INTERVAL_SECS, HeartbeatEvent, Notification};
use crate::state::AppState;

/// Query parameters for the upgrade request.
#[derive(Debug, Deserialize)]
struct ChannelQuery {
    token: String,
}

/// GET /ws - Upgrade to a WebSocket and stream notifications.
async fn notifications_ws(
    State(state): State<AppState>,
    Query(query): Query<ChannelQuery>,
    ws: WebSocketUpgrade,
) -> ApiResult<Response> {
    let claims = auth::validate_token(&query.token, &state.config().jwt_secret)?;
    let user_id = UserId::from_uuid(claims.sub);

    tracing::info!(user_id = %user_id, "Client connecting to notification channel");

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, user_id)))
}

/// Pump notifications to the socket until the client disconnects.
async fn handle_socket(socket: WebSocket, state: AppState, user_id: UserId) {
    let mut receiver = state.hub().subscribe(user_id).await;
    let (mut sink, mut stream) = socket.split();

    let mut heartbeat = tokio::time::interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS));
    // The first tick fires immediately; consume it so the first frame a
    // client sees is not a heartbeat.
    heartbeat.tick().await;

    loop {
        tokio::select! {
            event = receiver.recv() => {
                let notification = match event {
                    Ok(notification) => notification,
                    Err(RecvError::Lagged(count)) => {
                        tracing::warn!(
                            user_id = %user_id,
                            events_missed = count,
                            "WebSocket client lagged, sending catchup"
                        );
                        Notification::Catchup(CatchupEvent {
                            events_missed: count,
                            timestamp: Utc::now(),
                        })
                    }
                    Err(RecvError::Closed) => break,
                };

                if send_json(&mut sink, &notification).await.is_err() {
                    break;
                }
            }
            _ = heartbeat.tick() => {
                let beat = Notification::Heartbeat(HeartbeatEvent { timestamp: Utc::now() });
                if send_json(&mut sink, &beat).await.is_err() {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    // This channel is push-only; ignore client text frames.
                    Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    tracing::info!(user_id = %user_id, "Notification channel closed");
    // Release our subscription first so this user's channel is eligible
    // for cleanup, not just everyone else's.
    drop(receiver);
    state.hub().cleanup_empty_channels().await;
}

/// Serialize and send one notification frame.
async fn send_json(
    sink: &mut futures::stream::SplitSink<WebSocket, Message>,
    notification: &Notification,
) -> Result<(), axum::Error> {
    match serde_json::to_string(notification) {
        Ok(json) => sink.send(Message::Text(json.into())).await,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize notification");
            Ok(())
        }
    }
}

/// Build the notification channel route.
pub fn routes() -> Router<AppState> {
    Router::new().route("/ws", get(notifications_ws))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heartbeat_interval() {
        assert_eq!(HEARTBEAT_INTERVAL_SECS, 30);
    }
}
