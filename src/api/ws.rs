//! WebSocket endpoint: welcome on connect, echo, periodic ping.
//!
//! Every frame the server sends is a JSON object tagged with a `type`
//! field. Incoming text frames are echoed back; every ping interval the
//! server pushes the current live record counts. Close and transport
//! errors end the session, nothing is retried.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{debug, warn};

use crate::metrics;

use super::handlers::AppState;

/// Server-to-client WebSocket frames.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WsMessage {
    /// Welcome frame, sent once after the upgrade.
    Connection {
        /// Fixed greeting text.
        message: &'static str,
        /// Send time.
        #[serde(with = "time::serde::rfc3339")]
        timestamp: OffsetDateTime,
    },
    /// Echo of a client text frame.
    Echo {
        /// The client's text, unchanged.
        message: String,
        /// Send time.
        #[serde(with = "time::serde::rfc3339")]
        timestamp: OffsetDateTime,
    },
    /// Periodic liveness frame with current store sizes.
    Ping {
        /// Send time.
        #[serde(with = "time::serde::rfc3339")]
        timestamp: OffsetDateTime,
        /// Number of items currently stored.
        items_count: usize,
        /// Number of users currently stored.
        users_count: usize,
    },
}

impl WsMessage {
    /// Welcome frame for a fresh connection.
    pub fn connection() -> Self {
        Self::Connection {
            message: "Connected to item-store WebSocket",
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Echo frame wrapping the client's text.
    pub fn echo(message: String) -> Self {
        Self::Echo {
            message,
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    /// Ping frame with the state's live counts.
    pub fn ping(state: &AppState) -> Self {
        Self::Ping {
            timestamp: OffsetDateTime::now_utc(),
            items_count: state.items.len(),
            users_count: state.users.len(),
        }
    }
}

/// Upgrade handler for `GET /ws`.
pub async fn ws_upgrade(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Per-connection session loop.
async fn handle_socket(mut socket: WebSocket, state: AppState) {
    metrics::inc_ws_connections();
    debug!("WebSocket client connected");

    if send(&mut socket, &WsMessage::connection()).await.is_err() {
        return;
    }

    let mut ping = tokio::time::interval(state.ws_ping);
    // The first tick fires immediately; the welcome frame covers it.
    ping.tick().await;

    loop {
        tokio::select! {
            msg = socket.recv() => match msg {
                Some(Ok(Message::Text(text))) => {
                    debug!(len = text.len(), "Echoing client message");
                    if send(&mut socket, &WsMessage::echo(text)).await.is_err() {
                        break;
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    debug!(frame = ?frame, "WebSocket client disconnected");
                    break;
                }
                // Binary frames are ignored; ping/pong is handled by axum.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "WebSocket error");
                    break;
                }
                None => break,
            },
            _ = ping.tick() => {
                if send(&mut socket, &WsMessage::ping(&state)).await.is_err() {
                    break;
                }
            }
        }
    }
}

async fn send(socket: &mut WebSocket, msg: &WsMessage) -> Result<(), axum::Error> {
    let text = serde_json::to_string(msg).map_err(axum::Error::new)?;
    socket.send(Message::Text(text)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NewItem;
    use std::time::Duration;

    #[test]
    fn connection_frame_has_fixed_greeting() {
        let json = serde_json::to_value(WsMessage::connection()).unwrap();

        assert_eq!(json["type"], "connection");
        assert_eq!(json["message"], "Connected to item-store WebSocket");
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn echo_frame_carries_text_unchanged() {
        let json = serde_json::to_value(WsMessage::echo("hello".to_string())).unwrap();

        assert_eq!(json["type"], "echo");
        assert_eq!(json["message"], "hello");
    }

    #[test]
    fn ping_frame_reports_live_counts() {
        let state = AppState::new(Duration::from_secs(5));
        state.items.insert(NewItem {
            name: "Widget".to_string(),
            price: 9.99,
            description: None,
        });

        let json = serde_json::to_value(WsMessage::ping(&state)).unwrap();

        assert_eq!(json["type"], "ping");
        assert_eq!(json["items_count"], 1);
        assert_eq!(json["users_count"], 0);
    }
}
