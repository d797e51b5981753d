//! WebSocket Handler
//!
//! Handles WebSocket upgrade requests and answers each update message with a
//! freshly computed chart. A connection holds no state beyond its ID.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{Sink, SinkExt, StreamExt};
use std::sync::Arc;

use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;
use crate::dispatch::Dispatcher;

/// WebSocket upgrade handler
///
/// Upgrades the HTTP connection and starts message handling.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let dispatcher = state.dispatcher.clone();
    ws.on_upgrade(move |socket| handle_socket(socket, dispatcher))
}

/// Handle an established WebSocket connection
async fn handle_socket(socket: WebSocket, dispatcher: Dispatcher) {
    let (mut sender, mut receiver) = socket.split();
    let connection_id = uuid::Uuid::new_v4().to_string();

    tracing::debug!(connection_id = %connection_id, "WebSocket connected");

    let connected = ServerMessage::Connected {
        connection_id: connection_id.clone(),
    };
    if !send_message(&mut sender, &connected).await {
        tracing::error!(connection_id = %connection_id, "Failed to send connected message");
        return;
    }

    while let Some(result) = receiver.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(
                    connection_id = %connection_id,
                    error = %e,
                    "WebSocket receive error"
                );
                break;
            }
        };

        let reply = match message {
            Message::Text(text) => Some(respond_to_text(&dispatcher, &text)),
            Message::Binary(_) => Some(ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            }),
            // Axum answers pings itself
            Message::Ping(_) | Message::Pong(_) => None,
            Message::Close(_) => {
                tracing::debug!(connection_id = %connection_id, "Client requested close");
                break;
            }
        };

        if let Some(reply) = reply {
            if !send_message(&mut sender, &reply).await {
                tracing::debug!(
                    connection_id = %connection_id,
                    "WebSocket send failed, closing connection"
                );
                break;
            }
        }
    }

    tracing::debug!(connection_id = %connection_id, "WebSocket disconnected");
}

/// Serialize and send one message
///
/// Returns false if the message could not be delivered.
async fn send_message<S>(sender: &mut S, message: &ServerMessage) -> bool
where
    S: Sink<Message> + Unpin,
{
    match serde_json::to_string(message) {
        Ok(text) => sender.send(Message::Text(text)).await.is_ok(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize message");
            false
        }
    }
}

/// Parse a text frame and build the reply
///
/// Malformed frames get an error reply; the connection stays open.
fn respond_to_text(dispatcher: &Dispatcher, text: &str) -> ServerMessage {
    match serde_json::from_str::<ClientMessage>(text) {
        Ok(message) => respond(dispatcher, message),
        Err(e) => {
            tracing::debug!(error = %e, text = %text, "Invalid client message");
            ServerMessage::Error {
                message: format!("Invalid message format: {}", e),
            }
        }
    }
}

/// Build the reply to a parsed client message
fn respond(dispatcher: &Dispatcher, message: ClientMessage) -> ServerMessage {
    match message {
        ClientMessage::Update { controls } => match dispatcher.handle(&controls) {
            Ok(payload) => ServerMessage::Chart { payload },
            Err(e) => ServerMessage::Error {
                message: e.to_string(),
            },
        },
        ClientMessage::Ping => ServerMessage::Pong,
    }
}
