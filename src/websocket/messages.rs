//! WebSocket Message Types
//!
//! Defines the message types exchanged between the dashboard page and the
//! server over the update channel.

use serde::{Deserialize, Serialize};

use crate::filter::{ChartPayload, ControlInput};

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Controls changed; recompute the filtered chart
    Update {
        #[serde(flatten)]
        controls: ControlInput,
    },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Connection established
    Connected {
        /// Unique connection identifier
        connection_id: String,
    },
    /// Replacement for the filtered chart
    Chart { payload: ChartPayload },
    /// Pong response to ping
    Pong,
    /// Error message
    Error {
        /// Error description
        message: String,
    },
}
