//! WebSocket Update Channel
//!
//! Pushes recomputed charts to the dashboard page as its controls change.
//!
//! - **Handler**: Handles WebSocket upgrade and message processing
//! - **Messages**: Defines client and server message formats
//!
//! ## Example
//!
//! ```javascript
//! // Browser
//! const ws = new WebSocket('ws://localhost:8080/dashboard/_ws');
//!
//! ws.onopen = () => {
//!   ws.send(JSON.stringify({
//!     type: 'update',
//!     start_date: '2024-01-01',
//!     end_date: '2024-03-31',
//!     categories: ['Electronics', 'Books']
//!   }));
//! };
//!
//! ws.onmessage = (event) => {
//!   const msg = JSON.parse(event.data);
//!   if (msg.type === 'chart') console.log(msg.payload);
//! };
//! ```

mod handler;
mod messages;

pub use handler::websocket_handler;
pub use messages::{ClientMessage, ServerMessage};
