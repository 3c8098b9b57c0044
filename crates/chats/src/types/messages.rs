//! Message shape accepted by the chat service.

use chrono::{DateTime, Utc};

/// A message received over the wire. The contract carries no chat id, so the
/// audit row for it uses the sentinel entity id 0.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub from: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}
