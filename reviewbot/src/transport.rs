//! Message envelopes between the session and the hosting surface.

use serde::{Deserialize, Serialize};

/// Wire envelope for messages crossing the session boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Envelope {
    /// Inbound: a message typed by the user.
    #[serde(rename = "userMessage")]
    UserMessage { text: String },
    /// Outbound: the assistant's reply.
    #[serde(rename = "botReply")]
    BotReply { text: String },
}
