//! ---
//! pprz_section: "02-messaging-data-model"
//! pprz_subsection: "module"
//! pprz_type: "source"
//! pprz_scope: "code"
//! pprz_description: "Message value model and protocol codecs."
//! pprz_version: "v0.0.0-prealpha"
//! pprz_owner: "tbd"
//! ---
use tracing::debug;

use crate::message::Message;

/// Direction of the message movement, used for consistent logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDirection {
    /// Message about to be published on the bus.
    Outbound,
    /// Message decoded from the bus.
    Inbound,
}

/// Emit a structured log entry for message activity.
pub fn log_message(direction: MessageDirection, message: &Message) {
    debug!(
        class = message.class_name(),
        name = message.msg_name(),
        id = message.id(),
        fields = message.len(),
        payload = %message.encode_payload_trimmed(),
        direction = ?direction,
        "message activity"
    );
}
