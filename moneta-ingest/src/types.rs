use serde::{Deserialize, Serialize};

/// A message as handed over by a device receiver or an SMS backup export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Originating address (phone number or sender id such as `VM-HDFCBK`)
    pub sender: Option<String>,
    pub body: String,
    /// Receive time in epoch milliseconds, when the source recorded one
    pub timestamp_ms: Option<i64>,
}

impl InboundMessage {
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            sender: None,
            body: body.into(),
            timestamp_ms: None,
        }
    }

    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    pub fn with_timestamp_ms(mut self, ms: i64) -> Self {
        self.timestamp_ms = Some(ms);
        self
    }
}
