//! Device receiver envelopes.
//!
//! The Android receiver forwards each message as `"<sender>: <body>"`, one per
//! line, e.g. `VM-BCCBNK: Rs 120 debited ...`.

use crate::types::InboundMessage;

/// Split one envelope line. The prefix counts as a sender only when it is a
/// single token; `"Dear customer: ..."` stays body text.
pub fn split_envelope(line: &str) -> InboundMessage {
    let line = line.trim();
    if let Some((sender, body)) = line.split_once(": ") {
        let sender = sender.trim();
        if !sender.is_empty() && !sender.contains(char::is_whitespace) {
            return InboundMessage::new(body.trim()).with_sender(sender);
        }
    }
    InboundMessage::new(line)
}

/// Split a multi-line dump, one message per non-blank line
pub fn split_dump(text: &str) -> Vec<InboundMessage> {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .map(split_envelope)
        .collect()
}
