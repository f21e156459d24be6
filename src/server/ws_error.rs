//! Centralized helper for WebSocket error frames.
//!
//! Every error sent over a socket goes through here so clients can rely on a
//! single shape: an `Error` action with a code, a message and optional
//! structured context.

use serde_json::{json, Value};

/// Formats a WebSocket error frame as a JSON string.
///
/// # Arguments
/// - `code`: Unique error code (e.g. "INVALID_MESSAGE").
/// - `message`: Human-readable error message (in English).
/// - `context`: Optional structured context (e.g. remaining ban time).
pub fn ws_error_message(code: &str, message: &str, context: Option<Value>) -> String {
    json!({
        "action": "Error",
        "data": {
            "code": code,
            "message": message,
            "context": context.unwrap_or(Value::Null),
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_frames_carry_code_message_and_context() {
        let frame = ws_error_message(
            "BANNED",
            "Too many frames",
            Some(json!({ "banRemainingSecs": 300 })),
        );
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(value["action"], "Error");
        assert_eq!(value["data"]["code"], "BANNED");
        assert_eq!(value["data"]["message"], "Too many frames");
        assert_eq!(value["data"]["context"]["banRemainingSecs"], 300);
    }

    #[test]
    fn absent_context_serializes_as_null() {
        let frame = ws_error_message("INVALID_MESSAGE", "Unparseable frame", None);
        let value: Value = serde_json::from_str(&frame).unwrap();
        assert!(value["data"]["context"].is_null());
    }
}
