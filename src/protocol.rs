//! JSON frame structures for the line-delimited bulb protocol.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Method tag the bulb uses on unsolicited state push frames.
pub(crate) const PROPS_METHOD: &str = "props";

/// Line terminator for both directions of the protocol.
pub(crate) const TERMINATOR: &[u8] = b"\r\n";

/// An outbound command frame.
///
/// Serialized as `{"id": n, "method": "...", "params": [...]}`; `params` is
/// omitted entirely when absent.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub(crate) struct Command {
    pub(crate) id: u64,
    pub(crate) method: String,
    pub(crate) params: Option<Vec<Value>>,
}

impl Command {
    pub(crate) fn new(id: u64, method: &str, params: Option<Vec<Value>>) -> Self {
        Command {
            id,
            method: method.to_string(),
            params,
        }
    }
}

/// An inbound frame: either the reply to a command or an unsolicited push.
///
/// Replies carry `result` or `error` (plus the echoed command `id`); pushes
/// carry `method` and `params`. All fields are optional so any well-formed
/// frame decodes.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: Option<i64>,
    pub method: Option<String>,
    pub params: Option<Value>,
    pub result: Option<Vec<Value>>,
    pub error: Option<Value>,
}

impl Response {
    /// Whether this frame is an unsolicited state push rather than a reply.
    pub fn is_push(&self) -> bool {
        self.method.as_deref() == Some(PROPS_METHOD)
    }

    /// Whether the bulb answered with its error payload.
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// The result entry at `idx`, if present and a string.
    pub fn result_str(&self, idx: usize) -> Option<&str> {
        self.result.as_ref()?.get(idx)?.as_str()
    }

    /// Synthetic reply substituted for a line that failed to decode.
    pub(crate) fn invalid_command() -> Self {
        Response {
            result: Some(vec![Value::from("invalid command")]),
            ..Self::empty()
        }
    }

    /// Synthetic reply substituted when the bulb drops the connection mid-read.
    pub(crate) fn connection_closed() -> Self {
        Response {
            error: Some(Value::from("Bulb closed the connection.")),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Response {
            id: None,
            method: None,
            params: None,
            result: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_params_omitted_when_absent() {
        let with = serde_json::to_string(&Command::new(0, "get_prop", Some(vec![json!("power")])))
            .unwrap();
        assert_eq!(with, r#"{"id":0,"method":"get_prop","params":["power"]}"#);

        let without = serde_json::to_string(&Command::new(3, "get_prop", None)).unwrap();
        assert_eq!(without, r#"{"id":3,"method":"get_prop"}"#);
    }

    #[test]
    fn test_push_classification() {
        let push: Response =
            serde_json::from_str(r#"{"method":"props","params":{"power":"on"}}"#).unwrap();
        assert!(push.is_push());

        let reply: Response = serde_json::from_str(r#"{"id":0,"result":["ok"]}"#).unwrap();
        assert!(!reply.is_push());
        assert_eq!(reply.result_str(0), Some("ok"));
    }

    #[test]
    fn test_error_reply_passes_through() {
        let reply: Response =
            serde_json::from_str(r#"{"id":2,"error":{"code":-1,"message":"method not supported"}}"#)
                .unwrap();
        assert!(reply.is_error());
        assert_eq!(reply.error.unwrap()["code"], json!(-1));
    }

    #[test]
    fn test_synthetic_replies() {
        let invalid = Response::invalid_command();
        assert_eq!(invalid.result_str(0), Some("invalid command"));

        let closed = Response::connection_closed();
        assert_eq!(
            closed.error,
            Some(Value::from("Bulb closed the connection."))
        );
    }
}
