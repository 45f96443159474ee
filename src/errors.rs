use serde_json::Value;

/// All error types that can occur when interacting with a bulb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to serialize a command to JSON.
    #[error("failed to dump json: {0:?}")]
    JsonDump(serde_json::Error),

    /// A network socket operation failed while communicating with the bulb.
    #[error("socket {action} error: {err:?}")]
    Socket { action: String, err: std::io::Error },

    /// The bulb answered a convenience call with its own error payload.
    #[error("bulb error reply: {0}")]
    Bulb(Value),

    /// The reply to `method` lacked the expected `result` field.
    #[error("reply to {0:?} carried no result")]
    MissingResult(String),
}

impl Error {
    /// Create a new socket error
    pub fn socket(action: &str, err: std::io::Error) -> Self {
        Error::Socket {
            action: action.to_string(),
            err,
        }
    }
}

/// Hacky implementation of PartialEq for testing
#[cfg(test)]
impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        self.to_string() == other.to_string()
    }
}
