use serde::Deserialize;

/// Failure body returned by the reservation API: `{"error": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// Extracts the server-supplied message from a raw failure body. Returns `None`
    /// when the body is empty, not JSON, or has no `error` string.
    pub fn message_from_bytes(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|parsed| parsed.error)
            .filter(|message| !message.is_empty())
    }
}
