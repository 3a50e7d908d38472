use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookingApiError {
    #[error("invalid API base url '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl BookingApiError {
    /// The `error` field of a failure body, when the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
