use thiserror::Error;

/// Failures talking to the catalog API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status; `message` comes from the response body when present
    #[error("server responded {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
