use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body returned by the analysis service on a rejected request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: String,
}

impl ServiceErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    /// Extracts the `detail` text from a raw response body, if the body is a
    /// service error document with a non-blank detail.
    pub fn detail_from_bytes(body: &[u8]) -> Option<String> {
        let parsed: Self = serde_json::from_slice(body).ok()?;
        let detail = parsed.detail.trim();
        if detail.is_empty() {
            None
        } else {
            Some(detail.to_string())
        }
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("response body is not valid JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error("response body has an unexpected shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),
}
