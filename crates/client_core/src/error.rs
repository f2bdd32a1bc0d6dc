//! Error taxonomy for the submission workflow.

use shared::error::ProtocolError;
use thiserror::Error;

/// Broad class of a submission problem, used by front ends to pick wording
/// and styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected locally before any network traffic.
    Validation,
    /// The request could not be sent, or the service refused it.
    Transport,
    /// The service answered with a body that is not an analysis result.
    Protocol,
}

/// Raised synchronously by `submit` when the selection is incomplete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationNotice {
    #[error("a primary file is required")]
    MissingPrimaryFile,
}

impl ValidationNotice {
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::Validation
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not read {name}: {source}")]
    ReadFile {
        name: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{0}")]
    Transport(String),
    #[error("request failed with status {}{}", status_text(.status), detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("failed to fetch data from server: {0}")]
    Protocol(#[from] ProtocolError),
}

impl SubmitError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ReadFile { .. } | Self::Transport(_) | Self::Status { .. } => {
                ErrorCategory::Transport
            }
            Self::Protocol(_) => ErrorCategory::Protocol,
        }
    }

    /// Text shown to the user for a failed submission. Never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            "request failed".to_string()
        } else {
            message
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(describe_error_chain(&err))
    }
}

/// Joins an error and its sources, skipping sources whose text is already
/// contained in the message so far.
pub fn describe_error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

fn status_text(status: &u16) -> String {
    match reqwest::StatusCode::from_u16(*status)
        .ok()
        .and_then(|code| code.canonical_reason())
    {
        Some(reason) => format!("{status} {reason}"),
        None => status.to_string(),
    }
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|detail| format!(": {detail}"))
        .unwrap_or_default()
}
