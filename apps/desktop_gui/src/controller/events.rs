//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{AnalysisResult, ErrorCategory, SubmissionTicket, SubmitError};

pub enum UiEvent {
    Info(String),
    SubmissionFinished {
        ticket: SubmissionTicket,
        result: Result<AnalysisResult, SubmitError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Validation,
    Transport,
    Protocol,
    Unknown,
}

impl From<ErrorCategory> for UiErrorCategory {
    fn from(value: ErrorCategory) -> Self {
        match value {
            ErrorCategory::Validation => Self::Validation,
            ErrorCategory::Transport => Self::Transport,
            ErrorCategory::Protocol => Self::Protocol,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Submission,
    Clipboard,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    /// Builds an error from free text, guessing the category from its wording.
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("required")
            || message_lower.contains("missing")
            || message_lower.contains("invalid")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("malformed")
            || message_lower.contains("unexpected shape")
            || message_lower.contains("not valid json")
        {
            UiErrorCategory::Protocol
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_submit_error(err: &SubmitError) -> Self {
        Self {
            category: err.category().into(),
            context: UiErrorContext::Submission,
            message: err.user_message(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Validation => "Validation",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Protocol => "Protocol",
        UiErrorCategory::Unknown => "Unexpected",
    }
}
