//! Reducer-like state transitions for the single-page client. Everything here
//! runs on the UI thread; the backend worker only ever sees commands.

use client_core::{
    SelectedFile, SelectionStore, SubmissionController, SubmissionOutcome, SubmitDecision,
    SubmitError,
};
use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBannerSeverity {
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusBanner {
    pub severity: StatusBannerSeverity,
    pub message: String,
}

pub struct SessionState {
    pub selection: SelectionStore,
    pub submission: SubmissionController,
    pub status: String,
    pub status_banner: Option<StatusBanner>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            selection: SelectionStore::new(),
            submission: SubmissionController::new(),
            status: "Choose a DNA sequence file to begin".to_string(),
            status_banner: None,
        }
    }
}

impl SessionState {
    pub fn choose_primary(&mut self, file: SelectedFile) {
        self.status = format!("Sequence file: {}", file.name());
        self.selection.set_primary(file);
        if matches!(
            self.status_banner,
            Some(StatusBanner {
                severity: StatusBannerSeverity::Warning,
                ..
            })
        ) {
            self.status_banner = None;
        }
    }

    pub fn choose_reference(&mut self, file: Option<SelectedFile>) {
        self.status = match &file {
            Some(file) => format!("Reference list: {}", file.name()),
            None => "Reference list cleared; the service database will be used".to_string(),
        };
        self.selection.set_reference(file);
    }

    pub fn request_submit(&mut self, cmd_tx: &Sender<BackendCommand>) {
        match self.submission.begin(self.selection.current()) {
            SubmitDecision::Rejected(notice) => {
                self.status = notice.to_string();
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Warning,
                    message: "Please upload a DNA sequence file before submitting!".to_string(),
                });
            }
            SubmitDecision::AlreadyPending => {}
            SubmitDecision::Dispatch(pending) => {
                let ticket = pending.ticket;
                self.status_banner = None;
                if dispatch_backend_command(
                    cmd_tx,
                    BackendCommand::Submit(pending),
                    &mut self.status,
                ) {
                    self.status = "Submitting sequence for analysis".to_string();
                } else {
                    let reason = self.status.clone();
                    self.submission
                        .finish(ticket, Err(SubmitError::Transport(reason)));
                }
            }
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::SubmissionFinished { ticket, result } => {
                let failure = result.as_ref().err().map(UiError::from_submit_error);
                if !self.submission.finish(ticket, result) {
                    return;
                }
                self.status = match (self.submission.outcome(), failure) {
                    (SubmissionOutcome::Success(result), _) => {
                        format!("Analysis complete: best match {}", result.best_match.name)
                    }
                    (_, Some(err)) => format!("{} error: analysis failed", err_label(err.category())),
                    _ => "Analysis finished".to_string(),
                };
            }
            UiEvent::Error(err) => {
                self.status = err.message().to_string();
                let prefix = match err.context() {
                    UiErrorContext::BackendStartup => "Backend unavailable",
                    UiErrorContext::Submission => "Submission",
                    UiErrorContext::Clipboard => "Clipboard",
                };
                self.status_banner = Some(StatusBanner {
                    severity: StatusBannerSeverity::Error,
                    message: format!("{prefix} ({}): {}", err_label(err.category()), err.message()),
                });
            }
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.status_banner = None;
    }
}
