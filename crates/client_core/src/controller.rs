//! Submission lifecycle: validation, single-flight dispatch and the one
//! terminal transition per request.
//!
//! The controller itself never awaits. Front ends that keep the network call
//! on another thread use [`SubmissionController::begin`], run [`execute`]
//! elsewhere, and hand the result back through [`SubmissionController::finish`].
//! Callers that can await inline use [`SubmissionController::submit`].

use shared::{domain::AnalysisResult, error::ServiceErrorBody, protocol::parse_dna_matching_response};
use tracing::{debug, info, warn};

use crate::{
    error::{SubmitError, ValidationNotice},
    request::AnalysisRequest,
    selection::{SelectedFile, Selection, SelectionStore},
    transport::{AnalysisTransport, TransportResponse},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Pending,
    Success(AnalysisResult),
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}

/// Identifies one dispatched request so its completion can be matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Snapshot of the selection taken when a request was dispatched.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub primary: SelectedFile,
    pub reference: Option<SelectedFile>,
}

#[derive(Debug)]
pub enum SubmitDecision {
    /// Nothing was sent; the outcome is unchanged.
    Rejected(ValidationNotice),
    /// A request is already in flight; nothing was sent.
    AlreadyPending,
    /// The outcome is now `Pending`; the caller must run the request and
    /// report back with `finish`.
    Dispatch(PendingSubmission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Completed,
    AlreadyPending,
}

#[derive(Debug, Default)]
pub struct SubmissionController {
    outcome: SubmissionOutcome,
    in_flight: Option<SubmissionTicket>,
    next_ticket: u64,
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    pub fn is_pending(&self) -> bool {
        self.outcome.is_pending()
    }

    /// Whether the submit affordance should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_pending()
    }

    pub fn in_flight(&self) -> Option<SubmissionTicket> {
        self.in_flight
    }

    pub fn begin(&mut self, selection: &Selection) -> SubmitDecision {
        let Some(primary) = selection.primary.clone() else {
            debug!("submit rejected: no primary file selected");
            return SubmitDecision::Rejected(ValidationNotice::MissingPrimaryFile);
        };
        if self.is_pending() {
            debug!("submit ignored: a request is already in flight");
            return SubmitDecision::AlreadyPending;
        }

        self.next_ticket += 1;
        let ticket = SubmissionTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.outcome = SubmissionOutcome::Pending;

        info!(
            ticket = ticket.0,
            primary = primary.name(),
            reference = selection.reference.as_ref().map(SelectedFile::name),
            "dispatching analysis request"
        );
        SubmitDecision::Dispatch(PendingSubmission {
            ticket,
            primary,
            reference: selection.reference.clone(),
        })
    }

    /// Applies the terminal transition for `ticket`. Returns `false` and
    /// leaves the outcome untouched when `ticket` is not the request in
    /// flight.
    pub fn finish(
        &mut self,
        ticket: SubmissionTicket,
        result: Result<AnalysisResult, SubmitError>,
    ) -> bool {
        if self.in_flight != Some(ticket) {
            warn!(ticket = ticket.0, "ignoring completion for a request that is not in flight");
            return false;
        }
        self.in_flight = None;
        self.outcome = match result {
            Ok(result) => {
                info!(
                    ticket = ticket.0,
                    best_match = %result.best_match.name,
                    "analysis request succeeded"
                );
                SubmissionOutcome::Success(result)
            }
            Err(err) => {
                warn!(
                    ticket = ticket.0,
                    category = ?err.category(),
                    "analysis request failed: {err}"
                );
                SubmissionOutcome::Failure(err.user_message())
            }
        };
        true
    }

    pub async fn submit(
        &mut self,
        store: &SelectionStore,
        transport: &dyn AnalysisTransport,
    ) -> Result<SubmitStatus, ValidationNotice> {
        match self.begin(store.current()) {
            SubmitDecision::Rejected(notice) => Err(notice),
            SubmitDecision::AlreadyPending => Ok(SubmitStatus::AlreadyPending),
            SubmitDecision::Dispatch(pending) => {
                let result = execute(transport, &pending).await;
                self.finish(pending.ticket, result);
                Ok(SubmitStatus::Completed)
            }
        }
    }
}

/// Reads the selected files, sends the request and interprets the answer.
/// This is the only step of a submission that suspends.
pub async fn execute(
    transport: &dyn AnalysisTransport,
    pending: &PendingSubmission,
) -> Result<AnalysisResult, SubmitError> {
    let request = AnalysisRequest::from_files(&pending.primary, pending.reference.as_ref()).await?;
    let response = transport.send(request).await?;
    interpret_response(response)
}

pub fn interpret_response(response: TransportResponse) -> Result<AnalysisResult, SubmitError> {
    if !response.is_success() {
        return Err(SubmitError::Status {
            status: response.status,
            detail: ServiceErrorBody::detail_from_bytes(&response.body),
        });
    }
    Ok(parse_dna_matching_response(&response.body)?)
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
