//! Backend commands queued from UI to backend worker.

use client_core::PendingSubmission;

pub enum BackendCommand {
    /// Run one analysis request. The UI controller has already moved to
    /// `Pending` for this ticket.
    Submit(PendingSubmission),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Submit(_) => "submit",
        }
    }
}
