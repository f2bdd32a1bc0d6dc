//! Client-side submission workflow for the DNA matching service.
//!
//! [`SelectionStore`] holds the chosen files, [`SubmissionController`] turns a
//! selection into at most one in-flight request and owns the resulting
//! [`SubmissionOutcome`], and [`result_view::render`] projects that outcome
//! into display content.

pub mod config;
pub mod controller;
pub mod error;
pub mod request;
pub mod result_view;
pub mod selection;
pub mod transport;

pub use config::{load_settings, load_settings_from, ClientSettings};
pub use controller::{
    execute, PendingSubmission, SubmissionController, SubmissionOutcome, SubmissionTicket,
    SubmitDecision, SubmitStatus,
};
pub use error::{ErrorCategory, SubmitError, ValidationNotice};
pub use request::{AnalysisRequest, UploadPart};
pub use result_view::{render, DisplayField, DisplayGroup, ResultDisplay};
pub use selection::{SelectedFile, Selection, SelectionStore};
pub use shared::domain::{AnalysisMetrics, AnalysisResult, BestMatch};
pub use transport::{AnalysisTransport, HttpTransport, TransportResponse};
