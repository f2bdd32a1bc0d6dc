//! HTTP collaborator for the analysis service.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::DNA_MATCHING_PATH;
use tracing::debug;

use crate::{error::SubmitError, request::AnalysisRequest};

/// Raw answer from the service; interpretation happens in the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait AnalysisTransport: Send + Sync {
    /// Sends one analysis request. `Err` means no response was obtained.
    async fn send(&self, request: AnalysisRequest) -> Result<TransportResponse, SubmitError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server_url: impl AsRef<str>) -> Self {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: impl AsRef<str>) -> Self {
        let base = server_url.as_ref().trim_end_matches('/');
        Self {
            http,
            endpoint: format!("{base}{DNA_MATCHING_PATH}"),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisTransport for HttpTransport {
    async fn send(&self, request: AnalysisRequest) -> Result<TransportResponse, SubmitError> {
        let parts = request.part_names();
        let form = request.into_form()?;
        debug!(endpoint = %self.endpoint, ?parts, "posting analysis request");

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(TransportResponse { status, body })
    }
}
