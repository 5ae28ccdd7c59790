//! Wire transport for analysis submissions
//!
//! [`AnalysisTransport`] performs exactly one request per call and returns the
//! raw status and body; classification lives in [`crate::client`].

use resopt_core::prelude::*;
use resopt_core::DocumentData;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use url::Url;

use crate::form::{AnalysisForm, DOCX_MIME};

/// Raw HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends an analysis form.
///
/// `Err` means the request never produced a response (connection refused,
/// unreadable document); any HTTP status is an `Ok` response.
#[trait_variant::make(AnalysisTransport: Send)]
pub trait LocalAnalysisTransport {
    async fn send(&self, form: AnalysisForm) -> Result<TransportResponse>;
}

/// reqwest-backed transport posting to `{base_url}/analyze`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    analyze_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: &Url) -> Result<Self> {
        let raw = format!("{}/analyze", base_url.as_str().trim_end_matches('/'));
        let analyze_url = Url::parse(&raw).map_err(|_| Error::invalid_endpoint(raw.clone()))?;

        // No request timeout; a submission runs until the backend answers.
        let client = Client::builder()
            .build()
            .map_err(|e| Error::transport(format!("failed to create HTTP client: {e}")))?;

        info!(url = %analyze_url, "Analysis transport initialized");

        Ok(Self {
            client,
            analyze_url,
        })
    }

    pub fn analyze_url(&self) -> &Url {
        &self.analyze_url
    }

    async fn document_bytes(document: &DocumentData) -> Result<Vec<u8>> {
        match document {
            DocumentData::Path(path) => tokio::fs::read(path)
                .await
                .map_err(|e| Error::document_read(path, e.to_string())),
            DocumentData::Bytes(bytes) => Ok(bytes.to_vec()),
        }
    }
}

impl AnalysisTransport for HttpTransport {
    async fn send(&self, form: AnalysisForm) -> Result<TransportResponse> {
        let bytes = Self::document_bytes(&form.document).await?;
        let part = Part::bytes(bytes)
            .file_name(form.file_name.clone())
            .mime_str(DOCX_MIME)
            .map_err(|e| Error::transport(e.to_string()))?;

        let mut multipart = Form::new().part("resume", part);
        for (name, value) in form.text_fields() {
            multipart = multipart.text(name, value);
        }

        debug!(url = %self.analyze_url, file = %form.file_name, "Submitting analysis request");

        let response = self
            .client
            .post(self.analyze_url.clone())
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Analysis request failed");
                Error::transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("failed to read response body: {e}")))?;

        debug!(status, bytes = body.len(), "Analysis response received");

        Ok(TransportResponse { status, body })
    }
}
