//! Submission and response classification

use resopt_core::prelude::*;
use resopt_core::{AnalysisRequest, AnalysisResult};
use serde_json::Value;
use url::Url;

use crate::form::AnalysisForm;
use crate::transport::{AnalysisTransport, HttpTransport, TransportResponse};

/// Message used when the server gives no usable reason.
pub const GENERIC_FAILURE: &str = "Analysis failed";

/// A failed submission, carrying the text shown in the error view.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct AnalysisFailure {
    pub message: String,
}

impl AnalysisFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn generic() -> Self {
        Self::new(GENERIC_FAILURE)
    }

    /// Failure for a request that never produced a response.
    pub fn from_error(error: &Error) -> Self {
        let cause = match error {
            Error::Transport { message } => message.clone(),
            other => other.to_string(),
        };
        Self::new(format!("{GENERIC_FAILURE}: {cause}"))
    }
}

pub type AnalysisOutcome = std::result::Result<AnalysisResult, AnalysisFailure>;

/// Truthy `error` field, if any. Strings are reported verbatim; other truthy
/// values fall back to the generic message.
fn server_error(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        _ => Some(GENERIC_FAILURE.to_string()),
    }
}

/// Classify a raw response.
///
/// A truthy `error` field wins regardless of status. Otherwise non-2xx and
/// non-JSON bodies fail with the generic message, and anything else is a
/// result.
pub fn classify(response: &TransportResponse) -> AnalysisOutcome {
    let body: Option<Value> = serde_json::from_str(&response.body).ok();

    if let Some(message) = body.as_ref().and_then(server_error) {
        return Err(AnalysisFailure::new(message));
    }

    if !response.is_success() {
        return Err(AnalysisFailure::generic());
    }

    body.map(AnalysisResult::from_value)
        .ok_or_else(AnalysisFailure::generic)
}

/// Issues exactly one request per submission.
#[derive(Debug, Clone)]
pub struct AnalysisClient<T> {
    transport: T,
}

impl AnalysisClient<HttpTransport> {
    pub fn http(base_url: &Url) -> Result<Self> {
        Ok(Self::new(HttpTransport::new(base_url)?))
    }
}

impl<T: AnalysisTransport> AnalysisClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send the request and classify the response. Never fails outright:
    /// every failure becomes an [`AnalysisFailure`].
    pub async fn submit(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        let form = AnalysisForm::from_request(request);
        info!(
            job_title = %request.job_title(),
            company = request.company_name().unwrap_or("-"),
            auto_apply = request.auto_apply(),
            "Submitting resume for analysis"
        );

        let outcome = match self.transport.send(form).await {
            Ok(response) => classify(&response),
            Err(e) => {
                warn!("Analysis request did not complete: {}", e);
                Err(AnalysisFailure::from_error(&e))
            }
        };

        match &outcome {
            Ok(_) => info!("Analysis succeeded"),
            Err(failure) => warn!("Analysis failed: {}", failure.message),
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resopt_core::{RequestFields, ScoreKind, SelectedDocument};
    use std::sync::{Arc, Mutex};

    /// Records each form and replies with a canned response.
    #[derive(Clone)]
    struct FakeTransport {
        reply: std::result::Result<TransportResponse, String>,
        sent: Arc<Mutex<Vec<AnalysisForm>>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(TransportResponse::new(status, body)),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn failing(cause: &str) -> Self {
            Self {
                reply: Err(cause.to_string()),
                sent: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn sent(&self) -> Vec<AnalysisForm> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl AnalysisTransport for FakeTransport {
        async fn send(&self, form: AnalysisForm) -> Result<TransportResponse> {
            self.sent.lock().unwrap().push(form);
            self.reply.clone().map_err(Error::transport)
        }
    }

    fn request(auto_apply: bool) -> AnalysisRequest {
        let fields = RequestFields {
            job_title: "Backend Engineer".to_string(),
            job_description: "Build services".to_string(),
            company_name: String::new(),
            auto_apply,
        };
        let doc = SelectedDocument::from_bytes("resume.docx", b"PK".to_vec());
        AnalysisRequest::new(&fields, Some(&doc)).unwrap()
    }

    #[tokio::test]
    async fn test_submit_sends_exactly_one_request() {
        let transport = FakeTransport::replying(200, r#"{"success": true}"#);
        let client = AnalysisClient::new(transport.clone());

        let outcome = client.submit(&request(false)).await;
        assert!(outcome.is_ok());

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].file_name, "resume.docx");
        assert!(!sent[0].auto_apply);
    }

    #[tokio::test]
    async fn test_submit_forwards_auto_apply() {
        let transport = FakeTransport::replying(200, "{}");
        let client = AnalysisClient::new(transport.clone());
        client.submit(&request(true)).await.unwrap();
        assert_eq!(transport.sent()[0].text_fields()[3].1, "true");
    }

    #[tokio::test]
    async fn test_submit_parses_result() {
        let transport = FakeTransport::replying(
            200,
            r#"{"success": true, "ats_score": 88, "scores": {"skills": 70}}"#,
        );
        let result = AnalysisClient::new(transport)
            .submit(&request(false))
            .await
            .unwrap();
        assert_eq!(result.score(ScoreKind::Ats), 88.0);
        assert_eq!(result.score(ScoreKind::Skills), 70.0);
    }

    #[tokio::test]
    async fn test_transport_failure_carries_cause() {
        let client = AnalysisClient::new(FakeTransport::failing("connection refused"));
        let failure = client.submit(&request(false)).await.unwrap_err();
        assert_eq!(failure.message, "Analysis failed: connection refused");
    }

    #[test]
    fn test_error_field_wins_for_any_status() {
        for status in [200, 400, 500] {
            let response = TransportResponse::new(status, r#"{"error": "bad file"}"#);
            assert_eq!(classify(&response), Err(AnalysisFailure::new("bad file")));
        }
    }

    #[test]
    fn test_non_string_truthy_error_is_generic() {
        let response = TransportResponse::new(200, r#"{"error": {"code": 7}}"#);
        assert_eq!(classify(&response), Err(AnalysisFailure::generic()));

        let response = TransportResponse::new(200, r#"{"error": true}"#);
        assert_eq!(classify(&response), Err(AnalysisFailure::generic()));
    }

    #[test]
    fn test_falsy_error_is_ignored() {
        for body in [
            r#"{"error": null}"#,
            r#"{"error": ""}"#,
            r#"{"error": false}"#,
            r#"{"error": 0}"#,
        ] {
            assert!(classify(&TransportResponse::new(200, body)).is_ok(), "{body}");
        }
    }

    #[test]
    fn test_non_2xx_without_error_is_generic() {
        let response = TransportResponse::new(502, "{}");
        assert_eq!(classify(&response), Err(AnalysisFailure::generic()));

        let response = TransportResponse::new(500, "<html>Internal Server Error</html>");
        assert_eq!(classify(&response), Err(AnalysisFailure::generic()));
    }

    #[test]
    fn test_non_json_success_body_is_generic_failure() {
        let response = TransportResponse::new(200, "not json");
        assert_eq!(classify(&response), Err(AnalysisFailure::generic()));
    }

    #[test]
    fn test_failure_display_is_message() {
        assert_eq!(AnalysisFailure::new("bad file").to_string(), "bad file");
    }

    #[test]
    fn test_failure_from_document_read() {
        let failure =
            AnalysisFailure::from_error(&Error::document_read("/tmp/cv.docx", "denied"));
        assert_eq!(
            failure.message,
            "Analysis failed: Failed to read document /tmp/cv.docx: denied"
        );
    }
}
