//! resopt-client - Analysis service client
//!
//! Sends one multipart submission to `POST {base_url}/analyze` and classifies
//! the response into an [`AnalysisOutcome`]. The wire transport sits behind
//! the [`AnalysisTransport`] trait so the client can run against a fake.

pub mod client;
pub mod form;
pub mod transport;

pub use client::{classify, AnalysisClient, AnalysisFailure, AnalysisOutcome, GENERIC_FAILURE};
pub use form::AnalysisForm;
pub use transport::{AnalysisTransport, HttpTransport, LocalAnalysisTransport, TransportResponse};
