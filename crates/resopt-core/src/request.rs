//! Submission payload: the selected document plus job context

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// File name suffix a document must carry to be accepted (case-sensitive).
pub const ACCEPTED_EXTENSION: &str = ".docx";

/// Binary handle for the selected document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentData {
    /// Read from disk when the request is sent
    Path(PathBuf),
    /// Already in memory (drag-drop, tests)
    Bytes(Arc<[u8]>),
}

/// The single uploaded résumé.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDocument {
    pub name: String,
    pub data: DocumentData,
}

impl SelectedDocument {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            name,
            data: DocumentData::Path(path),
        }
    }

    pub fn from_bytes(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            data: DocumentData::Bytes(bytes.into()),
        }
    }

    /// Whether the file name passes the extension check.
    pub fn has_accepted_extension(&self) -> bool {
        self.name.ends_with(ACCEPTED_EXTENSION)
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.data {
            DocumentData::Path(p) => Some(p),
            DocumentData::Bytes(_) => None,
        }
    }
}

/// Why a submission was refused before reaching the network.
///
/// `Display` is the alert text shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload your resume (.docx) first")]
    MissingDocument,

    #[error("Please upload a .docx file")]
    WrongExtension,

    #[error("Please enter the job title")]
    MissingJobTitle,

    #[error("Please paste the job description")]
    MissingJobDescription,
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestFields {
    pub job_title: String,
    pub job_description: String,
    pub company_name: String,
    pub auto_apply: bool,
}

/// A validated submission. Only constructible through [`AnalysisRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    job_title: String,
    job_description: String,
    company_name: Option<String>,
    auto_apply: bool,
    document: SelectedDocument,
}

impl AnalysisRequest {
    /// Build a request from the form and current selection.
    ///
    /// Checks run in order: document, job title, job description.
    pub fn new(
        fields: &RequestFields,
        document: Option<&SelectedDocument>,
    ) -> Result<Self, ValidationError> {
        let document = document.ok_or(ValidationError::MissingDocument)?;

        let job_title = fields.job_title.trim();
        if job_title.is_empty() {
            return Err(ValidationError::MissingJobTitle);
        }

        let job_description = fields.job_description.trim();
        if job_description.is_empty() {
            return Err(ValidationError::MissingJobDescription);
        }

        let company_name = Some(fields.company_name.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(Self {
            job_title: job_title.to_string(),
            job_description: job_description.to_string(),
            company_name,
            auto_apply: fields.auto_apply,
            document: document.clone(),
        })
    }

    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn job_description(&self) -> &str {
        &self.job_description
    }

    pub fn company_name(&self) -> Option<&str> {
        self.company_name.as_deref()
    }

    pub fn auto_apply(&self) -> bool {
        self.auto_apply
    }

    pub fn document(&self) -> &SelectedDocument {
        &self.document
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(title: &str, description: &str) -> RequestFields {
        RequestFields {
            job_title: title.to_string(),
            job_description: description.to_string(),
            ..Default::default()
        }
    }

    fn docx() -> SelectedDocument {
        SelectedDocument::from_bytes("resume.docx", b"PK".to_vec())
    }

    #[test]
    fn test_extension_check_is_case_sensitive_suffix() {
        assert!(SelectedDocument::from_path("/tmp/resume.docx").has_accepted_extension());
        assert!(!SelectedDocument::from_path("/tmp/resume.DOCX").has_accepted_extension());
        assert!(!SelectedDocument::from_path("/tmp/resume.pdf").has_accepted_extension());
        assert!(!SelectedDocument::from_path("/tmp/resume.docx.pdf").has_accepted_extension());
    }

    #[test]
    fn test_from_path_uses_file_name() {
        let doc = SelectedDocument::from_path("/home/me/cv/resume.docx");
        assert_eq!(doc.name, "resume.docx");
        assert_eq!(doc.path(), Some(Path::new("/home/me/cv/resume.docx")));
    }

    #[test]
    fn test_request_requires_document() {
        let err = AnalysisRequest::new(&fields("Backend Engineer", "Build services"), None);
        assert_eq!(err, Err(ValidationError::MissingDocument));
    }

    #[test]
    fn test_request_requires_trimmed_title() {
        let doc = docx();
        let err = AnalysisRequest::new(&fields("   ", "Build services"), Some(&doc));
        assert_eq!(err, Err(ValidationError::MissingJobTitle));
    }

    #[test]
    fn test_request_requires_trimmed_description() {
        let doc = docx();
        let err = AnalysisRequest::new(&fields("Backend Engineer", "\n\t "), Some(&doc));
        assert_eq!(err, Err(ValidationError::MissingJobDescription));
    }

    #[test]
    fn test_request_trims_fields_and_drops_empty_company() {
        let doc = docx();
        let mut f = fields("  Backend Engineer ", " Build services\n");
        f.company_name = "   ".to_string();
        let request = AnalysisRequest::new(&f, Some(&doc)).unwrap();

        assert_eq!(request.job_title(), "Backend Engineer");
        assert_eq!(request.job_description(), "Build services");
        assert_eq!(request.company_name(), None);
        assert!(!request.auto_apply());
        assert_eq!(request.document().name, "resume.docx");
    }

    #[test]
    fn test_request_keeps_company_and_flag() {
        let doc = docx();
        let mut f = fields("Backend Engineer", "Build services");
        f.company_name = " Acme ".to_string();
        f.auto_apply = true;
        let request = AnalysisRequest::new(&f, Some(&doc)).unwrap();

        assert_eq!(request.company_name(), Some("Acme"));
        assert!(request.auto_apply());
    }
}
