//! Multipart form fields for a submission

use resopt_core::{AnalysisRequest, DocumentData};

/// MIME type sent with the résumé part.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Transport-agnostic view of the multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisForm {
    /// Original file name of the `resume` part
    pub file_name: String,
    pub document: DocumentData,
    pub job_title: String,
    pub job_description: String,
    /// Empty when no company was given
    pub company_name: String,
    pub auto_apply: bool,
}

impl AnalysisForm {
    pub fn from_request(request: &AnalysisRequest) -> Self {
        let document = request.document();
        Self {
            file_name: document.name.clone(),
            document: document.data.clone(),
            job_title: request.job_title().to_string(),
            job_description: request.job_description().to_string(),
            company_name: request.company_name().unwrap_or_default().to_string(),
            auto_apply: request.auto_apply(),
        }
    }

    /// Text parts in submission order.
    pub fn text_fields(&self) -> [(&'static str, String); 4] {
        [
            ("job_title", self.job_title.clone()),
            ("job_description", self.job_description.clone()),
            ("company_name", self.company_name.clone()),
            ("auto_apply", self.auto_apply.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resopt_core::{RequestFields, SelectedDocument};

    fn request(auto_apply: bool, company: &str) -> AnalysisRequest {
        let fields = RequestFields {
            job_title: "Backend Engineer".to_string(),
            job_description: "Build services".to_string(),
            company_name: company.to_string(),
            auto_apply,
        };
        let doc = SelectedDocument::from_bytes("resume.docx", b"PK".to_vec());
        AnalysisRequest::new(&fields, Some(&doc)).unwrap()
    }

    #[test]
    fn test_auto_apply_serialized_as_string_flag() {
        let form = AnalysisForm::from_request(&request(false, ""));
        assert_eq!(form.text_fields()[3], ("auto_apply", "false".to_string()));

        let form = AnalysisForm::from_request(&request(true, ""));
        assert_eq!(form.text_fields()[3], ("auto_apply", "true".to_string()));
    }

    #[test]
    fn test_absent_company_sent_as_empty_string() {
        let form = AnalysisForm::from_request(&request(false, "  "));
        assert_eq!(form.company_name, "");
        assert_eq!(form.text_fields()[2], ("company_name", String::new()));
    }

    #[test]
    fn test_file_name_and_fields() {
        let form = AnalysisForm::from_request(&request(false, "Acme"));
        assert_eq!(form.file_name, "resume.docx");
        assert_eq!(form.job_title, "Backend Engineer");
        assert_eq!(form.job_description, "Build services");
        assert_eq!(form.company_name, "Acme");
    }
}
