//! Dashboard form: résumé session, company, role description, analyze

use crate::api::client::{ANALYZE_FALLBACK, UPLOAD_FALLBACK};
use crate::api::types::{AnalysisRequest, AnalysisResponse, UploadResponse};
use crate::error::{AppError, Result};
use crate::input::validation::{check_role_description, AnalyzeGate, RoleDescriptionStatus};
use crate::models::company::{Company, CompanySelection};
use crate::view::route::Route;
use log::{info, warn};

/// Text shown while the analyze call is in flight. Purely cosmetic: the
/// steps are not tied to backend progress.
pub const ANALYSIS_STEPS: [&str; 5] = [
    "Preparing analysis...",
    "Analyzing resume...",
    "Evaluating company fit...",
    "Generating recommendations...",
    "Analysis complete!",
];

/// Message for the `tick`-th spinner update, holding on the last step
/// before completion.
pub fn analysis_step(tick: usize) -> &'static str {
    ANALYSIS_STEPS[tick.min(ANALYSIS_STEPS.len() - 2)]
}

#[derive(Debug, Default)]
pub struct DashboardForm {
    upload: Option<UploadResponse>,
    companies: CompanySelection,
    role_description: String,
    analyzing: bool,
    error: Option<String>,
}

impl DashboardForm {
    pub fn new(companies: Vec<Company>) -> Self {
        Self {
            companies: CompanySelection::new(companies),
            ..Self::default()
        }
    }

    pub fn upload_succeeded(&mut self, upload: UploadResponse) {
        info!("Resume ready: {} ({})", upload.filename, upload.session_id);
        self.upload = Some(upload);
        self.error = None;
    }

    pub fn upload_failed(&mut self, error: &AppError) {
        self.upload = None;
        self.error = Some(upload_error_message(error));
    }

    pub fn session_id(&self) -> Option<&str> {
        self.upload.as_ref().map(|u| u.session_id.as_str())
    }

    pub fn upload(&self) -> Option<&UploadResponse> {
        self.upload.as_ref()
    }

    pub fn companies(&self) -> &CompanySelection {
        &self.companies
    }

    pub fn select_company(&mut self, id: &str) -> bool {
        self.companies.select(id)
    }

    pub fn set_role_description(&mut self, text: &str) -> RoleDescriptionStatus {
        self.role_description = text.to_string();
        RoleDescriptionStatus::assess(&self.role_description)
    }

    pub fn role_status(&self) -> RoleDescriptionStatus {
        RoleDescriptionStatus::assess(&self.role_description)
    }

    /// Company and role checks that need no network. Run these before the
    /// upload so a bad form never creates a session.
    pub fn prefill(&mut self, company: &str, role_description: &str) -> Result<()> {
        if !self.select_company(company) {
            let known: Vec<&str> = self.companies.companies().iter().map(|c| c.id.as_str()).collect();
            return Err(AppError::InvalidInput(format!(
                "Unknown company: {}. Available: {}",
                company,
                known.join(", ")
            )));
        }
        self.set_role_description(role_description);
        check_role_description(role_description)?;
        Ok(())
    }

    pub fn gate(&self) -> AnalyzeGate<'_> {
        AnalyzeGate {
            session_id: self.session_id(),
            company: self.companies.selected_id(),
            role_description: &self.role_description,
        }
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Build the request and mark the form busy. Fails without side effects
    /// if the gate is closed or an analysis is already running.
    pub fn begin_analysis(&mut self) -> Result<AnalysisRequest> {
        if self.analyzing {
            return Err(AppError::InvalidInput("Analysis already in progress".to_string()));
        }
        self.gate().check()?;

        let request = AnalysisRequest {
            session_id: self.session_id().unwrap_or_default().to_string(),
            company: self.companies.selected_id().unwrap_or_default().to_string(),
            role_description: self.role_description.trim().to_string(),
        };
        self.analyzing = true;
        self.error = None;
        Ok(request)
    }

    /// On success, the route to navigate to. On failure the form keeps its
    /// inputs so the user can retry.
    pub fn finish_analysis(&mut self, outcome: Result<AnalysisResponse>) -> Option<Route> {
        self.analyzing = false;
        match outcome {
            Ok(response) => {
                info!("Analysis {} started: {}", response.analysis_id, response.status);
                Some(Route::results(&response.session_id))
            }
            Err(e) => {
                warn!("Analysis request failed: {}", e);
                self.error = Some(analyze_error_message(&e));
                None
            }
        }
    }
}

fn upload_error_message(error: &AppError) -> String {
    match error {
        AppError::Validation(v) => v.to_string(),
        AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => UPLOAD_FALLBACK.to_string(),
    }
}

fn analyze_error_message(error: &AppError) -> String {
    match error {
        AppError::Validation(v) => v.to_string(),
        AppError::Api { message, .. } if !message.trim().is_empty() => message.clone(),
        _ => ANALYZE_FALLBACK.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::validation::ValidationError;

    fn stripe() -> Company {
        Company {
            id: "stripe".to_string(),
            name: "stripe".to_string(),
            display_name: "Stripe".to_string(),
            color: "#635BFF".to_string(),
            logo_url: String::new(),
            description: String::new(),
        }
    }

    fn uploaded(session: &str) -> UploadResponse {
        UploadResponse {
            session_id: session.to_string(),
            status: "uploaded".to_string(),
            message: "File uploaded successfully".to_string(),
            filename: "resume.pdf".to_string(),
            file_size: 3 * 1024 * 1024,
        }
    }

    fn filled_form() -> DashboardForm {
        let mut form = DashboardForm::new(vec![stripe()]);
        form.upload_succeeded(uploaded("sess-1"));
        assert!(form.select_company("stripe"));
        form.set_role_description(&"x".repeat(120));
        form
    }

    #[test]
    fn test_gate_lists_missing_fields_in_order() {
        let form = DashboardForm::new(vec![stripe()]);
        assert!(!form.gate().is_enabled());
        assert_eq!(form.gate().missing_fields(), vec!["Resume", "Company", "Role Description"]);
    }

    #[test]
    fn test_begin_analysis_requires_complete_form() {
        let mut form = DashboardForm::new(vec![stripe()]);
        form.upload_succeeded(uploaded("sess-1"));
        match form.begin_analysis() {
            Err(AppError::Validation(ValidationError::IncompleteForm(missing))) => {
                assert_eq!(missing, vec!["Company", "Role Description"]);
            }
            other => panic!("unexpected {:?}", other.map(|r| r.session_id)),
        }
        assert!(!form.is_analyzing());
    }

    #[test]
    fn test_successful_analysis_navigates_to_results() {
        let mut form = filled_form();
        let request = form.begin_analysis().unwrap();
        assert_eq!(request.company, "stripe");
        assert_eq!(request.role_description.chars().count(), 120);
        assert!(form.is_analyzing());
        assert!(form.begin_analysis().is_err());

        let route = form.finish_analysis(Ok(AnalysisResponse {
            analysis_id: "an-1".to_string(),
            session_id: "sess-1".to_string(),
            status: "processing".to_string(),
            message: String::new(),
        }));
        assert_eq!(route.map(|r| r.to_string()).as_deref(), Some("/results?session=sess-1"));
    }

    #[test]
    fn test_failed_analysis_keeps_form_for_retry() {
        let mut form = filled_form();
        form.begin_analysis().unwrap();
        let route = form.finish_analysis(Err(AppError::Network("refused".to_string())));
        assert_eq!(route, None);
        assert_eq!(form.error(), Some("Failed to start analysis. Please try again."));
        assert!(form.gate().is_enabled());
        assert!(form.begin_analysis().is_ok());
    }

    #[test]
    fn test_upload_failure_prefers_backend_message() {
        let mut form = DashboardForm::new(Vec::new());
        form.upload_failed(&AppError::Api {
            status: 400,
            message: "File is empty".to_string(),
        });
        assert_eq!(form.error(), Some("File is empty"));
        assert_eq!(form.session_id(), None);
    }

    #[test]
    fn test_prefill_rejects_bad_role_before_upload() {
        let mut form = DashboardForm::new(vec![stripe()]);
        match form.prefill("stripe", "Backend intern") {
            Err(AppError::Validation(ValidationError::RoleTooShort { needed })) => assert_eq!(needed, 36),
            other => panic!("unexpected {:?}", other),
        }
        assert!(form.companies().is_selected("stripe"));
        assert!(form.session_id().is_none());

        let err = form.prefill("acme", &"x".repeat(60)).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input: Unknown company: acme. Available: stripe");
        assert!(form.prefill("stripe", &"x".repeat(60)).is_ok());
    }

    #[test]
    fn test_analysis_steps_hold_before_completion() {
        assert_eq!(analysis_step(0), "Preparing analysis...");
        assert_eq!(analysis_step(3), "Generating recommendations...");
        assert_eq!(analysis_step(40), "Generating recommendations...");
    }
}
