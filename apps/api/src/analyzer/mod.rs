/// Resume Analyzer client — the single point of entry for calls to the
/// external AI extraction service.
///
/// ARCHITECTURAL RULE: No other module may call the AI service directly.
/// Handlers depend on the `ResumeAnalyzer` trait carried in `AppState`, so
/// tests can stub extraction without a network.
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Upper bound on one extraction call; the service parses PDFs and runs an
/// NLP pipeline, so this is generous.
const ANALYZE_TIMEOUT_SECS: u64 = 60;

/// Years of experience credited per distinct role entry the extractor finds.
/// A rough estimate by design; the scoring engine treats the result as an
/// opaque input.
pub const YEARS_PER_ROLE: f64 = 1.5;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Contact details the extractor pulls from the resume header.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub linkedin_url: Option<String>,
    pub github_url: Option<String>,
    pub location: Option<String>,
}

/// Work-experience summary: role/company spans plus every organization
/// mentioned anywhere in the document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkExperience {
    #[serde(default)]
    pub job_roles_and_companies: Vec<String>,
    #[serde(default)]
    pub all_companies_mentioned: Vec<String>,
}

/// Structured extraction result for one resume. Field names mirror the AI
/// service's response payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(rename = "candidate_personal_info", default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub work_experience: WorkExperience,
    #[serde(default)]
    pub projects: Option<String>,
    #[serde(default)]
    pub certifications: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    #[allow(dead_code)]
    filename: Option<String>,
    analysis: ResumeAnalysis,
}

/// Estimates years of professional experience from the extraction result:
/// distinct role entries × `YEARS_PER_ROLE`.
pub fn estimate_experience_years(analysis: &ResumeAnalysis) -> f64 {
    analysis.work_experience.job_roles_and_companies.len() as f64 * YEARS_PER_ROLE
}

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<ResumeAnalysis, AnalyzerError>;
}

/// Production analyzer: forwards the resume file to the AI service's
/// `/analyze/` endpoint as a multipart upload.
#[derive(Clone)]
pub struct HttpAnalyzer {
    client: Client,
    endpoint: String,
}

impl HttpAnalyzer {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(ANALYZE_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
        }
    }
}

#[async_trait]
impl ResumeAnalyzer for HttpAnalyzer {
    async fn analyze(
        &self,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<ResumeAnalysis, AnalyzerError> {
        let part = Part::bytes(data.to_vec())
            .file_name(filename.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AnalyzerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnalyzeResponse = response.json().await?;
        debug!(
            "Resume analysis succeeded: {} skills, {} roles",
            parsed.analysis.skills.len(),
            parsed.analysis.work_experience.job_roles_and_companies.len()
        );
        Ok(parsed.analysis)
    }
}
