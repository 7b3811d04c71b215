//! HTTP gateway to the analysis backend.
//!
//! Every call is independent: no retries, no shared mutable state. Failures
//! come back as `AppError` values carrying the most specific message the
//! backend offered.

use crate::api::types::{
    AnalysisRequest, AnalysisResponse, ErrorResponse, HealthStatus, UploadResponse,
};
use crate::config::ApiConfig;
use crate::error::{AppError, Result};
use crate::input::manager::ResumeFile;
use crate::models::company::{CompaniesResponse, Company};
use crate::models::results::ResultsResponse;
use futures_util::StreamExt;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Response, Url};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const HEALTH_ENDPOINT: &str = "/api/health";
const COMPANIES_ENDPOINT: &str = "/api/companies";
const UPLOAD_ENDPOINT: &str = "/api/upload";
const ANALYZE_ENDPOINT: &str = "/api/analyze";
const RESULTS_ENDPOINT: &str = "/api/results";

const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;

pub const HEALTH_FALLBACK: &str = "Failed to connect to backend API";
pub const COMPANIES_FALLBACK: &str = "Failed to load companies. Please try again.";
pub const UPLOAD_FALLBACK: &str = "Failed to upload file. Please try again.";
pub const ANALYZE_FALLBACK: &str = "Failed to start analysis. Please try again.";
pub const RESULTS_FALLBACK: &str = "Failed to load results. Please try again.";

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(&config.base_url, config.timeout_secs)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.url(HEALTH_ENDPOINT);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(HEALTH_ENDPOINT, response, HEALTH_FALLBACK).await
    }

    pub async fn companies(&self) -> Result<Vec<Company>> {
        let url = self.url(COMPANIES_ENDPOINT);
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let body: CompaniesResponse = decode(COMPANIES_ENDPOINT, response, COMPANIES_FALLBACK).await?;
        info!("Loaded {} companies", body.companies.len());
        Ok(body.companies)
    }

    /// Multipart upload of a validated résumé under the `file` field.
    /// `on_progress` receives whole percentages, non-decreasing, ending at 100
    /// once the body has been handed to the transport.
    pub async fn upload_resume<F>(&self, resume: &ResumeFile, on_progress: F) -> Result<UploadResponse>
    where
        F: Fn(u8) + Send + Sync + 'static,
    {
        let url = self.url(UPLOAD_ENDPOINT);
        let total = resume.size();

        let body = progress_body(resume.bytes.clone(), Arc::new(on_progress));
        let part = Part::stream_with_length(body, total)
            .file_name(resume.file_name.clone())
            .mime_str(resume.file_type.mime())
            .map_err(|e| AppError::InvalidInput(format!("Failed to create multipart: {}", e)))?;
        let form = Form::new().part("file", part);

        info!("Uploading {} ({} bytes) to {}", resume.file_name, total, url);
        let response = self.client.post(&url).multipart(form).send().await?;
        let uploaded: UploadResponse = decode(UPLOAD_ENDPOINT, response, UPLOAD_FALLBACK).await?;
        info!("Upload accepted, session {}", uploaded.session_id);
        Ok(uploaded)
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        let url = self.url(ANALYZE_ENDPOINT);
        info!(
            "Requesting analysis for session {} against {}",
            request.session_id, request.company
        );
        let response = self.client.post(&url).json(request).send().await?;
        decode(ANALYZE_ENDPOINT, response, ANALYZE_FALLBACK).await
    }

    pub async fn fetch_results(&self, session_id: &str) -> Result<ResultsResponse> {
        let url = self.results_url(session_id)?;
        debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;
        decode(url.path(), response, RESULTS_FALLBACK).await
    }

    /// The session id is always a single path segment.
    fn results_url(&self, session_id: &str) -> Result<Url> {
        let invalid = || AppError::Configuration(format!("Invalid API URL: {}", self.base_url));
        let mut url = Url::parse(&self.url(RESULTS_ENDPOINT)).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|_| invalid())?.push(session_id);
        Ok(url)
    }
}

/// Whole-number share of `sent` in `total`, rounded to nearest.
pub fn progress_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let sent = sent.min(total);
    ((sent * 100 + total / 2) / total) as u8
}

fn progress_body(bytes: Vec<u8>, on_progress: Arc<dyn Fn(u8) + Send + Sync>) -> Body {
    let total = bytes.len() as u64;
    let chunks: Vec<Vec<u8>> = bytes.chunks(UPLOAD_CHUNK_SIZE).map(<[u8]>::to_vec).collect();

    on_progress(0);
    let mut sent = 0u64;
    let mut last = 0u8;
    let stream = futures_util::stream::iter(chunks).map(move |chunk| {
        sent += chunk.len() as u64;
        let percent = progress_percent(sent, total);
        if percent > last {
            last = percent;
            on_progress(percent);
        }
        Ok::<Vec<u8>, std::io::Error>(chunk)
    });
    Body::wrap_stream(stream)
}

/// Decode a JSON success body, or turn an error status into `AppError::Api`.
async fn decode<T: DeserializeOwned>(endpoint: &str, response: Response, fallback: &str) -> Result<T> {
    let status = response.status();
    let text = response.text().await?;

    if status.is_success() {
        return serde_json::from_str(&text).map_err(|e| AppError::MalformedResponse {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        });
    }

    let message = ErrorResponse::message_from_body(&text).unwrap_or_else(|| fallback.to_string());
    warn!("{} returned {}: {}", endpoint, status, message);
    Err(AppError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_percent_rounding() {
        assert_eq!(progress_percent(0, 200), 0);
        assert_eq!(progress_percent(1, 200), 1);
        assert_eq!(progress_percent(99, 200), 50);
        assert_eq!(progress_percent(200, 200), 100);
        assert_eq!(progress_percent(500, 200), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = ApiClient::new("http://localhost:8000///", 5).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url(HEALTH_ENDPOINT), "http://localhost:8000/api/health");
    }

    #[test]
    fn test_session_id_stays_in_one_segment() {
        let client = ApiClient::new("http://localhost:8000", 5).unwrap();
        let url = client.results_url("victim#mine").unwrap();
        assert_eq!(url.path(), "/api/results/victim%23mine");
        assert_eq!(url.fragment(), None);

        let url = client.results_url("../health?x").unwrap();
        assert_eq!(url.path(), "/api/results/..%2Fhealth%3Fx");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn test_unusable_base_url_is_a_configuration_error() {
        let client = ApiClient::new("not a url", 5).unwrap();
        assert!(matches!(client.results_url("abc"), Err(AppError::Configuration(_))));
    }
}
