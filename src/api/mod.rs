//! Backend API gateway

pub mod client;
pub mod types;

pub use client::ApiClient;
pub use types::{AnalysisRequest, AnalysisResponse, HealthStatus, UploadResponse};
