//! Input processing module
//! Handles résumé intake, file type detection and form validation

pub mod file_detector;
pub mod manager;
pub mod validation;
