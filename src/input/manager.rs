//! Résumé intake: picks the file to upload and validates it before any
//! network traffic happens.

use crate::error::{AppError, Result};
use crate::input::file_detector::FileType;
use crate::input::validation::validate_resume;
use log::{info, warn};
use std::path::{Path, PathBuf};
use tokio::fs;

/// How the file reached us. Both routes behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeSource {
    /// One or more paths handed over at once; only the first is used.
    Dropped,
    /// A single path chosen explicitly.
    Browsed,
}

/// A validated résumé, ready for the multipart upload.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub path: PathBuf,
    pub file_name: String,
    pub file_type: FileType,
    pub bytes: Vec<u8>,
}

impl ResumeFile {
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

pub struct InputManager {
    source: ResumeSource,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            source: ResumeSource::Browsed,
        }
    }

    pub fn with_source(mut self, source: ResumeSource) -> Self {
        self.source = source;
        self
    }

    pub fn source(&self) -> ResumeSource {
        self.source
    }

    /// Select the file to upload from a batch, dropping the rest.
    pub fn pick_first<'a>(&self, paths: &'a [PathBuf]) -> Result<&'a Path> {
        let (first, rest) = paths
            .split_first()
            .ok_or_else(|| AppError::InvalidInput("No resume file given".to_string()))?;

        if !rest.is_empty() {
            warn!(
                "{} extra file(s) ignored; only {} will be uploaded",
                rest.len(),
                first.display()
            );
        }
        Ok(first.as_path())
    }

    /// Read and validate a résumé. Size is checked from metadata first so
    /// oversized files are rejected without being read.
    pub async fn load(&self, path: &Path) -> Result<ResumeFile> {
        if !path.exists() {
            return Err(AppError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| AppError::InvalidInput(format!("Not a file: {}", path.display())))?;

        let size = fs::metadata(path).await?.len();
        let inferred_mime = FileType::from_file_name(&file_name);
        let mime = inferred_mime.is_supported().then(|| inferred_mime.mime());
        let file_type = validate_resume(&file_name, size, mime)?;

        info!(
            "Loading {:?} resume ({:?}): {}",
            file_type,
            self.source,
            path.display()
        );
        let bytes = fs::read(path).await?;

        Ok(ResumeFile {
            path: path.to_path_buf(),
            file_name,
            file_type,
            bytes,
        })
    }

    /// Convenience for the batch entry point.
    pub async fn load_first(&self, paths: &[PathBuf]) -> Result<ResumeFile> {
        let path = self.pick_first(paths)?;
        self.load(path).await
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::validation::MAX_FILE_SIZE;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, size: usize) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, vec![7u8; size]).unwrap();
        path
    }

    #[test]
    fn test_pick_first_drops_the_rest() {
        let manager = InputManager::new().with_source(ResumeSource::Dropped);
        let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.docx")];
        assert_eq!(manager.pick_first(&paths).unwrap(), Path::new("a.pdf"));
        assert!(manager.pick_first(&[]).is_err());
    }

    #[tokio::test]
    async fn test_load_valid_docx() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Resume.DOCX", 2048);

        let resume = InputManager::new().load(&path).await.unwrap();
        assert_eq!(resume.file_type, FileType::Docx);
        assert_eq!(resume.file_name, "Resume.DOCX");
        assert_eq!(resume.size(), 2048);
    }

    #[tokio::test]
    async fn test_load_rejects_oversized_and_missing() {
        let dir = TempDir::new().unwrap();
        let big = write(&dir, "big.pdf", MAX_FILE_SIZE as usize + 1);

        let err = InputManager::new().load(&big).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "File size (5.00MB) exceeds maximum allowed size (5MB)"
        );

        let missing = dir.path().join("nope.pdf");
        assert!(InputManager::new().load(&missing).await.is_err());
    }

    #[tokio::test]
    async fn test_load_first_uses_first_path_only() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "cv.pdf", 10);
        let bad = write(&dir, "cv.txt", 10);

        let manager = InputManager::new().with_source(ResumeSource::Dropped);
        let resume = manager.load_first(&[good.clone(), bad]).await.unwrap();
        assert_eq!(resume.path, good);
    }
}
