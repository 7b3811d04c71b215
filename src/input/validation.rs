//! Client-side validation: résumé files, role descriptions and the analyze gate.
//!
//! Everything here is pure and synchronous; a failure is reported inline and
//! never reaches the network.

use crate::input::file_detector::FileType;
use thiserror::Error;

pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;
pub const ALLOWED_EXTENSIONS: [&str; 2] = [".pdf", ".docx"];

pub const MIN_ROLE_CHARS: usize = 50;
pub const MAX_ROLE_CHARS: usize = 10_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("File is empty")]
    EmptyFile,

    #[error("File size ({}MB) exceeds maximum allowed size (5MB)", format_megabytes(.size))]
    FileTooLarge { size: u64 },

    #[error("Invalid file type. Allowed types: {}", ALLOWED_EXTENSIONS.join(", "))]
    InvalidFileType,

    #[error("Minimum 50 characters required ({needed} more needed)")]
    RoleTooShort { needed: usize },

    #[error("Maximum 10000 characters exceeded ({over} over limit)")]
    RoleTooLong { over: usize },

    #[error("Required: {}", .0.join(", "))]
    IncompleteForm(Vec<&'static str>),
}

fn format_megabytes(size: &u64) -> String {
    format!("{:.2}", *size as f64 / (1024.0 * 1024.0))
}

/// Validate a candidate résumé. Size is checked before type; the MIME type
/// wins when it is recognised, otherwise the extension decides.
pub fn validate_resume(name: &str, size: u64, mime: Option<&str>) -> Result<FileType, ValidationError> {
    if size == 0 {
        return Err(ValidationError::EmptyFile);
    }
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::FileTooLarge { size });
    }

    let by_mime = mime.map(FileType::from_mime).unwrap_or(FileType::Unknown);
    if by_mime.is_supported() {
        return Ok(by_mime);
    }

    let by_name = FileType::from_file_name(name);
    if by_name.is_supported() {
        Ok(by_name)
    } else {
        Err(ValidationError::InvalidFileType)
    }
}

/// Human-readable size as shown next to an uploaded file.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} bytes", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.2} KB", bytes as f64 / 1024.0)
    } else {
        format!("{} MB", format_megabytes(&bytes))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleDescriptionStatus {
    /// Nothing typed yet: not valid, but no message either.
    Empty,
    TooShort { needed: usize },
    TooLong { over: usize },
    Valid,
}

impl RoleDescriptionStatus {
    /// Inline state, from the text exactly as typed.
    pub fn assess(text: &str) -> Self {
        Self::from_count(char_count(text))
    }

    /// State the analyze request is judged on; surrounding whitespace does
    /// not count.
    pub fn submittable(text: &str) -> Self {
        Self::from_count(text.trim().chars().count())
    }

    fn from_count(count: usize) -> Self {
        if count == 0 {
            RoleDescriptionStatus::Empty
        } else if count < MIN_ROLE_CHARS {
            RoleDescriptionStatus::TooShort {
                needed: MIN_ROLE_CHARS - count,
            }
        } else if count > MAX_ROLE_CHARS {
            RoleDescriptionStatus::TooLong {
                over: count - MAX_ROLE_CHARS,
            }
        } else {
            RoleDescriptionStatus::Valid
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, RoleDescriptionStatus::Valid)
    }

    pub fn into_result(self) -> Result<(), ValidationError> {
        match self {
            RoleDescriptionStatus::Empty => Err(ValidationError::RoleTooShort {
                needed: MIN_ROLE_CHARS,
            }),
            RoleDescriptionStatus::TooShort { needed } => Err(ValidationError::RoleTooShort { needed }),
            RoleDescriptionStatus::TooLong { over } => Err(ValidationError::RoleTooLong { over }),
            RoleDescriptionStatus::Valid => Ok(()),
        }
    }

    /// Inline message; `None` for a valid or still empty description.
    pub fn message(&self) -> Option<String> {
        match self {
            RoleDescriptionStatus::Empty => None,
            other => other.into_result().err().map(|e| e.to_string()),
        }
    }
}

pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Reject a role description the analyze request would refuse.
pub fn check_role_description(text: &str) -> Result<(), ValidationError> {
    RoleDescriptionStatus::submittable(text).into_result()
}

/// Counter shown beside the role description, e.g. `1,234 / 10,000 characters`.
pub fn format_char_counter(text: &str) -> String {
    let count = char_count(text);
    let suffix = if RoleDescriptionStatus::assess(text).is_valid() { " ✓" } else { "" };
    format!(
        "{} / {} characters{}",
        group_thousands(count),
        group_thousands(MAX_ROLE_CHARS),
        suffix
    )
}

fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Inputs the analyze action depends on.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeGate<'a> {
    pub session_id: Option<&'a str>,
    pub company: Option<&'a str>,
    pub role_description: &'a str,
}

impl<'a> AnalyzeGate<'a> {
    pub fn is_enabled(&self) -> bool {
        self.session_id.is_some()
            && self.company.is_some()
            && check_role_description(self.role_description).is_ok()
    }

    /// Missing pieces in the order they are filled in on the dashboard.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.session_id.is_none() {
            missing.push("Resume");
        }
        if self.company.is_none() {
            missing.push("Company");
        }
        if check_role_description(self.role_description).is_err() {
            missing.push("Role Description");
        }
        missing
    }

    pub fn check(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::IncompleteForm(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_size_boundaries() {
        assert_eq!(validate_resume("a.pdf", 0, None), Err(ValidationError::EmptyFile));
        assert_eq!(validate_resume("a.pdf", 1, None), Ok(FileType::Pdf));
        assert_eq!(validate_resume("a.pdf", MAX_FILE_SIZE, None), Ok(FileType::Pdf));
        assert_eq!(
            validate_resume("a.pdf", MAX_FILE_SIZE + 1, None),
            Err(ValidationError::FileTooLarge { size: MAX_FILE_SIZE + 1 })
        );
    }

    #[test]
    fn test_size_is_checked_before_type() {
        assert_eq!(validate_resume("notes.txt", 0, None), Err(ValidationError::EmptyFile));
    }

    #[test]
    fn test_too_large_message_reports_megabytes() {
        let err = validate_resume("a.pdf", 6 * 1024 * 1024, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "File size (6.00MB) exceeds maximum allowed size (5MB)"
        );
    }

    #[test]
    fn test_type_by_mime_or_extension() {
        assert_eq!(validate_resume("blob", 10, Some("application/pdf")), Ok(FileType::Pdf));
        assert_eq!(validate_resume("cv.DOCX", 10, Some("application/zip")), Ok(FileType::Docx));
        let err = validate_resume("cv.txt", 10, Some("text/plain")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid file type. Allowed types: .pdf, .docx");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024), "3.00 MB");
    }

    #[test]
    fn test_role_description_bounds() {
        assert_eq!(
            RoleDescriptionStatus::assess(&"a".repeat(49)),
            RoleDescriptionStatus::TooShort { needed: 1 }
        );
        assert!(RoleDescriptionStatus::assess(&"a".repeat(50)).is_valid());
        assert!(RoleDescriptionStatus::assess(&"a".repeat(10_000)).is_valid());
        assert_eq!(
            RoleDescriptionStatus::assess(&"a".repeat(10_003)),
            RoleDescriptionStatus::TooLong { over: 3 }
        );
    }

    #[test]
    fn test_role_description_messages_state_exact_delta() {
        let short = RoleDescriptionStatus::assess(&"x".repeat(20));
        assert_eq!(
            short.message().as_deref(),
            Some("Minimum 50 characters required (30 more needed)")
        );
        let long = RoleDescriptionStatus::assess(&"x".repeat(10_010));
        assert_eq!(
            long.message().as_deref(),
            Some("Maximum 10000 characters exceeded (10 over limit)")
        );
        assert_eq!(RoleDescriptionStatus::assess(&"x".repeat(60)).message(), None);
    }

    #[test]
    fn test_role_description_counts_characters_not_bytes() {
        // 50 two-byte characters
        assert!(RoleDescriptionStatus::assess(&"é".repeat(50)).is_valid());
    }

    #[test]
    fn test_inline_state_counts_text_as_typed() {
        let padded = format!("   {}   ", "a".repeat(48));
        assert_eq!(RoleDescriptionStatus::assess(&padded), RoleDescriptionStatus::Valid);
        assert_eq!(
            RoleDescriptionStatus::submittable(&padded),
            RoleDescriptionStatus::TooShort { needed: 2 }
        );
        assert_eq!(
            check_role_description(&padded),
            Err(ValidationError::RoleTooShort { needed: 2 })
        );
    }

    #[test]
    fn test_empty_description_has_no_message() {
        let status = RoleDescriptionStatus::assess("");
        assert_eq!(status, RoleDescriptionStatus::Empty);
        assert!(!status.is_valid());
        assert_eq!(status.message(), None);
        assert_eq!(
            RoleDescriptionStatus::assess(" ").message().as_deref(),
            Some("Minimum 50 characters required (49 more needed)")
        );
        assert!(check_role_description("").is_err());
    }

    #[test]
    fn test_char_counter() {
        assert_eq!(format_char_counter(&"a".repeat(1234)), "1,234 / 10,000 characters ✓");
        assert_eq!(format_char_counter("short"), "5 / 10,000 characters");
    }

    #[test]
    fn test_analyze_gate() {
        let role = "r".repeat(120);
        let gate = AnalyzeGate {
            session_id: Some("abc"),
            company: Some("stripe"),
            role_description: &role,
        };
        assert!(gate.is_enabled());
        assert!(gate.check().is_ok());

        let padded = format!("  {}  ", "r".repeat(48));
        let gate = AnalyzeGate {
            session_id: Some("abc"),
            company: Some("stripe"),
            role_description: &padded,
        };
        assert!(!gate.is_enabled());
        assert_eq!(gate.missing_fields(), vec!["Role Description"]);

        let gate = AnalyzeGate {
            session_id: None,
            company: Some("stripe"),
            role_description: "too short",
        };
        assert!(!gate.is_enabled());
        assert_eq!(gate.missing_fields(), vec!["Resume", "Role Description"]);
        assert_eq!(
            gate.check().unwrap_err().to_string(),
            "Required: Resume, Role Description"
        );
    }
}
