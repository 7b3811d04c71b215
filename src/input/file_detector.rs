//! Résumé file type detection

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileType::Pdf,
            "docx" => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    pub fn from_mime(mime: &str) -> Self {
        match mime {
            PDF_MIME => FileType::Pdf,
            DOCX_MIME => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    /// Type from a file name's last extension, e.g. `cv.final.PDF`.
    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((_, ext)) => Self::from_extension(ext),
            None => FileType::Unknown,
        }
    }

    /// MIME type sent with the multipart upload. Unknown types go out as
    /// an opaque byte stream and are left to the backend to reject.
    pub fn mime(&self) -> &'static str {
        match self {
            FileType::Pdf => PDF_MIME,
            FileType::Docx => DOCX_MIME,
            FileType::Unknown => "application/octet-stream",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}
