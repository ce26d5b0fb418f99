//! File type detection

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Pdf,
    Docx,
    Unknown,
}

impl FileKind {
    pub fn from_mime_type(mime: &str) -> Self {
        match mime {
            PDF_MIME => FileKind::Pdf,
            DOCX_MIME => FileKind::Docx,
            _ => FileKind::Unknown,
        }
    }

    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => FileKind::Pdf,
            "docx" => FileKind::Docx,
            _ => FileKind::Unknown,
        }
    }

    pub fn mime_type(&self) -> Option<&'static str> {
        match self {
            FileKind::Pdf => Some(PDF_MIME),
            FileKind::Docx => Some(DOCX_MIME),
            FileKind::Unknown => None,
        }
    }
}
