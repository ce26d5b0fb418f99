//! Error handling for the ATS scanner

use thiserror::Error;

/// Classified document extraction failures. Every underlying parser error is
/// mapped onto one of these kinds so callers never see a raw library error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DocumentErrorKind {
    /// Structural damage (e.g. a broken cross-reference table)
    Corrupted,
    /// The file is encrypted and cannot be read without a password
    PasswordProtected,
    /// The bytes are not a valid file of the declared format
    InvalidFormat,
    /// Extraction failed for a reason we could not classify
    Unknown,
}

impl DocumentErrorKind {
    /// User-actionable guidance shown alongside the error message.
    pub fn guidance(&self) -> &'static str {
        match self {
            DocumentErrorKind::Corrupted => {
                "The file appears damaged. Re-export it from your editor and try again."
            }
            DocumentErrorKind::PasswordProtected => {
                "Remove the password protection (save an unencrypted copy) and re-upload."
            }
            DocumentErrorKind::InvalidFormat => {
                "The file does not match its declared format. Export a fresh PDF or DOCX."
            }
            DocumentErrorKind::Unknown => {
                "Try re-saving the file from its source application, or use a different format."
            }
        }
    }
}

impl std::fmt::Display for DocumentErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentErrorKind::Corrupted => write!(f, "corrupted"),
            DocumentErrorKind::PasswordProtected => write!(f, "password-protected"),
            DocumentErrorKind::InvalidFormat => write!(f, "invalid format"),
            DocumentErrorKind::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Error, Debug)]
pub enum AtsScannerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document parse error ({kind}): {message}. {}", kind.guidance())]
    DocumentParse {
        kind: DocumentErrorKind,
        message: String,
    },

    #[error("File format not supported: {0}")]
    UnsupportedFileType(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, AtsScannerError>;

impl AtsScannerError {
    /// Shorthand for a classified extraction failure.
    pub fn document(kind: DocumentErrorKind, message: impl Into<String>) -> Self {
        AtsScannerError::DocumentParse {
            kind,
            message: message.into(),
        }
    }
}

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for AtsScannerError {
    fn from(err: anyhow::Error) -> Self {
        AtsScannerError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_error_carries_guidance() {
        let err = AtsScannerError::document(DocumentErrorKind::PasswordProtected, "encrypted");
        let rendered = err.to_string();
        assert!(rendered.contains("password-protected"));
        assert!(rendered.contains("Remove the password protection"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DocumentErrorKind::Corrupted.to_string(), "corrupted");
        assert_eq!(DocumentErrorKind::InvalidFormat.to_string(), "invalid format");
    }
}
