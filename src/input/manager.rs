//! Document extraction routing and resume parsing
//!
//! Routes a file to the right extractor by declared MIME type (or file
//! extension when none is given), then runs the shared pipeline: normalize,
//! detect sections, extract bullets per section, and assemble metadata.

use crate::error::{AtsScannerError, Result};
use crate::input::docx::DocxExtractor;
use crate::input::file_detector::FileKind;
use crate::input::pdf::PdfExtractor;
use crate::processing::document::{ParsedResume, ResumeFileType, ResumeMetadata};
use crate::processing::normalizer::TextNormalizer;
use crate::processing::sections::SectionDetector;
use log::info;
use std::path::Path;
use tokio::fs;

/// Raw extractor output: the plain text plus everything the extractor could
/// tell about the document's structure.
#[derive(Debug, Clone)]
pub struct ExtractedDocument {
    pub text: String,
    pub word_count: usize,
    pub line_count: usize,
    pub has_images: bool,
    pub has_tables: bool,
    pub has_columns: bool,
    pub has_headers_footers: bool,
    pub estimated_pages: usize,
    pub file_type: ResumeFileType,
}

pub struct DocumentExtractor {
    pdf: PdfExtractor,
    docx: DocxExtractor,
    normalizer: TextNormalizer,
    section_detector: SectionDetector,
}

impl DocumentExtractor {
    pub fn new() -> Self {
        Self {
            pdf: PdfExtractor::new(),
            docx: DocxExtractor::new(),
            normalizer: TextNormalizer::new(),
            section_detector: SectionDetector::new(),
        }
    }

    /// Read and fully parse a resume file into sections and metadata.
    pub async fn parse_resume(
        &self,
        path: &Path,
        declared_mime: Option<&str>,
    ) -> Result<ParsedResume> {
        if !path.exists() {
            return Err(AtsScannerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let kind = self.resolve_kind(path, declared_mime)?;
        let bytes = fs::read(path).await?;

        self.parse_resume_bytes(&bytes, kind)
    }

    /// Same pipeline over in-memory bytes; `kind` must already be resolved.
    pub fn parse_resume_bytes(&self, bytes: &[u8], kind: FileKind) -> Result<ParsedResume> {
        let extracted = match kind {
            FileKind::Pdf => {
                info!("Extracting text from PDF ({} bytes)", bytes.len());
                self.pdf.extract(bytes)?
            }
            FileKind::Docx => {
                info!("Extracting text from DOCX ({} bytes)", bytes.len());
                self.docx.extract(bytes)?
            }
            FileKind::Unknown => {
                return Err(AtsScannerError::UnsupportedFileType(
                    "expected a PDF or DOCX file".to_string(),
                ));
            }
        };

        let normalized_text = self.normalizer.normalize(&extracted.text);

        let mut sections = self.section_detector.detect_sections(&normalized_text);
        for section in &mut sections {
            section.bullets = self.normalizer.extract_bullets(&section.content);
        }

        let metadata = ResumeMetadata {
            word_count: extracted.word_count,
            line_count: extracted.line_count,
            has_images: extracted.has_images,
            has_tables: extracted.has_tables,
            has_columns: extracted.has_columns,
            has_headers_footers: extracted.has_headers_footers,
            estimated_pages: extracted.estimated_pages.max(1),
            file_size: bytes.len(),
            file_type: extracted.file_type,
        };

        Ok(ParsedResume {
            raw_text: extracted.text,
            normalized_text,
            sections,
            metadata,
        })
    }

    fn resolve_kind(&self, path: &Path, declared_mime: Option<&str>) -> Result<FileKind> {
        let kind = match declared_mime {
            Some(mime) => FileKind::from_mime_type(mime),
            None => path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(FileKind::from_extension)
                .unwrap_or(FileKind::Unknown),
        };

        if kind == FileKind::Unknown {
            return Err(AtsScannerError::UnsupportedFileType(format!(
                "{} (accepted: PDF, DOCX)",
                path.display()
            )));
        }

        Ok(kind)
    }
}

impl Default for DocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::document::SectionType;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;

    fn docx_with_text(lines: &[&str]) -> Vec<u8> {
        let body: String = lines
            .iter()
            .map(|line| format!("<w:p><w:r><w:t>{}</w:t></w:r></w:p>", line))
            .collect();
        let xml = format!("<w:document><w:body>{}</w:body></w:document>", body);

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", FileOptions::default())
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_parse_resume_bytes_detects_sections_and_bullets() {
        let extractor = DocumentExtractor::new();
        let bytes = docx_with_text(&[
            "EXPERIENCE",
            "• Led the migration of billing services",
            "• Cut infrastructure spend by 30%",
            "SKILLS",
            "Rust, Docker, Kubernetes",
        ]);

        let resume = extractor
            .parse_resume_bytes(&bytes, FileKind::Docx)
            .unwrap();

        let experience = resume
            .sections
            .iter()
            .find(|s| s.name == SectionType::Experience)
            .expect("experience section");
        assert_eq!(experience.bullets.len(), 2);
        assert!(resume
            .sections
            .iter()
            .any(|s| s.name == SectionType::Skills));
        assert_eq!(resume.metadata.file_type, ResumeFileType::Docx);
        assert_eq!(resume.metadata.estimated_pages, 1);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let extractor = DocumentExtractor::new();
        let err = extractor
            .parse_resume_bytes(b"whatever", FileKind::Unknown)
            .unwrap_err();
        assert!(matches!(err, AtsScannerError::UnsupportedFileType(_)));
    }
}
