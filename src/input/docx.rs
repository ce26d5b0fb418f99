//! DOCX text extraction
//!
//! A DOCX file is a zip archive with the document body in
//! `word/document.xml`. Encrypted DOCX files are OLE compound files, so the
//! CFB magic is checked before the zip is opened to report password
//! protection instead of a generic format error. Structure flags come from
//! the markup itself: `<w:tbl>` for tables, `<w:drawing>`/`<pic:pic>` and
//! embedded objects for images.

use crate::error::{AtsScannerError, DocumentErrorKind, Result};
use crate::input::heuristics::{count_lines, count_words, estimate_pages, LayoutHeuristics};
use crate::input::manager::ExtractedDocument;
use crate::processing::document::ResumeFileType;
use log::debug;
use regex::Regex;
use std::io::{Cursor, Read};

/// OLE compound file magic; encrypted Office documents use this container.
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const DOCUMENT_XML: &str = "word/document.xml";

pub struct DocxExtractor {
    heuristics: LayoutHeuristics,
    tag_regex: Regex,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxExtractor {
    pub fn new() -> Self {
        Self {
            heuristics: LayoutHeuristics::new(),
            tag_regex: Regex::new(r"<[^>]*>").expect("Invalid XML tag regex"),
        }
    }

    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        if bytes.starts_with(CFB_MAGIC) {
            return Err(AtsScannerError::document(
                DocumentErrorKind::PasswordProtected,
                "DOCX is stored in an encrypted OLE container",
            ));
        }

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
            AtsScannerError::document(
                DocumentErrorKind::InvalidFormat,
                format!("File is not a valid DOCX archive: {}", e),
            )
        })?;

        let mut document_xml = String::new();
        archive
            .by_name(DOCUMENT_XML)
            .map_err(|e| {
                AtsScannerError::document(
                    DocumentErrorKind::Corrupted,
                    format!("DOCX archive has no document body: {}", e),
                )
            })?
            .read_to_string(&mut document_xml)
            .map_err(|e| {
                AtsScannerError::document(
                    DocumentErrorKind::Corrupted,
                    format!("Failed to read document body: {}", e),
                )
            })?;

        let text = self.xml_to_text(&document_xml);
        debug!("DOCX extraction: {} chars of text", text.len());

        let has_images = document_xml.contains("<w:drawing")
            || document_xml.contains("<pic:pic")
            || document_xml.contains("<w:object");
        let has_tables = document_xml.contains("<w:tbl") || self.heuristics.detect_tables(&text);

        Ok(ExtractedDocument {
            word_count: count_words(&text),
            line_count: count_lines(&text),
            has_images,
            has_tables,
            has_columns: self.heuristics.detect_columns(&text),
            has_headers_footers: self.heuristics.detect_headers_footers(&text),
            estimated_pages: estimate_pages(&text),
            file_type: ResumeFileType::Docx,
            text,
        })
    }

    fn xml_to_text(&self, xml: &str) -> String {
        let text = xml
            .replace("</w:p>", "\n")
            .replace("<w:tab/>", "\t")
            .replace("<w:br/>", "\n");

        let text = self.tag_regex.replace_all(&text, "");

        let text = text
            .replace("&amp;", "&")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&#39;", "'");

        text.lines()
            .map(str::trim_end)
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    fn docx_bytes(document_xml: &str) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file(DOCUMENT_XML, FileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_extracts_paragraph_text() {
        let extractor = DocxExtractor::new();
        let xml = "<w:document><w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p><w:p><w:r><w:t>Senior Engineer</w:t></w:r></w:p></w:document>";
        let doc = extractor.extract(&docx_bytes(xml)).unwrap();
        assert_eq!(doc.text, "Jane Doe\nSenior Engineer");
        assert_eq!(doc.file_type, ResumeFileType::Docx);
    }

    #[test]
    fn test_decodes_entities_and_breaks() {
        let extractor = DocxExtractor::new();
        let xml = "<w:p><w:t>R&amp;D lead</w:t><w:br/><w:t>&quot;quoted&quot;</w:t></w:p>";
        let doc = extractor.extract(&docx_bytes(xml)).unwrap();
        assert_eq!(doc.text, "R&D lead\n\"quoted\"");
    }

    #[test]
    fn test_detects_tables_and_images_from_markup() {
        let extractor = DocxExtractor::new();
        let xml = "<w:tbl><w:p><w:t>cell</w:t></w:p></w:tbl><w:p><w:drawing/><w:t>Body text of the resume goes here</w:t></w:p>";
        let doc = extractor.extract(&docx_bytes(xml)).unwrap();
        assert!(doc.has_tables);
        assert!(doc.has_images);
    }

    #[test]
    fn test_cfb_container_reported_as_password_protected() {
        let extractor = DocxExtractor::new();
        let mut bytes = CFB_MAGIC.to_vec();
        bytes.extend_from_slice(&[0u8; 64]);
        let err = extractor.extract(&bytes).unwrap_err();
        assert!(err.to_string().contains("password-protected"));
    }

    #[test]
    fn test_non_zip_reported_as_invalid_format() {
        let extractor = DocxExtractor::new();
        let err = extractor.extract(b"plain text pretending").unwrap_err();
        assert!(err.to_string().contains("invalid format"));
    }

    #[test]
    fn test_zip_without_document_xml_is_corrupted() {
        let extractor = DocxExtractor::new();
        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/other.xml", FileOptions::default())
                .unwrap();
            writer.write_all(b"<x/>").unwrap();
            writer.finish().unwrap();
        }
        let err = extractor.extract(&buffer.into_inner()).unwrap_err();
        assert!(err.to_string().contains("corrupted"));
    }
}
