//! PDF text extraction
//!
//! Classifies failures before handing the bytes to the extraction library:
//! a missing `%PDF-` signature is an invalid file, an `/Encrypt` entry means
//! password protection, and extraction errors mentioning the cross-reference
//! table are reported as corruption. Extracted text then gets a line-wrap
//! repair pass, since PDF extraction frequently splits words and glues bullet
//! glyphs onto the previous line.

use crate::error::{AtsScannerError, DocumentErrorKind, Result};
use crate::input::heuristics::{count_lines, count_words, estimate_pages, LayoutHeuristics};
use crate::input::manager::ExtractedDocument;
use crate::processing::document::ResumeFileType;
use log::debug;
use regex::Regex;

const PDF_SIGNATURE: &[u8] = b"%PDF-";
/// Below this many characters per reported page, the page is assumed to be
/// mostly images or graphics.
const MIN_CHARS_PER_PAGE: usize = 500;

pub struct PdfExtractor {
    heuristics: LayoutHeuristics,
    glued_bullet_regex: Regex,
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            heuristics: LayoutHeuristics::new(),
            glued_bullet_regex: Regex::new(r"([^\s•])[ \t]+•[ \t]*")
                .expect("Invalid glued bullet regex"),
        }
    }

    pub fn extract(&self, bytes: &[u8]) -> Result<ExtractedDocument> {
        if !bytes.starts_with(PDF_SIGNATURE) {
            return Err(AtsScannerError::document(
                DocumentErrorKind::InvalidFormat,
                "File does not start with a PDF signature",
            ));
        }

        if contains_bytes(bytes, b"/Encrypt") {
            return Err(AtsScannerError::document(
                DocumentErrorKind::PasswordProtected,
                "PDF has an encryption dictionary",
            ));
        }

        let raw_text = pdf_extract::extract_text_from_mem(bytes).map_err(classify_extract_error)?;
        let text = self.repair_line_wraps(&raw_text);

        let estimated_pages = match count_page_objects(bytes) {
            0 => estimate_pages(&text),
            pages => pages,
        };
        debug!("PDF extraction: {} chars, {} pages", text.len(), estimated_pages);

        let has_images =
            estimated_pages > 0 && text.chars().count() < MIN_CHARS_PER_PAGE * estimated_pages;

        Ok(ExtractedDocument {
            word_count: count_words(&text),
            line_count: count_lines(&text),
            has_images,
            has_tables: self.heuristics.detect_tables(&text),
            has_columns: self.heuristics.detect_columns(&text),
            has_headers_footers: self.heuristics.detect_headers_footers(&text),
            estimated_pages,
            file_type: ResumeFileType::Pdf,
            text,
        })
    }

    /// Undo common extraction artifacts: hyphen-broken words, lines cut
    /// mid-sentence, and bullet glyphs glued to the previous line.
    fn repair_line_wraps(&self, text: &str) -> String {
        let text = self.glued_bullet_regex.replace_all(text, "$1\n• ");

        let mut repaired: Vec<String> = Vec::new();

        for raw_line in text.lines() {
            let line = raw_line.trim_end();

            let starts_lower = line
                .chars()
                .next()
                .map_or(false, |c| c.is_lowercase() && c.is_alphabetic());

            if starts_lower {
                if let Some(prev) = repaired.last_mut() {
                    let hyphen_break = prev.ends_with('-')
                        && prev
                            .chars()
                            .rev()
                            .nth(1)
                            .map_or(false, |c| c.is_alphabetic());
                    if hyphen_break {
                        prev.pop();
                        prev.push_str(line);
                        continue;
                    }

                    // A line ending in a bare letter was cut mid-sentence.
                    if prev.chars().last().map_or(false, |c| c.is_alphabetic()) {
                        prev.push(' ');
                        prev.push_str(line);
                        continue;
                    }
                }
            }

            repaired.push(line.to_string());
        }

        repaired.join("\n")
    }
}

fn classify_extract_error(err: pdf_extract::OutputError) -> AtsScannerError {
    let message = err.to_string();
    let lower = message.to_lowercase();

    let kind = if lower.contains("xref") || lower.contains("cross-reference") {
        DocumentErrorKind::Corrupted
    } else if lower.contains("encrypt") || lower.contains("password") {
        DocumentErrorKind::PasswordProtected
    } else {
        DocumentErrorKind::Unknown
    };

    AtsScannerError::document(kind, message)
}

/// Count `/Type /Page` object markers in the raw bytes, excluding the
/// `/Type /Pages` tree nodes. Zero means the structure was not recognized and
/// the caller should fall back to a word-count estimate.
fn count_page_objects(bytes: &[u8]) -> usize {
    let mut count = 0;
    for marker in [&b"/Type /Page"[..], &b"/Type/Page"[..]] {
        let mut offset = 0;
        while let Some(pos) = find_bytes(&bytes[offset..], marker) {
            let end = offset + pos + marker.len();
            if bytes.get(end) != Some(&b's') {
                count += 1;
            }
            offset = end;
        }
    }
    count
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle).is_some()
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
