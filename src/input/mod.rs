//! Input handling: file type detection, PDF/DOCX extraction, and resume
//! parsing.

pub mod docx;
pub mod file_detector;
pub mod heuristics;
pub mod manager;
pub mod pdf;

pub use file_detector::FileKind;
pub use manager::{DocumentExtractor, ExtractedDocument};
